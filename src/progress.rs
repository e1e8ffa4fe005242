//! Progress reporting for multi-page crawls.

use indicatif::{ProgressBar, ProgressStyle};

/// Open-ended page counter: the number of pages isn't known until the token runs out.
/// The prefix slot carries the running item count.
pub fn make_page_progress(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} pages: {pos}  items: {prefix}  elapsed: {elapsed_precise}"
    )
    .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_prefix("0");
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
