use anyhow::Result;
use clap::{Parser, Subcommand};
use rscrape::{ClientOptions, ListingSort, RedditClient, TopWindow};
use serde::Serialize;
use std::io::{self, BufWriter, Write};

#[derive(Parser)]
#[command(name = "rscrape", version, about = "Fetch subreddits, posts and flattened comment trees as NDJSON")]
struct Cli {
    /// API base URL (overrides RSCRAPE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Show a page counter while crawling
    #[arg(long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Subreddit metadata
    Subreddit { name: String },

    /// Posts from a subreddit listing
    Posts {
        subreddit: String,
        #[arg(long, default_value = "new")]
        sort: ListingSort,
        /// Window for --sort top; unknown values mean "all"
        #[arg(long, default_value = "all")]
        top: String,
        /// Continuation token to resume after
        #[arg(long)]
        after: Option<String>,
        /// Maximum number of pages to follow
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Comments of a post, reply trees flattened depth-first
    Comments {
        subreddit: String,
        post_id: String,
        #[arg(long)]
        after: Option<String>,
    },
}

fn write_ndjson<W: Write, T: Serialize>(out: &mut W, items: &[T]) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut opts = ClientOptions::from_env().with_progress(cli.progress);
    if let Some(url) = cli.base_url {
        opts = opts.with_base_url(url);
    }
    let client = RedditClient::with_options(opts)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Subreddit { name } => {
            let sub = client.subreddit(&name)?;
            write_ndjson(&mut out, std::slice::from_ref(&sub))?;
        }
        Command::Posts { subreddit, sort, top, after, pages } => {
            let top = TopWindow::parse_lenient(&top);
            let mut next = String::new();
            for page in client.post_pages(&subreddit, sort, top, after.as_deref()).take(pages.max(1)) {
                let page = page?;
                write_ndjson(&mut out, &page.items)?;
                next = page.next_token().to_string();
            }
            eprintln!("next: {next}");
        }
        Command::Comments { subreddit, post_id, after } => {
            let page = client.comments(&subreddit, &post_id, after.as_deref())?;
            write_ndjson(&mut out, &page.items)?;
            eprintln!("next: {}", page.next_token());
            eprintln!("deferred: {}", page.deferred.join(","));
        }
    }

    out.flush()?;
    Ok(())
}
