use time::OffsetDateTime;

/// Calendar timestamp for a raw `created_utc` value: floor to whole seconds since the
/// Unix epoch, UTC. Returns `None` for NaN/infinite or out-of-range values.
pub fn from_created_utc(created_utc: f64) -> Option<OffsetDateTime> {
    if !created_utc.is_finite() {
        return None;
    }
    let secs = created_utc.floor();
    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(secs as i64).ok()
}
