

/// Truncates to `max_chars` characters, appending `...` when cut.
#[inline]
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}


/// Drops the query string of a media URL so download tokens stay out of logs.
#[inline]
pub fn strip_query(reference: &str) -> &str {
    match reference.split_once('?') {
        Some((base, _)) => base,
        None => reference,
    }
}
