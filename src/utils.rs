//! Shared formatting helpers for the toolup CLI.

use std::borrow::Cow;

/// Formats a duration in seconds into a human-readable string.
///
/// # Examples
///
/// ```
/// use toolup::utils::format_duration;
///
/// assert_eq!(format_duration(3661), "1h 1m 1s");
/// assert_eq!(format_duration(61), "1m 1s");
/// assert_eq!(format_duration(30), "30s");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    match (hours, minutes) {
        (0, 0) => format!("{}s", secs),
        (0, _) => format!("{}m {}s", minutes, secs),
        _ => format!("{}h {}m {}s", hours, minutes, secs),
    }
}

/// Truncates a string to a maximum length, appending "..." if truncated.
///
/// Returns a `Cow<str>` to avoid allocation when no truncation is needed.
/// The cut point never splits a multi-byte character.
///
/// # Examples
///
/// ```
/// use toolup::utils::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.len() <= max_len {
        return Cow::Borrowed(s);
    }

    let keep = if max_len <= 3 { max_len } else { max_len - 3 };
    let mut cut = keep;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }

    if max_len <= 3 {
        Cow::Borrowed(&s[..cut])
    } else {
        Cow::Owned(format!("{}...", &s[..cut]))
    }
}
