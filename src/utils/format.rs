//! Value formatting helpers

/// Strip one pair of enclosing double quotes
///
/// Strings of two characters or fewer are returned unchanged, so `"\""`
/// and `"\"\""` stay as they are.
pub fn unwrap_quoted(s: &str) -> &str {
    if s.len() > 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

const SECONDS_PER_DAY: u32 = 24 * 3600;

/// Format a duration in seconds as a clock string
///
/// Durations of at least one hour use `HH:mm:ss`, shorter ones `mm:ss`.
/// The clock wraps at 24 hours.
pub fn format_duration(seconds: Option<u32>) -> Option<String> {
    let seconds = seconds?;
    let clock = seconds % SECONDS_PER_DAY;
    let (h, m, s) = (clock / 3600, clock % 3600 / 60, clock % 60);
    if seconds >= 3600 {
        Some(format!("{:02}:{:02}:{:02}", h, m, s))
    } else {
        Some(format!("{:02}:{:02}", m, s))
    }
}

/// Check if a value is the ZDF placeholder `zdf`, ignoring case
pub fn is_placeholder(value: &str) -> bool {
    value.eq_ignore_ascii_case("zdf")
}
