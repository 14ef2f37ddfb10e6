// Countdown / uptime status line

use std::time::Duration;

/// Whole seconds until the next content refresh, never below zero.
pub fn countdown_secs(interval: Duration, since_redraw: Duration) -> u64 {
    interval.as_secs().saturating_sub(since_redraw.as_secs())
}

/// `HHh MMm SSs`; hours are not wrapped.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (h, rem) = (secs / 3600, secs % 3600);
    let (m, s) = (rem / 60, rem % 60);
    format!("{h:02}h {m:02}m {s:02}s")
}

pub fn message(remaining_secs: u64, uptime: Duration) -> String {
    format!(
        "🔄 Refreshing in {remaining_secs}s | Uptime: {}",
        format_uptime(uptime)
    )
}
