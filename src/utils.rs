//! Small shared helpers

use std::time::Duration;

/// Human-readable duration: `850ms`, `2.35s`, `1m 5s`, `1h 2m`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else if secs < 3600.0 {
        let whole = duration.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    } else {
        let whole = duration.as_secs();
        format!("{}h {}m", whole / 3600, (whole % 3600) / 60)
    }
}
