use std::time::Duration;

/// Render an elapsed time as "1 hour(s), 2 minute(s), 3 second(s)".
///
/// Zero components are left out and sub-second remainders are dropped. A
/// duration under one second renders as "0 second(s)".
pub fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours} hour(s)"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} minute(s)"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds} second(s)"));
    }
    parts.join(", ")
}
