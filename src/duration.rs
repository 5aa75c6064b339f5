/// Shown wherever a time is unknown or zero
pub const ZERO_TIME: &str = "00:00";

/// Format a raw feed duration for display
///
/// Accepts plain seconds (`"125"` → `"02:05"`, `"3725"` → `"01:02:05"`) and
/// colon separated values, whose parts are zero padded (`"5:09"` → `"05:09"`).
/// Values with more than three parts are returned unchanged. Empty, zero and
/// non-numeric values format as `"00:00"`.
pub fn format_duration(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw == "0" {
        return ZERO_TIME.to_string();
    }

    if raw.contains(':') {
        let parts: Vec<&str> = raw.split(':').collect();
        return match parts.len() {
            2 | 3 => parts
                .iter()
                .map(|part| format!("{:0>2}", part))
                .collect::<Vec<_>>()
                .join(":"),
            _ => raw.to_string(),
        };
    }

    match leading_integer(raw) {
        Some(total) => format_total_seconds(total),
        None => ZERO_TIME.to_string(),
    }
}

/// Format a playback position or media duration given in seconds
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return ZERO_TIME.to_string();
    }
    format_total_seconds(seconds.floor() as u64)
}

fn format_total_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Integer value of the leading digits, so `"125.6"` reads as 125
fn leading_integer(raw: &str) -> Option<u64> {
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
