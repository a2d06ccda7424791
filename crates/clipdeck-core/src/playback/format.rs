const ZERO_TIME: &str = "00:00";

/// Format seconds as zero-padded `MM:SS`.
///
/// Total: negative, infinite and NaN inputs all format as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_TIME.to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{minutes:02}:{remaining:02}")
}

/// Format seconds as `MM:SS.CC` for the timestamp overlay.
///
/// `CC` is the two-digit centisecond component, truncated.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return format!("{ZERO_TIME}.00");
    }

    let whole = seconds.floor();
    let centis = (((seconds - whole) * 100.0).floor() as u64).min(99);
    format!("{}.{centis:02}", format_time(whole))
}
