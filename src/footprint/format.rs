//! Number formatting for package documents.
//!
//! All coordinates and sizes are written with at most three decimals and
//! at least one, so that regenerated documents stay byte-identical.

/// Formats a length in millimetres for the package document.
///
/// Rounds to three decimals, then trims trailing zeros while keeping at
/// least one digit after the point. Negative zero is written as `0.0`.
///
/// # Examples
///
/// ```
/// use footprint_gen::footprint::format::format_float;
///
/// assert_eq!(format_float(0.8), "0.8");
/// assert_eq!(format_float(1.0), "1.0");
/// assert_eq!(format_float(0.175_000_000_000_000_02), "0.175");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted
        .strip_suffix("00")
        .or_else(|| formatted.strip_suffix('0'))
        .unwrap_or(&formatted);

    if trimmed == "-0.0" {
        "0.0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a dimension the way IPC footprint names encode it.
///
/// The value is rounded to hundredths of a millimetre, a leading `0.` is
/// dropped and the decimal point removed: `0.55` becomes `55`, `1.2`
/// becomes `120`.
#[must_use]
pub fn format_ipc_dimension(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .strip_prefix("0.")
        .unwrap_or(&formatted)
        .replace('.', "")
}

/// Formats a value with the shortest representation that round-trips,
/// always including a decimal point (`2.0`, `1.25`, `0.4`).
///
/// Used for human-readable description text.
#[must_use]
pub fn format_plain(value: f64) -> String {
    format!("{value:?}")
}
