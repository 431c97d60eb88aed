//! Number formatting shared by the report pages.

/// Hours for totals and cards: one decimal, `.0` dropped, non-finite as `0`.
pub fn hours(v: f64) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    let s = format!("{v:.1}");
    match s.strip_suffix(".0") {
        Some(whole) if whole == "-0" => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => s,
    }
}

/// A stored value shown as-is in a detail row.
///
/// Finite values use [`hours`]; anything else is printed literally so a
/// malformed record stays visible instead of being hidden as zero.
pub fn stored(v: f64) -> String {
    if v.is_finite() { hours(v) } else { v.to_string() }
}

/// Optional stored value; missing prints as an empty cell.
pub fn stored_opt(v: Option<f64>) -> String {
    v.map(stored).unwrap_or_default()
}

/// Loads on the summary page are whole numbers.
pub fn loads(v: f64) -> String {
    let v = if v.is_finite() { v.round() } else { 0.0 };
    if v == 0.0 { "0".to_string() } else { format!("{v:.0}") }
}
