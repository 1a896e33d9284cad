/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Null markers seen in Census extracts.
pub fn is_missing(cleaned: &str) -> bool {
    cleaned.is_empty()
        || cleaned.eq_ignore_ascii_case("na")
        || cleaned.eq_ignore_ascii_case("(na)")
        || cleaned.eq_ignore_ascii_case("nan")
        || cleaned.eq_ignore_ascii_case("null")
}

/// 3) Parse a count cell into f64, accepting thousands separators.
///    Returns None for missing or non-numeric cells.
pub fn parse_count(raw: &str) -> Option<f64> {
    let cleaned = clean_str(raw);
    if is_missing(&cleaned) {
        return None;
    }
    let digits: String = cleaned.chars().filter(|c| *c != ',').collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}
