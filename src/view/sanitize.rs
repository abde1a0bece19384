//! Keystroke filter for the numeric text fields.

/// Result of filtering one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub value: String,
    /// False when the value still holds more than one separator.
    pub valid: bool,
}

/// Keep only digits and separators, collapse repeated separators, and turn
/// the first comma into a decimal point.
///
/// The result is valid when it reads as digits with at most one decimal
/// point. A second separator is kept so the field can be flagged rather
/// than silently rewritten.
pub fn sanitize_numeric(raw: &str) -> Sanitized {
    let mut value = String::with_capacity(raw.len());
    for c in raw.chars() {
        let separator = c == ',' || c == '.';
        if !(c.is_ascii_digit() || separator) {
            continue;
        }
        if separator && value.ends_with(c) {
            continue;
        }
        value.push(c);
    }

    if value.contains(',') {
        value = value.replacen(',', ".", 1);
    }

    let valid = !value.contains(',') && value.matches('.').count() <= 1;
    Sanitized { value, valid }
}
