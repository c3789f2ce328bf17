//! Parsing helpers shared between address and bus arguments.

/// Parse an integer literal the way C's `strtol(s, &end, 0)` would, but
/// without tolerating trailing characters.
///
/// Leading whitespace and a single sign are accepted. A `0x` or `0X` prefix
/// selects hexadecimal, any other leading `0` selects octal, and everything
/// else is decimal. Values that do not fit in an `i64` saturate, like
/// `strtol` clamping to `LONG_MAX`.
///
/// Returns `None` if the string is not entirely a literal.
pub(crate) fn parse_int_literal(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"));
    let (radix, digits) = match hex {
        Some(hex) => (16, hex),
        None if s.len() > 1 && s.starts_with('0') => (8, &s[1..]),
        None => (10, s),
    };

    // from_str_radix accepts its own sign, which we've already dealt with.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let value = match u64::from_str_radix(digits, radix) {
        Ok(v) => i64::try_from(v).unwrap_or(i64::MAX),
        // Every character is a valid digit, so this can only be overflow.
        Err(_) => i64::MAX,
    };
    Some(if negative { value.saturating_neg() } else { value })
}
