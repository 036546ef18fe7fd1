//! Lenient parsing of numeric form input.
//!
//! Empty or non-numeric input coerces to zero instead of being rejected;
//! range limits are applied by the caller.

/// Parses a whole number, e.g. reps or seconds.
pub fn coerce_u32(input: &str) -> u32 {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return n;
    }
    // "8.5" or "-3" from a number field
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Parses a non-negative decimal, e.g. a weight in kg.
pub fn coerce_f64(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_u32() {
        assert_eq!(coerce_u32("12"), 12);
        assert_eq!(coerce_u32(" 8 "), 8);
        assert_eq!(coerce_u32("8.7"), 8);
        assert_eq!(coerce_u32(""), 0);
        assert_eq!(coerce_u32("ten"), 0);
        assert_eq!(coerce_u32("-3"), 0);
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64("22.5"), 22.5);
        assert_eq!(coerce_f64("abc"), 0.0);
        assert_eq!(coerce_f64("-5"), 0.0);
        assert_eq!(coerce_f64("NaN"), 0.0);
    }
}
