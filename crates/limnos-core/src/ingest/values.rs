/// Parse a determinand result.
///
/// Handles formats like:
/// - "68" -> 68.0
/// - "0.030" -> 0.03
/// - " 1.5e-3 " -> 0.0015
///
/// Empty, non-numeric and non-finite text ("NaN", "inf") is rejected.
pub fn parse_result(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty value".into());
    }

    let value: f64 = s
        .parse()
        .map_err(|e| format!("invalid number '{}': {}", s, e))?;

    if !value.is_finite() {
        return Err(format!("non-finite number '{}'", s));
    }
    Ok(value)
}

/// Parse an integer grid coordinate (northing/easting).
pub fn parse_coordinate(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty value".into());
    }
    s.parse::<i64>()
        .map_err(|e| format!("invalid integer '{}': {}", s, e))
}

/// Only the literal "true" (any case) is a compliance sample.
pub fn parse_flag(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_integer() {
        assert_eq!(parse_result("68").unwrap(), 68.0);
    }

    #[test]
    fn test_result_decimal_and_whitespace() {
        assert_eq!(parse_result("  0.030 ").unwrap(), 0.03);
    }

    #[test]
    fn test_result_exponent() {
        assert_eq!(parse_result("1.5e-3").unwrap(), 0.0015);
    }

    #[test]
    fn test_result_negative_allowed() {
        assert_eq!(parse_result("-1").unwrap(), -1.0);
    }

    #[test]
    fn test_result_rejects_garbage() {
        assert!(parse_result("abc").is_err());
        assert!(parse_result("").is_err());
        assert!(parse_result("<0.5").is_err());
    }

    #[test]
    fn test_result_rejects_non_finite() {
        assert!(parse_result("NaN").is_err());
        assert!(parse_result("inf").is_err());
    }

    #[test]
    fn test_coordinate() {
        assert_eq!(parse_coordinate("449100").unwrap(), 449100);
        assert!(parse_coordinate("44.5").is_err());
        assert!(parse_coordinate("").is_err());
    }

    #[test]
    fn test_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }
}
