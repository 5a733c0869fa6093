//! Formatting utilities

/// Currency amount, two decimals
pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-R$ {:.2}", -value)
    } else {
        format!("R$ {:.2}", value)
    }
}

/// Distance in kilometers
pub fn km(value: f64) -> String {
    format!("{:.2} km", value)
}

/// Worked hours
pub fn hours(value: f64) -> String {
    format!("{:.2} h", value)
}

/// Liters of fuel
pub fn liters(value: f64) -> String {
    format!("{:.2} L", value)
}

/// Parse a decimal typed with either `.` or `,` as separator
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(235.0), "R$ 235.00");
        assert_eq!(money(2.333), "R$ 2.33");
        assert_eq!(money(-12.5), "-R$ 12.50");
    }

    #[test]
    fn test_units() {
        assert_eq!(km(150.0), "150.00 km");
        assert_eq!(hours(8.5), "8.50 h");
        assert_eq!(liters(15.0), "15.00 L");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("275,50"), Some(275.5));
        assert_eq!(parse_decimal(" 8.0 "), Some(8.0));
        assert_eq!(parse_decimal("abc"), None);
    }
}
