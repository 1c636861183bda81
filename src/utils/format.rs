/// Format a dollar amount the way the UI shows wallet balances
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try to parse ISO format and convert to readable
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // Fall back to the YYYY-MM-DD prefix
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(150.0), "$150.00");
        assert_eq!(format_usd(99.999), "$100.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-06-01T12:30:00Z"), "Jun 01, 2025");
        assert_eq!(format_date("2025-06-01 12:30"), "2025-06-01");
        assert_eq!(format_date("bad"), "bad");
    }
}
