use chrono::{NaiveDate, NaiveDateTime};

/// Parse a locale-formatted amount from a statement cell.
///
/// Strips non-breaking and regular whitespace (thousands separators),
/// converts a comma decimal separator to a dot, then parses. Empty or
/// unparsable input yields 0.0 — every numeric statement field degrades
/// to 0 rather than failing the row.
///
/// This is the single amount-parsing implementation; all parsers go
/// through it.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .replace('\u{00A0}', " ")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Parse a broker-local timestamp of the shape "DD.MM.YYYY HH:MM:SS".
///
/// The time part and trailing components are optional: missing day/month
/// default to 1, missing hour/minute/second to 0. Returns None when the
/// year, month, or day cannot be derived at all — never a default date.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let mut parts = text.trim().split_whitespace();
    let date_str = parts.next()?;
    let time_str = parts.next().unwrap_or("");

    let mut date_parts = date_str.split('.');
    let year: i32 = date_parts.next().and_then(|s| s.parse().ok())?;
    let month: u32 = match date_parts.next() {
        Some(s) => s.parse().ok()?,
        None => 1,
    };
    let day: u32 = match date_parts.next() {
        Some(s) => s.parse().ok()?,
        None => 1,
    };
    if year == 0 || month == 0 || day == 0 {
        return None;
    }

    let mut time_parts = time_str.split(':');
    let hour: u32 = parse_component(time_parts.next());
    let minute: u32 = parse_component(time_parts.next());
    let second: u32 = parse_component(time_parts.next());

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn parse_component(part: Option<&str>) -> u32 {
    part.and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_locale_formats() {
        assert_eq!(parse_amount("1 234,56"), 1234.56);
        assert_eq!(parse_amount("1\u{00A0}234,56"), 1234.56);
        assert_eq!(parse_amount("-12.5"), -12.5);
        assert_eq!(parse_amount("0.01"), 0.01);
    }

    #[test]
    fn test_parse_amount_degrades_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
    }

    #[test]
    fn test_parse_timestamp_full() {
        let dt = parse_timestamp("2024.03.15 14:30:45").unwrap();
        assert_eq!(dt.to_string(), "2024-03-15 14:30:45");
    }

    #[test]
    fn test_parse_timestamp_missing_time_defaults_to_midnight() {
        let dt = parse_timestamp("2024.03.15").unwrap();
        assert_eq!(dt.to_string(), "2024-03-15 00:00:00");
    }

    #[test]
    fn test_parse_timestamp_partial_time() {
        let dt = parse_timestamp("2024.03.15 14:30").unwrap();
        assert_eq!(dt.to_string(), "2024-03-15 14:30:00");
    }

    #[test]
    fn test_parse_timestamp_missing_date_parts_default_to_one() {
        let dt = parse_timestamp("2024.03").unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 00:00:00");
        let dt = parse_timestamp("2024").unwrap();
        assert_eq!(dt.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_underivable_dates() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2024.00.15 10:00:00").is_none());
        assert!(parse_timestamp("2024.13.01 10:00:00").is_none());
        assert!(parse_timestamp("2024.03.00").is_none());
    }
}
