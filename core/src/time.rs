use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};

/// Stay dates are entered as explicit calendar dates on the form.
pub fn parse_stay_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}', expected YYYY-MM-DD", input))
}

/// Check-in/check-out clock times, 24h.
pub fn parse_clock_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| anyhow!("Invalid time '{}', expected HH:MM", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stay_date() {
        assert_eq!(
            parse_stay_date("2024-02-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(
            parse_stay_date(" 2024-12-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert!(parse_stay_date("01/02/2024").is_err());
        assert!(parse_stay_date("2024-02-30").is_err());
        assert!(parse_stay_date("").is_err());
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(
            parse_clock_time("08:30").unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_clock_time("0:00").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_clock_time("24:00").is_err());
        assert!(parse_clock_time("8h30").is_err());
    }
}
