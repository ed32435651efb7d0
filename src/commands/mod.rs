pub mod journals;
pub mod month;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::dates::parse_user_date;

/// Parse optional date string, defaulting to `today`
///
/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date_arg(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match date {
        Some(date_str) => parse_user_date(date_str)
            .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY", date_str)),
        None => Ok(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(parse_date_arg(None, today).unwrap(), today);
        assert_eq!(
            parse_date_arg(Some("03/08/2024"), today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 3).unwrap()
        );
        let err = parse_date_arg(Some("2024-13-01"), today).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid date '2024-13-01'"));
    }
}
