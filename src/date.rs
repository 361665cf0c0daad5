//! Text <-> chrono conversions shared by the task model, the store and the CLI.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::DateError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_SHAPE: &str = "####-##-##";
const TIMESTAMP_SHAPE: &str = "####-##-## ##:##:##";

/// chrono alone accepts padding, signs and short fields, so the text has to
/// match the fixed-width layout first (`#` = ASCII digit).
fn check_shape(text: &str, shape: &'static str) -> Result<(), DateError> {
    let matches = text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'#' => c.is_ascii_digit(),
            _ => c == s,
        });
    if matches {
        Ok(())
    } else {
        Err(DateError::Shape(shape))
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    check_shape(text, DATE_SHAPE)?;
    Ok(NaiveDate::parse_from_str(text, DATE_FORMAT)?)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, DateError> {
    check_shape(text, TIMESTAMP_SHAPE)?;
    Ok(NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)?)
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time with the sub-second part dropped, so it survives a
/// trip through `TIMESTAMP_FORMAT` unchanged.
pub fn now_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(format_date(date), "2024-01-15");
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("tomorrow").is_err());
        assert!(parse_date("").is_err());
        assert!(matches!(parse_date(" 2024-01-15"), Err(DateError::Shape(_))));
        assert!(matches!(parse_date("+2024-01-15"), Err(DateError::Shape(_))));
        assert!(matches!(parse_date("2024-1-5"), Err(DateError::Shape(_))));
        assert!(matches!(parse_date("2024-01-15 "), Err(DateError::Shape(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(DateError::Invalid(_))));
    }

    #[test]
    fn test_timestamp_has_second_precision() {
        let now = now_timestamp();
        assert_eq!(now.nanosecond(), 0);
        assert_eq!(parse_timestamp(&format_timestamp(now)).unwrap(), now);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2024-01-15 09:30:05").unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-15 09:30:05");
        assert!(parse_timestamp("2024-01-15").is_err());
        assert!(parse_timestamp(" 2024-01-15 09:30:05").is_err());
        assert!(parse_timestamp("2024-01-15 9:30:05").is_err());
    }
}
