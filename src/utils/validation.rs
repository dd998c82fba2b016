use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_email(email: &str) -> ApiResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid email format"))
    }
}

/// Parses an optional `YYYY-MM-DD` filter. Missing and empty values mean "no bound".
pub fn parse_date_filter(name: &str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::validation(format!("Invalid {name} format. Use YYYY-MM-DD"))),
    }
}

/// Resolves `skip`/`limit` defaults and bounds (`skip >= 0`, `1 <= limit <= 100`).
pub fn page_bounds(skip: Option<i64>, limit: Option<i64>) -> ApiResult<(i64, i64)> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    if skip < 0 {
        return Err(ApiError::Unprocessable(
            "skip must be greater than or equal to 0".to_string(),
        ));
    }
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::Unprocessable(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }

    Ok((skip, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("john.doe@company.com"));
        assert!(is_valid_email("a+tag@sub.example.co"));
        assert!(is_valid_email("x_y%z@host-name.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("john@localhost"));
        assert!(!is_valid_email("john@company.c"));
        assert!(!is_valid_email("john doe@company.com"));
        assert!(!is_valid_email(""));
        assert!(matches!(
            validate_email("bad"),
            Err(ApiError::Validation(msg)) if msg == "Invalid email format"
        ));
    }

    #[test]
    fn date_filters() {
        assert_eq!(parse_date_filter("start_date", None).unwrap(), None);
        assert_eq!(parse_date_filter("start_date", Some("")).unwrap(), None);
        assert_eq!(
            parse_date_filter("start_date", Some("2024-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );

        let err = parse_date_filter("end_date", Some("2024-13-40")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid end_date format. Use YYYY-MM-DD");
        assert!(parse_date_filter("start_date", Some("31/01/2024")).is_err());
    }

    #[test]
    fn page_defaults_and_bounds() {
        assert_eq!(page_bounds(None, None).unwrap(), (0, 10));
        assert_eq!(page_bounds(Some(20), Some(100)).unwrap(), (20, 100));
        assert!(page_bounds(Some(-1), None).is_err());
        assert!(page_bounds(None, Some(0)).is_err());
        assert!(page_bounds(None, Some(101)).is_err());
    }
}
