use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Parses an RFC 3339 instant or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(field: &str, raw: &str) -> Result<Timestamp, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp::from_datetime(naive.and_utc()))
        .ok_or_else(|| {
            ValidationError::invalid_format(field, "expected RFC 3339 or YYYY-MM-DD")
        })
}
