use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

use crate::application::AppError;

/// Returns the trimmed value, or "`<label>` is required" when it is absent or blank.
pub fn required<'a>(label: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{label} is required")))
}

/// Blank optional text is treated as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// RFC 3339 timestamps, or a bare `YYYY-MM-DD` taken as midnight UTC.
/// Instants keep microseconds at most, the precision stored in Postgres.
pub fn parse_date(label: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc).trunc_subsecs(6));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation(format!("{label} must be a valid date")))
}

pub fn field<T>(result: Result<T, String>) -> Result<T, AppError> {
    result.map_err(AppError::Validation)
}
