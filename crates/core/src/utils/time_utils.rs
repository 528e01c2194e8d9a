use chrono::{DateTime, Utc};

use crate::errors::Result;

/// Parses an RFC 3339 timestamp and normalises it to UTC.
pub fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value.trim())?.with_timezone(&Utc))
}

pub fn parse_optional_rfc3339(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value.map(parse_rfc3339).transpose()
}
