use serde::Deserialize;

use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse an id that arrived as text (query string or form field).
///
/// `field` names the input in the error message.
pub fn parse_id(field: &str, raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation(format!("{field} must be a positive integer id")))
}

/// An id in a JSON body, sent either as a number or as the text of a form
/// control (`<select>` values are always strings).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(DbId),
    Text(String),
}

impl IdInput {
    /// `Ok(None)` for blank text, which is what an unselected dropdown sends.
    pub fn parse(&self, field: &str) -> Result<Option<DbId>, CoreError> {
        match self {
            IdInput::Number(id) if *id > 0 => Ok(Some(*id)),
            IdInput::Number(_) => Err(CoreError::Validation(format!(
                "{field} must be a positive integer id"
            ))),
            IdInput::Text(raw) if raw.trim().is_empty() => Ok(None),
            IdInput::Text(raw) => parse_id(field, raw).map(Some),
        }
    }
}

/// Parse an optional [`IdInput`], treating absence like a blank value.
pub fn parse_optional_id(
    field: &str,
    input: Option<&IdInput>,
) -> Result<Option<DbId>, CoreError> {
    input.map_or(Ok(None), |id| id.parse(field))
}
