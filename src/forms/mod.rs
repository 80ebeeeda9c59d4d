//! Form definitions backing the CRM routes.
//!
//! Forms arrive already trimmed (see [`crate::payload`]), so a blank input is
//! always `None` by the time `validator` runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::ValidationErrors;

pub mod auth;
pub mod contacts;
pub mod organizations;
pub mod users;

/// Field name (snake_case) to the first violated constraint's message.
pub type FieldErrors = BTreeMap<String, String>;

pub const NOT_BLANK: &str = "This value should not be blank.";
pub const INVALID_EMAIL: &str = "This value is not a valid email address.";
pub const UNKNOWN_ORGANIZATION: &str = "The given organization does not exist.";
pub const ALREADY_USED: &str = "This value is already used.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Flattens `validator` output into one message per field.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, violations)| {
            violations.first().map(|violation| {
                let message = violation
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| violation.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Accepts an integer or a numeric string; anything else is `None`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse::<i32>().ok(),
        _ => None,
    })
}

/// Accepts booleans, `1`/`true`/`on`/`yes` and non-zero numbers as `true`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes"
        ),
        _ => false,
    })
}
