//! Request body extractor accepting JSON as well as urlencoded forms.
//!
//! Strings are trimmed on the way in and blank strings become `null`, so
//! forms only ever see meaningful input. Passwords are passed through as typed.

use actix_web::dev;
use actix_web::error::ErrorBadRequest;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys whose values are never trimmed.
const UNTRIMMED_KEYS: [&str; 2] = ["password", "password_confirmation"];

pub const INVALID_JSON: &str = "Unable to parse JSON request data.";

/// Trimmed request body deserialized into `T`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

fn is_json(req: &HttpRequest) -> bool {
    let content_type = req.content_type();
    content_type == "application/json" || content_type.ends_with("+json")
}

/// Parses a raw body into a JSON value. Empty bodies are an empty object.
pub fn parse_body(json: bool, body: &[u8]) -> Result<Value, &'static str> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    if json {
        return match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => Ok(value),
            Ok(_) => Ok(Value::Object(Map::new())),
            Err(_) => Err(INVALID_JSON),
        };
    }

    let pairs: Vec<(String, String)> =
        serde_html_form::from_bytes(body).map_err(|_| "Unable to parse form data.")?;
    let mut map = Map::new();
    for (key, value) in pairs {
        map.insert(key, Value::String(value));
    }
    Ok(Value::Object(map))
}

/// Trims every string below `value`. `key` is the dotted path of `value`.
pub fn trim_value(key: &str, value: Value) -> Value {
    match value {
        Value::String(text) => {
            if UNTRIMMED_KEYS.contains(&key) {
                return Value::String(text);
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| trim_value(&child_key(key, &index.to_string()), item))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(name, item)| {
                    let path = child_key(key, &name);
                    (name, trim_value(&path, item))
                })
                .collect(),
        ),
        other => other,
    }
}

fn child_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

impl<T> FromRequest for Payload<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        let json = is_json(req);
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let body = body.await?;
            let value = parse_body(json, &body).map_err(ErrorBadRequest)?;
            let value = trim_value("", value);

            serde_json::from_value(value).map(Payload).map_err(|err| {
                log::warn!("Rejected request payload: {err}");
                ErrorBadRequest(err.to_string())
            })
        })
    }
}
