use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
};
use regex::Regex;
use serde_json::json;
use std::{borrow::Cow, sync::OnceLock};
use validator::{ValidationError, ValidationErrors};

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

pub fn into_response(errors: ValidationErrors) -> (StatusCode, axum::Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, axum::Json(json!({"errors": errors})))
}

/// JSON body extractor whose rejections use the same 400 `{"errors": ..}`
/// shape as validation failures.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<serde_json::Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let (field, error) = rejection_error(&rejection);
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                Err((
                    StatusCode::BAD_REQUEST,
                    axum::Json(json!({"errors": {field: [error]}})),
                ))
            }
        }
    }
}

/// Splits a deserialization failure such as `items[0].quantity: invalid type`
/// into the offending path and the message. Failures without a path, and
/// bodies that are not JSON at all, are reported on `body`.
fn rejection_error(rejection: &JsonRejection) -> (String, ValidationError) {
    let text = rejection.body_text();

    match rejection {
        JsonRejection::JsonDataError(_) => {
            let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(&text);
            match detail.split_once(": ") {
                Some((path, message)) if !path.contains(char::is_whitespace) => (
                    path.to_string(),
                    error("INVALID_FIELD", message.to_string()),
                ),
                _ => ("body".to_string(), error("INVALID_FIELD", detail.to_string())),
            }
        }
        _ => ("body".to_string(), error("INVALID_BODY", text)),
    }
}

pub fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Collects a single field error into a `ValidationErrors` set.
pub fn single(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    match value.trim().is_empty() {
        true => Err(error("BLANK", "This field may not be blank")),
        false => Ok(()),
    }
}

static PHONE_NUMBER: OnceLock<Regex> = OnceLock::new();

pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    let regex = PHONE_NUMBER.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9 ()-]{5,19}$").expect("Invalid phone number regex")
    });

    match regex.is_match(value.trim()) {
        true => Ok(()),
        false => Err(error("INVALID_PHONE_NUMBER", "Invalid phone number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("Alice").is_ok());
    }

    #[test]
    fn phone_numbers() {
        assert!(phone_number("+234 801 234 5678").is_ok());
        assert!(phone_number("(555) 010-9999").is_err());
        assert!(phone_number("555-0109").is_ok());
        assert!(phone_number("call me").is_err());
        assert!(phone_number("").is_err());
    }

    #[test]
    fn phone_regex_is_compiled_once() {
        assert!(phone_number("555-0109").is_ok());
        let first = PHONE_NUMBER.get().unwrap() as *const Regex;
        assert!(phone_number("555-0110").is_ok());
        assert_eq!(PHONE_NUMBER.get().unwrap() as *const Regex, first);
    }

    #[test]
    fn single_keeps_field_and_code() {
        let errors = single("items", error("EMPTY_ORDER", "At least one item is required"));
        let field_errors = errors.field_errors();
        let items = field_errors.get("items").unwrap();
        assert_eq!(items[0].code, "EMPTY_ORDER");
    }
}
