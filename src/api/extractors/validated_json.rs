//! JSON body extractor for the account forms.
//!
//! Deserialization failures keep the status axum assigns them (415 for a
//! missing `Content-Type`, 400 for broken syntax, 422 for wrong shapes).
//! Rule violations become a single 400 `AppError::Validation` naming every
//! offending field, since the account forms rely on message-less `length`
//! and `email` rules.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;

/// A JSON body that passed its `#[validate]` rules.
///
/// ```rust,ignore
/// async fn login(ValidatedJson(payload): ValidatedJson<LoginRequest>) {
///     // payload passed its `#[validate]` rules
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(unreadable_body)?;

        value.validate().map_err(|e| {
            let message = describe_violations(&e);
            tracing::debug!(%message, "Rejected request body");
            AppError::validation(message)
        })?;

        Ok(ValidatedJson(value))
    }
}

fn unreadable_body(rejection: JsonRejection) -> AppError {
    AppError::UnreadableBody {
        status: rejection.status(),
        message: rejection.body_text(),
    }
}

/// One sentence per violated rule, sorted by field so the output is stable.
fn describe_violations(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| describe(&field, e))
                .collect::<Vec<_>>()
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("{}: {}", field, message);
    }

    match error.code.as_ref() {
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => {
                format!("{} must be between {} and {} characters", field, min, max)
            }
            (Some(min), None) => format!("{} must be at least {} characters", field, min),
            (None, Some(max)) => format!("{} must be at most {} characters", field, max),
            (None, None) => format!("{} has an invalid length", field),
        },
        "email" => format!("{} must be a valid email address", field),
        _ => format!("{} is invalid", field),
    }
}
