//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field-format failures are collected rather than reported one at a time, so
//! a client submitting several bad fields sees all of them in a single 400
//! response under `details.errors`.

use actix_web::web;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{EmailAddress, Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
    BlankField,
    InvalidDate,
    DateNotInPast,
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Single field failure reported inside `details.errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldError {
    field: FieldName,
    code: ErrorCode,
    message: String,
}

impl FieldError {
    pub(crate) fn new(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: FieldName) -> Self {
        let name = field.as_str();
        Self::new(
            field,
            ErrorCode::MissingField,
            format!("missing required field: {name}"),
        )
    }

    pub(crate) fn invalid_date(field: FieldName) -> Self {
        let name = field.as_str();
        Self::new(
            field,
            ErrorCode::InvalidDate,
            format!("{name} must be an ISO 8601 date (YYYY-MM-DD)"),
        )
    }
}

/// Accumulates field failures for one request.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Record the failure, if any, and hand back the successful value.
    pub(crate) fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// Convert the collected failures into a single `invalid_request` error.
    pub(crate) fn into_error(self) -> Error {
        debug!(count = self.errors.len(), "request failed field validation");
        let message = match self.errors.as_slice() {
            [only] => only.message.clone(),
            _ => "request failed validation".to_owned(),
        };
        Error::invalid_request(message).with_details(json!({ "errors": self.errors }))
    }
}

impl From<FieldError> for Error {
    fn from(error: FieldError) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(error);
        errors.into_error()
    }
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::missing(field))
}

/// Map a domain value-type failure onto the field that carried it.
pub(crate) fn user_field_error(field: FieldName, err: &UserValidationError) -> FieldError {
    let code = match err {
        UserValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        UserValidationError::EmptyEmail
        | UserValidationError::EmptyFirstName
        | UserValidationError::EmptyLastName => ErrorCode::BlankField,
    };
    FieldError::new(field, code, err.to_string())
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<EmailAddress, FieldError> {
    EmailAddress::new(value).map_err(|err| user_field_error(field, &err))
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FieldError::invalid_date(field))
}

/// Require a date strictly before `today`.
pub(crate) fn parse_past_date(
    value: &str,
    field: FieldName,
    today: NaiveDate,
) -> Result<NaiveDate, FieldError> {
    let date = parse_date(value, field)?;
    if date >= today {
        return Err(FieldError::new(
            field,
            ErrorCode::DateNotInPast,
            format!("{} must be in the past", field.as_str()),
        ));
    }
    Ok(date)
}

/// JSON extractor configuration reporting malformed bodies with the shared
/// error payload instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected malformed JSON body");
        Error::invalid_request(format!("malformed request body: {err}")).into()
    })
}
