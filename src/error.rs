//! Typed errors and their HTTP mapping.

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// One violated field constraint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every constraint a request violated, in field order.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{} validation error(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StoreFaultKind {
    /// The store rejected the request itself.
    ClientFault,
    /// Transport or service failure talking to the store.
    ServiceFault,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("store {kind:?} ({status} {code}): {message}")]
pub struct StoreError {
    pub kind: StoreFaultKind,
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl StoreError {
    pub fn client_fault(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StoreFaultKind::ClientFault,
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Service faults carry no store status; they surface as 400.
    pub fn service_fault(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StoreFaultKind::ServiceFault,
            status: StatusCode::BAD_REQUEST.as_u16(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Which request part failed validation; decides 415 vs 422.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationTarget {
    CreatePayload,
    Pagination,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation: {source}")]
    Validation {
        target: ValidationTarget,
        #[source]
        source: ValidationError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
    /// The request body could not be read, e.g. it exceeds the configured limit.
    #[error("request body rejected: {reason}")]
    Body { status: StatusCode, reason: String },
}

impl ApiError {
    pub fn create_payload(source: ValidationError) -> Self {
        ApiError::Validation {
            target: ValidationTarget::CreatePayload,
            source,
        }
    }

    pub fn pagination(source: ValidationError) -> Self {
        ApiError::Validation {
            target: ValidationTarget::Pagination,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation {
                target: ValidationTarget::CreatePayload,
                ..
            } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Validation {
                target: ValidationTarget::Pagination,
                ..
            } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(e) => match e.kind {
                StoreFaultKind::ClientFault => {
                    StatusCode::from_u16(e.status).unwrap_or(StatusCode::BAD_REQUEST)
                }
                StoreFaultKind::ServiceFault => StatusCode::BAD_REQUEST,
            },
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Body { status, .. } => *status,
        }
    }

    /// Envelope `message` for this error.
    pub fn message(&self) -> String {
        match self {
            ApiError::Store(e) => e.code.clone(),
            _ => self
                .status()
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
        }
    }

    /// Envelope `details` for this error.
    pub fn details(&self) -> serde_json::Value {
        match self {
            ApiError::Validation { source, .. } => serde_json::json!(source.errors),
            ApiError::Store(e) => serde_json::json!({
                "code": e.code,
                "message": e.message,
            }),
            ApiError::MethodNotAllowed(_) => serde_json::Value::Null,
            ApiError::Body { reason, .. } => serde_json::json!([FieldError::new("body", reason.as_str())]),
        }
    }
}
