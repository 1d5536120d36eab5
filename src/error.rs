//! Error types for the report pipeline.

use crate::report::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The model service was unreachable, answered with a non-success status,
    /// or sent an envelope without a structured payload.
    #[error("Model service error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// The envelope carried a payload that is not a single JSON object.
    #[error("Malformed report payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid report format received from model: {0}")]
    SchemaValidation(#[from] ValidationErrors),

    /// Non-fatal; absorbed at the store boundary.
    #[error("Report storage degraded: {0}")]
    StorageDegraded(String),
}

impl ReportError {
    pub fn transport(message: impl Into<String>) -> Self {
        ReportError::Transport {
            message: message.into(),
            status: None,
        }
    }

    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        ReportError::Transport {
            message: message.into(),
            status: Some(status),
        }
    }

    /// True for every error that ends a generation call.
    pub fn is_generation_error(&self) -> bool {
        !matches!(self, ReportError::StorageDegraded(_))
    }

    /// Short machine-readable kind, used in API error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::Transport { .. } => "transport",
            ReportError::MalformedPayload(_) => "malformed_payload",
            ReportError::SchemaValidation(_) => "schema_validation",
            ReportError::StorageDegraded(_) => "storage_degraded",
        }
    }
}

impl From<sled::Error> for ReportError {
    fn from(err: sled::Error) -> Self {
        ReportError::StorageDegraded(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FieldViolation;

    #[test]
    fn test_transport_display_includes_message() {
        let err = ReportError::upstream_status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "Model service error: Service Unavailable");
        assert!(matches!(err, ReportError::Transport { status: Some(503), .. }));
    }

    #[test]
    fn test_schema_validation_names_field() {
        let errors = ValidationErrors::from(vec![FieldViolation::new(
            "metrics.fluency",
            "must be between 0 and 100, got 150",
        )]);
        let err = ReportError::from(errors);
        assert!(err.to_string().contains("metrics.fluency"));
        assert_eq!(err.kind(), "schema_validation");
    }

    #[test]
    fn test_storage_is_not_generation_error() {
        assert!(!ReportError::StorageDegraded("disk full".into()).is_generation_error());
        assert!(ReportError::MalformedPayload("not json".into()).is_generation_error());
    }
}
