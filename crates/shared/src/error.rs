use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::WizardStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    PreconditionNotMet,
    ExternalServiceUnavailable,
}

/// Why the wizard refused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rejection {
    #[error("no scripts have been generated yet")]
    NoScripts,
    #[error("no payment reference has been recorded")]
    NoPaymentReference,
    #[error("cannot move from {from} to {to}")]
    NotAllowed { from: WizardStep, to: WizardStep },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("precondition not met: {0}")]
    PreconditionNotMet(String),
    #[error("transition rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("{service} unavailable: {message}")]
    ExternalServiceUnavailable { service: String, message: String },
}

impl FlowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionNotMet(message.into())
    }

    pub fn unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalServiceUnavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::Validation(_) => ErrorCode::Validation,
            FlowError::PreconditionNotMet(_) | FlowError::Rejected(_) => {
                ErrorCode::PreconditionNotMet
            }
            FlowError::ExternalServiceUnavailable { .. } => ErrorCode::ExternalServiceUnavailable,
        }
    }

    /// Only outages are worth retrying; bad input and wrong-step calls are not.
    pub fn is_retryable(&self) -> bool {
        self.code() == ErrorCode::ExternalServiceUnavailable
    }
}

/// Serializable error handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    pub retryable: bool,
}

impl From<&FlowError> for ErrorReport {
    fn from(value: &FlowError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
            retryable: value.is_retryable(),
        }
    }
}

impl From<FlowError> for ErrorReport {
    fn from(value: FlowError) -> Self {
        Self::from(&value)
    }
}
