//! Error types.
//!
//! - `CalcError` is the only failure a formula can report: an input that is
//!   non-finite or outside the documented range.
//! - `AppError` is what the binary surfaces: a message plus the process exit code.

use thiserror::Error;

/// Formula-level error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { field, .. } => field,
        }
    }
}

/// Process-level error carrying the exit code used by `main`.
///
/// Exit codes: `2` for usage, input and file problems; `4` for terminal/runtime failures.
#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::new(2, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_error_maps_to_usage_exit_code() {
        let err: AppError = CalcError::invalid("height", "must be finite").into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "invalid height: must be finite");
    }
}
