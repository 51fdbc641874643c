use thiserror::Error;

/// Earliest calendar year the ephemeris accepts.
pub const MIN_SUPPORTED_YEAR: i32 = 1900;
/// Latest calendar year the ephemeris accepts.
pub const MAX_SUPPORTED_YEAR: i32 = 2100;

/// Errors surfaced to callers. Anything else degrades to a smaller result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
    #[error("{what} is outside the supported range {min_year}-{max_year}")]
    Range {
        what: String,
        min_year: i32,
        max_year: i32,
    },
}

impl AstroError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AstroError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn out_of_range(what: impl Into<String>) -> Self {
        AstroError::Range {
            what: what.into(),
            min_year: MIN_SUPPORTED_YEAR,
            max_year: MAX_SUPPORTED_YEAR,
        }
    }
}

pub type AstroResult<T> = Result<T, AstroError>;
