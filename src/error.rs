use std::fmt;

use thiserror::Error;

/// Failure surface of the CFBD data source. The boundary layer maps each
/// variant to an HTTP status: upstream failures keep their own status,
/// rejected request parameters become 400, everything else is on the
/// gateway-fault side.
#[derive(Debug, Error)]
pub enum CfbdError {
    #[error("upstream responded {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(#[from] ureq::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid {param} {value:?}, expected one of {allowed:?}")]
    InvalidParam {
        param: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

impl CfbdError {
    /// HTTP status the boundary responds with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            CfbdError::Upstream { status, .. } => *status,
            CfbdError::Transport(_) => 502,
            CfbdError::Validation(_) => 502,
            CfbdError::InvalidParam { .. } => 400,
        }
    }
}

/// A fetched record did not match its expected shape. Reports the first
/// violation only, with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed at `{path}`: {kind}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ValidationErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    MissingField,
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    InvalidEnum {
        token: String,
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::MissingField => write!(f, "missing required field"),
            ValidationErrorKind::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ValidationErrorKind::InvalidEnum { token, allowed } => {
                write!(f, "unrecognized token {token:?}, expected one of {allowed:?}")
            }
        }
    }
}
