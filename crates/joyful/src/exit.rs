use std::fmt;
use std::io;

use joyful::{JoyfulError, SchemaError};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    let code = match &err {
        SchemaError::LoadFailed(_) => FAILURE,
        SchemaError::InvalidComposition(_)
        | SchemaError::CompileFailed(_)
        | SchemaError::InvalidConstraint { .. }
        | SchemaError::InvalidJson(_) => DATA_INVALID,
        SchemaError::Factory(_) => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn joyful_error(context: &str, err: JoyfulError) -> CliError {
    match err {
        JoyfulError::Validation(message) => {
            CliError::new(DATA_INVALID, format!("{context}: {message}"))
        }
        JoyfulError::Schema(err) => schema_error(context, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_map_to_data_invalid() {
        let err = joyful_error("check", JoyfulError::Validation("bad".to_string()));
        assert_eq!(err.code, DATA_INVALID);
        assert_eq!(err.to_string(), "check: bad");
    }

    #[test]
    fn schema_errors_keep_their_category() {
        let load = schema_error("load", SchemaError::LoadFailed("gone".to_string()));
        assert_eq!(load.code, FAILURE);

        let composition = joyful_error(
            "compile",
            JoyfulError::Schema(SchemaError::InvalidComposition("x".to_string())),
        );
        assert_eq!(composition.code, DATA_INVALID);
    }

    #[test]
    fn io_errors_map_by_kind() {
        let denied = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code, PERMISSION_DENIED);
        let missing = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, FAILURE);
    }
}
