use joyful_schema::SchemaError;

/// Errors raised by the validation facade.
#[derive(Debug, thiserror::Error)]
pub enum JoyfulError {
    /// The data failed one or more constraints. Carries the comma-joined
    /// violation messages verbatim.
    #[error("{0}")]
    Validation(String),

    /// The lazy schema could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl JoyfulError {
    /// The violation text, if this is a validation failure.
    pub fn violations(&self) -> Option<&str> {
        match self {
            Self::Validation(message) => Some(message),
            Self::Schema(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JoyfulError>;
