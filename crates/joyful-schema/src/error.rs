/// Errors that can occur while building, loading or compiling schemas.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A sequence of lazy schemas contained a member that is not an object literal.
    #[error("invalid schema composition: {0}")]
    InvalidComposition(String),

    /// The validation engine rejected the generated schema document.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// A field fragment is not a usable constraint.
    #[error("invalid constraint for field {field}: {message}")]
    InvalidConstraint { field: String, message: String },

    /// A schema file or directory could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// Schema source is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Error raised by a caller-supplied schema factory, passed through untouched.
    #[error(transparent)]
    Factory(Box<dyn std::error::Error + Send + Sync>),
}

impl SchemaError {
    /// Wrap an arbitrary error raised inside a schema factory.
    pub fn factory(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Factory(err.into())
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
