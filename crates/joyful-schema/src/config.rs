/// Controls how lazy schemas are turned into compiled schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// When false, a bare object literal is returned unwrapped by `compile_with`.
    pub wrap_object: bool,
    /// When true, object schemas accept keys they do not declare.
    pub allow_unknown: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            wrap_object: true,
            allow_unknown: false,
        }
    }
}

/// Limits applied when reading schemas from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConfig {
    /// Maximum number of schema files loaded from a directory.
    pub max_schemas_from_directory: usize,
    /// Maximum bytes allowed per schema file.
    pub max_schema_file_size: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_schemas_from_directory: 256,
            max_schema_file_size: 256 * 1024,
        }
    }
}
