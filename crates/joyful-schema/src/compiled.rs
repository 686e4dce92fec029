use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;
use tracing::trace;

use crate::config::CompileOptions;
use crate::error::{Result, SchemaError};
use crate::literal::ObjectLiteral;
use crate::validator::{apply_defaults, collect_violations, Violation};

/// An engine-native schema, ready to validate data.
///
/// Keeps the JSON Schema document it was compiled from and the names of the
/// top-level fields it declares.
#[derive(Clone)]
pub struct CompiledSchema {
    document: Value,
    fields: Vec<String>,
    validator: Arc<Validator>,
}

impl CompiledSchema {
    /// Wrap an object literal into an object-kind schema.
    pub fn from_literal(literal: &ObjectLiteral, options: &CompileOptions) -> Result<Self> {
        let document = literal.to_document(options);
        let fields = literal.names().map(str::to_string).collect();
        Self::build(document, fields)
    }

    /// Compile a complete JSON Schema document. Declared fields are the keys
    /// of its top-level `properties`.
    pub fn from_document(document: Value) -> Result<Self> {
        let fields = document
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| properties.keys().cloned().collect())
            .unwrap_or_default();
        Self::build(document, fields)
    }

    fn build(document: Value, fields: Vec<String>) -> Result<Self> {
        let validator = jsonschema::validator_for(&document)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;
        trace!(fields = fields.len(), "compiled schema");

        Ok(Self {
            document,
            fields,
            validator: Arc::new(validator),
        })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Top-level field names, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }

    /// Check `value` as is, without applying defaults.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    /// Validate `value` as given, then fill declared defaults into a copy.
    ///
    /// Returns the defaulted value, or every violation the engine reports.
    /// Defaults never satisfy `required` and are not validated themselves.
    pub fn validate(&self, value: &Value) -> std::result::Result<Value, Vec<Violation>> {
        let violations = collect_violations(&self.validator, value);
        if !violations.is_empty() {
            return Err(violations);
        }

        let mut populated = value.clone();
        apply_defaults(&self.document, &self.document, &mut populated);
        Ok(populated)
    }
}

impl PartialEq for CompiledSchema {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document && self.fields == other.fields
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("document", &self.document)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
