use serde_json::{Map, Value};

use crate::compiled::CompiledSchema;
use crate::config::CompileOptions;
use crate::error::{Result, SchemaError};
use crate::literal::ObjectLiteral;

/// A single field constraint: a JSON Schema fragment plus whether the
/// enclosing object must contain the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    keywords: Map<String, Value>,
    required: bool,
}

impl Constraint {
    /// Constraint accepting any value.
    pub fn any() -> Self {
        Self {
            keywords: Map::new(),
            required: false,
        }
    }

    /// Constraint restricted to a single JSON type (`"string"`, `"number"`, ...).
    pub fn of_type(kind: &str) -> Self {
        Self::any().keyword("type", kind)
    }

    /// Build a constraint from a JSON Schema fragment.
    ///
    /// A boolean `"required"` keyword is lifted out of the fragment and becomes
    /// the constraint's required flag. Array-valued `"required"` is left alone,
    /// since that is the ordinary object keyword.
    pub fn from_json(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::Bool(true) => Ok(Self::any()),
            Value::Bool(false) => Ok(Self::any().keyword("not", Value::Object(Map::new()))),
            Value::Object(mut keywords) => {
                let required = match keywords.get("required") {
                    Some(Value::Bool(flag)) => {
                        let flag = *flag;
                        keywords.remove("required");
                        flag
                    }
                    Some(Value::Array(_)) | None => false,
                    Some(other) => {
                        return Err(SchemaError::InvalidConstraint {
                            field: field.to_string(),
                            message: format!("\"required\" must be a boolean or array, got {other}"),
                        })
                    }
                };
                Ok(Self { keywords, required })
            }
            other => Err(SchemaError::InvalidConstraint {
                field: field.to_string(),
                message: format!("expected a schema object, got {other}"),
            }),
        }
    }

    /// Mark the field as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as optional (the default).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value filled in when the field is missing.
    pub fn default(self, value: impl Into<Value>) -> Self {
        self.keyword("default", value)
    }

    /// Lower bound: length for strings and arrays, property count for
    /// objects, value for numbers.
    pub fn min(self, bound: impl Into<Value>) -> Self {
        let keyword = match self.kind() {
            Some("string") => "minLength",
            Some("array") => "minItems",
            Some("object") => "minProperties",
            _ => "minimum",
        };
        self.keyword(keyword, bound)
    }

    /// Upper bound, mirroring [`Constraint::min`].
    pub fn max(self, bound: impl Into<Value>) -> Self {
        let keyword = match self.kind() {
            Some("string") => "maxLength",
            Some("array") => "maxItems",
            Some("object") => "maxProperties",
            _ => "maximum",
        };
        self.keyword(keyword, bound)
    }

    pub fn pattern(self, regex: &str) -> Self {
        self.keyword("pattern", regex)
    }

    /// Restrict the field to an explicit set of values.
    pub fn valid<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.keyword("enum", Value::Array(values))
    }

    /// Constraint applied to every array element.
    pub fn items(self, item: Constraint) -> Self {
        self.keyword("items", item.to_json())
    }

    pub fn description(self, text: &str) -> Self {
        self.keyword("description", text)
    }

    /// Set an arbitrary JSON Schema keyword.
    pub fn keyword(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.to_string(), value.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.keywords.get("default")
    }

    /// The JSON Schema fragment, without the required flag.
    pub fn to_json(&self) -> Value {
        Value::Object(self.keywords.clone())
    }

    fn kind(&self) -> Option<&str> {
        self.keywords.get("type").and_then(Value::as_str)
    }
}

/// Schema construction capability handed to schema factories.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaBuilder {
    options: CompileOptions,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn any(&self) -> Constraint {
        Constraint::any()
    }

    pub fn string(&self) -> Constraint {
        Constraint::of_type("string")
    }

    pub fn number(&self) -> Constraint {
        Constraint::of_type("number")
    }

    pub fn integer(&self) -> Constraint {
        Constraint::of_type("integer")
    }

    pub fn boolean(&self) -> Constraint {
        Constraint::of_type("boolean")
    }

    pub fn array(&self) -> Constraint {
        Constraint::of_type("array")
    }

    /// An empty object literal to add fields to.
    pub fn literal(&self) -> ObjectLiteral {
        ObjectLiteral::new()
    }

    /// Build an object-shaped schema instance from a literal.
    pub fn object(&self, literal: ObjectLiteral) -> Result<CompiledSchema> {
        CompiledSchema::from_literal(&literal, &self.options)
    }

    /// Compile a complete JSON Schema document.
    pub fn document(&self, document: Value) -> Result<CompiledSchema> {
        CompiledSchema::from_document(document)
    }
}
