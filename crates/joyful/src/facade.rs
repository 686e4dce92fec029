use joyful_schema::{compile, join_violations, CompiledSchema, LazySchema};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{JoyfulError, Result};
use crate::options::ValidationOptions;

/// What a validation call produced when it did not fail with an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Data satisfied the schema.
    Valid,
    /// Data failed and `throw` was off; carries the comma-joined violations.
    Invalid(String),
    /// Data satisfied the schema and `populate` was on; carries the defaulted value.
    Populated(Value),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

/// Validate `state` against any lazy schema form.
///
/// Compile errors are returned unchanged. Validation failures either become
/// [`JoyfulError::Validation`] (`throw`, the default) or
/// [`Outcome::Invalid`].
pub fn joyful(state: &Value, schema: &LazySchema, options: &ValidationOptions) -> Result<Outcome> {
    let compiled = compile(schema)?;
    check(state, &compiled, options)
}

/// Same as [`joyful`] for a schema that is already compiled.
pub fn check(state: &Value, schema: &CompiledSchema, options: &ValidationOptions) -> Result<Outcome> {
    debug!(
        fields = schema.fields().len(),
        trim = options.trim,
        populate = options.populate,
        "validating state"
    );

    let trimmed;
    let input = if options.trim {
        trimmed = trim(state, schema);
        &trimmed
    } else {
        state
    };

    match schema.validate(input) {
        Ok(value) if options.populate => Ok(Outcome::Populated(value)),
        Ok(_) => Ok(Outcome::Valid),
        Err(violations) => {
            let message = join_violations(&violations);
            debug!(violations = violations.len(), "validation failed");
            if options.throw {
                Err(JoyfulError::Validation(message))
            } else {
                Ok(Outcome::Invalid(message))
            }
        }
    }
}

/// Copy of `state` without the top-level keys `schema` does not declare.
/// Non-object values are returned as is.
pub fn trim(state: &Value, schema: &CompiledSchema) -> Value {
    match state {
        Value::Object(object) => Value::Object(
            object
                .iter()
                .filter(|(key, _)| schema.declares(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}

/// Validate and fail on any violation, whatever `options.throw` says.
pub fn validate(state: &Value, schema: &LazySchema, options: &ValidationOptions) -> Result<()> {
    let mut options = *options;
    options.throw = true;

    joyful(state, schema, &options).map(|_| ())
}

/// Trim unknown keys, fill defaults and fail loudly; returns the populated
/// value. `throw`, `trim` and `populate` are forced on.
pub fn apply_options(
    state: &Value,
    schema: &LazySchema,
    options: &ValidationOptions,
) -> Result<Value> {
    let mut options = *options;
    options.throw = true;
    options.trim = true;
    options.populate = true;

    let compiled = compile(schema)?;
    match check(state, &compiled, &options)? {
        Outcome::Populated(value) => Ok(value),
        Outcome::Valid => Ok(trim(state, &compiled)),
        Outcome::Invalid(message) => Err(JoyfulError::Validation(message)),
    }
}
