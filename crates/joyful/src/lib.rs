//! Validate data objects against lazily described schemas.
//!
//! joyful accepts a schema as an object literal of field constraints, an
//! already compiled schema, a factory that builds one, or a sequence of these,
//! and validates a JSON value against it in one call.
//!
//! ```
//! use joyful::{joyful, LazySchema, ObjectLiteral, Outcome, SchemaBuilder, ValidationOptions};
//! use serde_json::json;
//!
//! let s = SchemaBuilder::new();
//! let schema = LazySchema::from(ObjectLiteral::new().field("foo", s.string().required()));
//!
//! let outcome = joyful(&json!({"foo": "Foo!"}), &schema, &ValidationOptions::default()).unwrap();
//! assert_eq!(outcome, Outcome::Valid);
//! ```
//!
//! # Crate Structure
//!
//! - [`schema`]: lazy schema forms and the compiler (re-export of `joyful-schema`)
//! - [`joyful()`], [`validate`], [`apply_options`]: the validation facade

pub mod error;
pub mod facade;
pub mod options;

/// Re-export schema types.
pub mod schema {
    pub use joyful_schema::*;
}

pub use error::{JoyfulError, Result};
pub use facade::{apply_options, check, joyful, trim, validate, Outcome};
pub use joyful_schema::{
    compile, compile_with, CompileOptions, CompiledSchema, Constraint, FieldSchema, LazySchema,
    ObjectLiteral, Resolved, SchemaBuilder, SchemaError,
};
pub use options::ValidationOptions;
