//! Schema normalization for joyful.
//!
//! A [`LazySchema`] describes a schema indirectly: an object literal of field
//! constraints, an already compiled schema, a factory that builds one from a
//! [`SchemaBuilder`], or a sequence of these merged together. [`compile`]
//! turns any of them into a single [`CompiledSchema`] backed by a JSON Schema
//! 2020-12 validator.

pub mod builder;
pub mod compiled;
pub mod compiler;
pub mod config;
pub mod error;
pub mod lazy;
pub mod literal;
pub mod loader;
pub mod validator;

pub use builder::{Constraint, SchemaBuilder};
pub use compiled::CompiledSchema;
pub use compiler::{compile, compile_schema, compile_with, Compiled};
pub use config::{CompileOptions, LoadConfig};
pub use error::{Result, SchemaError};
pub use lazy::{LazySchema, Resolved, SchemaFactory};
pub use literal::{FieldSchema, ObjectLiteral};
pub use loader::{load_directory, load_document, load_literal};
pub use validator::{join_violations, Violation};
