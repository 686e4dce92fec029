use std::borrow::Cow;

use tracing::debug;

use crate::builder::SchemaBuilder;
use crate::compiled::CompiledSchema;
use crate::config::CompileOptions;
use crate::error::{Result, SchemaError};
use crate::lazy::{LazySchema, Resolved};
use crate::literal::ObjectLiteral;

const COMPOSITION_RULE: &str =
    "only plain-object members are allowed when compiling an array of schemas";

/// Result of [`compile_with`]: a schema, or the bare literal when object
/// wrapping was turned off.
#[derive(Debug, Clone)]
pub enum Compiled {
    Schema(CompiledSchema),
    Literal(ObjectLiteral),
}

impl Compiled {
    pub fn into_schema(self) -> Option<CompiledSchema> {
        match self {
            Self::Schema(schema) => Some(schema),
            Self::Literal(_) => None,
        }
    }
}

/// Compile any lazy schema into a schema with default options.
pub fn compile(schema: &LazySchema) -> Result<CompiledSchema> {
    compile_schema(schema, &CompileOptions::default())
}

/// Compile with explicit options.
///
/// With `wrap_object` disabled a top-level object literal is handed back
/// unwrapped; every other form still compiles to a schema.
pub fn compile_with(schema: &LazySchema, options: &CompileOptions) -> Result<Compiled> {
    match schema {
        LazySchema::Literal(literal) if !options.wrap_object => {
            Ok(Compiled::Literal(literal.clone()))
        }
        other => compile_schema(other, options).map(Compiled::Schema),
    }
}

/// Compile with explicit options, always producing a schema.
pub fn compile_schema(schema: &LazySchema, options: &CompileOptions) -> Result<CompiledSchema> {
    let builder = SchemaBuilder::with_options(*options);

    match schema {
        LazySchema::Compiled(compiled) => {
            debug!("schema already compiled");
            Ok(compiled.clone())
        }
        LazySchema::Sequence(members) => {
            let merged = merge_sequence(members, &builder)?;
            debug!(
                members = members.len(),
                fields = merged.len(),
                "compiling merged schema sequence"
            );
            CompiledSchema::from_literal(&merged, options)
        }
        LazySchema::Factory(factory) => match factory(&builder)? {
            Resolved::Schema(compiled) => {
                debug!("schema factory returned a compiled schema");
                Ok(compiled)
            }
            Resolved::Literal(literal) => {
                debug!(fields = literal.len(), "wrapping schema factory literal");
                CompiledSchema::from_literal(&literal, options)
            }
        },
        LazySchema::Literal(literal) => {
            debug!(fields = literal.len(), "wrapping object literal");
            CompiledSchema::from_literal(literal, options)
        }
        LazySchema::Absent => {
            debug!("no schema given, accepting any object");
            CompiledSchema::from_literal(&ObjectLiteral::new(), options)
        }
    }
}

fn merge_sequence(members: &[LazySchema], builder: &SchemaBuilder) -> Result<ObjectLiteral> {
    // Resolve every factory before checking member kinds.
    let mut resolved: Vec<(usize, Cow<'_, LazySchema>)> = Vec::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        match member {
            LazySchema::Absent => {}
            LazySchema::Factory(factory) => {
                let produced = LazySchema::from(factory(builder)?);
                resolved.push((index, Cow::Owned(produced)));
            }
            other => resolved.push((index, Cow::Borrowed(other))),
        }
    }

    let mut merged = ObjectLiteral::new();
    for (index, member) in &resolved {
        match member.as_ref() {
            LazySchema::Literal(literal) => merged.merge(literal),
            other => {
                return Err(SchemaError::InvalidComposition(format!(
                    "{COMPOSITION_RULE} (member {index} is {})",
                    describe(other)
                )))
            }
        }
    }
    Ok(merged)
}

fn describe(schema: &LazySchema) -> &'static str {
    match schema {
        LazySchema::Absent => "absent",
        LazySchema::Literal(_) => "an object literal",
        LazySchema::Compiled(_) => "a compiled schema",
        LazySchema::Factory(_) => "a schema factory",
        LazySchema::Sequence(_) => "a nested sequence",
    }
}
