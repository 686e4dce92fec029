use std::fmt;
use std::sync::Arc;

use crate::builder::SchemaBuilder;
use crate::compiled::CompiledSchema;
use crate::error::Result;
use crate::literal::{FieldSchema, ObjectLiteral};

/// Callback producing a schema from the construction capability.
pub type SchemaFactory = dyn Fn(&SchemaBuilder) -> Result<Resolved> + Send + Sync;

/// What a schema factory hands back.
#[derive(Debug, Clone)]
pub enum Resolved {
    Literal(ObjectLiteral),
    Schema(CompiledSchema),
}

impl From<ObjectLiteral> for Resolved {
    fn from(literal: ObjectLiteral) -> Self {
        Self::Literal(literal)
    }
}

impl From<CompiledSchema> for Resolved {
    fn from(schema: CompiledSchema) -> Self {
        Self::Schema(schema)
    }
}

/// A schema description that has not been compiled yet.
#[derive(Clone, Default)]
pub enum LazySchema {
    /// No schema. Skipped inside a sequence; accepts any object on its own.
    #[default]
    Absent,
    Literal(ObjectLiteral),
    Compiled(CompiledSchema),
    Factory(Arc<SchemaFactory>),
    /// Members are shallow-merged in order once factories are resolved.
    Sequence(Vec<LazySchema>),
}

impl LazySchema {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&SchemaBuilder) -> Result<Resolved> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(factory))
    }

    pub fn sequence<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LazySchema>,
    {
        Self::Sequence(members.into_iter().map(Into::into).collect())
    }

    /// Shorthand for a literal built from `(name, field)` pairs.
    pub fn fields<I, K, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: Into<FieldSchema>,
    {
        let literal = fields
            .into_iter()
            .fold(ObjectLiteral::new(), |literal, (name, field)| {
                literal.field(name, field)
            });
        Self::Literal(literal)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<ObjectLiteral> for LazySchema {
    fn from(literal: ObjectLiteral) -> Self {
        Self::Literal(literal)
    }
}

impl From<CompiledSchema> for LazySchema {
    fn from(schema: CompiledSchema) -> Self {
        Self::Compiled(schema)
    }
}

impl From<Resolved> for LazySchema {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Literal(literal) => Self::Literal(literal),
            Resolved::Schema(schema) => Self::Compiled(schema),
        }
    }
}

impl<S: Into<LazySchema>> From<Option<S>> for LazySchema {
    fn from(schema: Option<S>) -> Self {
        schema.map_or(Self::Absent, Into::into)
    }
}

impl<S: Into<LazySchema>> From<Vec<S>> for LazySchema {
    fn from(members: Vec<S>) -> Self {
        Self::sequence(members)
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Compiled(schema) => f.debug_tuple("Compiled").field(schema).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Sequence(members) => f.debug_tuple("Sequence").field(members).finish(),
        }
    }
}
