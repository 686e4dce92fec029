use serde_json::{Map, Value};

use crate::builder::Constraint;
use crate::compiled::CompiledSchema;
use crate::config::CompileOptions;
use crate::error::{Result, SchemaError};

/// What a single field of an object literal maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSchema {
    /// A concrete engine constraint.
    Constraint(Constraint),
    /// A nested object literal, wrapped into an object schema on compile.
    Nested(ObjectLiteral),
    /// An already compiled schema used as a field.
    Schema(CompiledSchema),
}

impl From<Constraint> for FieldSchema {
    fn from(constraint: Constraint) -> Self {
        Self::Constraint(constraint)
    }
}

impl From<ObjectLiteral> for FieldSchema {
    fn from(literal: ObjectLiteral) -> Self {
        Self::Nested(literal)
    }
}

impl From<CompiledSchema> for FieldSchema {
    fn from(schema: CompiledSchema) -> Self {
        Self::Schema(schema)
    }
}

/// Ordered mapping from field name to field schema.
///
/// Inserting an existing key replaces its schema but keeps the key's
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectLiteral {
    fields: Vec<(String, FieldSchema)>,
}

impl ObjectLiteral {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`ObjectLiteral::insert`].
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<FieldSchema>) -> Self {
        self.insert(name, schema);
        self
    }

    /// Insert a field, returning the schema it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        schema: impl Into<FieldSchema>,
    ) -> Option<FieldSchema> {
        let name = name.into();
        let schema = schema.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, schema)),
            None => {
                self.fields.push((name, schema));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Shallow merge: every field of `other` overwrites the same key here.
    pub fn merge(&mut self, other: &ObjectLiteral) {
        for (name, schema) in &other.fields {
            self.insert(name.clone(), schema.clone());
        }
    }

    /// Parse a JSON object whose values are JSON Schema fragments.
    pub fn from_json(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(SchemaError::InvalidConstraint {
                    field: "(root)".to_string(),
                    message: format!("object literal must be a JSON object, got {other}"),
                })
            }
        };

        let mut literal = Self::new();
        for (name, fragment) in map {
            let constraint = Constraint::from_json(&name, fragment)?;
            literal.insert(name, constraint);
        }
        Ok(literal)
    }

    /// Render the object-kind JSON Schema document for this literal.
    ///
    /// Embedded compiled schemas that use local references are placed under
    /// the root `$defs` and referenced from their field.
    pub fn to_document(&self, options: &CompileOptions) -> Value {
        let mut definitions = Map::new();
        let mut document = self.render(options, &mut definitions);
        if !definitions.is_empty() {
            document.insert("$defs".to_string(), Value::Object(definitions));
        }
        Value::Object(document)
    }

    fn render(
        &self,
        options: &CompileOptions,
        definitions: &mut Map<String, Value>,
    ) -> Map<String, Value> {
        let mut document = Map::new();
        document.insert("type".to_string(), Value::from("object"));
        if self.is_empty() {
            return document;
        }

        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, schema) in &self.fields {
            let fragment = match schema {
                FieldSchema::Constraint(constraint) => {
                    if constraint.is_required() {
                        required.push(Value::from(name.as_str()));
                    }
                    constraint.to_json()
                }
                FieldSchema::Nested(nested) => Value::Object(nested.render(options, definitions)),
                FieldSchema::Schema(compiled) => embed(compiled.document(), definitions),
            };
            properties.insert(name.clone(), fragment);
        }

        document.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            document.insert("required".to_string(), Value::Array(required));
        }
        if !options.allow_unknown {
            document.insert("additionalProperties".to_string(), Value::Bool(false));
        }
        document
    }
}

const EMBEDDED_PREFIX: &str = "joyful_embedded_";

/// Turn a compiled document into a field fragment.
///
/// A document with its own `$id` is a separate resource and resolves its own
/// references, so it moves to `$defs` untouched. A document with `#`-rooted
/// references moves to `$defs` with those references rebased onto its new
/// location. Anything else is inlined.
fn embed(document: &Value, definitions: &mut Map<String, Value>) -> Value {
    let Value::Object(keywords) = document else {
        return document.clone();
    };

    let has_id = keywords.contains_key("$id");
    if !has_id && !has_local_refs(document) {
        let mut inline = keywords.clone();
        inline.remove("$schema");
        return Value::Object(inline);
    }

    let key = format!("{EMBEDDED_PREFIX}{}", definitions.len());
    let location = format!("#/$defs/{key}");
    let mut moved = document.clone();
    if !has_id {
        if let Value::Object(moved) = &mut moved {
            moved.remove("$schema");
        }
        rebase_refs(&mut moved, &location);
    }
    definitions.insert(key, moved);

    let mut reference = Map::new();
    reference.insert("$ref".to_string(), Value::String(location));
    Value::Object(reference)
}

fn is_reference_keyword(key: &str) -> bool {
    key == "$ref" || key == "$dynamicRef"
}

fn is_root_pointer(reference: &str) -> bool {
    reference == "#" || reference.starts_with("#/")
}

fn has_local_refs(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(key, child)| match child {
            Value::String(reference) => is_reference_keyword(key) && is_root_pointer(reference),
            Value::Object(nested) if nested.contains_key("$id") => false,
            other => has_local_refs(other),
        }),
        Value::Array(items) => items.iter().any(has_local_refs),
        _ => false,
    }
}

/// Prefix `#`-rooted references with `location`, leaving nested resources
/// (subschemas with their own `$id`) alone.
fn rebase_refs(value: &mut Value, location: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                match child {
                    Value::String(reference)
                        if is_reference_keyword(key) && is_root_pointer(reference) =>
                    {
                        *reference = format!("{location}{}", &reference[1..]);
                    }
                    Value::Object(nested) if nested.contains_key("$id") => {}
                    other => rebase_refs(other, location),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                rebase_refs(item, location);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::builder::SchemaBuilder;

    #[test]
    fn insert_replaces_in_place() {
        let s = SchemaBuilder::new();
        let mut literal = ObjectLiteral::new()
            .field("a", s.string())
            .field("b", s.string());

        let previous = literal.insert("a", s.number());
        assert_eq!(previous, Some(FieldSchema::Constraint(s.string())));
        assert_eq!(literal.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(literal.get("a"), Some(&FieldSchema::Constraint(s.number())));
    }

    #[test]
    fn merge_is_shallow_and_later_wins() {
        let s = SchemaBuilder::new();
        let mut left = ObjectLiteral::new().field("a", s.string());
        let right = ObjectLiteral::new()
            .field("a", s.number())
            .field("b", s.string());

        left.merge(&right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.get("a"), Some(&FieldSchema::Constraint(s.number())));
        assert!(left.contains("b"));
    }

    #[test]
    fn document_lists_required_and_rejects_unknown() {
        let s = SchemaBuilder::new();
        let literal = ObjectLiteral::new()
            .field("name", s.string().required())
            .field("age", s.integer())
            .field("address", ObjectLiteral::new().field("city", s.string().required()));

        let document = literal.to_document(&CompileOptions::default());
        assert_eq!(
            document,
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "age": {"type": "integer"},
                    "address": {
                        "type": "object",
                        "properties": {"city": {"type": "string"}},
                        "required": ["city"],
                        "additionalProperties": false
                    }
                },
                "required": ["name"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn allow_unknown_drops_additional_properties() {
        let literal = ObjectLiteral::new().field("a", SchemaBuilder::new().string());
        let options = CompileOptions {
            allow_unknown: true,
            ..CompileOptions::default()
        };
        let document = literal.to_document(&options);
        assert!(document.get("additionalProperties").is_none());
    }

    #[test]
    fn empty_literal_accepts_any_object() {
        assert_eq!(
            ObjectLiteral::new().to_document(&CompileOptions::default()),
            json!({"type": "object"})
        );
    }

    #[test]
    fn from_json_reads_fragments() {
        let literal = ObjectLiteral::from_json(json!({
            "id": {"type": "integer", "required": true},
            "tag": {"type": "string", "default": "none"}
        }))
        .unwrap();

        assert_eq!(literal.names().collect::<Vec<_>>(), vec!["id", "tag"]);
        match literal.get("id") {
            Some(FieldSchema::Constraint(constraint)) => assert!(constraint.is_required()),
            other => panic!("unexpected field schema: {other:?}"),
        }
    }

    #[test]
    fn embedded_refs_move_under_root_defs() {
        let s = SchemaBuilder::new();
        let count = s
            .document(json!({
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "$defs": {"count": {"type": "integer"}},
                "$ref": "#/$defs/count"
            }))
            .unwrap();
        let literal = ObjectLiteral::new()
            .field("n", count)
            .field("plain", s.document(json!({"type": "string"})).unwrap());

        let document = literal.to_document(&CompileOptions::default());
        assert_eq!(
            document["properties"]["n"],
            json!({"$ref": "#/$defs/joyful_embedded_0"})
        );
        assert_eq!(
            document["$defs"]["joyful_embedded_0"],
            json!({
                "$defs": {"count": {"type": "integer"}},
                "$ref": "#/$defs/joyful_embedded_0/$defs/count"
            })
        );
        assert_eq!(document["properties"]["plain"], json!({"type": "string"}));
    }

    #[test]
    fn embedded_resource_with_id_is_not_rebased() {
        let s = SchemaBuilder::new();
        let resource = json!({
            "$id": "https://example.com/count",
            "$defs": {"count": {"type": "integer"}},
            "$ref": "#/$defs/count"
        });
        let literal = ObjectLiteral::new().field("n", s.document(resource.clone()).unwrap());

        let document = literal.to_document(&CompileOptions::default());
        assert_eq!(document["$defs"]["joyful_embedded_0"], resource);
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(matches!(
            ObjectLiteral::from_json(json!(["a"])),
            Err(SchemaError::InvalidConstraint { .. })
        ));
    }
}
