use std::fmt;

use jsonschema::Validator;
use serde_json::Value;

/// A single constraint failure reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value; empty for the root.
    pub instance_path: String,
    /// Engine message, prefixed with `instance_path` when it is not the root.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Join violation messages with `", "` in the order they were reported.
pub fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn collect_violations(validator: &Validator, value: &Value) -> Vec<Violation> {
    validator
        .iter_errors(value)
        .map(|err| {
            let instance_path = err.instance_path().as_str().to_string();
            let message = if instance_path.is_empty() {
                err.to_string()
            } else {
                format!("{instance_path}: {err}")
            };
            Violation {
                instance_path,
                message,
            }
        })
        .collect()
}

const MAX_REF_HOPS: usize = 32;

/// Follow local `$ref` pointers (`#` or `#/...`) from `schema` within `root`.
fn resolve_local<'a>(root: &'a Value, mut schema: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_HOPS {
        let Some(reference) = schema.get("$ref").and_then(Value::as_str) else {
            break;
        };
        let Some(pointer) = reference.strip_prefix('#') else {
            break;
        };
        match root.pointer(pointer) {
            Some(target) if !std::ptr::eq(target, schema) => schema = target,
            _ => break,
        }
    }
    schema
}

/// Fill in `default` values for properties missing from `value`, descending
/// into nested objects that are present. `root` is the whole document, used
/// to follow local references.
pub(crate) fn apply_defaults(root: &Value, schema: &Value, value: &mut Value) {
    let schema = resolve_local(root, schema);
    let (Some(properties), Value::Object(object)) =
        (schema.get("properties").and_then(Value::as_object), value)
    else {
        return;
    };

    for (name, property) in properties {
        match object.get_mut(name) {
            Some(existing) => apply_defaults(root, property, existing),
            None => {
                let default = property
                    .get("default")
                    .or_else(|| resolve_local(root, property).get("default"));
                if let Some(default) = default {
                    object.insert(name.clone(), default.clone());
                }
            }
        }
    }
}
