use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::compiled::CompiledSchema;
use crate::config::LoadConfig;
use crate::error::{Result, SchemaError};
use crate::lazy::LazySchema;
use crate::literal::ObjectLiteral;

const SCHEMA_SUFFIX: &str = ".schema.json";

/// Load an object literal (field name to JSON Schema fragment) from a file.
pub fn load_literal(path: &Path, config: &LoadConfig) -> Result<ObjectLiteral> {
    let value = read_json(path, config)?;
    ObjectLiteral::from_json(value)
}

/// Load and compile a complete JSON Schema document from a file.
pub fn load_document(path: &Path, config: &LoadConfig) -> Result<CompiledSchema> {
    let value = read_json(path, config)?;
    CompiledSchema::from_document(value)
}

/// Load every `*.schema.json` literal in a directory, in file-name order, as
/// a schema sequence.
pub fn load_directory(path: &Path, config: &LoadConfig) -> Result<LazySchema> {
    let entries = std::fs::read_dir(path)
        .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

    let mut schema_files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.to_ascii_lowercase().ends_with(SCHEMA_SUFFIX) {
            continue;
        }

        let entry_path = entry.path();
        let file_type = std::fs::symlink_metadata(&entry_path)
            .map_err(|err| SchemaError::LoadFailed(err.to_string()))?
            .file_type();
        if file_type.is_symlink() {
            return Err(SchemaError::LoadFailed(format!(
                "refusing to load schema symlink: {file_name}"
            )));
        }
        if !file_type.is_file() {
            continue;
        }

        schema_files.push((file_name, entry_path));
        if schema_files.len() > config.max_schemas_from_directory {
            return Err(SchemaError::LoadFailed(format!(
                "schema count exceeds configured max ({}): {}",
                config.max_schemas_from_directory,
                schema_files.len()
            )));
        }
    }

    schema_files.sort_by(|(left, _), (right, _)| left.cmp(right));

    let mut members = Vec::with_capacity(schema_files.len());
    for (file_name, entry_path) in schema_files {
        debug!(file = %file_name, "loading schema literal");
        members.push(LazySchema::Literal(load_literal(&entry_path, config)?));
    }
    Ok(LazySchema::Sequence(members))
}

fn read_json(path: &Path, config: &LoadConfig) -> Result<Value> {
    let file = std::fs::File::open(path).map_err(|err| {
        SchemaError::LoadFailed(format!("failed opening schema {}: {err}", path.display()))
    })?;
    let metadata = file
        .metadata()
        .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;

    if metadata.len() > config.max_schema_file_size as u64 {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large ({} bytes): {}",
            metadata.len(),
            path.display()
        )));
    }

    let max_bytes = config.max_schema_file_size;
    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            SchemaError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large while reading: {}",
            path.display()
        )));
    }

    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;
    use crate::compiler::compile;

    const USER_LITERAL: &str = r#"{
        "id": { "type": "integer", "required": true },
        "name": { "type": "string" }
    }"#;

    fn make_temp_schema_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "joyful-schema-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_schema(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn literal_file_compiles() {
        let dir = make_temp_schema_dir("literal");
        let path = write_schema(&dir, "user.json", USER_LITERAL);

        let literal = load_literal(&path, &LoadConfig::default()).unwrap();
        let compiled = compile(&LazySchema::from(literal)).unwrap();
        assert!(compiled.is_valid(&json!({"id": 1, "name": "ok"})));
        assert!(!compiled.is_valid(&json!({"name": "ok"})));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn document_file_compiles() {
        let dir = make_temp_schema_dir("document");
        let path = write_schema(
            &dir,
            "doc.json",
            r#"{"type":"object","properties":{"x":{"type":"boolean"}},"required":["x"]}"#,
        );

        let compiled = load_document(&path, &LoadConfig::default()).unwrap();
        assert_eq!(compiled.fields(), ["x"]);
        assert!(compiled.is_valid(&json!({"x": true})));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_json_fails() {
        let dir = make_temp_schema_dir("invalid-json");
        let path = write_schema(&dir, "broken.json", "not-json");

        assert!(matches!(
            load_literal(&path, &LoadConfig::default()),
            Err(SchemaError::InvalidJson(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn directory_merges_in_file_name_order() {
        let dir = make_temp_schema_dir("directory");
        write_schema(&dir, "20-override.schema.json", r#"{"id": {"type": "string"}}"#);
        write_schema(&dir, "10-base.schema.json", USER_LITERAL);
        write_schema(&dir, "ignored.json", r#"{"other": {"type": "string"}}"#);

        let lazy = load_directory(&dir, &LoadConfig::default()).unwrap();
        let compiled = compile(&lazy).unwrap();
        assert_eq!(compiled.fields(), ["id", "name"]);
        assert!(compiled.is_valid(&json!({"id": "abc"})));
        assert!(!compiled.is_valid(&json!({"id": 1})));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_count_limit_is_enforced() {
        let dir = make_temp_schema_dir("count-limit");
        write_schema(&dir, "a.schema.json", USER_LITERAL);
        write_schema(&dir, "b.schema.json", USER_LITERAL);

        let config = LoadConfig {
            max_schemas_from_directory: 1,
            ..LoadConfig::default()
        };
        assert!(matches!(
            load_directory(&dir, &config),
            Err(SchemaError::LoadFailed(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_file_size_limit_is_enforced() {
        let dir = make_temp_schema_dir("size-limit");
        let path = write_schema(&dir, "user.json", USER_LITERAL);

        let config = LoadConfig {
            max_schema_file_size: 8,
            ..LoadConfig::default()
        };
        assert!(matches!(
            load_literal(&path, &config),
            Err(SchemaError::LoadFailed(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = make_temp_schema_dir("missing").join("nope");
        assert!(matches!(
            load_directory(&dir, &LoadConfig::default()),
            Err(SchemaError::LoadFailed(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_schema_is_rejected() {
        let dir = make_temp_schema_dir("symlink-schema");
        let target = write_schema(&dir, "target.json", USER_LITERAL);
        let link = dir.join("user.schema.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(matches!(
            load_directory(&dir, &LoadConfig::default()),
            Err(SchemaError::LoadFailed(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
