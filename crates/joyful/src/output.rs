use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use joyful::{CompiledSchema, Outcome};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Value>,
}

impl<'a> CheckOutput<'a> {
    fn from_outcome(outcome: &'a Outcome) -> Self {
        match outcome {
            Outcome::Valid => Self {
                valid: true,
                violations: None,
                value: None,
            },
            Outcome::Invalid(message) => Self {
                valid: false,
                violations: Some(message),
                value: None,
            },
            Outcome::Populated(value) => Self {
                valid: true,
                violations: None,
                value: Some(value),
            },
        }
    }
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a Value>,
}

pub fn print_outcome(outcome: &Outcome, format: OutputFormat) {
    let out = CheckOutput::from_outcome(outcome);
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let detail = match outcome {
                Outcome::Valid => String::new(),
                Outcome::Invalid(message) => message.clone(),
                Outcome::Populated(value) => value_preview(value),
            };
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["RESULT", "DETAIL"])
                .add_row(vec![result_label(out.valid).to_string(), detail]);
            println!("{table}");
        }
        OutputFormat::Pretty => match outcome {
            Outcome::Valid => println!("valid"),
            Outcome::Invalid(message) => println!("invalid: {message}"),
            Outcome::Populated(value) => println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            ),
        },
    }
}

pub fn print_fields(schema: &CompiledSchema, format: OutputFormat) {
    let fields: Vec<FieldOutput<'_>> = schema
        .fields()
        .iter()
        .map(|name| describe_field(schema.document(), name))
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&fields).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "TYPE", "REQUIRED", "DEFAULT"]);
            for field in &fields {
                table.add_row(vec![
                    field.name.to_string(),
                    field.kind.clone(),
                    field.required.to_string(),
                    field.default.map(value_preview).unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for field in &fields {
                let marker = if field.required { " (required)" } else { "" };
                println!("{}: {}{marker}", field.name, field.kind);
            }
        }
    }
}

fn describe_field<'a>(document: &'a Value, name: &'a str) -> FieldOutput<'a> {
    let property = document.get("properties").and_then(|p| p.get(name));
    let kind = match property.and_then(|p| p.get("type")) {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
        None => "any".to_string(),
    };
    let required = document
        .get("required")
        .and_then(Value::as_array)
        .is_some_and(|names| names.iter().any(|n| n.as_str() == Some(name)));

    FieldOutput {
        name,
        kind,
        required,
        default: property.and_then(|p| p.get("default")),
    }
}

fn result_label(valid: bool) -> &'static str {
    if valid {
        "VALID"
    } else {
        "INVALID"
    }
}

fn value_preview(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
