use clap::{Args, Subcommand};
use std::path::PathBuf;

use joyful::schema::{load_directory, load_document, load_literal, LoadConfig};
use joyful::LazySchema;

use crate::exit::{schema_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod check;
pub mod fields;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON value against a schema.
    Check(CheckArgs),
    /// List the top-level fields a schema declares.
    Fields(FieldsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Fields(args) => fields::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Default)]
pub struct SchemaSource {
    /// Object literal file (field name to JSON Schema fragment). Repeat to merge in order.
    #[arg(long = "schema", value_name = "FILE", conflicts_with_all = ["schema_dir", "document"])]
    pub schemas: Vec<PathBuf>,
    /// Directory of `*.schema.json` literals, merged in file-name order.
    #[arg(long, value_name = "DIR", conflicts_with_all = ["schemas", "document"])]
    pub schema_dir: Option<PathBuf>,
    /// Complete JSON Schema document.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["schemas", "schema_dir"])]
    pub document: Option<PathBuf>,
    /// Accept top-level keys the schema does not declare. Literal schemas only.
    #[arg(long, conflicts_with = "document")]
    pub allow_unknown: bool,
}

impl SchemaSource {
    pub fn load(&self) -> CliResult<LazySchema> {
        let config = LoadConfig::default();

        if let Some(path) = &self.document {
            let schema = load_document(path, &config)
                .map_err(|err| schema_error(&format!("failed loading {}", path.display()), err))?;
            return Ok(LazySchema::Compiled(schema));
        }
        if let Some(dir) = &self.schema_dir {
            return load_directory(dir, &config)
                .map_err(|err| schema_error(&format!("failed loading {}", dir.display()), err));
        }

        let mut literals = Vec::with_capacity(self.schemas.len());
        for path in &self.schemas {
            let literal = load_literal(path, &config)
                .map_err(|err| schema_error(&format!("failed loading {}", path.display()), err))?;
            literals.push(LazySchema::Literal(literal));
        }
        match literals.len() {
            0 => Err(CliError::new(
                USAGE,
                "one of --schema, --schema-dir or --document is required",
            )),
            1 => Ok(literals.remove(0)),
            _ => Ok(LazySchema::Sequence(literals)),
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SchemaSource,
    /// Read the value to validate from a file.
    #[arg(long, value_name = "FILE", conflicts_with = "json")]
    pub data: Option<PathBuf>,
    /// Inline JSON value to validate.
    #[arg(long, conflicts_with = "data")]
    pub json: Option<String>,
    /// Drop undeclared top-level keys before validating.
    #[arg(long)]
    pub trim: bool,
    /// Print the value with defaults applied.
    #[arg(long)]
    pub populate: bool,
    /// Report violations and exit 1 instead of failing with exit 60.
    #[arg(long)]
    pub no_throw: bool,
}

#[derive(Args, Debug)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub source: SchemaSource,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
