use std::fs;

use joyful::schema::compile_schema;
use joyful::{check, CompileOptions, ValidationOptions};
use serde_json::Value;

use crate::cmd::CheckArgs;
use crate::exit::{
    io_error, joyful_error, schema_error, CliError, CliResult, DATA_INVALID, FAILURE, SUCCESS,
    USAGE,
};
use crate::output::{print_outcome, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let lazy = args.source.load()?;
    let compile_options = CompileOptions {
        allow_unknown: args.source.allow_unknown,
        ..CompileOptions::default()
    };
    let schema = compile_schema(&lazy, &compile_options)
        .map_err(|err| schema_error("schema compile failed", err))?;

    let state = resolve_state(&args)?;
    let options = validation_options(&args);
    tracing::debug!(?options, fields = schema.fields().len(), "checking value");

    let outcome =
        check(&state, &schema, &options).map_err(|err| joyful_error("validation failed", err))?;
    print_outcome(&outcome, format);

    if outcome.is_valid() {
        Ok(SUCCESS)
    } else {
        Ok(FAILURE)
    }
}

fn validation_options(args: &CheckArgs) -> ValidationOptions {
    ValidationOptions::default()
        .with_throw(!args.no_throw)
        .with_trim(args.trim)
        .with_populate(args.populate)
}

fn resolve_state(args: &CheckArgs) -> CliResult<Value> {
    if let Some(json) = &args.json {
        return serde_json::from_str(json)
            .map_err(|err| CliError::new(USAGE, format!("--json is not valid JSON: {err}")));
    }
    if let Some(path) = &args.data {
        let content = fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return serde_json::from_str(&content).map_err(|err| {
            CliError::new(
                DATA_INVALID,
                format!("{} is not valid JSON: {err}", path.display()),
            )
        });
    }
    Err(CliError::new(USAGE, "one of --data or --json is required"))
}
