use joyful::schema::compile_schema;
use joyful::CompileOptions;

use crate::cmd::FieldsArgs;
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::{print_fields, OutputFormat};

pub fn run(args: FieldsArgs, format: OutputFormat) -> CliResult<i32> {
    let lazy = args.source.load()?;
    let options = CompileOptions {
        allow_unknown: args.source.allow_unknown,
        ..CompileOptions::default()
    };
    let schema =
        compile_schema(&lazy, &options).map_err(|err| schema_error("schema compile failed", err))?;

    print_fields(&schema, format);
    Ok(SUCCESS)
}
