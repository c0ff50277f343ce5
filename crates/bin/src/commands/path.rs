//! Path command - shows how segments resolve without touching the backend.

use docshim::Reference;
use serde_json::json;

use super::CommandResult;
use crate::cli::{OutputFormat, RefArgs};
use crate::output::print_value;

/// Run the `path` command
pub fn run(args: &RefArgs, format: OutputFormat) -> CommandResult {
    let reference = Reference::new(&args.segments);
    print_value(
        &json!({
            "rest_path": reference.rest_path(),
            "dotted_path": reference.dotted_path(),
            "kind": reference.kind().name(),
        }),
        format,
    )?;
    Ok(())
}
