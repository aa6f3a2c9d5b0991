use anyhow::Result;
use chrononame_core::{resolve_target, rollback_operation, OutputFormatter};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_rollback(path: &Path, assume_yes: bool, output: OutputFormat) -> Result<()> {
    // A bad target should fail before anyone is asked to confirm.
    resolve_target(path)?;

    if !assume_yes
        && !crate::confirm(&format!("Rollback last batch in {}?", path.display()))?
    {
        println!("Rollback canceled.");
        return Ok(());
    }

    let result = rollback_operation(path)?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            print!("{}", result.format_summary());
        },
    }

    Ok(())
}
