use anyhow::Result;
use chrononame_core::{execute_operation, plan_operation, render_plan, OutputFormatter};
use std::path::Path;
use std::sync::atomic::AtomicBool;

use crate::cli::OutputFormat;

#[allow(clippy::fn_params_excessive_bools)]
pub fn handle_execute(
    path: &Path,
    recursive: bool,
    use_color: bool,
    preview_limit: usize,
    assume_yes: bool,
    interrupted: &AtomicBool,
    output: OutputFormat,
) -> Result<()> {
    let planned = plan_operation(path, recursive)?;

    if planned.plan.is_empty() {
        match output {
            OutputFormat::Json => println!("{}", planned.format_json()),
            OutputFormat::Summary => print!("{}", planned.format_summary()),
        }
        return Ok(());
    }

    if !assume_yes {
        print!(
            "{}",
            render_plan(&planned.plan, use_color, preview_limit)
        );
        if !crate::confirm("Proceed with rename?")? {
            println!("Rename canceled by user.");
            return Ok(());
        }
    }

    let result = execute_operation(path, &planned.plan, Some(interrupted))?;

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
