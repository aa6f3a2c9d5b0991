use anyhow::Result;
use chrononame_core::{plan_operation, render_plan, OutputFormatter};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_plan(
    path: &Path,
    recursive: bool,
    use_color: bool,
    preview_limit: usize,
    output: OutputFormat,
) -> Result<()> {
    let result = plan_operation(path, recursive)?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !result.plan.is_empty() {
                print!("{}", render_plan(&result.plan, use_color, preview_limit));
            }
            print!("{}", result.format_summary());
        },
    }

    Ok(())
}
