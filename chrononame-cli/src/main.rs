use anyhow::Result;
use chrononame_core::Config;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod cli;
mod execute;
mod plan;
mod rollback;

use cli::{args::effective_recursive, Cli, Commands};

fn main() {
    // The interrupt flag is checked by the executor between operations;
    // files already moved stay moved and logged.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        eprintln!("\nReceived SIGINT. Finishing the current operation...");
        interrupted_clone.store(true, Ordering::SeqCst);
    })
    .expect("Error setting SIGINT handler");

    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    // An explicit --no-color (or NO_COLOR) beats the configured default;
    // the config value only replaces terminal auto-detection.
    let use_color = if cli.no_color {
        false
    } else {
        config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal())
    };
    let preview_limit = config.defaults.preview_limit;

    let result = match cli.command {
        Commands::Plan {
            path,
            recursive,
            no_recursive,
            output,
        } => plan::handle_plan(
            &path,
            effective_recursive(recursive, no_recursive, config.defaults.recursive),
            use_color,
            preview_limit,
            output,
        ),

        Commands::Execute {
            path,
            recursive,
            no_recursive,
            output,
        } => execute::handle_execute(
            &path,
            effective_recursive(recursive, no_recursive, config.defaults.recursive),
            use_color,
            preview_limit,
            cli.yes,
            &interrupted,
            output,
        ),

        Commands::Rollback { path, output } => {
            rollback::handle_rollback(&path, cli.yes, output)
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Ask a yes/no question on stdout and read the answer from stdin.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    print!("{question} (yes/no): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}
