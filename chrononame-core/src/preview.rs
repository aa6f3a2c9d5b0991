use crate::scanner::Plan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color::Yellow;
use std::fmt::Write;

/// Render the first `limit` operations of a plan as a table, with a trailer
/// when the plan is longer. Callers decide where the string goes; the core
/// never prints.
pub fn render_plan(plan: &Plan, use_color: bool, limit: usize) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("From").fg(Color::Cyan),
            Cell::new("To").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["From", "To"]);
    }

    for operation in plan.operations.iter().take(limit) {
        let from = operation
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| operation.source.display().to_string());
        let to = operation
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| operation.destination.display().to_string());

        if use_color {
            table.add_row(vec![Cell::new(from), Cell::new(to).fg(Color::Green)]);
        } else {
            table.add_row(vec![from, to]);
        }
    }

    let mut output = table.to_string();
    output.push('\n');

    let total = plan.operations.len();
    if total > limit {
        let more = format!("... and {} more files", total - limit);
        if use_color {
            writeln!(output, "{}", Yellow.paint(more)).unwrap();
        } else {
            writeln!(output, "{more}").unwrap();
        }
    }
    output
}
