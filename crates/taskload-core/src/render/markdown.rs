//! Markdown summary for review workflows.

use crate::diff::UtilizationReport;
use std::fmt::Write as _;

/// Render a Markdown summary of a [`UtilizationReport`].
pub fn render_markdown(report: &UtilizationReport) -> String {
    let mut out = String::new();

    out.push_str("## Task Utilization\n\n");
    let _ = write!(
        out,
        "**Sample**: `{}`  \n**Elapsed**: {} ticks  \n**Execution units**: {}\n\n",
        report.request_id, report.elapsed, report.execution_units
    );

    if report.matched.is_empty() {
        out.push_str("_No task was present in both snapshots._\n\n");
    } else {
        out.push_str("| Task | Handle | Ticks | Share |\n|---|---|---:|---:|\n");
        for m in &report.matched {
            let _ = writeln!(
                out,
                "| {} | `{}` | {} | {}% |",
                escape_cell(&m.name),
                m.handle,
                m.delta,
                m.percent
            );
        }
        let _ = writeln!(out, "\n**Total**: {}%\n", report.total_percent());
    }

    if !report.deleted.is_empty() {
        let _ = writeln!(out, "### Deleted ({})\n", report.deleted.len());
        for d in &report.deleted {
            let _ = writeln!(out, "- {} (`{}`)", d.name, d.handle);
        }
        out.push('\n');
    }

    if !report.created.is_empty() {
        let _ = writeln!(out, "### Created ({})\n", report.created.len());
        for c in &report.created {
            let _ = writeln!(out, "- {} (`{}`)", c.name, c.handle);
        }
        out.push('\n');
    }

    if !report.reused_handles.is_empty() {
        out.push_str("### Recycled handles\n\n");
        for h in &report.reused_handles {
            let _ = writeln!(
                out,
                "- `{}`: runtime went backwards, counted as deleted + created",
                h
            );
        }
        out.push('\n');
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
