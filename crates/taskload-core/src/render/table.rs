//! Tab-separated console table.

use crate::diff::UtilizationReport;
use std::fmt::Write as _;

/// Render one line per task: `name\tdelta\tpercent%`
///
/// Deleted and created tasks get a `Deleted` / `Created` marker in place of
/// the numbers. Order follows the report: matched, deleted, created.
pub fn render_table(report: &UtilizationReport) -> String {
    let mut out = String::new();
    out.push_str("| Task | Run Time | Percentage\n");

    // `write!` into a String cannot fail.
    for m in &report.matched {
        let _ = writeln!(out, "| {}\t| {}\t| {}%", m.name, m.delta, m.percent);
    }
    for d in &report.deleted {
        let _ = writeln!(out, "| {}\t| Deleted", d.name);
    }
    for c in &report.created {
        let _ = writeln!(out, "| {}\t| Created", c.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::TaskUtilization;
    use crate::model::{TaskHandle, TaskRecord};
    use taskload_core_types::RequestId;

    #[test]
    fn test_table_lines_in_report_order() {
        let report = UtilizationReport {
            request_id: RequestId::new(),
            elapsed: 300,
            execution_units: 1,
            matched: vec![TaskUtilization {
                handle: TaskHandle::new(1),
                name: "idle".to_string(),
                delta: 200,
                percent: 66,
            }],
            deleted: vec![TaskRecord::new(2, "gone", 500)],
            created: vec![TaskRecord::new(3, "new", 5)],
            reused_handles: vec![],
        };
        let text = render_table(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "| idle\t| 200\t| 66%");
        assert_eq!(lines[2], "| gone\t| Deleted");
        assert_eq!(lines[3], "| new\t| Created");
    }
}
