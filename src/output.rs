// FofaSift - output.rs
//
// Terminal rendering for the CLI: an aligned results table and the summary
// block. Binary-side only; exports go through core::export instead.

use fofasift::core::model::{HostRecord, RecordField};
use fofasift::core::stats::DatasetSummary;
use std::fmt::Write;

/// Columns shown in the table view. The export carries all thirteen.
const TABLE_COLUMNS: &[RecordField] = &[
    RecordField::Ip,
    RecordField::Port,
    RecordField::Country,
    RecordField::City,
    RecordField::Organization,
    RecordField::Server,
    RecordField::Title,
    RecordField::Protocol,
];

const ELLIPSIS: &str = "...";

/// Render records as a left-aligned text table with a header and footer.
pub fn render_table(records: &[&HostRecord], total: usize, max_title_width: usize) -> String {
    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            TABLE_COLUMNS
                .iter()
                .map(|&field| {
                    let value = record.field(field);
                    if field == RecordField::Title {
                        truncate(value, max_title_width)
                    } else {
                        value.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = TABLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(col, field)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(field.header().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let headers: Vec<&str> = TABLE_COLUMNS.iter().map(RecordField::header).collect();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "\nShowing {} of {} results", records.len(), total);
    out
}

/// Render the summary statistics block.
pub fn render_summary(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary Statistics");
    let _ = writeln!(out, "  Total IPs:        {}", summary.total_records);
    let _ = writeln!(out, "  Unique Countries: {}", summary.unique_countries);
    let _ = writeln!(out, "  Unique Ports:     {}", summary.unique_ports);
    let _ = writeln!(out, "  HTTPS Endpoints:  {}", summary.https_endpoints);
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Shorten `value` to at most `max` characters, marking the cut.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut short: String = value.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Please login", 20), "Please login");
        assert_eq!(truncate("Home - IT-Lösungen für KMU", 10), "Home - ...");
        assert_eq!(truncate("Home - IT-Lösungen für KMU", 10).chars().count(), 10);
    }

    #[test]
    fn test_table_layout() {
        let record = HostRecord {
            country: "Switzerland".to_string(),
            title: "Home".to_string(),
            ..HostRecord::new("212.94.40.19", "443")
        };
        let table = render_table(&[&record], 9, 48);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("IP            Port  Country"));
        assert!(lines[1].starts_with("------------  ----"));
        assert!(lines[2].starts_with("212.94.40.19  443   Switzerland"));
        assert!(lines[2].ends_with("Home   HTTP/1.1"));
        assert_eq!(lines.last().copied(), Some("Showing 1 of 9 results"));
    }

    #[test]
    fn test_summary_block() {
        let summary = DatasetSummary {
            total_records: 9,
            unique_countries: 5,
            unique_ports: 6,
            https_endpoints: 4,
        };
        let text = render_summary(&summary);
        assert!(text.contains("Total IPs:        9"));
        assert!(text.contains("HTTPS Endpoints:  4"));
    }
}
