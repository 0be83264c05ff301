// FofaSift - core/export.rs
//
// CSV and JSON export of filtered host records.
// Core layer: writes to any Write trait object.
//
// CSV layout is fixed: a header row plus one row per record, thirteen
// columns, every field wrapped in double quotes, comma separated, rows joined
// by `\n` with no trailing line break. Field values are written verbatim,
// embedded quotes included.
//
// `export_csv_strict` is the RFC 4180 variant of the same layout: embedded
// quotes are doubled so spreadsheet importers see the intended cells.

use crate::core::model::{HostRecord, RecordField};
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;

/// Render records as delimited text.
///
/// Splitting the result on `\n` yields `records.len() + 1` lines.
pub fn to_delimited_text(records: &[HostRecord]) -> String {
    let header = RecordField::all().iter().map(RecordField::header);
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(quoted_row(header));
    for record in records {
        lines.push(quoted_row(
            RecordField::all().iter().map(|field| record.field(*field)),
        ));
    }
    lines.join("\n")
}

/// Export records as CSV, byte-for-byte identical to `to_delimited_text`.
///
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(
    records: &[HostRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let text = to_delimited_text(records);
    write_text(writer, &text, export_path)?;

    tracing::debug!(
        path = %export_path.display(),
        rows = records.len(),
        bytes = text.len(),
        "CSV export written"
    );

    Ok(records.len())
}

/// Export records as RFC 4180 CSV: same columns and quoting as `export_csv`,
/// but embedded double quotes are doubled.
///
/// Returns the number of data rows written.
pub fn export_csv_strict<W: Write>(
    records: &[HostRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let text = render_strict_csv(records).map_err(|e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    write_text(writer, &text, export_path)?;

    tracing::debug!(
        path = %export_path.display(),
        rows = records.len(),
        bytes = text.len(),
        "Strict CSV export written"
    );

    Ok(records.len())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[HostRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Default export file name for a given date: `fofa_data_<YYYY-MM-DD>.csv`.
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        constants::EXPORT_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        constants::CSV_EXTENSION
    )
}

fn quoted_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells
        .map(|cell| format!("\"{cell}\""))
        .collect::<Vec<_>>()
        .join(",")
}

fn write_text<W: Write>(mut writer: W, text: &str, export_path: &Path) -> Result<(), ExportError> {
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })
}

fn render_strict_csv(records: &[HostRecord]) -> Result<String, csv::Error> {
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut csv_writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        csv_writer.write_record(RecordField::all().iter().map(RecordField::header))?;
        for record in records {
            csv_writer.write_record(RecordField::all().iter().map(|field| record.field(*field)))?;
        }
        csv_writer.flush()?;
    }

    // Every field came from a &str, so the buffer is valid UTF-8.
    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HEADER: &str = "\"IP\",\"Port\",\"Country\",\"Region\",\"City\",\"ASN\",\
                          \"Organization\",\"Date\",\"Server\",\"Title\",\"Protocol\",\
                          \"Domain\",\"Cloud\"";

    fn make_record(ip: &str, title: &str) -> HostRecord {
        HostRecord {
            country: "Switzerland".to_string(),
            title: title.to_string(),
            ..HostRecord::new(ip, "443")
        }
    }

    #[test]
    fn test_header_is_exact() {
        assert_eq!(to_delimited_text(&[]), HEADER);
    }

    #[test]
    fn test_rows_are_fully_quoted() {
        let text = to_delimited_text(&[make_record("212.94.40.19", "Home")]);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "\"212.94.40.19\",\"443\",\"Switzerland\",\"\",\"\",\"\",\"\",\"\",\"\",\
             \"Home\",\"HTTP/1.1\",\"\",\"\""
        );
    }

    #[test]
    fn test_line_and_column_counts() {
        let records: Vec<_> = (0..5)
            .map(|i| make_record(&format!("10.0.0.{i}"), "Title"))
            .collect();
        let text = to_delimited_text(&records);
        assert!(!text.ends_with('\n'));
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), records.len() + 1);

        let header_tokens: Vec<&str> = lines[0].split(',').collect();
        assert_eq!(header_tokens.len(), 13);
        assert!(header_tokens
            .iter()
            .all(|t| t.len() >= 2 && t.starts_with('"') && t.ends_with('"')));
    }

    #[test]
    fn test_embedded_quotes_are_written_verbatim() {
        let record = HostRecord {
            title: "Say \"hi\"".to_string(),
            ..HostRecord::new("1.1.1.1", "80")
        };
        let text = to_delimited_text(&[record]);
        let row = text.split('\n').nth(1).unwrap();
        assert_eq!(
            row,
            "\"1.1.1.1\",\"80\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\
             \"Say \"hi\"\",\"HTTP/1.1\",\"\",\"\""
        );
    }

    #[test]
    fn test_strict_csv_doubles_embedded_quotes() {
        let records = vec![make_record("1.1.1.1", "Say \"hi\", now")];
        let mut buf = Vec::new();
        let count = export_csv_strict(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 1);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(HEADER));
        assert!(!text.ends_with('\n'));
        assert!(text.contains("\"Say \"\"hi\"\", now\""));

        // Without embedded quotes both flavours agree.
        let plain = vec![make_record("2.2.2.2", "Home")];
        let mut buf = Vec::new();
        export_csv_strict(&plain, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_delimited_text(&plain));
    }

    #[test]
    fn test_csv_export_matches_text() {
        let records = vec![make_record("1.1.1.1", "One"), make_record("2.2.2.2", "Two")];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), to_delimited_text(&records));
    }

    #[test]
    fn test_json_export() {
        let records = vec![make_record("1.1.1.1", "Test title")];
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let parsed: Vec<HostRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_default_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 23).unwrap();
        assert_eq!(default_export_file_name(date), "fofa_data_2025-11-23.csv");
    }
}
