//! Output formatting helpers for human-readable and JSON output.

use docshim::Snapshot;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Print any JSON value in the chosen format.
pub fn print_value(value: &Value, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Human => match value {
            Value::Object(map) => {
                let rows: Vec<Vec<String>> = map
                    .iter()
                    .map(|(key, value)| vec![key.clone(), cell(value)])
                    .collect();
                print_table(&["FIELD", "VALUE"], &rows);
            }
            other => println!("{}", cell(other)),
        },
    }
    Ok(())
}

/// Print a snapshot: its documents as rows when it holds a collection.
pub fn print_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<(), serde_json::Error> {
    if format == OutputFormat::Human && snapshot.data().is_array() {
        if snapshot.docs().is_empty() {
            println!("No documents found.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = snapshot
            .docs()
            .iter()
            .map(|doc| vec![doc.id().to_string(), cell(doc.data())])
            .collect();
        print_table(&["ID", "DATA"], &rows);
        return Ok(());
    }
    print_value(snapshot.data(), format)
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  ").trim_end());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}
