//! Output formatting for resource listings.
//!
//! Supports table (human-readable) and JSON output. The table renderer is
//! polymorphic over the element shape: rows are serialized to JSON
//! objects and columns derived from the union of their keys, so listing
//! commands never teach the renderer about their fields.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a fetched collection in the selected format, one batch in
    /// response order.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_collection<W, T>(&self, writer: &mut W, items: &[T]) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, items)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                let rows = items
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| CliError::Format(format!("row serialization failed: {e}")))?;
                write_table(writer, &rows)?;
            }
        }
        Ok(())
    }

    /// Write a collection to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn collection_to_string<T>(&self, items: &[T]) -> Result<String, CliError>
    where
        T: Serialize,
    {
        let mut buf = Vec::new();
        self.write_collection(&mut buf, items)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Write rows as a padded table. Non-object rows render under a single
/// VALUE column.
fn write_table<W: Write>(writer: &mut W, rows: &[Value]) -> Result<(), CliError> {
    if rows.is_empty() {
        writeln!(writer, "No results")?;
        return Ok(());
    }

    let columns = collect_columns(rows);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|col| cell_text(row, col)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(String::len).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{:<width$}", col.to_uppercase(), width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    let header = header.trim_end();
    writeln!(writer, "{header}")?;
    writeln!(writer, "{}", "─".repeat(header.len()))?;

    for row in &cells {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    writeln!(writer)?;
    writeln!(writer, "Total: {} item(s)", rows.len())?;
    Ok(())
}

/// Union of object keys across rows.
fn collect_columns(rows: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.iter().any(|col| col == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    if columns.is_empty() {
        columns.push("value".to_string());
    }
    columns
}

fn cell_text(row: &Value, column: &str) -> String {
    let value = match row {
        Value::Object(map) => map.get(column).unwrap_or(&Value::Null),
        other if column == "value" => other,
        _ => &Value::Null,
    };
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    }

    #[test]
    fn output_format_default_is_table() {
        let fmt = OutputFormat::default();
        assert_eq!(fmt.format(), Format::Table);
        assert!(!fmt.is_json());
    }

    #[test]
    fn table_renders_rows_in_order() {
        let rows = vec![
            Row {
                name: "taxi_trips".into(),
                source: Some("spice.ai".into()),
            },
            Row {
                name: "quotes".into(),
                source: None,
            },
        ];

        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.collection_to_string(&rows).expect("should render");

        assert!(output.contains("NAME"));
        assert!(output.contains("SOURCE"));
        let taxi = output.find("taxi_trips").expect("first row present");
        let quotes = output.find("quotes").expect("second row present");
        assert!(taxi < quotes, "rows must keep response order");
        assert!(output.contains("Total: 2 item(s)"));
    }

    #[test]
    fn table_empty_collection_prints_placeholder() {
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt
            .collection_to_string::<Row>(&[])
            .expect("should render");
        assert!(output.contains("No results"));
    }

    #[test]
    fn json_output_roundtrips() {
        let rows = vec![Row {
            name: "taxi_trips".into(),
            source: Some("spice.ai".into()),
        }];

        let fmt = OutputFormat::new(Format::Json);
        let output = fmt.collection_to_string(&rows).expect("should render");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(parsed[0]["name"], "taxi_trips");
    }

    #[test]
    fn scalar_rows_render_under_value_column() {
        let rows = vec!["a".to_string(), "b".to_string()];
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.collection_to_string(&rows).expect("should render");
        assert!(output.contains("VALUE"));
        assert!(output.contains('a'));
        assert!(output.contains('b'));
    }
}
