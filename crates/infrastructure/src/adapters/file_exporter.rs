//! File exporter - Implements ExportPort on the local filesystem
//!
//! Every payload is written as `<out_dir>/<prefix>-<YYYYmmdd-HHMMSS>.json`
//! (pretty-printed, UTF-8) next to a flattened CSV of the same name. The
//! CSV is best effort: failures are logged and the JSON path is still
//! returned.

use std::path::{Path, PathBuf};

use application::ApplicationError;
use application::ports::{ExportPaths, ExportPort};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// One flattened CSV row as ordered `(column, value)` pairs
type Row = Vec<(String, Value)>;

/// Writes stage payloads to a directory
#[derive(Debug, Clone)]
pub struct FileExporter {
    out_dir: PathBuf,
}

impl FileExporter {
    /// Create an exporter writing into `out_dir`
    ///
    /// The directory is created on the first export.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Target directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    async fn write_csv(&self, path: &Path, payload: &Value) -> Result<(), std::io::Error> {
        tokio::fs::write(path, render_csv(&flatten(payload))).await
    }
}

#[async_trait]
impl ExportPort for FileExporter {
    #[instrument(skip(self, payload), fields(out_dir = %self.out_dir.display()))]
    async fn export(&self, prefix: &str, payload: &Value) -> Result<ExportPaths, ApplicationError> {
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| ApplicationError::Export(format!("{}: {e}", self.out_dir.display())))?;

        let stem = format!("{prefix}-{}", Utc::now().format("%Y%m%d-%H%M%S"));

        let json_path = self.out_dir.join(format!("{stem}.json"));
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| ApplicationError::Export(e.to_string()))?;
        tokio::fs::write(&json_path, json)
            .await
            .map_err(|e| ApplicationError::Export(format!("{}: {e}", json_path.display())))?;
        debug!(path = %json_path.display(), "Wrote JSON export");

        let csv_path = self.out_dir.join(format!("{stem}.csv"));
        let csv = match self.write_csv(&csv_path, payload).await {
            Ok(()) => Some(csv_path),
            Err(e) => {
                warn!(path = %csv_path.display(), error = %e, "CSV export failed");
                None
            },
        };

        Ok(ExportPaths {
            json: json_path,
            csv,
        })
    }
}

/// Flatten a payload into table rows
///
/// Contact lists become one row per contact with a leading `company`
/// column, research becomes one `(company, insight)` row per insight, and
/// companies, emails and QC verdicts become one row per record.
fn flatten(payload: &Value) -> Vec<Row> {
    if let Some(groups) = payload.get("companies").and_then(Value::as_array) {
        let first = groups.first().and_then(Value::as_object);
        if first.is_some_and(|g| g.contains_key("contacts")) {
            return groups
                .iter()
                .flat_map(|group| {
                    let company = group.get("company").cloned().unwrap_or(Value::Null);
                    nested(group, "contacts").map(move |contact| {
                        let mut row = vec![("company".to_string(), company.clone())];
                        row.extend(record(contact));
                        row
                    })
                })
                .collect();
        }
        if first.is_some_and(|g| g.contains_key("insights")) {
            return groups
                .iter()
                .flat_map(|group| {
                    let company = group.get("company").cloned().unwrap_or(Value::Null);
                    nested(group, "insights").map(move |insight| {
                        vec![
                            ("company".to_string(), company.clone()),
                            ("insight".to_string(), insight.clone()),
                        ]
                    })
                })
                .collect();
        }
        return groups.iter().map(record).collect();
    }

    ["emails", "qc"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_array))
        .map(|records| records.iter().map(record).collect())
        .unwrap_or_default()
}

fn nested<'a>(group: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    group
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn record(value: &Value) -> Row {
    match value {
        Value::Object(map) => {
            let mut row: Row = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            row.sort_by(|a, b| a.0.cmp(&b.0));
            row
        },
        other => vec![("value".to_string(), other.clone())],
    }
}

/// Render rows as CSV with a header built from every column seen
fn render_csv(rows: &[Row]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for (column, _) in rows.iter().flatten() {
        if !columns.contains(&column.as_str()) {
            columns.push(column);
        }
    }

    let mut out = String::new();
    push_line(&mut out, columns.iter().map(|c| escape(c)));
    for row in rows {
        push_line(
            &mut out,
            columns.iter().map(|column| {
                row.iter()
                    .find(|(k, _)| k == column)
                    .map(|(_, v)| escape(&cell(v)))
                    .unwrap_or_default()
            }),
        );
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>) {
    out.push_str(&cells.collect::<Vec<_>>().join(","));
    out.push('\n');
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
