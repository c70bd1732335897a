use crate::utils::error::{Result, TrackerError};
use chrono::Utc;
use std::collections::HashMap;

/// First column of every history file.
pub const DATE_HEADER: &str = "Date (UTC)";

/// Plain "YYYY-MM-DD HH:MM:SS" with no `T` separator and no timezone
/// suffix: spreadsheet importers mis-parse full ISO 8601 timestamps.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamp shared by every row written during a run.
pub fn run_stamp() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

/// An append-only CSV history table: a date column followed by one column
/// per tracked counter. Columns are only ever added, never dropped, so that
/// existing spreadsheet imports keep their column meaning.
#[derive(Debug, Clone)]
pub struct SnapshotTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SnapshotTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Parse an existing history file. The first header cell is the date
    /// column; everything after it is a counter column.
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(TrackerError::ProcessingError {
                message: "History file has no header row".to_string(),
            });
        }

        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Merge an incoming column set into the header. Existing columns keep
    /// their position; unseen columns are appended in incoming order.
    /// Returns the columns that were added.
    pub fn merge_columns(&mut self, incoming: &[String]) -> Vec<String> {
        let added: Vec<String> = incoming
            .iter()
            .filter(|name| !self.columns.contains(name))
            .cloned()
            .collect();

        self.columns.extend(added.iter().cloned());
        added
    }

    /// Append a row keyed by column name. Columns without a value get an
    /// empty cell.
    pub fn push_row(&mut self, stamp: &str, values: &HashMap<String, String>) {
        let mut row = Vec::with_capacity(self.columns.len() + 1);
        row.push(stamp.to_string());
        for column in &self.columns {
            row.push(values.get(column).cloned().unwrap_or_default());
        }
        self.rows.push(row);
    }

    /// Serialize the full table, padding short rows to the header width.
    /// Used when the column set changed and the file must be rewritten.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let width = self.columns.len() + 1;
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = Vec::with_capacity(width);
        header.push(DATE_HEADER.to_string());
        header.extend(self.columns.iter().cloned());
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut padded: Vec<&str> = row.iter().map(String::as_str).collect();
            padded.resize(width, "");
            writer.write_record(&padded)?;
        }

        finish(writer)
    }

    /// Header line for a brand new history file.
    pub fn header_csv(columns: &[String]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut header = Vec::with_capacity(columns.len() + 1);
        header.push(DATE_HEADER.to_string());
        header.extend(columns.iter().cloned());
        writer.write_record(&header)?;
        finish(writer)
    }

    /// A single data row aligned to the given column order, for appending
    /// to an existing file without touching its other rows.
    pub fn row_csv(stamp: &str, columns: &[String], values: &HashMap<String, String>) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(stamp.to_string());
        for column in columns {
            row.push(values.get(column).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
        finish(writer)
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| {
        TrackerError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.error().to_string(),
        ))
    })
}
