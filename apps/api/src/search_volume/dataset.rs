//! Search-volume dataset: keyword statistics exported from an ads keyword planner.
//!
//! Exports start with a short preamble (report title, date range) before the
//! header row, so loading skips a configurable number of lines first.

use std::fmt;
use std::io::Read;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SKIP_ROWS: usize = 2;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read keyword data: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Keyword data has no header row after skipping {skip_rows} line(s)")]
    MissingHeader { skip_rows: usize },
}

/// One cell, typed by inference from its text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else if let Ok(i) = trimmed.parse::<i64>() {
            CellValue::Integer(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            CellValue::Float(f)
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the fractional part ("100.0"), matching how the export shows it
            CellValue::Float(x) => write!(f, "{x:?}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(raw: &str) -> Self {
        CellValue::infer(raw)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(x) => serializer.serialize_f64(*x),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Column name → value, in header order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    cells: Vec<(String, CellValue)>,
}

impl TableRow {
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, value)| value)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for TableRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Loads a keyword-statistics CSV. The first `skip_rows` lines are dropped,
/// the next line is the header. Comma or tab delimited; UTF-8 or UTF-16 with BOM.
pub fn load_keyword_table<R: Read>(mut reader: R, skip_rows: usize) -> Result<KeywordTable, DatasetError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = decode_text(&bytes)?;

    let body = skip_lines(&text, skip_rows);
    let header_line = body
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(DatasetError::MissingHeader { skip_rows })?;
    let delimiter = detect_delimiter(header_line);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: TableRow = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).map(CellValue::infer).unwrap_or(CellValue::Empty)))
            .collect();
        rows.push(row);
    }

    debug!("Loaded {} keyword rows with {} columns", rows.len(), headers.len());
    Ok(KeywordTable { headers, rows })
}

fn decode_text(bytes: &[u8]) -> Result<String, DatasetError> {
    let utf16 = |bytes: &[u8], le: bool| {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|c| if le { u16::from_le_bytes([c[0], c[1]]) } else { u16::from_be_bytes([c[0], c[1]]) })
            .collect();
        String::from_utf16_lossy(&units)
    };

    match bytes {
        [0xFF, 0xFE, rest @ ..] => Ok(utf16(rest, true)),
        [0xFE, 0xFF, rest @ ..] => Ok(utf16(rest, false)),
        [0xEF, 0xBB, 0xBF, rest @ ..] => Ok(String::from_utf8(rest.to_vec()).map_err(invalid_utf8)?),
        _ => Ok(String::from_utf8(bytes.to_vec()).map_err(invalid_utf8)?),
    }
}

fn invalid_utf8(e: std::string::FromUtf8Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e)
}

fn skip_lines(text: &str, n: usize) -> &str {
    if n == 0 {
        return text;
    }
    match text.match_indices('\n').nth(n - 1) {
        Some((idx, _)) => &text[idx + 1..],
        None => "",
    }
}

fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') && !header_line.contains(',') {
        b'\t'
    } else {
        b','
    }
}
