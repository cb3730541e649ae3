//! Readers for `(time, value)` sample traces.
//!
//! Text format: one sample per line, two whitespace-separated fields, where a
//! comma inside a field is a decimal separator (`0,25 1,5`). Blank lines are
//! skipped.
//!
//! CSV format:
//! time,value
//! 0.00,0.13
//! 0.01,0.15
use std::path::{Path, PathBuf};

use arcfit_traits::{BoxError, CurveSource};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("open sample file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected two numeric fields, got {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: invalid number {field:?}")]
    InvalidNumber { line: usize, field: String },
    #[error("csv row {line}: {message}")]
    Csv { line: usize, message: String },
    #[error("sample CSV must have headers 'time,value', got: {found}")]
    Headers { found: String },
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub time: f64,
    pub value: f64,
}

impl From<SampleRow> for (f64, f64) {
    fn from(r: SampleRow) -> Self {
        (r.time, r.value)
    }
}

fn parse_field(field: &str, line: usize) -> Result<f64, ReadError> {
    let normalized = field.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ReadError::InvalidNumber {
            line,
            field: field.to_string(),
        }),
    }
}

pub fn parse_samples_text(text: &str) -> Result<Vec<SampleRow>, ReadError> {
    let mut rows = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut fields = raw.split_whitespace();
        let (Some(t), Some(v), None) = (fields.next(), fields.next(), fields.next()) else {
            if raw.trim().is_empty() {
                continue;
            }
            return Err(ReadError::Malformed {
                line,
                content: raw.to_string(),
            });
        };
        rows.push(SampleRow {
            time: parse_field(t, line)?,
            value: parse_field(v, line)?,
        });
    }
    Ok(rows)
}

pub fn load_samples_text(path: &Path) -> Result<Vec<SampleRow>, ReadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_samples_text(&text)
}

pub fn parse_samples_csv<R: std::io::Read>(reader: R) -> Result<Vec<SampleRow>, ReadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| ReadError::Csv {
            line: 1,
            message: e.to_string(),
        })?
        .clone();
    let expected = ["time", "value"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        return Err(ReadError::Headers {
            found: actual.join(","),
        });
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<SampleRow>().enumerate() {
        match rec {
            Ok(row) if row.time.is_finite() && row.value.is_finite() => rows.push(row),
            Ok(_) => {
                return Err(ReadError::Csv {
                    line: idx + 2,
                    message: "non-finite sample".to_string(),
                });
            }
            Err(e) => {
                return Err(ReadError::Csv {
                    line: idx + 2,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(rows)
}

pub fn load_samples_csv(path: &Path) -> Result<Vec<SampleRow>, ReadError> {
    let file = std::fs::File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_samples_csv(std::io::BufReader::new(file))
}

/// `CurveSource` over a whitespace-separated text file.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CurveSource for TextFileSource {
    fn read_samples(&mut self) -> Result<Vec<(f64, f64)>, BoxError> {
        let rows = load_samples_text(&self.path)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// `CurveSource` over a `time,value` CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CurveSource for CsvFileSource {
    fn read_samples(&mut self) -> Result<Vec<(f64, f64)>, BoxError> {
        let rows = load_samples_csv(&self.path)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
