use super::{COLUMNS, TIME_FORMAT};
use crate::sample::{Sample, UNKNOWN, is_valid_measurement};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::path::Path;
use std::str::FromStr;

/// A parsed CSV record and the line it started on.
struct Record {
    line: usize,
    fields: Vec<String>,
}

pub struct ReportReader;

impl ReportReader {
    /// Read and parse an exported report from the given path
    pub fn from_file(path: &Path) -> Result<Vec<Sample>> {
        tracing::debug!("Reading report from: {}", path.display());

        let bytes = std::fs::read(path)?;
        let samples = Self::from_bytes(&bytes)?;

        tracing::info!(
            "Successfully parsed report with {} samples",
            samples.len()
        );

        Ok(samples)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Sample>> {
        let content = std::str::from_utf8(bytes).map_err(|e| Error::Report {
            line: 1,
            message: format!("not valid UTF-8: {}", e),
        })?;
        Self::from_str(content)
    }

    /// Parse a report from CSV text. The header row must match the export columns.
    pub fn from_str(content: &str) -> Result<Vec<Sample>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut records = parse_records(content)?.into_iter();

        let header = records.next().ok_or(Error::Report {
            line: 1,
            message: "missing header row".to_string(),
        })?;
        let names: Vec<&str> = header.fields.iter().map(|f| f.trim()).collect();
        if names != COLUMNS {
            return Err(Error::Report {
                line: header.line,
                message: format!(
                    "expected columns {}, found {}",
                    COLUMNS.join(","),
                    names.join(",")
                ),
            });
        }

        records.map(|record| parse_sample(&record)).collect()
    }
}

fn parse_sample(record: &Record) -> Result<Sample> {
    if record.fields.len() != COLUMNS.len() {
        return Err(Error::Report {
            line: record.line,
            message: format!(
                "expected {} fields, found {}",
                COLUMNS.len(),
                record.fields.len()
            ),
        });
    }

    let f = &record.fields;
    let timestamp =
        NaiveDateTime::parse_from_str(f[0].trim(), TIME_FORMAT).map_err(|e| Error::Report {
            line: record.line,
            message: format!("invalid time '{}': {}", f[0], e),
        })?;

    Ok(Sample {
        timestamp,
        location: text(&f[1]),
        ssid: text(&f[2]),
        bssid: text(&f[3]),
        signal: number(record, 4)?,
        frequency: UNKNOWN.to_string(),
        latency_ms: measurement(record, 5)?,
        download_mbps: measurement(record, 6)?,
        upload_mbps: measurement(record, 7)?,
    })
}

fn text(cell: &str) -> String {
    if cell.is_empty() {
        UNKNOWN.to_string()
    } else {
        cell.to_string()
    }
}

/// Empty cell means null.
fn number<T: FromStr>(record: &Record, index: usize) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    let cell = record.fields[index].trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<T>().map(Some).map_err(|e| Error::Report {
        line: record.line,
        message: format!("invalid {} value '{}': {}", COLUMNS[index], cell, e),
    })
}

/// A latency or throughput cell: empty, or a finite non-negative number.
fn measurement(record: &Record, index: usize) -> Result<Option<f64>> {
    match number::<f64>(record, index)? {
        Some(value) if !is_valid_measurement(value) => Err(Error::Report {
            line: record.line,
            message: format!(
                "{} must be a non-negative number, found '{}'",
                COLUMNS[index],
                record.fields[index].trim()
            ),
        }),
        value => Ok(value),
    }
}

/// Split CSV text into records, honouring quoted fields that span lines.
fn parse_records(content: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                let record = std::mem::take(&mut fields);
                // Blank lines carry no record.
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(Record {
                        line: record_line,
                        fields: record,
                    });
                }
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Report {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
