use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Action;
use crate::model::TransactionRecord;
use crate::schedule::{IntervalUnit, UnknownUnit};
use crate::time::format_date;

/// Errors that can occur when reading an action script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open action script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: {action} missing {field}")]
    MissingField {
        line: usize,
        action: String,
        field: &'static str,
    },

    #[error("line {line}: {source}")]
    Unit { line: usize, source: UnknownUnit },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    lamp: Option<String>,
    amount: Option<String>,
    unit: Option<String>,
    count: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    id: String,
    date: String,
    amount: String,
    keycode: String,
    status: String,
    r#type: String,
}

fn required(
    value: Option<String>,
    line: usize,
    action: &str,
    field: &'static str,
) -> Result<String, CsvError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CsvError::MissingField {
            line,
            action: action.to_string(),
            field,
        })
}

fn parse_row(line: usize, row: InputRow) -> Result<Action, CsvError> {
    match row.action.as_str() {
        "pay" => Ok(Action::Pay {
            lamp: row.lamp.unwrap_or_default(),
            amount: row.amount.unwrap_or_default(),
        }),
        "schedule" => {
            let unit = match row.unit.filter(|u| !u.is_empty()) {
                Some(raw) => raw
                    .parse::<IntervalUnit>()
                    .map_err(|source| CsvError::Unit { line, source })?,
                None => IntervalUnit::default(),
            };
            Ok(Action::Schedule {
                amount: row.amount.unwrap_or_default(),
                unit,
                count: row.count.unwrap_or(1),
            })
        }
        "unschedule" => Ok(Action::Unschedule),
        "refresh" => Ok(Action::Refresh),
        "account" => Ok(Action::GenerateAccount),
        "copy" => Ok(Action::CopyAccount),
        // free text rides in the lamp column
        "chat" => Ok(Action::Chat {
            text: required(row.lamp, line, "chat", "text")?,
        }),
        other => Err(CsvError::UnrecognizedAction {
            line,
            action: other.to_string(),
        }),
    }
}

/// Read scripted actions from a csv file
pub fn read_actions(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Action, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

/// Write transactions in csv format, newest first
pub fn write_transactions<'a>(
    writer: impl io::Write,
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for record in records {
        let row = OutputRow {
            id: record.id.clone(),
            date: format_date(record.timestamp),
            amount: record.amount.clone(),
            keycode: record.keycode_label(),
            status: record.status().to_string(),
            r#type: record.kind.to_string(),
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}
