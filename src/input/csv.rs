use std::io::Read;
use std::path::Path;

use crate::core::{Script, ScriptEntry};
use crate::error::ScriptError;
use crate::input::checked_delay;

const TEXT_COLUMNS: &[&str] = &["text", "line", "message"];
const DELAY_COLUMNS: &[&str] = &["delay_ms", "delay", "ms", "at"];
const KIND_COLUMNS: &[&str] = &["kind", "type"];

/// Load a script from a CSV file
///
/// Supports flexible column names:
/// - text,delay_ms
/// - line,delay
/// - kind,message,at (with `kind` = `seed` or `entry`)
///
/// Without a kind column every row is a scheduled entry. An empty delay means 0.
/// Seed rows must come first and carry an empty or zero delay.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
    let file = std::fs::File::open(path)?;
    parse_csv(file)
}

/// Parse a CSV script from any reader; line numbers in errors count the header
pub fn parse_csv<R: Read>(reader: R) -> Result<Script, ScriptError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    let text_idx = find_column(&headers, TEXT_COLUMNS)?;
    let delay_idx = find_column(&headers, DELAY_COLUMNS)?;
    let kind_idx = find_column(&headers, KIND_COLUMNS).ok();

    let mut seed = Vec::new();
    let mut entries = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let line = idx + 2;

        let text = record.get(text_idx).unwrap_or_default().to_string();
        let kind = kind_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        let delay = parse_delay(line, record.get(delay_idx).unwrap_or_default())?;

        match kind.as_str() {
            "seed" => {
                if !entries.is_empty() {
                    return Err(ScriptError::SeedAfterEntry { line });
                }
                if delay != 0 {
                    return Err(ScriptError::SeedWithDelay { line, value: delay });
                }
                seed.push(text);
            }
            "" | "entry" => entries.push(ScriptEntry::new(text, delay)),
            _ => return Err(ScriptError::InvalidKind { line, value: kind }),
        }
    }

    Ok(Script::new(seed, entries))
}

fn parse_delay(line: usize, raw: &str) -> Result<u64, ScriptError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    let value = raw.parse::<i64>().map_err(|_| ScriptError::InvalidDelay {
        line,
        value: raw.to_string(),
    })?;
    checked_delay(line, value)
}

/// Find a column by checking possible names
fn find_column(headers: &csv::StringRecord, names: &'static [&'static str]) -> Result<usize, ScriptError> {
    headers
        .iter()
        .position(|header| {
            let header = header.trim().to_lowercase();
            names.iter().any(|&name| header == name)
        })
        .ok_or(ScriptError::MissingColumn(names))
}
