pub mod csv;
pub mod json;

pub use self::csv::{load_csv, parse_csv};
pub use self::json::{load_json, parse_json};

use std::path::Path;

use tracing::debug;

use crate::core::Script;
use crate::error::ScriptError;

/// Script file format detection result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
    Unknown,
}

/// Detect the format of a script file from its leading content
pub fn detect_format(data: &[u8]) -> InputFormat {
    if is_json(data) {
        return InputFormat::Json;
    }

    if is_csv(data) {
        return InputFormat::Csv;
    }

    InputFormat::Unknown
}

fn is_json(data: &[u8]) -> bool {
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{')
}

fn is_csv(data: &[u8]) -> bool {
    // A header line with at least one comma
    let sample = &data[..data.len().min(500)];
    let text = match std::str::from_utf8(sample) {
        Ok(text) => text,
        // multi-byte character cut by the sample boundary
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&sample[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return false,
    };

    text.lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.contains(','))
}

/// Load a script from a file, auto-detecting its format
pub fn load_file(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;

    let format = detect_format(&data);
    debug!("Loading script {} as {:?}", path.display(), format);
    match format {
        InputFormat::Json => load_json(path),
        InputFormat::Csv => load_csv(path),
        InputFormat::Unknown => Err(ScriptError::UnknownFormat),
    }
}

/// Validate an authored delay. Negative delays are rejected, never clamped.
pub(crate) fn checked_delay(line: usize, value: i64) -> Result<u64, ScriptError> {
    u64::try_from(value).map_err(|_| ScriptError::NegativeDelay { line, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(b"  {\"entries\": []}"), InputFormat::Json);
        assert_eq!(detect_format(b"text,delay_ms\nhello,100\n"), InputFormat::Csv);
        assert_eq!(detect_format(b"just some words"), InputFormat::Unknown);
        assert_eq!(detect_format(b""), InputFormat::Unknown);
        assert_eq!(detect_format(&[0xff, 0xfe, b',']), InputFormat::Unknown);
    }

    #[test]
    fn test_detect_csv_with_character_across_sample_boundary() {
        // '€' is three bytes and straddles the 500th byte
        let data = format!("text,delay_ms\n{}€,100\n", "a".repeat(485));
        assert!(!data.is_char_boundary(500));
        assert_eq!(detect_format(data.as_bytes()), InputFormat::Csv);
    }

    #[test]
    fn test_checked_delay() {
        assert_eq!(checked_delay(1, 250).unwrap(), 250);
        assert!(matches!(
            checked_delay(4, -1),
            Err(ScriptError::NegativeDelay { line: 4, value: -1 })
        ));
    }

    #[test]
    fn test_load_file_detects_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": ["boot"], "entries": [{{"text": "go", "delay_ms": 5}}]}}"#).unwrap();

        let script = load_file(file.path()).unwrap();
        assert_eq!(script.seed(), ["boot".to_string()]);
        assert_eq!(script.entries()[0].delay_ms, 5);
    }

    #[test]
    fn test_load_file_detects_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "text,delay_ms").unwrap();
        writeln!(file, "first,100").unwrap();

        let script = load_file(file.path()).unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script.entries()[0].text, "first");
    }

    #[test]
    fn test_load_file_unknown_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "no structure here").unwrap();
        assert!(matches!(load_file(file.path()), Err(ScriptError::UnknownFormat)));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_file("/nonexistent/tesser/script.json"),
            Err(ScriptError::Io(_))
        ));
    }
}
