use std::path::Path;

use serde::Deserialize;

use crate::core::{Script, ScriptEntry};
use crate::error::ScriptError;
use crate::input::checked_delay;

/// On-disk shape of a JSON script; delays are signed so bad input can be reported
#[derive(Deserialize)]
struct RawScript {
    #[serde(default)]
    seed: Vec<String>,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    text: String,
    #[serde(alias = "delay")]
    delay_ms: i64,
}

/// Load a script from a JSON file
///
/// ```json
/// { "seed": ["$ tesser-cli live run"], "entries": [{ "text": "[INFO] ready", "delay_ms": 800 }] }
/// ```
pub fn load_json(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
    let data = std::fs::read(path)?;
    parse_json(&data)
}

/// Parse a JSON script; entry positions in errors are 1-based
pub fn parse_json(data: &[u8]) -> Result<Script, ScriptError> {
    let raw: RawScript = serde_json::from_slice(data)?;

    let entries = raw
        .entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            Ok(ScriptEntry {
                delay_ms: checked_delay(idx + 1, entry.delay_ms)?,
                text: entry.text,
            })
        })
        .collect::<Result<Vec<_>, ScriptError>>()?;

    Ok(Script::new(raw.seed, entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_script() {
        let script = parse_json(
            br#"{
                "seed": ["a", "b"],
                "entries": [
                    { "text": "c", "delay_ms": 100 },
                    { "text": "d", "delay": 200 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.seed(), ["a".to_string(), "b".to_string()]);
        assert_eq!(
            script.entries(),
            [ScriptEntry::new("c", 100), ScriptEntry::new("d", 200)]
        );
    }

    #[test]
    fn test_seed_and_entries_are_optional() {
        let script = parse_json(b"{}").unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn test_negative_delay_rejected() {
        let err = parse_json(br#"{"entries": [{"text": "ok", "delay_ms": 1}, {"text": "bad", "delay_ms": -5}]}"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::NegativeDelay { line: 2, value: -5 }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_json(b"{\"entries\": ["), Err(ScriptError::Json(_))));
    }
}
