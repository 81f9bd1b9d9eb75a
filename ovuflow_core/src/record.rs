//! Saved result record (`user_data.txt`).
//!
//! The record is line-oriented `key: value` text. Existing files were written
//! with fertile windows as a list of quoted pairs, so the layout here must
//! stay byte-for-byte stable:
//!
//! ```text
//! start_date: 2024-01-01
//! cycle_length: 28
//! ovulation_day: 2024-01-15
//! fertile_windows: [('2024-01-10', '2024-01-16'), ('2024-02-07', '2024-02-13'), ('2024-03-06', '2024-03-12')]
//! next_period: 2024-01-29
//! pregnancy_test_date: 2024-02-05
//! due_date: 2024-10-21
//! ```

use crate::input::{format_date, parse_cycle_length, parse_date};
use crate::landmarks::{FertileWindow, LandmarkResult};
use crate::{CycleInput, Error, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Contents of a saved record file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedRecord {
    pub input: CycleInput,
    pub landmarks: LandmarkResult,
}

/// Render the record text for an input and its landmarks
pub fn render_record(input: &CycleInput, landmarks: &LandmarkResult) -> String {
    let windows = landmarks
        .fertile_windows
        .iter()
        .map(|w| format!("('{}', '{}')", format_date(w.start), format_date(w.end)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    let mut line = |key: &str, value: String| {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    };

    line("start_date", format_date(input.start_date()));
    line("cycle_length", input.cycle_length().to_string());
    line("ovulation_day", format_date(landmarks.ovulation_date));
    line("fertile_windows", format!("[{}]", windows));
    line("next_period", format_date(landmarks.next_period_date));
    line("pregnancy_test_date", format_date(landmarks.pregnancy_test_date));
    line("due_date", format_date(landmarks.due_date));

    out
}

/// Parse record text back into its values
///
/// Unknown keys are ignored; a missing or malformed known key is an error.
pub fn parse_record(text: &str) -> Result<SavedRecord> {
    let fields: HashMap<&str, &str> = text
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    let field = |key: &str| {
        fields
            .get(key)
            .copied()
            .ok_or_else(|| Error::Record(format!("missing field '{}'", key)))
    };
    let date_field = |key: &str| -> Result<NaiveDate> {
        let value = field(key)?;
        parse_date(value).map_err(|_| Error::Record(format!("bad date in '{}': {}", key, value)))
    };

    let start_date = date_field("start_date")?;
    let cycle_length = parse_cycle_length(field("cycle_length")?)
        .map_err(|e| Error::Record(format!("bad cycle_length: {}", e)))?;
    let input = CycleInput::new(start_date, cycle_length)?;

    let landmarks = LandmarkResult {
        ovulation_date: date_field("ovulation_day")?,
        fertile_windows: parse_windows(field("fertile_windows")?)?,
        next_period_date: date_field("next_period")?,
        pregnancy_test_date: date_field("pregnancy_test_date")?,
        due_date: date_field("due_date")?,
    };

    Ok(SavedRecord { input, landmarks })
}

/// Parse `[('a', 'b'), ('c', 'd')]`
fn parse_windows(value: &str) -> Result<Vec<FertileWindow>> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| Error::Record(format!("fertile_windows is not a list: {}", value)))?;

    // Quoted dates sit at the odd positions when splitting on quotes
    let dates = inner
        .split('\'')
        .skip(1)
        .step_by(2)
        .map(|d| {
            parse_date(d).map_err(|_| Error::Record(format!("bad fertile window date: {}", d)))
        })
        .collect::<Result<Vec<_>>>()?;

    if dates.len() % 2 != 0 {
        return Err(Error::Record(format!(
            "fertile_windows has an unpaired date: {}",
            value
        )));
    }

    Ok(dates
        .chunks(2)
        .map(|pair| FertileWindow {
            start: pair[0],
            end: pair[1],
        })
        .collect())
}

/// Write the record atomically, replacing any previous file
///
/// 1. Write to a temp file in the same directory
/// 2. Sync to disk
/// 3. Rename over the original
pub fn save_record(path: &Path, input: &CycleInput, landmarks: &LandmarkResult) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(render_record(input, landmarks).as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Saved record to {:?}", path);
    Ok(())
}

/// Read and parse a saved record file
pub fn load_record(path: &Path) -> Result<SavedRecord> {
    let contents = std::fs::read_to_string(path)?;
    let record = parse_record(&contents)?;
    tracing::debug!("Loaded record from {:?}", path);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::compute;

    const EXPECTED: &str = "start_date: 2024-01-01\n\
cycle_length: 28\n\
ovulation_day: 2024-01-15\n\
fertile_windows: [('2024-01-10', '2024-01-16'), ('2024-02-07', '2024-02-13'), ('2024-03-06', '2024-03-12')]\n\
next_period: 2024-01-29\n\
pregnancy_test_date: 2024-02-05\n\
due_date: 2024-10-21\n";

    fn sample_input() -> CycleInput {
        CycleInput::parse("2024-01-01", "28").unwrap()
    }

    #[test]
    fn test_render_matches_saved_layout() {
        let input = sample_input();
        let text = render_record(&input, &compute(&input));
        assert_eq!(text, EXPECTED);
    }

    #[test]
    fn test_parse_saved_layout() {
        let record = parse_record(EXPECTED).unwrap();
        let input = sample_input();

        assert_eq!(record.input, input);
        assert_eq!(record.landmarks, compute(&input));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let text = format!("{}note: hello\n", EXPECTED);
        assert!(parse_record(&text).is_ok());
    }

    #[test]
    fn test_parse_missing_field() {
        let text = EXPECTED.replace("due_date: 2024-10-21\n", "");
        let err = parse_record(&text).unwrap_err();
        assert!(matches!(err, Error::Record(ref m) if m.contains("due_date")));
    }

    #[test]
    fn test_parse_bad_windows() {
        let text = EXPECTED.replace(
            "[('2024-01-10', '2024-01-16'), ('2024-02-07', '2024-02-13'), ('2024-03-06', '2024-03-12')]",
            "[('2024-01-10', '2024-01-16'), ('2024-02-07')]",
        );
        assert!(matches!(parse_record(&text), Err(Error::Record(_))));

        let text = EXPECTED.replace("[(", "((");
        assert!(matches!(parse_record(&text), Err(Error::Record(_))));
    }

    #[test]
    fn test_save_and_load() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("user_data.txt");
        let input = sample_input();
        let landmarks = compute(&input);

        save_record(&path, &input, &landmarks).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXPECTED);
        let loaded = load_record(&path).unwrap();
        assert_eq!(loaded.landmarks, landmarks);
    }

    #[test]
    fn test_save_overwrites_previous() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("user_data.txt");

        let first = CycleInput::parse("2024-03-01", "21").unwrap();
        save_record(&path, &first, &compute(&first)).unwrap();
        let second = sample_input();
        save_record(&path, &second, &compute(&second)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXPECTED);
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "user_data.txt")
            .collect();
        assert!(extras.is_empty(), "stray files: {:?}", extras);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_record(&temp_dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
