//! JSON line-delimited journals.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::evaluate::EvaluationReport;

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Append `value` as one JSON line, creating the file and its directory.
pub fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    ensure_parent(path.as_ref())?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

#[derive(Debug, Serialize)]
pub struct EvaluationLogEntry<'a> {
    pub timestamp_ms: u128,
    #[serde(flatten)]
    pub report: &'a EvaluationReport,
}

pub fn log_evaluation<P: AsRef<Path>>(path: P, report: &EvaluationReport) -> io::Result<()> {
    let entry = EvaluationLogEntry {
        timestamp_ms: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
        report,
    };
    append_json_line(path, &entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SurveySplit;

    fn report() -> EvaluationReport {
        EvaluationReport {
            model: "basic_terms".into(),
            dataset: "xkcd".into(),
            split: SurveySplit::Dev,
            samples: 4,
            correct: 3,
            accuracy: 0.75,
            mean_log_likelihood: -0.5,
            perplexity: 0.5f64.exp(),
            out_of_vocabulary: 1,
            elapsed_ms: 2,
        }
    }

    #[test]
    fn test_log_evaluation_appends_lines() {
        let dir = std::env::temp_dir().join(format!("lux-journal-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("evaluation.jsonl");

        log_evaluation(&path, &report()).unwrap();
        log_evaluation(&path, &report()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["split"], "dev");
        assert_eq!(value["correct"], 3);
        assert!(value["timestamp_ms"].as_u64().is_some());

        fs::remove_dir_all(dir).unwrap();
    }
}
