//! History file reading and writing.

use crate::types::{History, HistoryHeader};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::Path;

pub fn write_history(path: &Path, names: &[String], samples: &[Vec<f64>]) -> ResultsResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let header = HistoryHeader::now(names.to_vec());
    let mut content = serde_json::to_string(&header)?;
    content.push('\n');
    for (i, sample) in samples.iter().enumerate() {
        if sample.len() != names.len() {
            return Err(ResultsError::WidthMismatch {
                line: i + 2,
                expected: names.len(),
                actual: sample.len(),
            });
        }
        content.push_str(&serde_json::to_string(sample)?);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn read_history(path: &Path) -> ResultsResult<History> {
    let content = fs::read_to_string(path)?;
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, first) = lines.next().ok_or(ResultsError::MissingHeader)?;
    let header: HistoryHeader = serde_json::from_str(first)?;

    let mut samples = Vec::new();
    for (i, line) in lines {
        let sample: Vec<f64> = serde_json::from_str(line)?;
        if sample.len() != header.names.len() {
            return Err(ResultsError::WidthMismatch {
                line: i + 1,
                expected: header.names.len(),
                actual: sample.len(),
            });
        }
        samples.push(sample);
    }

    Ok(History { header, samples })
}
