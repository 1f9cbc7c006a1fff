use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Label substituted for class indices the table does not cover.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Class names, index = class id.
///
/// Cheap to clone: every clone refers to the same backing list, so handing the table to each
/// `DetectionResult` never copies the names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable(Arc<[String]>);

impl From<Vec<String>> for LabelTable {
    fn from(labels: Vec<String>) -> Self {
        Self(labels.into())
    }
}

impl From<&[&str]> for LabelTable {
    fn from(labels: &[&str]) -> Self {
        Self(labels.iter().map(|x| x.to_string()).collect())
    }
}

impl std::ops::Deref for LabelTable {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl LabelTable {
    /// One label per line; lines are trimmed and blank ones skipped.
    pub fn parse(text: &str) -> Self {
        Self(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut labels = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                labels.push(line.to_string());
            }
        }
        Ok(Self::from(labels))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open label file {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Name for `class_index`, or [`UNKNOWN_LABEL`] when out of range.
    pub fn get_or_unknown(&self, class_index: usize) -> &str {
        self.0
            .get(class_index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// True when both tables share the same backing list.
    pub fn ptr_eq(&self, other: &LabelTable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let labels = LabelTable::parse("  plastic \n\n\tglass\n   \ncardboard\r\n");
        assert_eq!(labels.names(), &["plastic", "glass", "cardboard"]);
    }

    #[test]
    fn reader_matches_parse() {
        let text = "metal\n\n paper\n";
        let from_reader = LabelTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(from_reader, LabelTable::parse(text));
    }

    #[test]
    fn out_of_range_is_unknown() {
        let labels = LabelTable::from(&["a", "b"][..]);
        assert_eq!(labels.get_or_unknown(1), "b");
        assert_eq!(labels.get_or_unknown(2), UNKNOWN_LABEL);
    }

    #[test]
    fn clones_share_storage() {
        let labels = LabelTable::parse("a\nb");
        assert!(labels.clone().ptr_eq(&labels));
    }
}
