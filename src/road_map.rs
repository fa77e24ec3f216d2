use crate::error::Error;
use serde_json::{Map, Value};
use std::{collections::BTreeSet, fs, path::Path};

/// An ordered mapping from target to payload, loaded once per run.
///
/// File order is significant: it defines the 1-based numbering used for
/// selective execution and for the summary index lists.
#[derive(Debug, Clone)]
pub struct RoadMap {
    entries: Map<String, Value>,
}

impl RoadMap {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|_| Error::RoadMapUnreadable(path.to_path_buf()))?;

        match serde_json::from_str(&contents) {
            Ok(Value::Object(entries)) => Ok(RoadMap { entries }),
            _ => Err(Error::RoadMapMalformed(path.to_path_buf())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(index, target, payload)` in file-declared order, index
    /// starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &Value)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (target, payload))| (i + 1, target.as_str(), payload))
    }
}

/// A restriction of execution to specific 1-based road-map indices.
#[derive(Debug, Clone)]
pub struct TestSelection(BTreeSet<usize>);

impl TestSelection {
    /// Parses a comma separated list of test case numbers, e.g. `"1, 3,4"`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut indices = BTreeSet::new();
        for part in raw.split(',') {
            let index = part
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidTestCases(String::from(raw)))?;
            indices.insert(index);
        }
        Ok(TestSelection(indices))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}
