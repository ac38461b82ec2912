use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// ImmeDB accession -> element name (e.g. `IMEs459`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationMap {
    names: HashMap<String, String>,
}

impl AnnotationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping. A later insert for the same accession replaces the earlier one.
    pub fn insert(&mut self, accession: impl Into<String>, annotation: impl Into<String>) {
        self.names.insert(accession.into(), annotation.into());
    }

    pub fn get(&self, accession: &str) -> Option<&str> {
        self.names.get(accession).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<A: Into<String>, N: Into<String>> FromIterator<(A, N)> for AnnotationMap {
    fn from_iter<I: IntoIterator<Item = (A, N)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (accession, annotation) in iter {
            map.insert(accession, annotation);
        }
        map
    }
}

/// Frequency of resolved annotations over all containing hits of one row.
///
/// Unmapped accessions are counted under their own `None` key. Keys keep
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationCounts {
    entries: Vec<(Option<String>, usize)>,
}

impl AnnotationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, annotation: Option<&str>) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(key, _)| key.as_deref() == annotation)
        {
            entry.1 += 1;
        } else {
            self.entries.push((annotation.map(str::to_string), 1));
        }
    }

    /// Count for one annotation; `None` asks for the unmapped bucket
    pub fn get(&self, annotation: Option<&str>) -> usize {
        self.entries
            .iter()
            .find(|(key, _)| key.as_deref() == annotation)
            .map_or(0, |(_, count)| *count)
    }

    /// Sum of all counts, i.e. the number of hits counted
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, usize)> {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_deref(), *count))
    }

    /// Serializable view that names the unmapped bucket `unmapped_key`
    pub fn labelled<'a>(&'a self, unmapped_key: &'a str) -> LabelledCounts<'a> {
        LabelledCounts {
            counts: self,
            unmapped_key,
        }
    }

    /// Compact JSON object, e.g. `{"IME1":2,"na":1}`
    ///
    /// If an annotation is literally named `unmapped_key`, its count and the
    /// unmapped count share that one key, so the values still sum to
    /// [`total`](Self::total).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, unmapped_key: &str) -> serde_json::Result<String> {
        serde_json::to_string(&self.labelled(unmapped_key))
    }
}

pub struct LabelledCounts<'a> {
    counts: &'a AnnotationCounts,
    unmapped_key: &'a str,
}

impl LabelledCounts<'_> {
    /// Counts per output label, first-seen order, equal labels merged
    fn merged(&self) -> Vec<(&str, usize)> {
        let mut merged: Vec<(&str, usize)> = Vec::with_capacity(self.counts.entries.len());
        for (key, count) in self.counts.iter() {
            let label = key.unwrap_or(self.unmapped_key);
            match merged.iter_mut().find(|(seen, _)| *seen == label) {
                Some(entry) => entry.1 += count,
                None => merged.push((label, count)),
            }
        }
        merged
    }
}

impl Serialize for LabelledCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let merged = self.merged();
        let mut map = serializer.serialize_map(Some(merged.len()))?;
        for (label, count) in merged {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}
