use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Template variables collected for one scaffold run.
///
/// Read-only once rendering starts. Serializes as a flat map so template
/// engines can use it directly as their context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything one render needs: the variables, the fetched template tree and
/// the project directory to write into.
///
/// Consumed by the renderer; built once per scaffold run.
#[derive(Debug)]
pub struct RenderContext {
    metadata: Metadata,
    source: PathBuf,
    destination: PathBuf,
}

impl RenderContext {
    pub fn new(
        metadata: Metadata,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            metadata,
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn into_parts(self) -> (Metadata, PathBuf, PathBuf) {
        (self.metadata, self.source, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_wins() {
        let meta = Metadata::new().with("projectName", "a").with("projectName", "b");
        assert_eq!(meta.get("projectName"), Some("b"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn serializes_as_flat_map() {
        let meta = Metadata::new().with("projectName", "demo");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value, serde_json::json!({ "projectName": "demo" }));
    }
}
