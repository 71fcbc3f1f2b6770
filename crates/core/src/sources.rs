use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CheckError;
use crate::models::ReferenceSource;

#[derive(Debug, Deserialize)]
struct SourcesFile {
    urls: Vec<ReferenceSource>,
}

/// The configured reference URLs, in file order. Loaded once at startup and
/// injected read-only; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    sources: Vec<ReferenceSource>,
}

impl ReferenceList {
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let raw = fs::read_to_string(path)?;
        let parsed: SourcesFile = serde_json::from_str(&raw)?;
        Ok(Self::from_sources(parsed.urls))
    }

    pub fn from_sources(sources: Vec<ReferenceSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[ReferenceSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
