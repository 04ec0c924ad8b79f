//! In-memory resources.

use std::collections::HashMap;
use std::io;

use super::{not_found, ResourceLoader};
use crate::scripts::{BUNDLED_ENGINE, BUNDLED_ENV, DEFAULT_ENGINE, DEFAULT_ENV};

/// Serves sources registered by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        MemoryLoader {
            resources: HashMap::new(),
        }
    }

    /// Create a loader holding the environment and engine scripts shipped
    /// with this crate, under their default [`ScriptSet`](crate::scripts::ScriptSet)
    /// paths.
    pub fn bundled() -> Self {
        Self::new()
            .with(DEFAULT_ENV, BUNDLED_ENV)
            .with(DEFAULT_ENGINE, BUNDLED_ENGINE)
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.resources.insert(path.into(), source.into());
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.resources.remove(path)
    }

    pub fn paths(&self) -> Vec<&String> {
        self.resources.keys().collect()
    }
}

impl ResourceLoader for MemoryLoader {
    fn exists(&self, path: &str) -> bool {
        self.resources.contains_key(path)
    }

    fn load(&self, path: &str) -> io::Result<String> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
