//! A loader that delegates to a list of loaders.

use std::io;

use tracing::trace;

use super::{not_found, ResourceLoader};

/// Queries its loaders in registration order.
///
/// ## Resolution Order
///
/// Every lookup asks each loader's `exists()` in registration order and the
/// first loader that claims the path serves it. Nothing is remembered
/// between lookups, so files added or removed behind a loader are seen on
/// the next call.
pub struct ChainedLoader {
    loaders: Vec<Box<dyn ResourceLoader>>,
}

impl ChainedLoader {
    pub fn new() -> Self {
        ChainedLoader {
            loaders: Vec::new(),
        }
    }

    /// Register a loader. Loaders are queried in registration order.
    pub fn add_loader(&mut self, loader: Box<dyn ResourceLoader>) {
        self.loaders.push(loader);
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Box<dyn ResourceLoader>) -> Self {
        self.add_loader(loader);
        self
    }

    /// Find which loader (if any) provides the given path.
    fn find_loader_index(&self, path: &str) -> Option<usize> {
        let idx = self.loaders.iter().position(|loader| loader.exists(path))?;
        trace!(path, loader = self.loaders[idx].name(), "resolved resource owner");
        Some(idx)
    }

    /// Get a reference to the loaders (for inspection/testing).
    pub fn loaders(&self) -> &[Box<dyn ResourceLoader>] {
        &self.loaders
    }
}

impl ResourceLoader for ChainedLoader {
    fn exists(&self, path: &str) -> bool {
        self.find_loader_index(path).is_some()
    }

    fn load(&self, path: &str) -> io::Result<String> {
        match self.find_loader_index(path) {
            Some(idx) => self.loaders[idx].load(path),
            None => Err(not_found(path)),
        }
    }

    fn name(&self) -> &str {
        "chained"
    }
}

impl Default for ChainedLoader {
    fn default() -> Self {
        Self::new()
    }
}
