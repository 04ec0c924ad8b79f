//! Line ending normalization.

use std::io;

use super::ResourceLoader;

/// Wraps a loader and rewrites `\r\n` and lone `\r` to `\n`.
///
/// The compiler script reports line numbers by counting `\n`, so sources
/// written on other platforms are normalized before they reach it.
#[derive(Debug, Clone)]
pub struct UnixNewlinesLoader<L> {
    inner: L,
}

impl<L: ResourceLoader> UnixNewlinesLoader<L> {
    pub fn new(inner: L) -> Self {
        UnixNewlinesLoader { inner }
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: ResourceLoader> ResourceLoader for UnixNewlinesLoader<L> {
    fn exists(&self, path: &str) -> bool {
        self.inner.exists(path)
    }

    fn load(&self, path: &str) -> io::Result<String> {
        self.inner.load(path).map(|source| normalize_newlines(&source))
    }

    fn name(&self) -> &str {
        "unix-newlines"
    }
}

pub fn normalize_newlines(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}
