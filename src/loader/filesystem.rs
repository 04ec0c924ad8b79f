//! Loads resources from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ResourceLoader;

/// Resolves relative paths against a base directory.
///
/// Absolute paths are used as-is and a leading `file:` or `file://` scheme is
/// stripped, so locations produced by the compiler script can be fed back in.
#[derive(Debug, Clone)]
pub struct FilesystemLoader {
    base: PathBuf,
}

impl FilesystemLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FilesystemLoader { base: base.into() }
    }

    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Map a resource path to the file it names.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = path
            .strip_prefix("file://")
            .or_else(|| path.strip_prefix("file:"))
            .unwrap_or(path);
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

impl ResourceLoader for FilesystemLoader {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn load(&self, path: &str) -> io::Result<String> {
        let bytes = fs::read(self.resolve(path))?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}
