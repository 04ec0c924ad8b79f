//! Resource loaders.
//!
//! Everything the compiler reads goes through a [`ResourceLoader`]: the
//! scripts loaded while the engine starts up, and the `@import`ed files the
//! compiler script asks for through the `readFile` host function.
//!
//! ## Loaders
//!
//! - **[`FilesystemLoader`]**: files relative to a base directory
//! - **[`MemoryLoader`]**: sources held in memory, including the bundled
//!   environment and engine scripts
//! - **[`ChainedLoader`]**: several loaders queried in registration order,
//!   first one that has the path wins
//! - **[`UnixNewlinesLoader`]**: wraps another loader and normalizes line
//!   endings to `\n`
//!
//! ## Example
//!
//! ```
//! use lesscss::loader::{ChainedLoader, MemoryLoader, ResourceLoader};
//!
//! let mut chain = ChainedLoader::new();
//! chain.add_loader(Box::new(MemoryLoader::new().with("a.less", ".a { b: c; }")));
//! chain.add_loader(Box::new(MemoryLoader::bundled()));
//!
//! assert!(chain.exists("a.less"));
//! assert!(chain.exists("META-INF/engine.js"));
//! assert!(chain.load("missing.less").is_err());
//! ```

use std::io;
use std::rc::Rc;

pub mod chained;
pub mod filesystem;
pub mod memory;
pub mod newlines;

pub use chained::ChainedLoader;
pub use filesystem::FilesystemLoader;
pub use memory::MemoryLoader;
pub use newlines::UnixNewlinesLoader;

/// A source of named text resources.
pub trait ResourceLoader {
    /// Does this loader have a resource at `path`?
    ///
    /// This should be cheap and must not read the resource.
    fn exists(&self, path: &str) -> bool;

    /// Read the whole resource as text.
    fn load(&self, path: &str) -> io::Result<String>;

    /// Human-readable name for this loader (for debugging/logging).
    fn name(&self) -> &str;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for Box<L> {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn load(&self, path: &str) -> io::Result<String> {
        (**self).load(path)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for Rc<L> {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn load(&self, path: &str) -> io::Result<String> {
        (**self).load(path)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub(crate) fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("resource not found: {}", path),
    )
}
