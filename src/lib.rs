//! # lesscss - LESS to CSS through an embedded JavaScript engine
//!
//! Compiles LESS stylesheets with the reference less.js compiler, run inside
//! QuickJS (through `rquickjs`) in the host process:
//! - Ordered loading of the compiler scripts into one JavaScript context
//! - Typed [`LessOptions`] handed to the scripts as globals and as an options object
//! - Pluggable [`ResourceLoader`](loader::ResourceLoader)s for scripts and `@import`s
//! - One error kind for every compile failure, with file/line/column when known
//!
//! The LESS language itself is implemented by less.js; this crate does not
//! ship it. Point a loader at a copy of `less.js`, `cssmin.js` and
//! `source-map.js`; the environment shim and the `compile` glue script are
//! bundled.
//!
//! ## Quick Start
//!
//! ### Compiling a string
//!
//! ```no_run
//! use std::path::Path;
//! use lesscss::{LessEngine, LessOptions};
//!
//! let engine = LessEngine::from_script_dir(LessOptions::default(), Path::new("vendor/less"))?;
//! let css = engine.compile("@c: red; .a { color: @c; }")?;
//! println!("{}", css);
//! # Ok::<(), lesscss::EngineError>(())
//! ```
//!
//! ### Choosing where scripts come from
//!
//! ```no_run
//! use lesscss::loader::{ChainedLoader, FilesystemLoader, MemoryLoader};
//! use lesscss::{LessEngine, LessOptions, ScriptSet};
//!
//! let loader = ChainedLoader::new()
//!     .with_loader(Box::new(MemoryLoader::bundled()))
//!     .with_loader(Box::new(FilesystemLoader::new("assets")));
//! let scripts = ScriptSet::new().with_less("vendor/less-1.7.5.js");
//!
//! let options = LessOptions::new().with_optimization(2).with_path("assets/less/");
//! let engine = LessEngine::with_scripts(options, loader, &scripts)?;
//! let css = engine.compile_resource("assets/site.less", true)?;
//! # Ok::<(), lesscss::EngineError>(())
//! ```
//!
//! ## Startup Order
//!
//! Scripts load into one context, each seeing what the previous ones declared:
//!
//! 1. **source-map helper** and **environment shim**
//! 2. option globals (`charset`, `css`, `lineNumbers`, `optimization`,
//!    `sourceMap`, `sourceMapRootpath`, `sourceMapBasepath`, `sourceMapURL`,
//!    and `paths` when set) and host functions
//! 3. **less.js**, **cssmin.js** and the **engine** glue, which defines
//!    `compile(source, location, compress, options)`
//!
//! A script that cannot be read stops construction with
//! [`InitError::Io`]; compile calls never touch the script resources again.
//!
//! ## Threading
//!
//! An engine owns a QuickJS runtime and is neither `Send` nor `Sync`. Use one
//! engine per thread.
//!
//! ## Architecture
//!
//! - **[`options`]** - Compiler configuration
//! - **[`scripts`]** - Script paths and bundled scripts
//! - **[`loader`]** - Resource loaders
//! - **[`runner`]** - QuickJS context, globals, host functions, the compiler
//! - **[`engine`]** - Strings, resources and files in, CSS out
//! - **[`error`]** - Error types

pub mod engine;
pub mod error;
pub mod loader;
pub mod options;
pub mod runner;
pub mod scripts;

pub use engine::LessEngine;
pub use error::{CompileError, EngineError, InitError};
pub use options::{LessOptions, LineNumbers, OptionsError};
pub use runner::{LessCompiler, QuickJsCompiler};
pub use scripts::ScriptSet;
