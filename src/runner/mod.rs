//! Driving the embedded QuickJS engine.
//!
//! This module brings up one QuickJS context, loads the compiler scripts into
//! it and calls the `compile` entry point they define.
//!
//! ## Startup Sequence
//!
//! ```text
//! ScriptContext::new()
//!      ↓
//! 1. Load source-map helper     ─┐
//! 2. Load environment shim      ─┴─ prelude
//! 3. Bind option globals (charset, css, lineNumbers, ...)
//! 4. Install host functions (print, readFile, readUrl, ...)
//! 5. Load less.js               ─┐
//! 6. Load cssmin.js              │  compiler scripts, read the globals
//! 7. Load engine.js             ─┘  while they evaluate
//!      ↓
//! 8. Resolve global `compile` and keep it for later calls
//! ```
//!
//! Every script is evaluated in the same context, so declarations made by one
//! load are visible to the next.
//!
//! ### Key Components
//!
//! - **[`ScriptContext`]**: the runtime/context pair and sequential loading
//! - **[`globals`]**: option globals and the options object for the entry point
//! - **[`host`]**: native functions the scripts call back into
//! - **[`exception`]**: turning whatever a script threw into a [`CompileError`](crate::error::CompileError)
//! - **[`QuickJsCompiler`]**: the [`LessCompiler`] built from all of the above
//!
//! ## Threading
//!
//! QuickJS runtimes are single-threaded. `rquickjs` is used without its
//! `parallel` feature, which makes [`QuickJsCompiler`] neither `Send` nor
//! `Sync`; build one compiler per thread when compiling in parallel.

pub mod compiler;
pub mod context;
pub mod exception;
pub mod globals;
pub mod host;

pub use compiler::{LessCompiler, QuickJsCompiler};
pub use context::ScriptContext;
