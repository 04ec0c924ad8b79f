//! The compiler handle: loaded scripts plus the resolved entry point.

use std::fmt;
use std::rc::Rc;

use rquickjs::{CatchResultExt, Ctx, Function, Persistent, Value};
use tracing::{info, trace, warn};

use crate::error::{CompileError, InitError};
use crate::loader::ResourceLoader;
use crate::options::LessOptions;
use crate::runner::context::ScriptContext;
use crate::runner::{exception, globals, host};
use crate::scripts::ScriptSet;

/// Compiles LESS source text into CSS.
pub trait LessCompiler {
    /// Compile `source`. `location` names the input for diagnostics and is the
    /// base relative imports resolve against; `compress` minifies the output.
    fn compile(&self, source: &str, location: &str, compress: bool) -> Result<String, CompileError>;
}

/// A [`LessCompiler`] running less.js inside QuickJS.
///
/// Built once and reused: every call shares the loaded scripts and the option
/// globals bound at construction, and nothing a call does is kept for the
/// next one. A failed call leaves the compiler usable.
///
/// ```no_run
/// use std::rc::Rc;
/// use lesscss::loader::{ChainedLoader, FilesystemLoader, MemoryLoader};
/// use lesscss::runner::{LessCompiler, QuickJsCompiler};
/// use lesscss::{LessOptions, ScriptSet};
///
/// let loader = ChainedLoader::new()
///     .with_loader(Box::new(MemoryLoader::bundled()))
///     .with_loader(Box::new(FilesystemLoader::new("vendor")));
/// let compiler =
///     QuickJsCompiler::new(&LessOptions::default(), Rc::new(loader), &ScriptSet::default())?;
///
/// let css = compiler.compile(".a { color: red; }", "a.less", false)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct QuickJsCompiler {
    // Declared before `scripts` so it is dropped first; QuickJS asserts that
    // no object is still referenced when the runtime is freed.
    entry: Persistent<Function<'static>>,
    scripts: ScriptContext,
    /// `LessOptions` as JSON, parsed into a fresh object on every call.
    options_json: String,
}

impl QuickJsCompiler {
    /// Start QuickJS and load `scripts` through `loader`.
    ///
    /// Fails if any script cannot be read or throws while evaluating, or if
    /// no global `compile` function exists once all of them have run.
    pub fn new(
        options: &LessOptions,
        loader: Rc<dyn ResourceLoader>,
        scripts: &ScriptSet,
    ) -> Result<Self, InitError> {
        let options_json = serde_json::to_string(options)?;
        let mut context = ScriptContext::new()?;

        for resource in scripts.prelude() {
            context.load(loader.as_ref(), resource)?;
        }

        context.context().with(|ctx| -> Result<(), InitError> {
            globals::bind_options(&ctx, options)?;
            host::install(&ctx, loader.clone(), options)?;
            Ok(())
        })?;

        for resource in scripts.compiler() {
            context.load(loader.as_ref(), resource)?;
        }

        let entry = context.context().with(|ctx| -> Result<_, InitError> {
            let value: Value = ctx.globals().get("compile")?;
            let function = value.into_function().ok_or(InitError::MissingEntryPoint)?;
            Ok(Persistent::save(&ctx, function))
        })?;

        info!(scripts = context.loaded().len(), "less compiler ready");
        Ok(QuickJsCompiler {
            entry,
            scripts: context,
            options_json,
        })
    }

    /// Resources loaded at construction, in load order.
    pub fn loaded_scripts(&self) -> &[String] {
        self.scripts.loaded()
    }

    fn invoke<'js>(
        &self,
        ctx: &Ctx<'js>,
        source: &str,
        location: &str,
        compress: bool,
    ) -> rquickjs::Result<String> {
        let entry = self.entry.clone().restore(ctx)?;
        let options = globals::options_object(ctx, &self.options_json)?;
        entry.call((source, location, compress, options))
    }
}

impl LessCompiler for QuickJsCompiler {
    fn compile(&self, source: &str, location: &str, compress: bool) -> Result<String, CompileError> {
        trace!(location, compress, bytes = source.len(), "compiling");
        self.scripts
            .context()
            .with(|ctx| {
                self.invoke(&ctx, source, location, compress)
                    .catch(&ctx)
                    .map_err(exception::from_caught)
            })
            .map_err(|err| {
                warn!(location, error = %err, "less compilation failed");
                err
            })
    }
}

impl fmt::Debug for QuickJsCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickJsCompiler")
            .field("scripts", &self.scripts)
            .field("options", &self.options_json)
            .finish_non_exhaustive()
    }
}
