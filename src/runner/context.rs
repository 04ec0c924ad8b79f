//! The QuickJS runtime and the context scripts accumulate in.

use std::fmt;

use rquickjs::context::EvalOptions;
use rquickjs::{CatchResultExt, Context, Runtime};
use tracing::debug;

use crate::error::InitError;
use crate::loader::ResourceLoader;

/// One QuickJS runtime with one full context.
///
/// Scripts are evaluated one after another in the same context, as
/// non-strict global code, so each load sees the declarations of the ones
/// before it.
pub struct ScriptContext {
    context: Context,
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    /// Resources loaded so far, in load order.
    loaded: Vec<String>,
}

impl ScriptContext {
    pub fn new() -> Result<Self, InitError> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;

        Ok(ScriptContext {
            context,
            runtime,
            loaded: Vec::new(),
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Fetch `resource` through `loader` and evaluate it.
    ///
    /// A read failure is returned as [`InitError::Io`] before anything is
    /// evaluated.
    pub fn load(&mut self, loader: &dyn ResourceLoader, resource: &str) -> Result<(), InitError> {
        let source = loader.load(resource).map_err(|source| InitError::Io {
            resource: resource.to_string(),
            source,
        })?;

        self.eval(resource, &source)?;
        debug!(resource, bytes = source.len(), "loaded script");
        self.loaded.push(resource.to_string());
        Ok(())
    }

    /// Evaluate `source` as global code. `resource` only names it in errors.
    pub fn eval(&self, resource: &str, source: &str) -> Result<(), InitError> {
        self.context.with(|ctx| {
            let mut options = EvalOptions::default();
            options.strict = false;
            ctx.eval_with_options::<(), _>(source, options)
                .catch(&ctx)
                .map_err(|caught| InitError::Script {
                    resource: resource.to_string(),
                    message: caught.to_string(),
                })
        })
    }

    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

impl fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptContext")
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
