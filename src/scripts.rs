//! The scripts loaded into the engine and the order they load in.

/// Default path of the source-map helper.
pub const DEFAULT_SOURCE_MAP: &str = "META-INF/source-map.js";
/// Default path of the environment shim.
pub const DEFAULT_ENV: &str = "META-INF/env.js";
/// Default path of the LESS compiler (less.js).
pub const DEFAULT_LESS: &str = "META-INF/less.js";
/// Default path of the CSS minifier.
pub const DEFAULT_CSSMIN: &str = "META-INF/cssmin.js";
/// Default path of the engine glue script defining `compile`.
pub const DEFAULT_ENGINE: &str = "META-INF/engine.js";

/// Environment shim shipped with this crate.
pub const BUNDLED_ENV: &str = include_str!("../resources/META-INF/env.js");
/// Engine glue script shipped with this crate.
pub const BUNDLED_ENGINE: &str = include_str!("../resources/META-INF/engine.js");

/// Resource paths of the five scripts, resolved through a
/// [`ResourceLoader`](crate::loader::ResourceLoader).
///
/// Load order is fixed: `source_map` and `env` first, then the option
/// globals are bound, then `less`, `cssmin` and `engine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSet {
    pub source_map: String,
    pub env: String,
    pub less: String,
    pub cssmin: String,
    pub engine: String,
}

impl ScriptSet {
    pub fn new() -> Self {
        ScriptSet {
            source_map: DEFAULT_SOURCE_MAP.to_string(),
            env: DEFAULT_ENV.to_string(),
            less: DEFAULT_LESS.to_string(),
            cssmin: DEFAULT_CSSMIN.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
        }
    }

    /// Scripts loaded before the option globals are bound.
    pub fn prelude(&self) -> [&str; 2] {
        [self.source_map.as_str(), self.env.as_str()]
    }

    /// Scripts loaded after the option globals are bound.
    pub fn compiler(&self) -> [&str; 3] {
        [self.less.as_str(), self.cssmin.as_str(), self.engine.as_str()]
    }

    #[must_use]
    pub fn with_source_map(mut self, path: impl Into<String>) -> Self {
        self.source_map = path.into();
        self
    }

    #[must_use]
    pub fn with_env(mut self, path: impl Into<String>) -> Self {
        self.env = path.into();
        self
    }

    #[must_use]
    pub fn with_less(mut self, path: impl Into<String>) -> Self {
        self.less = path.into();
        self
    }

    #[must_use]
    pub fn with_cssmin(mut self, path: impl Into<String>) -> Self {
        self.cssmin = path.into();
        self
    }

    #[must_use]
    pub fn with_engine(mut self, path: impl Into<String>) -> Self {
        self.engine = path.into();
        self
    }
}

impl Default for ScriptSet {
    fn default() -> Self {
        Self::new()
    }
}
