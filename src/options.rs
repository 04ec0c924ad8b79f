//! Compiler options.
//!
//! [`LessOptions`] is copied into the engine once, when the compiler is built.
//! Field names serialize in camelCase so the same shape is seen by the
//! scripts, both as individual globals and as the options object handed to
//! the `compile` entry point.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for reading an options file.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How source line numbers are emitted into the generated CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineNumbers {
    /// As `/* line N, file */` comments.
    Comments,
    /// As `@media -sass-debug-info` blocks.
    MediaQuery,
    /// Both of the above.
    All,
}

impl LineNumbers {
    pub fn as_str(self) -> &'static str {
        match self {
            LineNumbers::Comments => "comments",
            LineNumbers::MediaQuery => "mediaquery",
            LineNumbers::All => "all",
        }
    }
}

impl fmt::Display for LineNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineNumbers {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "comments" => Ok(LineNumbers::Comments),
            "mediaquery" => Ok(LineNumbers::MediaQuery),
            "all" => Ok(LineNumbers::All),
            other => Err(format!(
                "unknown line number mode `{}` (expected comments, mediaquery or all)",
                other
            )),
        }
    }
}

/// Complete compiler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessOptions {
    /// Character set of inputs and imports.
    pub charset: String,
    /// Treat the input as plain CSS instead of LESS.
    pub css: bool,
    pub line_numbers: Option<LineNumbers>,
    /// Parser optimization level, 0 to 2.
    pub optimization: u8,
    pub source_map: bool,
    pub source_map_rootpath: Option<String>,
    pub source_map_basepath: Option<String>,
    #[serde(rename = "sourceMapURL")]
    pub source_map_url: Option<String>,
    /// Import search paths, tried in order.
    pub paths: Vec<String>,
}

impl LessOptions {
    pub fn new() -> Self {
        LessOptions {
            charset: "UTF-8".to_string(),
            css: false,
            line_numbers: None,
            optimization: 1,
            source_map: false,
            source_map_rootpath: None,
            source_map_basepath: None,
            source_map_url: None,
            paths: Vec::new(),
        }
    }

    /// Load options from a TOML file.
    ///
    /// Keys use the same camelCase names the scripts see:
    /// ```toml
    /// charset = "UTF-8"
    /// optimization = 2
    /// lineNumbers = "comments"
    /// sourceMapURL = "styles.css.map"
    /// paths = ["styles/", "vendor/"]
    /// ```
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse options from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    #[must_use]
    pub fn with_css(mut self, css: bool) -> Self {
        self.css = css;
        self
    }

    #[must_use]
    pub fn with_line_numbers(mut self, mode: LineNumbers) -> Self {
        self.line_numbers = Some(mode);
        self
    }

    #[must_use]
    pub fn with_optimization(mut self, level: u8) -> Self {
        self.optimization = level;
        self
    }

    /// Enable source maps, written to `url` when one is given.
    #[must_use]
    pub fn with_source_map(mut self, url: Option<String>) -> Self {
        self.source_map = true;
        self.source_map_url = url;
        self
    }

    #[must_use]
    pub fn with_source_map_rootpath(mut self, rootpath: impl Into<String>) -> Self {
        self.source_map_rootpath = Some(rootpath.into());
        self
    }

    #[must_use]
    pub fn with_source_map_basepath(mut self, basepath: impl Into<String>) -> Self {
        self.source_map_basepath = Some(basepath.into());
        self
    }

    /// Append an import search path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }
}

impl Default for LessOptions {
    fn default() -> Self {
        Self::new()
    }
}
