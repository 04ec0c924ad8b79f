//! High-level entry point for compiling strings, resources and files.

use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::EngineError;
use crate::loader::{ChainedLoader, FilesystemLoader, MemoryLoader, ResourceLoader};
use crate::options::LessOptions;
use crate::runner::{LessCompiler, QuickJsCompiler};
use crate::scripts::ScriptSet;

/// A compiler together with the loader and options it was built from.
pub struct LessEngine {
    compiler: Box<dyn LessCompiler>,
    loader: Rc<dyn ResourceLoader>,
    options: LessOptions,
}

impl LessEngine {
    /// Build an engine loading the default [`ScriptSet`] through `loader`.
    pub fn new(options: LessOptions, loader: impl ResourceLoader + 'static) -> Result<Self, EngineError> {
        Self::with_scripts(options, loader, &ScriptSet::default())
    }

    /// Build an engine loading `scripts` through `loader`.
    pub fn with_scripts(
        options: LessOptions,
        loader: impl ResourceLoader + 'static,
        scripts: &ScriptSet,
    ) -> Result<Self, EngineError> {
        let loader: Rc<dyn ResourceLoader> = Rc::new(loader);
        let compiler = QuickJsCompiler::new(&options, loader.clone(), scripts)?;
        Ok(Self::from_compiler(options, loader, Box::new(compiler)))
    }

    /// Build an engine from `script_dir`, a directory holding `less.js`,
    /// `cssmin.js` and `source-map.js`.
    ///
    /// The bundled environment and engine scripts are used, and imports
    /// resolve against the current directory.
    pub fn from_script_dir(options: LessOptions, script_dir: &Path) -> Result<Self, EngineError> {
        let cwd = FilesystemLoader::current_dir().map_err(|source| EngineError::Io {
            path: ".".into(),
            source,
        })?;
        let loader = ChainedLoader::new()
            .with_loader(Box::new(MemoryLoader::bundled()))
            .with_loader(Box::new(cwd));
        let scripts_loader = FilesystemLoader::new(script_dir);
        let scripts = ScriptSet::new()
            .with_less(path_string(&scripts_loader.resolve("less.js")))
            .with_cssmin(path_string(&scripts_loader.resolve("cssmin.js")))
            .with_source_map(path_string(&scripts_loader.resolve("source-map.js")));
        Self::with_scripts(options, loader, &scripts)
    }

    /// Wrap an already built compiler.
    pub fn from_compiler(
        options: LessOptions,
        loader: Rc<dyn ResourceLoader>,
        compiler: Box<dyn LessCompiler>,
    ) -> Self {
        LessEngine {
            compiler,
            loader,
            options,
        }
    }

    pub fn options(&self) -> &LessOptions {
        &self.options
    }

    pub fn loader(&self) -> &dyn ResourceLoader {
        self.loader.as_ref()
    }

    /// Compile `input` without a location and without compression.
    pub fn compile(&self, input: &str) -> Result<String, EngineError> {
        self.compile_with_location(input, "", false)
    }

    pub fn compile_with_location(
        &self,
        input: &str,
        location: &str,
        compress: bool,
    ) -> Result<String, EngineError> {
        Ok(self.compiler.compile(input, location, compress)?)
    }

    /// Compile the resource at `path`, read through the engine's loader.
    pub fn compile_resource(&self, path: &str, compress: bool) -> Result<String, EngineError> {
        let input = self.loader.load(path).map_err(|source| EngineError::Io {
            path: path.into(),
            source,
        })?;
        self.compile_with_location(&input, path, compress)
    }

    /// Compile a file from disk, using its path as the location.
    pub fn compile_file(&self, input: &Path, compress: bool) -> Result<String, EngineError> {
        let source = fs::read_to_string(input).map_err(io_error(input))?;
        self.compile_with_location(&source, &path_string(input), compress)
    }

    /// Compile `input` into `output`.
    ///
    /// Unless `force` is set, nothing is done when `output` already exists
    /// and is not older than `input`. Returns whether `output` was written.
    pub fn compile_file_to(
        &self,
        input: &Path,
        output: &Path,
        compress: bool,
        force: bool,
    ) -> Result<bool, EngineError> {
        if !force && is_up_to_date(input, output)? {
            debug!(input = %input.display(), output = %output.display(), "output up to date, skipped");
            return Ok(false);
        }

        let css = self.compile_file(input, compress)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::write(output, css).map_err(io_error(output))?;
        info!(input = %input.display(), output = %output.display(), "compiled");
        Ok(true)
    }
}

fn is_up_to_date(input: &Path, output: &Path) -> Result<bool, EngineError> {
    let input_modified = fs::metadata(input)
        .and_then(|meta| meta.modified())
        .map_err(io_error(input))?;
    match fs::metadata(output) {
        Ok(meta) => Ok(meta
            .modified()
            .map(|output_modified| output_modified >= input_modified)
            .unwrap_or(false)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(io_error(output)(err)),
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> EngineError + '_ {
    move |source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
