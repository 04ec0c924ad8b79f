//! Command-line front end for the LESS compiler.
//!
//! Usage:
//!   lessc styles.less                   # Compile to stdout
//!   lessc styles.less styles.css        # Compile to a file, skipped when up to date
//!   lessc -x - < styles.less            # Compile stdin, compressed
//!
//! less.js, cssmin.js and source-map.js are read from `--scripts <DIR>`
//! (or `LESSC_SCRIPTS`).

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use lesscss::{CompileError, EngineError, LessEngine, LessOptions, LineNumbers};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lessc", version)]
#[command(about = "Compile LESS stylesheets to CSS", long_about = None)]
struct Args {
    /// Input file, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Minify the generated CSS
    #[arg(short = 'x', long)]
    compress: bool,

    /// Treat the input as plain CSS
    #[arg(long)]
    css: bool,

    /// Emit source line numbers: comments, mediaquery or all
    #[arg(long, value_name = "MODE")]
    line_numbers: Option<LineNumbers>,

    /// Parser optimization level
    #[arg(short = 'O', long, value_name = "LEVEL")]
    optimization: Option<u8>,

    /// Generate a source map
    #[arg(long)]
    source_map: bool,

    #[arg(long, value_name = "PATH")]
    source_map_rootpath: Option<String>,

    #[arg(long, value_name = "PATH")]
    source_map_basepath: Option<String>,

    /// Where the source map is written
    #[arg(long, value_name = "URL")]
    source_map_url: Option<String>,

    /// Import search path (repeatable)
    #[arg(short = 'I', long = "include-path", value_name = "DIR")]
    include_paths: Vec<String>,

    /// Directory holding less.js, cssmin.js and source-map.js
    #[arg(long, value_name = "DIR", env = "LESSC_SCRIPTS", default_value = ".")]
    scripts: PathBuf,

    /// TOML options file; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Recompile even when the output is up to date
    #[arg(short, long)]
    force: bool,

    /// More output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("{message}")]
    #[diagnostic(code(lessc::compile))]
    Compile {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        message: String,
        #[help]
        extract: Option<String>,
    },

    #[error("{0}")]
    #[diagnostic(code(lessc::init), help("check --scripts or LESSC_SCRIPTS"))]
    Init(String),

    #[error("{0}")]
    #[diagnostic(code(lessc::options))]
    Options(String),

    #[error("Failed to access {path:?}")]
    #[diagnostic(code(lessc::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let options = options_from(&args)?;
    let engine = LessEngine::from_script_dir(options, &args.scripts).map_err(|err| match err {
        EngineError::Io { path, source } => CliError::Io { path, source },
        other => CliError::Init(other.to_string()),
    })?;

    let stdin = args.input == Path::new("-");
    match &args.output {
        Some(output) if !stdin => {
            let written = engine
                .compile_file_to(&args.input, output, args.compress, args.force)
                .map_err(|err| engine_error(err, &args.input))?;
            if !written {
                tracing::info!(output = %output.display(), "output up to date");
            }
            Ok(())
        }
        output => {
            let (source, location) = if stdin {
                let mut source = String::new();
                io::stdin()
                    .read_to_string(&mut source)
                    .map_err(|source| CliError::Io {
                        path: "-".into(),
                        source,
                    })?;
                (source, String::from("stdin.less"))
            } else {
                let source = std::fs::read_to_string(&args.input).map_err(|source| CliError::Io {
                    path: args.input.clone(),
                    source,
                })?;
                (source, args.input.to_string_lossy().into_owned())
            };

            let css = engine
                .compile_with_location(&source, &location, args.compress)
                .map_err(|err| match err {
                    EngineError::Compile(err) => compile_error(err, &location, source.clone()),
                    other => engine_error(other, &args.input),
                })?;
            write_css(output.as_deref(), &css)
        }
    }
}

fn options_from(args: &Args) -> Result<LessOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => LessOptions::load(path).map_err(|err| CliError::Options(err.to_string()))?,
        None => LessOptions::default(),
    };

    options.css |= args.css;
    options.source_map |= args.source_map;
    if let Some(mode) = args.line_numbers {
        options.line_numbers = Some(mode);
    }
    if let Some(level) = args.optimization {
        options.optimization = level;
    }
    if let Some(rootpath) = &args.source_map_rootpath {
        options.source_map_rootpath = Some(rootpath.clone());
    }
    if let Some(basepath) = &args.source_map_basepath {
        options.source_map_basepath = Some(basepath.clone());
    }
    if let Some(url) = &args.source_map_url {
        options.source_map_url = Some(url.clone());
    }
    options.paths.extend(args.include_paths.iter().cloned());
    Ok(options)
}

fn engine_error(err: EngineError, input: &Path) -> CliError {
    match err {
        EngineError::Compile(err) => match std::fs::read_to_string(input) {
            Ok(source) => compile_error(err, &input.to_string_lossy(), source),
            Err(_) => CliError::Init(err.to_string()),
        },
        EngineError::Io { path, source } => CliError::Io { path, source },
        EngineError::Init(err) => CliError::Init(err.to_string()),
    }
}

fn compile_error(err: CompileError, location: &str, source: String) -> CliError {
    // Errors raised inside an import point into a file we do not have.
    let in_input = err.filename.as_deref().map_or(true, |name| name == location);
    let span = err
        .source_offset(&source)
        .filter(|_| in_input)
        .map(|(offset, len)| SourceSpan::from((offset, len)));
    let name = err.filename.clone().unwrap_or_else(|| location.to_string());
    let extract = if err.extract.is_empty() {
        None
    } else {
        Some(err.extract.join("\n"))
    };
    CliError::Compile {
        src: NamedSource::new(name, source),
        span,
        message: err.to_string(),
        extract,
    }
}

fn write_css(output: Option<&Path>, css: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, css).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(css.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| CliError::Io {
                    path: "-".into(),
                    source,
                })
        }
    }
}
