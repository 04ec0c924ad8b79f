//! Integration tests for the QuickJS-backed compiler.
//!
//! The real less.js is not shipped with the crate, so these tests run the
//! bundled environment and engine scripts against the small stand-ins under
//! `tests/fixtures/`.

extern crate lesscss;

use std::fs;
use std::rc::Rc;

use lesscss::loader::MemoryLoader;
use lesscss::scripts::{
    DEFAULT_CSSMIN, DEFAULT_ENGINE, DEFAULT_ENV, DEFAULT_LESS, DEFAULT_SOURCE_MAP,
};
use lesscss::{InitError, LessCompiler, LessOptions, QuickJsCompiler, ScriptSet};

const LESS_STUB: &str = include_str!("fixtures/less.js");
const CSSMIN_STUB: &str = include_str!("fixtures/cssmin.js");
const SOURCE_MAP_STUB: &str = include_str!("fixtures/source-map.js");

/// Bundled scripts plus the fixture stand-ins, under the default paths.
fn script_loader() -> MemoryLoader {
    MemoryLoader::bundled()
        .with(DEFAULT_LESS, LESS_STUB)
        .with(DEFAULT_CSSMIN, CSSMIN_STUB)
        .with(DEFAULT_SOURCE_MAP, SOURCE_MAP_STUB)
}

/// Helper to build a compiler over `loader` with the default scripts.
fn compiler_with(options: &LessOptions, loader: MemoryLoader) -> QuickJsCompiler {
    QuickJsCompiler::new(options, Rc::new(loader), &ScriptSet::default()).unwrap()
}

fn compiler() -> QuickJsCompiler {
    compiler_with(&LessOptions::default(), script_loader())
}

fn strip_whitespace(css: &str) -> String {
    css.chars().filter(|c| !c.is_whitespace()).collect()
}

// ============================================================================
// Successful compiles
// ============================================================================

#[test]
fn test_compile_simple_rule() {
    let css = compiler().compile(".a { color: red; }", "a.less", false).unwrap();
    assert_eq!(css, ".a {\n  color: red;\n}\n");
}

#[test]
fn test_compile_variables() {
    let css = compiler()
        .compile("@c: red;\n.a { color: @c; }\n", "a.less", false)
        .unwrap();
    assert_eq!(css, ".a {\n  color: red;\n}\n");
}

#[test]
fn test_compile_without_location() {
    let css = compiler().compile(".a { color: red; }", "", false).unwrap();
    assert_eq!(css, ".a {\n  color: red;\n}\n");
}

#[test]
fn test_compile_is_deterministic() {
    let compiler = compiler();
    let source = "@w: 10px;\n.a { width: @w; }\n.b { height: @w; }\n";
    let first = compiler.compile(source, "a.less", false).unwrap();
    for _ in 0..3 {
        assert_eq!(compiler.compile(source, "a.less", false).unwrap(), first);
    }
}

#[test]
fn test_compress_only_changes_whitespace() {
    let compiler = compiler();
    let source = ".a { color: red; }\n.b { margin: 0 auto; }\n";
    let plain = compiler.compile(source, "a.less", false).unwrap();
    let compressed = compiler.compile(source, "a.less", true).unwrap();

    assert_eq!(compressed, ".a{color:red;}.b{margin:0 auto;}");
    assert_ne!(plain, compressed);
    assert_eq!(strip_whitespace(&plain), strip_whitespace(&compressed));
}

#[test]
fn test_css_option_passes_input_through() {
    let options = LessOptions::new().with_css(true);
    let compiler = compiler_with(&options, script_loader());
    assert_eq!(compiler.compile(".a{color:red;}", "a.css", false).unwrap(), ".a{color:red;}");
    assert_eq!(
        compiler.compile(".a { color : red; }", "a.css", true).unwrap(),
        ".a{color:red;}"
    );
}

#[test]
fn test_import_resolves_relative_to_location() {
    let loader = script_loader().with("styles/base.less", "@c: blue;\n");
    let compiler = compiler_with(&LessOptions::default(), loader);
    let css = compiler
        .compile("@import \"base.less\";\n.a { color: @c; }\n", "styles/main.less", false)
        .unwrap();
    assert_eq!(css, ".a {\n  color: blue;\n}\n");
}

#[test]
fn test_import_resolves_through_include_paths() {
    let loader = script_loader().with("lib/mixins/colors.less", ".c { color: green; }\n");
    let options = LessOptions::new().with_path("lib/mixins/");
    let compiler = compiler_with(&options, loader);
    let css = compiler
        .compile("@import 'colors.less';\n", "main.less", false)
        .unwrap();
    assert_eq!(css, ".c {\n  color: green;\n}\n");
}

#[test]
fn test_source_map_written_through_compile() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("site.css.map");
    let options = LessOptions::new()
        .with_source_map(Some(map.to_string_lossy().into_owned()))
        .with_source_map_rootpath("../less/");
    let css = compiler_with(&options, script_loader())
        .compile(".a { color: red; }", "site.less", false)
        .unwrap();
    assert_eq!(css, ".a {\n  color: red;\n}\n");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&map).unwrap()).unwrap();
    assert_eq!(written["version"], serde_json::json!(3));
    assert_eq!(written["generator"], serde_json::json!(true));
    assert_eq!(written["sourceRoot"], serde_json::json!("../less/"));
}

#[test]
fn test_source_map_off_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("site.css.map");
    let options = LessOptions {
        source_map_url: Some(map.to_string_lossy().into_owned()),
        ..LessOptions::default()
    };
    compiler_with(&options, script_loader())
        .compile(".a { color: red; }", "site.less", false)
        .unwrap();
    assert!(!map.exists());
}

// ============================================================================
// Compile failures
// ============================================================================

#[test]
fn test_unclosed_block_reports_position() {
    let err = compiler()
        .compile(".a { color: red; }\n.b {\n  color: blue;\n", "test.less", false)
        .unwrap_err();

    assert_eq!(err.kind.as_deref(), Some("Parse"));
    assert_eq!(err.message, "missing closing `}`");
    assert_eq!(err.filename.as_deref(), Some("test.less"));
    assert_eq!(err.line, Some(2));
    assert_eq!(err.column, Some(3));
    assert_eq!(err.extract, vec![".a { color: red; }", ".b {", "  color: blue;"]);
    assert_eq!(
        err.to_string(),
        "ParseError: missing closing `}` in test.less on line 2, column 4"
    );
}

#[test]
fn test_error_extract_skips_missing_lines() {
    let err = compiler().compile(".a { color: red;", "a.less", false).unwrap_err();
    assert_eq!(err.line, Some(1));
    assert_eq!(err.column, Some(3));
    assert_eq!(err.extract, vec![".a { color: red;"]);
}

#[test]
fn test_undefined_variable_is_compile_error() {
    let err = compiler().compile(".a { color: @nope; }", "a.less", false).unwrap_err();
    assert_eq!(err.kind.as_deref(), Some("Name"));
    assert_eq!(err.message, "variable @nope is undefined");
    assert_eq!(err.line, None);
}

#[test]
fn test_missing_import_is_compile_error() {
    let err = compiler()
        .compile("@import 'nope.less';\n", "", false)
        .unwrap_err();
    assert_eq!(err.kind.as_deref(), Some("File"));
    assert_eq!(err.message, "'nope.less' wasn't found");
}

#[test]
fn test_compiler_usable_after_error() {
    let compiler = compiler();
    assert!(compiler.compile(".a {", "a.less", false).is_err());
    assert_eq!(
        compiler.compile(".a { color: red; }", "a.less", false).unwrap(),
        ".a {\n  color: red;\n}\n"
    );
}

#[test]
fn test_script_exception_is_compile_error() {
    let loader = script_loader().with(
        DEFAULT_ENGINE,
        "var compile = function() { return undefinedThing.x; };",
    );
    let err = compiler_with(&LessOptions::default(), loader)
        .compile(".a {}", "a.less", false)
        .unwrap_err();
    assert!(err.message.contains("undefinedThing"), "{}", err.message);
    assert!(!err.cause.is_empty());
}

#[test]
fn test_non_string_result_is_compile_error() {
    let loader = script_loader().with(DEFAULT_ENGINE, "var compile = function() { return 42; };");
    let compiler = compiler_with(&LessOptions::default(), loader);
    assert!(compiler.compile(".a {}", "a.less", false).is_err());
}

#[test]
fn test_thrown_string_is_compile_error() {
    let loader = script_loader().with(
        DEFAULT_ENGINE,
        "var compile = function() { throw 'broken stylesheet'; };",
    );
    let err = compiler_with(&LessOptions::default(), loader)
        .compile(".a {}", "a.less", false)
        .unwrap_err();
    assert_eq!(err.message, "broken stylesheet");
    assert_eq!(err.kind, None);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_loaded_scripts_in_order() {
    assert_eq!(
        compiler().loaded_scripts(),
        [DEFAULT_SOURCE_MAP, DEFAULT_ENV, DEFAULT_LESS, DEFAULT_CSSMIN, DEFAULT_ENGINE]
    );
}

#[test]
fn test_missing_script_fails_construction() {
    for missing in [DEFAULT_SOURCE_MAP, DEFAULT_ENV, DEFAULT_LESS, DEFAULT_CSSMIN, DEFAULT_ENGINE] {
        let mut loader = script_loader();
        loader.remove(missing);
        let err = QuickJsCompiler::new(&LessOptions::default(), Rc::new(loader), &ScriptSet::default())
            .unwrap_err();
        match err {
            InitError::Io { resource, .. } => assert_eq!(resource, missing),
            other => panic!("expected io error for {}, got {:?}", missing, other),
        }
    }
}

#[test]
fn test_script_error_fails_construction() {
    let loader = script_loader().with(DEFAULT_CSSMIN, "exports.compressor = ;");
    let err = QuickJsCompiler::new(&LessOptions::default(), Rc::new(loader), &ScriptSet::default())
        .unwrap_err();
    match err {
        InitError::Script { resource, .. } => assert_eq!(resource, DEFAULT_CSSMIN),
        other => panic!("expected script error, got {:?}", other),
    }
}

#[test]
fn test_missing_entry_point() {
    let loader = script_loader().with(DEFAULT_ENGINE, "var notCompile = 1;");
    let err = QuickJsCompiler::new(&LessOptions::default(), Rc::new(loader), &ScriptSet::default())
        .unwrap_err();
    assert!(matches!(err, InitError::MissingEntryPoint));
}

#[test]
fn test_entry_point_must_be_function() {
    let loader = script_loader().with(DEFAULT_ENGINE, "var compile = 'not a function';");
    let err = QuickJsCompiler::new(&LessOptions::default(), Rc::new(loader), &ScriptSet::default())
        .unwrap_err();
    assert!(matches!(err, InitError::MissingEntryPoint));
}

#[test]
fn test_custom_script_paths() {
    let loader = MemoryLoader::bundled()
        .with("vendor/less-1.7.5.js", LESS_STUB)
        .with("vendor/cssmin.js", CSSMIN_STUB)
        .with("vendor/source-map.js", SOURCE_MAP_STUB);
    let scripts = ScriptSet::new()
        .with_less("vendor/less-1.7.5.js")
        .with_cssmin("vendor/cssmin.js")
        .with_source_map("vendor/source-map.js");
    let compiler = QuickJsCompiler::new(&LessOptions::default(), Rc::new(loader), &scripts).unwrap();
    assert_eq!(compiler.loaded_scripts()[2], "vendor/less-1.7.5.js");
    assert!(compiler.compile(".a { b: c; }", "", true).is_ok());
}
