//! Host functions exposed to the scripts.
//!
//! The environment shim defines harmless stubs for these names; installing
//! them afterwards replaces the stubs with functions backed by the host:
//!
//! | Global                       | Backed by                                  |
//! |------------------------------|--------------------------------------------|
//! | `print(...args)`             | an `info` event on target `lesscss::script` |
//! | `quit()`                     | nothing; scripts cannot stop the host      |
//! | `readFile(path[, charset])`  | [`ResourceLoader::load`]                   |
//! | `readUrl(url[, charset])`    | [`ResourceLoader::load`]                   |
//! | `resourceExists(path)`       | [`ResourceLoader::exists`]                 |
//! | `writeSourceMap(map)`        | a write to `sourceMapURL`, when set        |
//!
//! `readFile` is what less.js' import loader ends up calling, so `@import`s
//! resolve through the same loader the scripts came from.

use std::fs;
use std::rc::Rc;

use rquickjs::convert::Coerced;
use rquickjs::function::{Opt, Rest};
use rquickjs::{Ctx, Exception, Function, Result};
use tracing::{debug, info};

use crate::loader::ResourceLoader;
use crate::options::LessOptions;

/// Install all host functions as globals.
pub fn install<'js>(
    ctx: &Ctx<'js>,
    loader: Rc<dyn ResourceLoader>,
    options: &LessOptions,
) -> Result<()> {
    let globals = ctx.globals();

    globals.set("print", Function::new(ctx.clone(), print)?.with_name("print")?)?;
    globals.set("quit", Function::new(ctx.clone(), quit)?.with_name("quit")?)?;

    let file_loader = loader.clone();
    let read_file = move |ctx: Ctx<'js>, path: String, _charset: Opt<Coerced<String>>| {
        read_resource(&ctx, file_loader.as_ref(), &path)
    };
    globals.set(
        "readFile",
        Function::new(ctx.clone(), read_file)?.with_name("readFile")?,
    )?;

    let url_loader = loader.clone();
    let read_url = move |ctx: Ctx<'js>, url: String, _charset: Opt<Coerced<String>>| {
        read_resource(&ctx, url_loader.as_ref(), &url)
    };
    globals.set(
        "readUrl",
        Function::new(ctx.clone(), read_url)?.with_name("readUrl")?,
    )?;

    let exists = move |path: String| loader.exists(&path);
    globals.set(
        "resourceExists",
        Function::new(ctx.clone(), exists)?.with_name("resourceExists")?,
    )?;

    let target = options.source_map_url.clone();
    let write_source_map = move |ctx: Ctx<'js>, map: Coerced<String>| -> Result<()> {
        match &target {
            Some(path) => {
                fs::write(path, map.0).map_err(|err| {
                    Exception::throw_message(
                        &ctx,
                        &format!("failed to write source map {}: {}", path, err),
                    )
                })?;
                debug!(path = path.as_str(), "wrote source map");
                Ok(())
            }
            None => {
                debug!("no sourceMapURL set, source map dropped");
                Ok(())
            }
        }
    };
    globals.set(
        "writeSourceMap",
        Function::new(ctx.clone(), write_source_map)?.with_name("writeSourceMap")?,
    )?;

    Ok(())
}

fn print(args: Rest<Coerced<String>>) {
    let line = args
        .0
        .into_iter()
        .map(|arg| arg.0)
        .collect::<Vec<_>>()
        .join(" ");
    info!(target: "lesscss::script", "{}", line);
}

fn quit() {
    debug!("script called quit(), ignored");
}

/// Load through `loader`, turning a failure into a thrown `Error` that names
/// the path.
fn read_resource<'js>(ctx: &Ctx<'js>, loader: &dyn ResourceLoader, path: &str) -> Result<String> {
    loader.load(path).map_err(|err| {
        debug!(path, error = %err, "script resource read failed");
        Exception::throw_message(ctx, &format!("{}: {}", path, err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryLoader;
    use crate::runner::ScriptContext;

    fn installed(loader: MemoryLoader, options: &LessOptions) -> ScriptContext {
        let scripts = ScriptContext::new().unwrap();
        let loader: Rc<dyn ResourceLoader> = Rc::new(loader);
        scripts
            .context()
            .with(|ctx| install(&ctx, loader, options))
            .unwrap();
        scripts
    }

    fn eval_string(scripts: &ScriptContext, code: &str) -> String {
        scripts
            .context()
            .with(|ctx| ctx.eval::<String, _>(code))
            .unwrap()
    }

    #[test]
    fn test_read_file() {
        let scripts = installed(
            MemoryLoader::new().with("mixins.less", ".m() {}"),
            &LessOptions::default(),
        );
        assert_eq!(eval_string(&scripts, "readFile('mixins.less')"), ".m() {}");
        assert_eq!(
            eval_string(&scripts, "readUrl('mixins.less', 'UTF-8')"),
            ".m() {}"
        );
    }

    #[test]
    fn test_read_file_missing_throws() {
        let scripts = installed(MemoryLoader::new(), &LessOptions::default());
        let message = eval_string(
            &scripts,
            "try { readFile('nope.less'); 'no error' } catch (e) { String(e.message) }",
        );
        assert!(message.starts_with("nope.less: "), "{}", message);
    }

    #[test]
    fn test_resource_exists() {
        let scripts = installed(
            MemoryLoader::new().with("a.less", ""),
            &LessOptions::default(),
        );
        assert_eq!(
            eval_string(&scripts, "String([resourceExists('a.less'), resourceExists('b.less')])"),
            "true,false"
        );
    }

    #[test]
    fn test_print_and_quit_return() {
        let scripts = installed(MemoryLoader::new(), &LessOptions::default());
        assert_eq!(
            eval_string(&scripts, "print('a', 1, {}); quit(); 'still running'"),
            "still running"
        );
    }

    #[test]
    fn test_write_source_map() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.css.map");
        let options =
            LessOptions::new().with_source_map(Some(target.to_string_lossy().into_owned()));
        let scripts = installed(MemoryLoader::new(), &options);

        eval_string(&scripts, "writeSourceMap('{\"version\":3}'); ''");
        assert_eq!(fs::read_to_string(&target).unwrap(), "{\"version\":3}");
    }
}
