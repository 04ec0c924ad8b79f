//! Handing [`LessOptions`] to the scripts.
//!
//! Options reach the scripts two ways. Before less.js loads, each option is
//! bound as a named global because less.js and the minifier read them while
//! they evaluate. On every compile call the whole set is also passed to the
//! entry point as one options object, so `compile` does not depend on globals
//! that another script could have overwritten in the meantime.

use rquickjs::{Ctx, IntoJs, Result, Value};

use crate::options::LessOptions;

/// Names of the globals bound by [`bind_options`], in binding order.
pub const OPTION_GLOBALS: [&str; 9] = [
    "charset",
    "css",
    "lineNumbers",
    "optimization",
    "sourceMap",
    "sourceMapRootpath",
    "sourceMapBasepath",
    "sourceMapURL",
    "paths",
];

/// Bind every option as a global. `paths` is only bound when non-empty and
/// unset optional values are bound as `null`.
pub fn bind_options<'js>(ctx: &Ctx<'js>, options: &LessOptions) -> Result<()> {
    let globals = ctx.globals();
    globals.set("charset", options.charset.as_str())?;
    globals.set("css", options.css)?;
    globals.set(
        "lineNumbers",
        nullable(ctx, options.line_numbers.map(|mode| mode.as_str()))?,
    )?;
    globals.set("optimization", i32::from(options.optimization))?;
    globals.set("sourceMap", options.source_map)?;
    globals.set(
        "sourceMapRootpath",
        nullable(ctx, options.source_map_rootpath.as_deref())?,
    )?;
    globals.set(
        "sourceMapBasepath",
        nullable(ctx, options.source_map_basepath.as_deref())?,
    )?;
    globals.set(
        "sourceMapURL",
        nullable(ctx, options.source_map_url.as_deref())?,
    )?;

    if !options.paths.is_empty() {
        globals.set("paths", options.paths.clone())?;
    }
    Ok(())
}

/// Build a fresh options object from its JSON form.
pub fn options_object<'js>(ctx: &Ctx<'js>, options_json: &str) -> Result<Value<'js>> {
    ctx.json_parse(options_json)
}

fn nullable<'js>(ctx: &Ctx<'js>, value: Option<&str>) -> Result<Value<'js>> {
    match value {
        Some(value) => value.into_js(ctx),
        None => Ok(Value::new_null(ctx.clone())),
    }
}
