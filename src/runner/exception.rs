//! Converting whatever a script threw into a [`CompileError`].
//!
//! less.js throws plain objects shaped like
//! `{ type, message, filename, line, column, extract }`; QuickJS' own errors
//! carry `fileName` and `lineNumber` instead. Both are read. Anything else
//! (a thrown string, a failed conversion on the Rust side) keeps only its
//! message.

use rquickjs::convert::Coerced;
use rquickjs::{Array, CaughtError, Object, Value};

use crate::error::CompileError;

/// Build a [`CompileError`] from a caught failure.
pub fn from_caught(caught: CaughtError<'_>) -> CompileError {
    match caught {
        CaughtError::Exception(exception) => {
            let cause = exception.to_string();
            from_object(exception.as_object(), cause)
        }
        CaughtError::Value(value) => {
            let cause = describe(&value);
            match value.as_object() {
                Some(object) => from_object(object, cause),
                None => CompileError::new(cause),
            }
        }
        CaughtError::Error(error) => CompileError::new(error.to_string()),
    }
}

fn from_object(object: &Object<'_>, cause: String) -> CompileError {
    let text = |key: &str| {
        object
            .get::<_, Option<Coerced<String>>>(key)
            .ok()
            .flatten()
            .map(|value| value.0)
            .filter(|value| !value.is_empty())
    };
    let number = |key: &str| {
        object
            .get::<_, Option<f64>>(key)
            .ok()
            .flatten()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value as u32)
    };

    CompileError {
        kind: text("type"),
        message: text("message").unwrap_or_else(|| cause.clone()),
        filename: text("filename").or_else(|| text("fileName")),
        line: number("line").or_else(|| number("lineNumber")),
        column: number("column"),
        extract: extract_lines(object),
        cause,
    }
}

/// The `extract` array, skipping the holes less.js leaves at file edges.
fn extract_lines(object: &Object<'_>) -> Vec<String> {
    match object.get::<_, Option<Array>>("extract") {
        Ok(Some(array)) => array
            .iter::<Option<String>>()
            .filter_map(|line| line.ok().flatten())
            .collect(),
        _ => Vec::new(),
    }
}

fn describe(value: &Value<'_>) -> String {
    match value.get::<Coerced<String>>() {
        Ok(text) => text.0,
        Err(_) => format!("uncaught {:?}", value.type_of()),
    }
}
