//! Whole-document read and write.
//!
//! A document is JSON text whose root is an object describing one
//! [`JsonClass`]. Reading reports failures as [`JsonError`]; writing a
//! file reports failure as `false` and logs the cause.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{JsonClass, JsonError};

/// How [`write_to_string`] lays out its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// No whitespace.
    #[default]
    Compact,
    /// Two-space indentation, one member per line.
    Pretty,
}

/// Parses `text` and checks that its root is an object.
pub fn parse_document(text: &str) -> Result<Value, JsonError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(JsonError::not_an_object(&value));
    }
    Ok(value)
}

/// Reads a new `T` from JSON text.
///
/// # Examples
///
/// ```
/// use vc_json::JsonClass;
///
/// #[derive(JsonClass, Default, Debug)]
/// struct Limits {
///     max: u32,
/// }
///
/// let limits: Limits = vc_json::read_from_str(r#"{"max": 8}"#).unwrap();
/// assert_eq!(limits.max, 8);
///
/// let err = vc_json::read_from_str::<Limits>("[8]").unwrap_err();
/// assert!(err.is_parse_error());
/// ```
pub fn read_from_str<T: JsonClass>(text: &str) -> Result<T, JsonError> {
    let mut value = T::default();
    read_from_str_into(&mut value, text)?;
    Ok(value)
}

/// Reads JSON text into an existing `T`.
///
/// Skipped fields keep their current values. On error `target` may be
/// partially updated.
pub fn read_from_str_into<T: JsonClass>(target: &mut T, text: &str) -> Result<(), JsonError> {
    let document = parse_document(text)?;
    target.deserialize(&document)
}

/// Reads a new `T` from the file at `path`.
///
/// A missing or unreadable file is an [`Io`](crate::JsonErrorKind::Io)
/// error.
pub fn read_from_file<T: JsonClass>(path: impl AsRef<Path>) -> Result<T, JsonError> {
    let mut value = T::default();
    read_from_file_into(&mut value, path)?;
    Ok(value)
}

/// Reads the file at `path` into an existing `T`.
pub fn read_from_file_into<T: JsonClass>(
    target: &mut T,
    path: impl AsRef<Path>,
) -> Result<(), JsonError> {
    let path = path.as_ref();
    log::debug!("reading `{}` from `{}`", T::schema().info().type_name(), path.display());
    let text = fs::read_to_string(path)?;
    read_from_str_into(target, &text)
}

/// Renders `value` as JSON text.
///
/// # Examples
///
/// ```
/// use vc_json::{Format, JsonClass};
///
/// #[derive(JsonClass, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(vc_json::write_to_string(&p, Format::Compact), r#"{"x":1,"y":2}"#);
/// assert_eq!(
///     vc_json::write_to_string(&p, Format::Pretty),
///     "{\n  \"x\": 1,\n  \"y\": 2\n}",
/// );
/// ```
pub fn write_to_string<T: JsonClass>(value: &T, format: Format) -> String {
    let document = value.serialize();
    match format {
        Format::Compact => document.to_string(),
        Format::Pretty => format!("{document:#}"),
    }
}

/// Writes `value` to the file at `path`, replacing its content.
///
/// Returns `false` if the file could not be written.
pub fn write_to_file<T: JsonClass>(path: impl AsRef<Path>, value: &T, format: Format) -> bool {
    let path = path.as_ref();
    log::debug!("writing `{}` to `{}`", T::schema().info().type_name(), path.display());
    match fs::write(path, write_to_string(value, format)) {
        Ok(()) => true,
        Err(err) => {
            log::error!("failed to write `{}`: {err}", path.display());
            false
        }
    }
}
