use std::borrow::Cow;
use std::fmt;
use std::{error, io};

use serde_json::Value;
use thiserror::Error;

use crate::scalar::json_type_name;

// -----------------------------------------------------------------------------
// PathSegment

/// One step of the route from the document root to the value that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object member, rendered as `.name` (no dot at the root).
    Field(Cow<'static, str>),
    /// A vector element, rendered as `[index]`.
    Index(usize),
    /// A map value, rendered as `[key]`.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "[{key}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// JsonErrorKind

/// The reason a read failed, without location information.
#[derive(Debug, Error)]
pub enum JsonErrorKind {
    /// None of the candidate names is present in the object.
    #[error("not found")]
    NotFound,
    /// The value exists but cannot be represented as the target type.
    #[error("was an unexpected type ({found}), type expected was: {expected}")]
    TypeMismatch {
        found: &'static str,
        expected: Cow<'static, str>,
    },
    /// No candidate of a multi-type field accepts the value.
    #[error("matched no candidate type ({found}), type expected was: {expected}")]
    UnionNoMatch {
        found: &'static str,
        expected: Cow<'static, str>,
    },
    /// The document text is not valid JSON.
    #[error("could not be parsed as json: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document root is valid JSON but not an object.
    #[error("could not be parsed as json: root is {found}, expected object")]
    NotAnObject { found: &'static str },
    /// The document file could not be read.
    #[error("could not be read: {0}")]
    Io(#[from] io::Error),
    /// Raised by user code, usually a deserialize action.
    #[error("{0}")]
    Custom(String),
}

// -----------------------------------------------------------------------------
// JsonError

/// A failed read, carrying the path of the offending value.
///
/// The path is accumulated while the error unwinds through nested
/// classes, vectors and maps, so `within_*` calls prepend segments.
///
/// # Examples
///
/// ```
/// use vc_json::JsonError;
///
/// let err = JsonError::not_found()
///     .within_field("FloatValue")
///     .within_index(2)
///     .within_field("Children");
///
/// assert!(err.is_not_found());
/// assert_eq!(err.path_string(), "Children[2].FloatValue");
/// assert_eq!(err.to_string(), "Children[2].FloatValue not found");
/// ```
pub struct JsonError {
    // innermost segment first
    path: Vec<PathSegment>,
    kind: JsonErrorKind,
}

impl JsonError {
    /// Creates an error without a path.
    #[inline]
    pub const fn new(kind: JsonErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    #[inline]
    pub const fn not_found() -> Self {
        Self::new(JsonErrorKind::NotFound)
    }

    /// Reports that `value` cannot be read as `expected`.
    pub fn type_mismatch(value: &Value, expected: impl Into<Cow<'static, str>>) -> Self {
        Self::new(JsonErrorKind::TypeMismatch {
            found: json_type_name(value),
            expected: expected.into(),
        })
    }

    /// Reports that `value` matches no candidate of the union type `expected`.
    pub fn union_no_match(value: &Value, expected: impl Into<Cow<'static, str>>) -> Self {
        Self::new(JsonErrorKind::UnionNoMatch {
            found: json_type_name(value),
            expected: expected.into(),
        })
    }

    pub fn not_an_object(value: &Value) -> Self {
        Self::new(JsonErrorKind::NotAnObject {
            found: json_type_name(value),
        })
    }

    /// Creates a free-form error, for use in deserialize actions.
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::new(JsonErrorKind::Custom(message.to_string()))
    }

    /// Prepends an object member to the path.
    #[must_use]
    pub fn within_field(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.path.push(PathSegment::Field(name.into()));
        self
    }

    /// Prepends a vector index to the path.
    #[must_use]
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.push(PathSegment::Index(index));
        self
    }

    /// Prepends a map key to the path.
    #[must_use]
    pub fn within_key(mut self, key: impl Into<String>) -> Self {
        self.path.push(PathSegment::Key(key.into()));
        self
    }

    #[inline]
    pub fn kind(&self) -> &JsonErrorKind {
        &self.kind
    }

    #[inline]
    pub fn into_kind(self) -> JsonErrorKind {
        self.kind
    }

    /// Returns the path segments, outermost first.
    pub fn path(&self) -> impl DoubleEndedIterator<Item = &PathSegment> + ExactSizeIterator {
        self.path.iter().rev()
    }

    /// Renders the path as `a.b[2].c[key]`, empty at the document root.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in self.path() {
            if let PathSegment::Field(_) = segment
                && !out.is_empty()
            {
                out.push('.');
            }
            out.push_str(&segment.to_string());
        }
        out
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, JsonErrorKind::NotFound)
    }

    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, JsonErrorKind::TypeMismatch { .. })
    }

    #[inline]
    pub fn is_union_no_match(&self) -> bool {
        matches!(self.kind, JsonErrorKind::UnionNoMatch { .. })
    }

    /// Returns `true` for invalid JSON text and for a non-object root.
    #[inline]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind,
            JsonErrorKind::Parse(_) | JsonErrorKind::NotAnObject { .. }
        )
    }

    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self.kind, JsonErrorKind::Io(_))
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path_string();
        match (&self.kind, path.is_empty()) {
            (JsonErrorKind::Custom(message), true) => f.write_str(message),
            (JsonErrorKind::Custom(message), false) => write!(f, "{path}: {message}"),
            (JsonErrorKind::Parse(_) | JsonErrorKind::NotAnObject { .. }, true) => {
                write!(f, "document {}", self.kind)
            }
            (JsonErrorKind::Io(_), true) => write!(f, "file {}", self.kind),
            (kind, true) => write!(f, "value {kind}"),
            (kind, false) => write!(f, "{path} {kind}"),
        }
    }
}

impl fmt::Debug for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonError")
            .field("path", &self.path_string())
            .field("kind", &self.kind)
            .finish()
    }
}

impl error::Error for JsonError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            JsonErrorKind::Parse(err) => Some(err),
            JsonErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<JsonErrorKind> for JsonError {
    #[inline]
    fn from(kind: JsonErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<serde_json::Error> for JsonError {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        Self::new(JsonErrorKind::Parse(err))
    }
}

impl From<io::Error> for JsonError {
    #[inline]
    fn from(err: io::Error) -> Self {
        Self::new(JsonErrorKind::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_formats() {
        let err = JsonError::type_mismatch(&json!("text"), "i32").within_field("IntValue");
        assert_eq!(
            err.to_string(),
            "IntValue was an unexpected type (string), type expected was: i32"
        );

        let err = JsonError::not_found().within_field("(Color or Colour)");
        assert_eq!(err.to_string(), "(Color or Colour) not found");

        let err = JsonError::not_found();
        assert_eq!(err.to_string(), "value not found");
    }

    #[test]
    fn path_rendering() {
        let err = JsonError::type_mismatch(&json!(1.5), "i32")
            .within_key("left")
            .within_field("c")
            .within_index(2)
            .within_field("b")
            .within_field("a");

        assert_eq!(err.path_string(), "a.b[2].c[left]");
        assert_eq!(err.path().len(), 5);
        assert_eq!(
            err.path().next(),
            Some(&PathSegment::Field(Cow::Borrowed("a")))
        );
    }

    #[test]
    fn classification() {
        let parse = serde_json::from_str::<Value>("{").unwrap_err();
        let err = JsonError::from(parse);
        assert!(err.is_parse_error());
        assert!(!err.is_not_found());
        assert!(error::Error::source(&err).is_some());

        assert!(JsonError::not_an_object(&json!([])).is_parse_error());
        assert!(JsonError::union_no_match(&json!(null), "JsonOption<(i32,)>").is_union_no_match());
        assert!(JsonError::custom("bad").to_string() == "bad");
    }
}
