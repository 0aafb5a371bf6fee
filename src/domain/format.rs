//! Field formatting. Raw value -> display string, free text -> single line.

use serde::Serialize;
use serde_json::{Map, Value};

/// Collapse every whitespace run (newlines and tabs included) to one space and trim.
pub fn normalize_single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized free text, or `None` when nothing is left after trimming.
pub fn normalized_text(text: Option<&str>) -> Option<String> {
    text.map(normalize_single_line).filter(|s| !s.is_empty())
}

/// Compact single-line JSON for composite values.
pub fn compact_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Display form of a report field. `None` means the line is not emitted.
///
/// Booleans render as `true`/`false`, composites as compact JSON, other
/// scalars in their natural form. Null, blank strings and empty composites
/// are not emitted.
pub trait FieldDisplay {
    fn display(&self) -> Option<String>;
}

impl FieldDisplay for str {
    fn display(&self) -> Option<String> {
        if self.trim().is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl FieldDisplay for String {
    fn display(&self) -> Option<String> {
        self.as_str().display()
    }
}

impl FieldDisplay for bool {
    fn display(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldDisplay for i64 {
    fn display(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldDisplay for usize {
    fn display(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldDisplay for Vec<String> {
    fn display(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(compact_json(self))
        }
    }
}

impl FieldDisplay for Map<String, Value> {
    fn display(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(compact_json(self))
        }
    }
}

impl FieldDisplay for Value {
    fn display(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => b.display(),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => s.display(),
            Value::Array(a) if a.is_empty() => None,
            Value::Object(o) if o.is_empty() => None,
            Value::Array(_) | Value::Object(_) => Some(compact_json(self)),
        }
    }
}

impl<T: FieldDisplay> FieldDisplay for Option<T> {
    fn display(&self) -> Option<String> {
        self.as_ref().and_then(T::display)
    }
}
