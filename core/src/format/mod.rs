use serde_json::Value;

use crate::{DEFAULT_INDENT, MAX_INDENT};

mod string;
mod number;

use string::serialize_str;
use number::serialize_number;

/// If this value is a JSON primitive (`null`, a boolean, a number, or a string).
fn is_primitive(value: &Value) -> bool {
  !matches!(value, Value::Array(_) | Value::Object(_))
}

struct Formatter<'out> {
  out: &'out mut String,
  indent: usize,
}

impl Formatter<'_> {
  fn pad(&mut self, level: usize) {
    self.out.extend(core::iter::repeat_n(' ', level * self.indent));
  }

  fn primitive(&mut self, value: &Value) {
    match value {
      Value::Null => self.out.push_str("null"),
      Value::Bool(bool) => self.out.push_str(if *bool { "true" } else { "false" }),
      Value::Number(number) => self.out.push_str(&serialize_number(number)),
      Value::String(string) => self.out.extend(serialize_str(string)),
      Value::Array(_) | Value::Object(_) => unreachable!("`primitive` called with a structure"),
    }
  }

  fn value(&mut self, value: &Value, level: usize) {
    match value {
      // Arrays of solely primitives are written on a single line
      Value::Array(items) if items.iter().all(is_primitive) => {
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
          if i != 0 {
            self.out.push(',');
          }
          self.primitive(item);
        }
        self.out.push(']');
      }
      Value::Array(items) => {
        self.out.push_str("[\n");
        for (i, item) in items.iter().enumerate() {
          if i != 0 {
            self.out.push_str(",\n");
          }
          self.pad(level + 1);
          self.value(item, level + 1);
        }
        self.out.push('\n');
        self.pad(level);
        self.out.push(']');
      }
      // Objects are always expanded, even when empty
      Value::Object(fields) => {
        self.out.push_str("{\n");
        for (i, (key, value)) in fields.iter().enumerate() {
          if i != 0 {
            self.out.push_str(",\n");
          }
          self.pad(level + 1);
          self.out.extend(serialize_str(key));
          self.out.push_str(": ");
          self.value(value, level + 1);
        }
        self.out.push('\n');
        self.pad(level);
        self.out.push('}');
      }
      Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => self.primitive(value),
    }
  }
}

/// Format a value with the compact formatter, indenting by `indent` spaces per level.
///
/// Arrays consisting solely of primitives are written on a single line, as `[1,"a",true,null]`.
/// Any other array, and every object, is written with one element per line, indented one level
/// deeper than the structure itself. Object entries are written as `"key": value`.
///
/// Indents wider than [`MAX_INDENT`] are clamped to it.
pub fn format_with_indent(value: &Value, indent: usize) -> String {
  let mut out = String::new();
  Formatter { out: &mut out, indent: indent.min(MAX_INDENT) }.value(value, 0);
  out
}

/// Format a value with the compact formatter, using the default indent of two spaces.
///
/// See [`format_with_indent`].
pub fn format(value: &Value) -> String {
  format_with_indent(value, DEFAULT_INDENT)
}
