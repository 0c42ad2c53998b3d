use serde_json::Value;

use crate::DEFAULT_MAX_DEPTH;

/// Trim whitespace as ECMAScript's `String.prototype.trim` does.
///
/// This includes the byte-order mark yet excludes U+0085, which Unicode considers whitespace and
/// ECMAScript does not.
fn trim(text: &str) -> &str {
  text.trim_matches(|char: char| {
    (char.is_whitespace() && (char != '\u{85}')) || (char == '\u{feff}')
  })
}

/// If this text is delimited as an object or array literal.
///
/// This is solely a check on the first and last characters. `{ ... } trailing` is not a
/// candidate, nor is `prefix [ ... ]`.
fn is_structure_literal(trimmed: &str) -> bool {
  (trimmed.starts_with('{') && trimmed.ends_with('}')) ||
    (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

fn decode_string(text: String, depth: usize, max_depth: usize) -> Value {
  let trimmed = trim(&text);
  if !is_structure_literal(trimmed) {
    return Value::String(text);
  }

  match serde_json::from_str::<Value>(trimmed) {
    // Continue into the parsed value, which may contain further encoded layers
    Ok(parsed) => decode_bounded(parsed, depth + 1, max_depth),
    Err(e) => {
      log::debug!("leaving string undecoded as it isn't valid JSON: {e}");
      Value::String(text)
    }
  }
}

/// Decode a value, leaving any value deeper than `max_depth` as-is.
pub(crate) fn decode_bounded(value: Value, depth: usize, max_depth: usize) -> Value {
  if depth > max_depth {
    log::debug!("reached the depth limit of {max_depth}, leaving the remaining layers undecoded");
    return value;
  }

  match value {
    Value::String(text) => decode_string(text, depth, max_depth),
    Value::Array(items) => Value::Array(
      items.into_iter().map(|item| decode_bounded(item, depth + 1, max_depth)).collect(),
    ),
    Value::Object(fields) => Value::Object(
      fields
        .into_iter()
        .map(|(key, value)| (key, decode_bounded(value, depth + 1, max_depth)))
        .collect(),
    ),
    scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => scalar,
  }
}

/// Recursively decode every string within this value which encodes a JSON object or array.
///
/// A string is decoded when, after trimming whitespace, it starts with `{` and ends with `}` or
/// starts with `[` and ends with `]`, and parses as JSON. The parsed value is then decoded itself,
/// unwrapping however many layers of encoding are present. Arrays and objects are walked,
/// preserving their order. Strings which fail to parse are kept exactly as they were, without
/// affecting the rest of the value.
///
/// Recursion is bounded by [`DEFAULT_MAX_DEPTH`]. Use [`crate::Normalizer::decode`] to configure
/// the bound.
pub fn decode(value: Value) -> Value {
  decode_bounded(value, 0, DEFAULT_MAX_DEPTH)
}
