use rand_core::{RngCore, OsRng};
use serde_json::{Map, Number, Value};

/*
  Random values are generated without any strings which could be decoded, then have random
  structures within them replaced with their serialization as a string. Decoding the result should
  recover the original value.
*/

#[allow(clippy::cast_possible_truncation)]
fn random_string() -> String {
  let mut res = String::new();
  for _ in 0 .. (OsRng.next_u64() % 16) {
    if (OsRng.next_u64() % 4) != 0 {
      // ASCII, including the control characters and the structural characters
      res.push(char::from_u32((OsRng.next_u64() % 128) as u32).unwrap());
    } else {
      res.push(loop {
        if let Some(char) = char::from_u32(OsRng.next_u64() as u32) {
          break char;
        }
      });
    }
  }
  // Ensure this string is never a candidate for decoding
  let trimmed = res.trim_matches(|char: char| char.is_whitespace() || (char == '\u{feff}'));
  if trimmed.starts_with(['{', '[']) {
    res.insert(0, '_');
  }
  res
}

#[allow(clippy::cast_possible_wrap)]
fn random_number() -> Number {
  match OsRng.next_u64() % 3 {
    0 => Number::from(OsRng.next_u64() >> (OsRng.next_u64() % 64)),
    1 => Number::from(OsRng.next_u64().wrapping_neg() as i64),
    2 => loop {
      if let Some(float) = Number::from_f64(f64::from_bits(OsRng.next_u64())) {
        break float;
      }
    },
    _ => unreachable!(),
  }
}

/// Generate a random value, which will never contain a string which could be decoded.
pub fn random_value(depth: usize) -> Value {
  let modulus = if depth == 6 { 4 } else { 6 };
  match OsRng.next_u64() % modulus {
    0 => Value::Null,
    1 => Value::Bool((OsRng.next_u64() % 2) == 1),
    2 => Value::Number(random_number()),
    3 => Value::String(random_string()),
    4 => Value::Array({
      let mut res = vec![];
      for _ in 0 .. (OsRng.next_u64() % 6) {
        res.push(random_value(depth + 1));
      }
      res
    }),
    5 => Value::Object({
      let mut res = Map::new();
      for _ in 0 .. (OsRng.next_u64() % 6) {
        res.insert(random_string(), random_value(depth + 1));
      }
      res
    }),
    _ => unreachable!(),
  }
}

/// Generate a random array or object.
pub fn random_structure() -> Value {
  loop {
    let value = random_value(0);
    if matches!(value, Value::Object(_) | Value::Array(_)) {
      break value;
    }
  }
}

/// Replace random structures within this value with their serialization, as a string.
///
/// Structures nested within an encoded structure may themselves be encoded, producing multiple
/// layers of encoding.
pub fn encode_randomly(value: Value) -> Value {
  let value = match value {
    Value::Array(items) => Value::Array(items.into_iter().map(encode_randomly).collect()),
    Value::Object(fields) => Value::Object(
      fields.into_iter().map(|(key, value)| (key, encode_randomly(value))).collect(),
    ),
    value => return value,
  };
  if (OsRng.next_u64() % 2) == 1 {
    // Add whitespace to the encoding, which should be trimmed
    let padding = if (OsRng.next_u64() % 4) == 0 { " \n" } else { "" };
    Value::String(format!("{padding}{value}{padding}"))
  } else {
    value
  }
}

/// Assert two values are equivalent, comparing numbers by their `f64` value.
///
/// The formatter writes integral floats without a fractional part, which then deserialize as
/// integers.
pub fn assert_equivalent(a: &Value, b: &Value) {
  match a {
    Value::Null | Value::Bool(_) | Value::String(_) => assert_eq!(a, b),
    #[allow(clippy::float_cmp)]
    Value::Number(number) => {
      assert_eq!(number.as_f64().unwrap(), b.as_number().unwrap().as_f64().unwrap());
    }
    Value::Array(items) => {
      let b = b.as_array().unwrap();
      assert_eq!(items.len(), b.len());
      for (a, b) in items.iter().zip(b) {
        assert_equivalent(a, b);
      }
    }
    Value::Object(fields) => {
      let b = b.as_object().unwrap();
      assert_eq!(fields.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
      for (key, value) in fields {
        assert_equivalent(value, &b[key]);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use unstringify::{decode, format, normalize_fragment_text};
  use super::*;

  #[test]
  fn decode_recovers_encoded_values() {
    for i in 0 .. 200 {
      dbg!(i);
      let value = dbg!(random_value(0));
      let encoded = encode_randomly(value.clone());
      assert_eq!(decode(encoded), value);
    }
  }

  #[test]
  fn decode_leaves_unencoded_values() {
    for _ in 0 .. 200 {
      let value = random_value(0);
      assert_eq!(decode(value.clone()), value);
    }
  }

  #[test]
  fn formatted_output_parses() {
    for i in 0 .. 200 {
      dbg!(i);
      let value = dbg!(random_value(0));
      let formatted = format(&value);
      assert_equivalent(&value, &serde_json::from_str::<Value>(&formatted).unwrap());
    }
  }

  #[test]
  fn normalization_is_idempotent() {
    for i in 0 .. 200 {
      dbg!(i);
      let value = dbg!(random_structure());
      let text = Value::String(encode_randomly(value.clone()).to_string()).to_string();

      // `text` is a JSON string literal, so it's never decoded itself
      assert_eq!(normalize_fragment_text(&text), text);

      let encoded = encode_randomly(value.clone());
      let text = match &encoded {
        Value::String(text) => text.clone(),
        _ => encoded.to_string(),
      };
      let once = normalize_fragment_text(&text);
      assert_equivalent(&value, &serde_json::from_str::<Value>(&once).unwrap());
      let twice = normalize_fragment_text(&once);
      assert_eq!(once, twice);
    }
  }
}
