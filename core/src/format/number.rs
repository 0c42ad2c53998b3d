use core::num::FpCategory;

use serde_json::Number;

/// Render an `f64` as ECMAScript's `Number.prototype.toString` would.
///
/// Integral values have no fractional part, magnitudes within `[1e-6, 1e21)` are written out in
/// full, and everything else uses exponent notation with an explicit sign (`1e+21`, `1.5e-7`).
/// Both `Display` and `LowerExp` yield the shortest representation which round-trips, as
/// ECMAScript requires.
fn ecmascript_f64(value: f64) -> String {
  if matches!(value.classify(), FpCategory::Zero) {
    // This also renders `-0` as `0`
    return "0".to_string();
  }

  if (1e-6 .. 1e21).contains(&value.abs()) {
    return format!("{value}");
  }

  let scientific = format!("{value:e}");
  match scientific.split_once('e') {
    Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
    _ => scientific,
  }
}

/// Render a number as a JSON literal.
///
/// Integers are written exactly. Floats are written as ECMAScript would.
pub(crate) fn serialize_number(number: &Number) -> String {
  match number.as_f64() {
    Some(float) if number.is_f64() => ecmascript_f64(float),
    _ => number.to_string(),
  }
}

#[test]
fn ecmascript_floats() {
  assert_eq!(ecmascript_f64(0.0), "0");
  assert_eq!(ecmascript_f64(-0.0), "0");
  assert_eq!(ecmascript_f64(1.0), "1");
  assert_eq!(ecmascript_f64(-2.0), "-2");
  assert_eq!(ecmascript_f64(1.5), "1.5");
  assert_eq!(ecmascript_f64(0.1), "0.1");
  assert_eq!(ecmascript_f64(123.456), "123.456");
  assert_eq!(ecmascript_f64(0.000001), "0.000001");
  assert_eq!(ecmascript_f64(0.0000015), "0.0000015");
  assert_eq!(ecmascript_f64(1.5e-7), "1.5e-7");
  assert_eq!(ecmascript_f64(1e20), "100000000000000000000");
  assert_eq!(ecmascript_f64(1e21), "1e+21");
  assert_eq!(ecmascript_f64(-1.25e30), "-1.25e+30");
  assert_eq!(ecmascript_f64(f64::MAX), "1.7976931348623157e+308");
  assert_eq!(ecmascript_f64(5e-324), "5e-324");
}

#[test]
fn numbers() {
  let parse = |text: &str| serde_json::from_str::<Number>(text).unwrap();
  assert_eq!(serialize_number(&parse("0")), "0");
  assert_eq!(serialize_number(&parse("-17")), "-17");
  assert_eq!(serialize_number(&parse("18446744073709551615")), "18446744073709551615");
  assert_eq!(serialize_number(&parse("-9223372036854775808")), "-9223372036854775808");
  assert_eq!(serialize_number(&parse("1.0")), "1");
  assert_eq!(serialize_number(&parse("1e2")), "100");
  assert_eq!(serialize_number(&parse("2.50")), "2.5");
  assert_eq!(serialize_number(&parse("-0.0")), "0");
  assert_eq!(serialize_number(&parse("1E-7")), "1e-7");
}
