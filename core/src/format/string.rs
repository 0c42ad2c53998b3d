/// An iterator over a string's characters, escaped for a JSON string literal.
///
/// This escapes exactly what ECMAScript's `JSON.stringify` does: the quote, the reverse solidus,
/// and the control characters. Everything else, including `/` and non-ASCII characters, is
/// yielded as-is.
struct Escaped<I: Iterator<Item = char>> {
  iter: I,
  buf: [char; 6],
  queued: usize,
}

impl<I: Iterator<Item = char>> Iterator for Escaped<I> {
  type Item = char;
  fn next(&mut self) -> Option<Self::Item> {
    // If we don't have a character in progress, fetch the next character
    if self.queued == 0 {
      let char = self.iter.next()?;

      let alias = match char {
        '"' | '\\' => Some(char),
        '\u{8}' => Some('b'),
        '\u{c}' => Some('f'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\t' => Some('t'),
        _ => None,
      };

      if let Some(alias) = alias {
        self.buf[4] = '\\';
        self.buf[5] = alias;
        self.queued = 2;
      } else if char < '\u{20}' {
        // The remaining control characters are written as `\u00xx`
        let code = u32::from(char);
        self.buf = [
          '\\',
          'u',
          '0',
          '0',
          char::from_digit(code >> 4, 16).unwrap_or('0'),
          char::from_digit(code & 0xf, 16).unwrap_or('0'),
        ];
        self.queued = 6;
      } else {
        self.buf[5] = char;
        self.queued = 1;
      }
    }

    // Yield the next character queued
    let res = self.buf[self.buf.len() - self.queued];
    self.queued -= 1;
    Some(res)
  }
}

/// Serialize a string as a JSON string literal, including its quotes.
pub(crate) fn serialize_str(value: &str) -> impl Iterator<Item = char> + '_ {
  core::iter::once('"')
    .chain(Escaped { iter: value.chars(), buf: ['\\', 'u', '0', '0', '0', '0'], queued: 0 })
    .chain(core::iter::once('"'))
}

#[test]
fn escapes() {
  let serialize = |value: &str| serialize_str(value).collect::<String>();
  assert_eq!(serialize(""), r#""""#);
  assert_eq!(serialize("plain"), r#""plain""#);
  assert_eq!(serialize(r#"say "hi""#), r#""say \"hi\"""#);
  assert_eq!(serialize(r"C:\dir"), r#""C:\\dir""#);
  assert_eq!(serialize("a\nb\tc\rd"), r#""a\nb\tc\rd""#);
  assert_eq!(serialize("\u{8}\u{c}"), r#""\b\f""#);
  assert_eq!(serialize("\u{0}\u{1f}\u{1b}"), r#""\u0000\u001f\u001b""#);
  assert_eq!(serialize("</script>"), r#""</script>""#);
  assert_eq!(serialize("ünï ☃ 🦀"), "\"ünï ☃ 🦀\"");
  // DEL isn't a control character under JSON
  assert_eq!(serialize("\u{7f}"), "\"\u{7f}\"");
}

#[test]
fn matches_serde_json() {
  for value in ["", "abc", "\"\\\u{0}\u{1}\u{1f}", "\n\r\t\u{8}\u{c}", "/é𝄞"] {
    assert_eq!(
      serialize_str(value).collect::<String>(),
      serde_json::to_string(value).unwrap()
    );
  }
}
