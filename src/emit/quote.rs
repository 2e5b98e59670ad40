use std::fmt::Write;

/// Quote arbitrary bytes as a Go interpreted string literal.
///
/// Printable ASCII is kept verbatim, well-formed non-ASCII UTF-8 is written as
/// `\u`/`\U` escapes and every other byte as `\x`, so the literal decodes back
/// to exactly `bytes` and the generated file stays plain ASCII.
pub fn go_quote(bytes: &[u8]) -> String {
  let mut quoted = String::with_capacity(bytes.len() + 2);
  quoted.push('"');
  for chunk in bytes.utf8_chunks() {
    for c in chunk.valid().chars() {
      push_char(&mut quoted, c);
    }
    for byte in chunk.invalid() {
      let _ = write!(quoted, "\\x{byte:02x}");
    }
  }
  quoted.push('"');
  quoted
}

fn push_char(out: &mut String, c: char) {
  match c {
    '"' => out.push_str("\\\""),
    '\\' => out.push_str("\\\\"),
    '\u{07}' => out.push_str("\\a"),
    '\u{08}' => out.push_str("\\b"),
    '\u{0c}' => out.push_str("\\f"),
    '\n' => out.push_str("\\n"),
    '\r' => out.push_str("\\r"),
    '\t' => out.push_str("\\t"),
    '\u{0b}' => out.push_str("\\v"),
    ' '..='~' => out.push(c),
    c if c.is_ascii() => {
      let _ = write!(out, "\\x{:02x}", c as u32);
    }
    c if (c as u32) <= 0xffff => {
      let _ = write!(out, "\\u{:04x}", c as u32);
    }
    c => {
      let _ = write!(out, "\\U{:08x}", c as u32);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  /// Decode a Go interpreted string literal into its bytes.
  fn go_unquote(literal: &str) -> Vec<u8> {
    let inner = literal
      .strip_prefix('"')
      .and_then(|rest| rest.strip_suffix('"'))
      .expect("literal must be double quoted");
    let mut out = Vec::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
      if c != '\\' {
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        continue;
      }
      let escape = chars.next().expect("dangling backslash");
      let mut hex = |digits: usize| {
        let text: String = chars.by_ref().take(digits).collect();
        u32::from_str_radix(&text, 16).expect("bad hex escape")
      };
      match escape {
        'a' => out.push(0x07),
        'b' => out.push(0x08),
        'f' => out.push(0x0c),
        'n' => out.push(b'\n'),
        'r' => out.push(b'\r'),
        't' => out.push(b'\t'),
        'v' => out.push(0x0b),
        '\\' => out.push(b'\\'),
        '"' => out.push(b'"'),
        'x' => out.push(hex(2) as u8),
        'u' | 'U' => {
          let digits = if escape == 'u' { 4 } else { 8 };
          let c = char::from_u32(hex(digits)).expect("invalid code point");
          let mut buf = [0u8; 4];
          out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        other => panic!("unexpected escape \\{other}"),
      }
    }
    out
  }

  #[test]
  fn keeps_printable_ascii() {
    assert_eq!(go_quote(b"img/logo.png"), "\"img/logo.png\"");
  }

  #[test]
  fn escapes_quotes_and_controls() {
    assert_eq!(go_quote(b"say \"hi\"\\\n"), r#""say \"hi\"\\\n""#);
    assert_eq!(go_quote(b"\x00\x07\x08\x0b\x0c\r\t\x7f"), r#""\x00\a\b\v\f\r\t\x7f""#);
  }

  #[test]
  fn escapes_non_ascii() {
    assert_eq!(go_quote("é😀".as_bytes()), r#""\u00e9\U0001f600""#);
    assert_eq!(go_quote(&[0xff, b'a', 0xc3]), r#""\xffa\xc3""#);
  }

  #[test]
  fn quotes_empty_input() {
    assert_eq!(go_quote(b""), "\"\"");
  }

  #[test]
  fn output_is_ascii() {
    let bytes: Vec<u8> = (0..=255).collect();
    assert!(go_quote(&bytes).is_ascii());
  }

  proptest! {
    #[test]
    fn round_trips_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
      prop_assert_eq!(go_unquote(&go_quote(&bytes)), bytes);
    }

    #[test]
    fn round_trips_arbitrary_text(text in ".*") {
      prop_assert_eq!(go_unquote(&go_quote(text.as_bytes())), text.into_bytes());
    }
  }
}
