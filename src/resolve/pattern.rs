//! Translation of shell match patterns (`filepath.Match` rules) into `glob` syntax.
//!
//! The accepted syntax is `*`, `?`, `[...]` classes negated with a leading `^`,
//! `lo-hi` ranges, and `\` escapes on hosts where `\` is not a separator. `!` has
//! no special meaning and `-` or `]` inside a class must be escaped.

use std::collections::BTreeSet;

use glob::{Pattern, PatternError};

const BACKSLASH_ESCAPES: bool = cfg!(not(windows));

const ERROR_DANGLING_ESCAPE: &str = "pattern ends with an unfinished escape";
const ERROR_INVALID_CLASS: &str = "invalid or unterminated character class";

/// A negated class over every character, which no single character satisfies.
const MATCH_NOTHING: &str = "[!\u{0}-\u{10ffff}]";

/// Rewrite `pattern` so the `glob` crate matches exactly what it describes.
///
/// Error positions are character offsets into `pattern`.
pub fn translate_pattern(pattern: &str) -> Result<String, PatternError> {
  let chars: Vec<char> = pattern.chars().collect();
  let mut translated = String::with_capacity(pattern.len());
  let mut previous_star = false;
  let mut i = 0;

  while i < chars.len() {
    let c = chars[i];
    if c == '*' {
      // `**` is two stars, never a recursive wildcard.
      if !previous_star {
        translated.push('*');
      }
      previous_star = true;
      i += 1;
      continue;
    }
    previous_star = false;

    match c {
      '?' => {
        translated.push('?');
        i += 1;
      }
      '[' => {
        let (class, next) = translate_class(&chars, i)?;
        translated.push_str(&class);
        i = next;
      }
      '\\' if BACKSLASH_ESCAPES => {
        let escaped = chars.get(i + 1).ok_or(PatternError {
          pos: i,
          msg: ERROR_DANGLING_ESCAPE,
        })?;
        translated.push_str(&literal(*escaped));
        i += 2;
      }
      other => {
        translated.push_str(&literal(other));
        i += 1;
      }
    }
  }

  Ok(translated)
}

fn literal(c: char) -> String {
  Pattern::escape(c.encode_utf8(&mut [0u8; 4]))
}

/// Parse the class opening at `start` and return its `glob` form and the index after it.
fn translate_class(chars: &[char], start: usize) -> Result<(String, usize), PatternError> {
  let invalid = || PatternError {
    pos: start,
    msg: ERROR_INVALID_CLASS,
  };

  let mut i = start + 1;
  let negated = chars.get(i) == Some(&'^');
  if negated {
    i += 1;
  }

  let mut ranges = Vec::new();
  loop {
    if chars.get(i) == Some(&']') && !ranges.is_empty() {
      i += 1;
      break;
    }
    let (lo, next) = class_char(chars, i).ok_or_else(invalid)?;
    i = next;
    let mut hi = lo;
    if chars.get(i) == Some(&'-') {
      let (end, next) = class_char(chars, i + 1).ok_or_else(invalid)?;
      hi = end;
      i = next;
    }
    ranges.push((lo, hi));
  }

  Ok((render_class(negated, &ranges), i))
}

fn class_char(chars: &[char], i: usize) -> Option<(char, usize)> {
  match chars.get(i)? {
    '-' | ']' => None,
    '\\' if BACKSLASH_ESCAPES => chars.get(i + 1).map(|c| (*c, i + 2)),
    c => Some((*c, i + 1)),
  }
}

/// `glob` reads `!` first as negation, `-` between two characters as a range
/// and the first `]` after the opening character as the end of the class, so
/// those three are split out of ranges and placed where they read literally.
fn render_class(negated: bool, ranges: &[(char, char)]) -> String {
  let mut specials = BTreeSet::new();
  let mut body = String::new();

  for &(lo, hi) in ranges {
    if lo > hi {
      continue;
    }
    if lo == hi {
      push_class_char(lo, &mut specials, &mut body);
      continue;
    }
    let (mut lo, mut hi) = (lo, hi);
    if is_class_special(lo) {
      specials.insert(lo);
      lo = char::from(lo as u8 + 1);
    }
    if is_class_special(hi) {
      specials.insert(hi);
      hi = char::from(hi as u8 - 1);
    }
    if lo < hi {
      body.push(lo);
      body.push('-');
      body.push(hi);
    } else if lo == hi {
      push_class_char(lo, &mut specials, &mut body);
    }
  }

  let close = specials.contains(&']');
  let bang = specials.contains(&'!');
  let dash = specials.contains(&'-');

  if body.is_empty() && !close && !bang && !dash {
    return if negated { "?".into() } else { MATCH_NOTHING.into() };
  }

  if !negated && body.is_empty() && !close {
    return match (bang, dash) {
      (true, true) => "[-!]".into(),
      (true, false) => "!".into(),
      _ => "[-]".into(),
    };
  }

  let mut class = String::from(if negated { "[!" } else { "[" });
  if close {
    class.push(']');
  }
  class.push_str(&body);
  if bang {
    class.push('!');
  }
  if dash {
    class.push('-');
  }
  class.push(']');
  class
}

fn push_class_char(c: char, specials: &mut BTreeSet<char>, body: &mut String) {
  if is_class_special(c) {
    specials.insert(c);
  } else {
    body.push(c);
  }
}

fn is_class_special(c: char) -> bool {
  matches!(c, '!' | '-' | ']')
}
