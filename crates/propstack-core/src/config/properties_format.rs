//! Lenient `.properties` text format
//!
//! Parsing never fails. Lines that do not look like `key=value` still produce
//! something, the way the classic properties loader does: a dangling line
//! continuation, for instance, glues two lines into one entry.

use crate::types::PropertyMap;

/// Parse `.properties` text into a map; later duplicates overwrite earlier ones
pub fn parse(text: &str) -> PropertyMap {
    let mut properties = PropertyMap::new();
    for line in logical_lines(text) {
        let (key, value) = split_entry(&line);
        properties.insert(key, value);
    }
    properties
}

/// Join continued lines and drop blanks and comments
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in physical_lines(text) {
        let trimmed = raw.trim_start_matches(is_blank);

        let mut line = match current.take() {
            Some(mut pending) => {
                pending.push_str(trimmed);
                pending
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if trailing_backslashes(&line) % 2 == 1 {
            line.pop();
            current = Some(line);
        } else {
            lines.push(line);
        }
    }

    // A continuation on the last line just ends the entry
    if let Some(pending) = current {
        lines.push(pending);
    }

    lines
}

/// Split on `\n`, `\r` and `\r\n`
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

fn trailing_backslashes(line: &str) -> usize {
    line.chars().rev().take_while(|c| *c == '\\').count()
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split a logical line into unescaped key and value
fn split_entry(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let mut key_end = chars.len();
    let mut escaped = false;

    for (i, c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if *c == '\\' {
            escaped = true;
        } else if *c == '=' || *c == ':' || is_blank(*c) {
            key_end = i;
            break;
        }
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && (chars[value_start] == '=' || chars[value_start] == ':') {
        value_start += 1;
        while value_start < chars.len() && is_blank(chars[value_start]) {
            value_start += 1;
        }
    }

    (unescape(&chars[..key_end]), unescape(&chars[value_start..]))
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.get(i) else {
            break;
        };
        i += 1;
        match next {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'u' => match decode_unicode(chars, i) {
                Some((decoded, consumed)) => {
                    out.push(decoded);
                    i += consumed;
                }
                // malformed escape is kept literally
                None => out.push_str("\\u"),
            },
            other => out.push(other),
        }
    }

    out
}

/// Decode the escape whose hex digits start at `start`
///
/// Returns the character and how many chars were consumed. A high surrogate
/// is only decoded together with a following `\uXXXX` low surrogate.
fn decode_unicode(chars: &[char], start: usize) -> Option<(char, usize)> {
    let unit = hex_unit(chars.get(start..start + 4)?)?;
    if let Some(decoded) = char::from_u32(u32::from(unit)) {
        return Some((decoded, 4));
    }

    if chars.get(start + 4..start + 6) != Some(&['\\', 'u'][..]) {
        return None;
    }
    let low = hex_unit(chars.get(start + 6..start + 10)?)?;
    let decoded = char::decode_utf16([unit, low]).next()?.ok()?;
    Some((decoded, 10))
}

/// Exactly four ASCII hex digits as one UTF-16 code unit
fn hex_unit(digits: &[char]) -> Option<u16> {
    if !digits.iter().all(char::is_ascii_hexdigit) {
        return None;
    }
    let digits: String = digits.iter().collect();
    u16::from_str_radix(&digits, 16).ok()
}
