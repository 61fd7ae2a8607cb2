//! Low-level scanning for the bibliography grammar.
//!
//! The scanner is line-oriented for entry boundaries and character-oriented
//! for fields. Entry boundary detection and field tokenization are explicit
//! state machines rather than regular expressions, but they reproduce the
//! lenient semantics of the page this crate replaces: anything that does not
//! fit the grammar is skipped, and brace values end at the first `}`.

use crate::Entry;

/// Scan raw bibliography text into an ordered sequence of entries.
pub(crate) fn scan_entries(input: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next() {
        let Some(header) = parse_header(line) else {
            continue;
        };

        let mut body = String::new();
        if !header.rest.trim().is_empty() {
            body.push_str(header.rest);
            body.push('\n');
        }

        // The body runs to the first line that is just the closing brace.
        // An entry that never closes is malformed and dropped.
        let mut closed = false;
        for body_line in lines.by_ref() {
            if body_line.trim() == "}" {
                closed = true;
                break;
            }
            body.push_str(body_line);
            body.push('\n');
        }
        if !closed {
            break;
        }

        let mut entry = Entry::new(header.entry_type, header.cite_key);
        for (name, value) in scan_fields(&body) {
            // Last assignment wins on repeated field names.
            entry.fields.insert(name, value);
        }
        entries.push(entry);
    }

    entries
}

/// Parsed pieces of an entry opening line.
struct Header<'a> {
    entry_type: &'a str,
    cite_key: &'a str,
    /// Text after the key's comma, treated as the first body line.
    rest: &'a str,
}

/// Match `@type{key,` anywhere in a line.
///
/// The type must be a non-empty word; the key is everything up to the first
/// comma, verbatim, and must be non-empty. Lines that do not fit yield
/// nothing and are skipped by the caller.
fn parse_header(line: &str) -> Option<Header<'_>> {
    let at = line.find('@')?;
    let rest = &line[at + 1..];

    let brace = rest.find('{')?;
    let entry_type = &rest[..brace];
    if entry_type.is_empty() || !entry_type.chars().all(is_word_char) {
        return None;
    }

    let after_brace = &rest[brace + 1..];
    let comma = after_brace.find(',')?;
    let cite_key = &after_brace[..comma];
    if cite_key.is_empty() {
        return None;
    }

    Some(Header {
        entry_type,
        cite_key,
        rest: &after_brace[comma + 1..],
    })
}

/// Tokenize `name = {value}` / `name = "value"` pairs out of an entry body.
///
/// Names are case-folded to lowercase, values are trimmed. Text that does
/// not form a pair is skipped. Brace values do not balance nesting: the
/// value ends at the first `}`.
fn scan_fields(body: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut rest = body;

    loop {
        let Some(start) = rest.find(is_word_char) else {
            break;
        };
        rest = &rest[start..];

        let name_len = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
        let (name, after_name) = rest.split_at(name_len);

        let Some(after_eq) = after_name.trim_start().strip_prefix('=') else {
            rest = after_name;
            continue;
        };
        let after_eq = after_eq.trim_start();

        let (value, tail) = match after_eq.as_bytes().first() {
            Some(b'{') => match take_delimited(&after_eq[1..], '}') {
                Some(split) => split,
                None => {
                    rest = &after_eq[1..];
                    continue;
                }
            },
            Some(b'"') => match take_delimited(&after_eq[1..], '"') {
                Some(split) => split,
                None => {
                    rest = &after_eq[1..];
                    continue;
                }
            },
            _ => {
                rest = after_eq;
                continue;
            }
        };

        fields.push((name.to_ascii_lowercase(), value.trim().to_string()));
        rest = tail;
    }

    fields
}

/// Split off everything before the first `close` delimiter, plus the tail
/// after it. `None` when the delimiter never appears (unterminated value).
fn take_delimited(text: &str, close: char) -> Option<(&str, &str)> {
    let end = text.find(close)?;
    Some((&text[..end], &text[end + close.len_utf8()..]))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
