//! Display formatting for bibliography fields.
//!
//! These helpers derive display strings from a single entry: the author
//! list for the publication and reference views, the first author's surname,
//! and the `Last et al. (year)` string used for in-text citations. Author
//! names are never reformatted or reordered, only joined.

use crate::Entry;
use compact_str::{CompactString, ToCompactString};
use itertools::Itertools;

/// Fallback when an author field is empty or absent.
const UNKNOWN_AUTHORS: &str = "Unknown Authors";

/// Format an author field for display.
///
/// Splits on the literal `" and "` separator and trims each name. Two
/// authors keep the plain `and`; three or more are joined Oxford style,
/// with the last author attached by `", and "`.
///
/// # Examples
///
/// ```
/// use bibpage::format::format_authors;
///
/// assert_eq!(format_authors(Some("A and B and C")), "A, B, and C");
/// assert_eq!(format_authors(Some("A and B")), "A and B");
/// assert_eq!(format_authors(None), "Unknown Authors");
/// ```
pub fn format_authors(authors: Option<&str>) -> String {
    let Some(authors) = authors.map(str::trim).filter(|a| !a.is_empty()) else {
        return UNKNOWN_AUTHORS.to_string();
    };

    let names: Vec<&str> = authors.split(" and ").map(str::trim).collect();
    match names.as_slice() {
        [] => UNKNOWN_AUTHORS.to_string(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [leading @ .., last] => format!("{}, and {}", leading.iter().join(", "), last),
    }
}

/// Extract the first author's surname from an author field.
///
/// Takes the first name before `" and "`. A comma means "Last, First" form
/// and the pre-comma part is used; otherwise the last whitespace-delimited
/// token is assumed to be the surname. Absent field yields `"Unknown"`.
pub fn first_author_last_name(authors: Option<&str>) -> CompactString {
    let Some(authors) = authors.map(str::trim).filter(|a| !a.is_empty()) else {
        return CompactString::const_new("Unknown");
    };

    let first = authors.split(" and ").next().unwrap_or(authors).trim();
    if let Some((family, _)) = first.split_once(',') {
        return family.trim().to_compact_string();
    }
    first
        .split_whitespace()
        .last()
        .unwrap_or(first)
        .to_compact_string()
}

/// Format an entry as an in-text citation: `Last et al. (year)`.
///
/// A missing entry yields the fixed `"[Citation not found]"` marker; a
/// missing year falls back to `"n.d."`.
pub fn format_in_text_citation(entry: Option<&Entry>) -> String {
    let Some(entry) = entry else {
        return "[Citation not found]".to_string();
    };

    let last_name = first_author_last_name(entry.author());
    let year = entry.year().unwrap_or("n.d.");
    format!("{last_name} et al. ({year})")
}
