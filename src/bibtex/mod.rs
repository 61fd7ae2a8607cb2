//! BibTeX-style bibliography parser.
//!
//! Parses the subset of BibTeX used by publication lists: `@type{key, ...}`
//! entries with `name = {value}` or `name = "value"` fields. The parser is
//! deliberately lenient — anything that does not match the entry shape is
//! skipped without a diagnostic, and parsing as a whole never fails.
//!
//! # Example
//!
//! ```
//! use bibpage::BibtexParser;
//!
//! let input = r#"@article{smith20,
//!   author = {Smith, John},
//!   title = {An Example Article},
//!   year = {2020},
//! }"#;
//!
//! let entries = BibtexParser::new().parse(input);
//! assert_eq!(entries[0].cite_key, "smith20");
//! assert_eq!(entries[0].fields["year"], "2020");
//! ```

mod parse;

use crate::Entry;

/// Parser for BibTeX-style bibliography text.
///
/// An entry begins at an `@` sigil followed by a type word, an opening
/// brace, and a comma-terminated cite key, and runs until a line consisting
/// solely of a closing brace. Field names are case-folded to lowercase and
/// values are trimmed; when a field is assigned more than once the last
/// assignment wins.
///
/// # Known limitation
///
/// Brace-delimited values do not balance nested braces: a value containing
/// an unescaped `}` is truncated at that brace. This matches the behavior
/// of the page this parser feeds and is covered by tests as documented
/// behavior.
#[derive(Debug, Clone, Default)]
pub struct BibtexParser;

impl BibtexParser {
    /// Creates a new BibTeX parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibpage::BibtexParser;
    /// let parser = BibtexParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses bibliography text into an ordered sequence of entries.
    ///
    /// Malformed entries are silently dropped; the result is empty for
    /// input containing no well-formed entries. Duplicate cite keys are
    /// kept in sequence order.
    pub fn parse(&self, input: &str) -> Vec<Entry> {
        parse::scan_entries(input)
    }
}
