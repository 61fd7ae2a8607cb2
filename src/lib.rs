//! Parse BibTeX bibliographies and render citation-linked publication and
//! project pages for a personal academic site.
//!
//! `bibpage` takes a bibliography file and a set of numbered project
//! write-ups in markdown, and produces the HTML fragments a host page embeds:
//! a year-grouped publication list, per-project sections with in-text
//! citations resolved into links, reference lists, and the navigation
//! affordances (year filter, dropdown item lists) that go with them.
//!
//! # Pipeline
//!
//! 1. [`BibtexParser`] turns raw bibliography text into a sequence of
//!    [`Entry`] values.
//! 2. The entries are collected into a [`PublicationIndex`], an immutable
//!    lookup table constructed once and passed wherever citation keys need
//!    resolving.
//! 3. [`render::publications`] sorts and groups the entries by year and
//!    renders the visible list plus navigation.
//! 4. [`cite::process_citations`] substitutes `[@citekey]` markers in project
//!    text with links into the publication list (or visible missing-citation
//!    markers), collecting the resolved entries.
//! 5. [`render::references`] deduplicates the collected citations and renders
//!    a references block; [`render::projects`] combines it with the
//!    markdown-rendered body.
//! 6. [`site::SitePage::build`] drives the whole thing from files on disk.
//!
//! # Basic Usage
//!
//! ```rust
//! use bibpage::{BibtexParser, PublicationIndex};
//!
//! let input = r#"@article{smith20,
//!   author = {Smith, John and Doe, Jane},
//!   title = {An Example Article},
//!   year = {2020},
//! }"#;
//!
//! let entries = BibtexParser::new().parse(input);
//! assert_eq!(entries.len(), 1);
//!
//! let index = PublicationIndex::new(entries);
//! let entry = index.find("smith20").unwrap();
//! assert_eq!(entry.title(), Some("An Example Article"));
//! ```
//!
//! # Citation Processing
//!
//! ```rust
//! use bibpage::{cite, BibtexParser, PublicationIndex};
//!
//! let entries = BibtexParser::new().parse(
//!     "@article{smith20,\n  author = {Smith, John},\n  year = {2020},\n}",
//! );
//! let index = PublicationIndex::new(entries);
//!
//! let processed = cite::process_citations("See [@smith20] for details.", &index);
//! assert!(processed.text.contains("href=\"#pub-smith20\""));
//! assert_eq!(processed.citations.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! Parsing never fails: entries that do not match the expected shape are
//! silently dropped, and unresolved citations render as visible markers
//! rather than errors. The only hard failure is an unreadable bibliography
//! file, reported as [`SiteError`] by the loading layer and converted into a
//! replacement status text at the page boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod bibtex;
pub mod cite;
pub mod error;
pub mod format;
pub mod render;
pub mod site;

// Reexports
pub use bibtex::BibtexParser;
pub use error::SiteError;
pub use site::{SiteConfig, SitePage};

/// A single bibliography entry: type, cite key, and field map.
///
/// Entries are immutable after parsing; sorting and grouping reorder
/// sequences of entries, never the entries themselves. Field names are
/// case-folded to lowercase at parse time and values are trimmed; absent
/// fields are simply not present in the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry type word from the `@type{...}` marker (e.g. `article`).
    pub entry_type: String,
    /// Cite key, unique within a well-formed bibliography. Duplicate keys
    /// are kept in the parsed sequence but only the first is reachable by
    /// key lookup.
    pub cite_key: String,
    /// Lowercase field name to trimmed value.
    pub fields: HashMap<String, String>,
}

impl Entry {
    /// Create an entry with no fields.
    pub fn new(entry_type: impl Into<String>, cite_key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            cite_key: cite_key.into(),
            fields: HashMap::new(),
        }
    }

    /// Look up a field by its lowercase name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The `author` field, if present.
    pub fn author(&self) -> Option<&str> {
        self.field("author")
    }

    /// The `year` field, verbatim, if present.
    pub fn year(&self) -> Option<&str> {
        self.field("year")
    }

    /// The `title` field, if present.
    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    /// The `doi` field, if present.
    pub fn doi(&self) -> Option<&str> {
        self.field("doi")
    }

    /// The `url` field, if present.
    pub fn url(&self) -> Option<&str> {
        self.field("url")
    }

    /// The `pdf` field, if present.
    pub fn pdf(&self) -> Option<&str> {
        self.field("pdf")
    }

    /// Display venue: journal, falling back to booktitle, then publisher.
    pub fn venue(&self) -> Option<&str> {
        self.field("journal")
            .or_else(|| self.field("booktitle"))
            .or_else(|| self.field("publisher"))
    }
}

/// Immutable lookup table over a parsed entry sequence.
///
/// Built once per bibliography load and passed by reference into citation
/// processing and rendering; it is never updated incrementally. Resolution
/// against an empty index always reports the citation as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationIndex {
    entries: Vec<Entry>,
}

impl PublicationIndex {
    /// Build an index over the given entries, preserving their order.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Exact-match lookup by cite key; the first matching entry wins.
    ///
    /// There is no fuzzy or case-insensitive fallback.
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.cite_key == key)
    }

    /// All entries in bibliography file order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
