//! In-text citation processing.
//!
//! Scans free-form text for `[@citekey]` markers and resolves them against
//! the publication index. Resolved markers become links into the publication
//! list; unresolved markers become visible missing-citation spans. The
//! substitution runs before markdown conversion, so the emitted markup must
//! pass through the markdown renderer untouched.

use crate::render::escape_html;
use crate::{Entry, PublicationIndex, format::format_in_text_citation};
use regex::Regex;
use std::sync::LazyLock;

/// `[@key]`, key being everything up to the first `]`.
static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[@([^\]]+)\]").unwrap());

/// Result of a citation-processing pass over one text.
#[derive(Debug, Clone)]
pub struct Processed<'a> {
    /// The input text with every marker replaced.
    pub text: String,
    /// Every successfully resolved entry, in occurrence order. Duplicates
    /// are kept here; deduplication is the reference list's concern.
    pub citations: Vec<&'a Entry>,
}

/// Replace every `[@citekey]` marker in `text`, resolving keys against the
/// given index.
///
/// Keys are trimmed before lookup; lookup is exact, first match wins. A
/// resolved marker is replaced by an anchor link to `#pub-<key>` whose
/// visible text is the formatted in-text citation, and the entry is appended
/// to the result's citation sequence. An unresolved marker is replaced by a
/// flagged span showing the raw key and contributes nothing to the sequence.
pub fn process_citations<'a>(text: &str, index: &'a PublicationIndex) -> Processed<'a> {
    let mut out = String::with_capacity(text.len());
    let mut citations = Vec::new();
    let mut last_end = 0;

    for caps in CITATION_MARKER.captures_iter(text) {
        let Some(marker) = caps.get(0) else { continue };
        let raw_key = caps.get(1).map_or("", |m| m.as_str());

        out.push_str(&text[last_end..marker.start()]);
        match index.find(raw_key.trim()) {
            Some(entry) => {
                citations.push(entry);
                out.push_str(&citation_link(entry));
            }
            None => out.push_str(&missing_marker(raw_key)),
        }
        last_end = marker.end();
    }
    out.push_str(&text[last_end..]);

    Processed { text: out, citations }
}

/// Inline link to the entry's anchor in the publication list.
fn citation_link(entry: &Entry) -> String {
    format!(
        "<a href=\"#pub-{key}\" class=\"citation-link\" \
         title=\"Click to view full publication details\">{label}</a>",
        key = escape_html(&entry.cite_key),
        label = escape_html(&format_in_text_citation(Some(entry))),
    )
}

/// Visible marker for a key that resolved to nothing.
fn missing_marker(raw_key: &str) -> String {
    format!(
        "<span class=\"citation-missing\">[{}?]</span>",
        escape_html(raw_key)
    )
}
