//! HTML rendering for the publication and project views.
//!
//! Everything here is a pure transform from parsed entries (or processed
//! project text) to HTML fragment strings; nothing touches the filesystem.
//! The host page embeds the fragments into its fixed container elements.

pub mod projects;
pub mod publications;
mod references;

pub use references::references;

/// Fixed external DOI resolver prefix.
pub(crate) const DOI_RESOLVER: &str = "https://doi.org/";

/// Escape text for embedding in HTML content or double-quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
