//! Per-project reference list rendering.

use super::{DOI_RESOLVER, escape_html};
use crate::Entry;
use crate::format::format_authors;
use itertools::Itertools;

/// Render a references block for the citations collected from one project.
///
/// The input sequence may contain duplicates; entries are deduplicated by
/// cite key keeping first-occurrence order. An empty sequence renders
/// nothing at all, not an empty wrapper.
pub fn references(citations: &[&Entry]) -> String {
    if citations.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"project-references\"><h4>References</h4><ul>");
    for entry in citations.iter().unique_by(|e| e.cite_key.as_str()) {
        html.push_str(&reference_item(entry));
    }
    html.push_str("</ul></div>");
    html
}

fn reference_item(entry: &Entry) -> String {
    let authors = format_authors(entry.author());
    let year = entry.year().unwrap_or("n.d.");
    let title = entry.title().unwrap_or("Untitled");

    let mut item = format!(
        "<li class=\"reference-item\">{} ({}). <em>{}</em>.",
        escape_html(&authors),
        escape_html(year),
        escape_html(title),
    );

    // Reference venue is journal or booktitle; publisher is a list-view
    // concern only.
    let venue = entry.field("journal").or_else(|| entry.field("booktitle"));
    if let Some(venue) = venue {
        item.push_str(&format!(" {}.", escape_html(venue)));
    }

    if let Some(doi) = entry.doi() {
        item.push_str(&format!(
            " <a href=\"{DOI_RESOLVER}{}\" target=\"_blank\">[DOI]</a>",
            escape_html(doi)
        ));
    }
    if let Some(url) = entry.url() {
        item.push_str(&format!(
            " <a href=\"{}\" target=\"_blank\">[Link]</a>",
            escape_html(url)
        ));
    }
    if let Some(pdf) = entry.pdf() {
        item.push_str(&format!(
            " <a href=\"{}\" target=\"_blank\">[PDF]</a>",
            escape_html(pdf)
        ));
    }

    item.push_str("</li>");
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(key: &str, fields: &[(&str, &str)]) -> Entry {
        let mut entry = Entry::new("article", key);
        for (name, value) in fields {
            entry.fields.insert((*name).to_string(), (*value).to_string());
        }
        entry
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(references(&[]), "");
    }

    #[test]
    fn test_duplicates_keep_first_occurrence_order() {
        let a = entry("a", &[("title", "Alpha")]);
        let b = entry("b", &[("title", "Beta")]);

        let html = references(&[&a, &b, &a]);
        let alpha = html.find("Alpha").unwrap();
        let beta = html.find("Beta").unwrap();

        assert_eq!(html.matches("Alpha").count(), 1);
        assert_eq!(html.matches("Beta").count(), 1);
        assert!(alpha < beta);
    }

    #[test]
    fn test_full_reference_item() {
        let e = entry(
            "smith20",
            &[
                ("author", "Smith, John and Doe, Jane"),
                ("year", "2020"),
                ("title", "An Example"),
                ("journal", "Journal of Tests"),
                ("doi", "10.1000/xyz"),
            ],
        );

        let html = references(&[&e]);
        assert!(html.starts_with("<div class=\"project-references\"><h4>References</h4><ul>"));
        assert!(html.contains(
            "<li class=\"reference-item\">Smith, John and Doe, Jane (2020). \
             <em>An Example</em>. Journal of Tests."
        ));
        assert!(html.contains("<a href=\"https://doi.org/10.1000/xyz\" target=\"_blank\">[DOI]</a>"));
        assert!(html.ends_with("</ul></div>"));
    }

    #[test]
    fn test_fallbacks_and_optional_links() {
        let e = entry("bare", &[("url", "https://example.com/p"), ("pdf", "p.pdf")]);

        let html = references(&[&e]);
        assert!(html.contains("Unknown Authors (n.d.). <em>Untitled</em>."));
        assert!(html.contains("<a href=\"https://example.com/p\" target=\"_blank\">[Link]</a>"));
        assert!(html.contains("<a href=\"p.pdf\" target=\"_blank\">[PDF]</a>"));
        assert!(!html.contains("[DOI]"));
    }

    #[test]
    fn test_booktitle_used_when_no_journal() {
        let e = entry("conf", &[("booktitle", "Proc. of Things")]);

        let html = references(&[&e]);
        assert!(html.contains("<em>Untitled</em>. Proc. of Things."));
    }
}
