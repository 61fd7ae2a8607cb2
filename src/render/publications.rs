//! Year-grouped publication list and its navigation affordances.
//!
//! Entries are sorted descending by numeric year, grouped by the literal
//! year string, and rendered with `pub-<key>` / `year-<year>` anchors so
//! citation links and the year navigation can target them.

use super::{DOI_RESOLVER, escape_html};
use crate::Entry;
use crate::format::format_authors;
use itertools::Itertools;
use std::cmp::Reverse;

/// Group label used when the year field is absent.
const UNKNOWN_YEAR: &str = "Unknown";

/// Entries sharing one literal year string, in sorted display order.
#[derive(Debug, Clone)]
pub struct YearGroup<'a> {
    /// Literal year string, or `"Unknown"` when the field is absent.
    pub year: String,
    /// Entries for this year, in post-sort order.
    pub entries: Vec<&'a Entry>,
}

/// Numeric sort key: missing or non-numeric years count as 0 and land at
/// the end of the descending order.
fn numeric_year(year: Option<&str>) -> i64 {
    year.and_then(|y| y.trim().parse().ok()).unwrap_or(0)
}

/// Sort entries descending by numeric year and group by the literal year
/// string.
///
/// The sort is stable, so entries sharing a year keep bibliography file
/// order. Group order is numeric descending with the "Unknown" group always
/// last, even though its entries sort as year 0; a present-but-non-numeric
/// year string forms its own group and also orders as 0.
pub fn group_by_year(entries: &[Entry]) -> Vec<YearGroup<'_>> {
    let mut ordered: Vec<&Entry> = entries.iter().collect();
    ordered.sort_by_key(|entry| Reverse(numeric_year(entry.year())));

    let mut groups: Vec<YearGroup<'_>> = Vec::new();
    for entry in ordered {
        let label = entry.year().unwrap_or(UNKNOWN_YEAR);
        match groups.iter_mut().find(|group| group.year == label) {
            Some(group) => group.entries.push(entry),
            None => groups.push(YearGroup {
                year: label.to_string(),
                entries: vec![entry],
            }),
        }
    }

    groups.sort_by_key(|group| {
        (
            group.year == UNKNOWN_YEAR,
            Reverse(numeric_year(Some(&group.year))),
        )
    });
    groups
}

/// Render the grouped publication list.
///
/// Each group gets an anchored `year-<year>` heading; each entry gets an
/// anchored `pub-<key>` block with title, authors, venue, DOI/URL display
/// rows, and a links row.
pub fn render_list(groups: &[YearGroup<'_>]) -> String {
    let mut html = String::new();
    for group in groups {
        html.push_str(&format!(
            "<h3 class=\"year-heading\" id=\"year-{y}\">{y}</h3>",
            y = escape_html(&group.year)
        ));
        for entry in &group.entries {
            html.push_str(&render_entry(entry));
        }
    }
    html
}

fn render_entry(entry: &Entry) -> String {
    let mut html = format!(
        "<div class=\"publication\" id=\"pub-{}\">",
        escape_html(&entry.cite_key)
    );

    html.push_str(&format!(
        "<div class=\"publication-title\">{}</div>",
        escape_html(entry.title().unwrap_or("Untitled"))
    ));

    if entry.author().is_some() {
        html.push_str(&format!(
            "<div class=\"publication-authors\">{}</div>",
            escape_html(&format_authors(entry.author()))
        ));
    }

    if let Some(venue) = entry.venue() {
        html.push_str(&format!(
            "<div class=\"publication-venue\">{}</div>",
            escape_html(venue)
        ));
    }

    if let Some(doi) = entry.doi() {
        html.push_str(&format!(
            "<div class=\"publication-doi\"><strong>DOI:</strong> {}</div>",
            escape_html(doi)
        ));
    } else if let Some(url) = entry.url() {
        // URL display row only when there is no DOI row.
        html.push_str(&format!(
            "<div class=\"publication-url\"><strong>URL:</strong> {}</div>",
            escape_html(url)
        ));
    }

    let links = render_links(entry);
    if !links.is_empty() {
        html.push_str(&format!("<div class=\"publication-links\">{links}</div>"));
    }

    html.push_str("</div>");
    html
}

fn render_links(entry: &Entry) -> String {
    let mut links = String::new();
    if let Some(doi) = entry.doi() {
        links.push_str(&format!(
            "<a href=\"{DOI_RESOLVER}{}\" target=\"_blank\">DOI</a>",
            escape_html(doi)
        ));
    }
    if let Some(url) = entry.url() {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\">Link</a>",
            escape_html(url)
        ));
    }
    if let Some(pdf) = entry.pdf() {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\">PDF</a>",
            escape_html(pdf)
        ));
    }
    links
}

/// Render the "Jump to year" filter bar.
///
/// Only produced when there is more than one group; a single-year list has
/// nothing to jump between.
pub fn render_year_filter(groups: &[YearGroup<'_>]) -> Option<String> {
    if groups.len() < 2 {
        return None;
    }

    let links = groups
        .iter()
        .map(|group| {
            format!(
                "<a href=\"#year-{y}\" class=\"year-link\">{y}</a>",
                y = escape_html(&group.year)
            )
        })
        .join(" | ");
    Some(format!("<strong>Jump to year:</strong> {links}"))
}

/// Render the publications navigation dropdown items.
pub fn render_dropdown(groups: &[YearGroup<'_>]) -> Option<String> {
    if groups.is_empty() {
        return None;
    }

    let items = groups
        .iter()
        .map(|group| {
            format!(
                "<li><a href=\"#year-{y}\">{y}</a></li>",
                y = escape_html(&group.year)
            )
        })
        .collect();
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(key: &str, year: Option<&str>) -> Entry {
        let mut entry = Entry::new("article", key);
        if let Some(year) = year {
            entry.fields.insert("year".into(), year.to_string());
        }
        entry
    }

    #[test]
    fn test_group_order_unknown_last() {
        let entries = vec![
            entry("a", Some("2021")),
            entry("b", Some("2019")),
            entry("c", None),
            entry("d", Some("2021")),
        ];

        let groups = group_by_year(&entries);
        let labels: Vec<&str> = groups.iter().map(|g| g.year.as_str()).collect();
        assert_eq!(labels, ["2021", "2019", "Unknown"]);
    }

    #[test]
    fn test_unknown_last_even_against_year_zero() {
        let entries = vec![entry("zero", Some("0")), entry("none", None)];

        let groups = group_by_year(&entries);
        let labels: Vec<&str> = groups.iter().map(|g| g.year.as_str()).collect();
        assert_eq!(labels, ["0", "Unknown"]);
    }

    #[test]
    fn test_non_numeric_year_forms_own_group() {
        let entries = vec![
            entry("a", Some("2020")),
            entry("b", Some("in press")),
            entry("c", None),
        ];

        let groups = group_by_year(&entries);
        let labels: Vec<&str> = groups.iter().map(|g| g.year.as_str()).collect();
        assert_eq!(labels, ["2020", "in press", "Unknown"]);
    }

    #[test]
    fn test_same_year_keeps_file_order() {
        let entries = vec![
            entry("late", Some("2020")),
            entry("early", Some("2021")),
            entry("later", Some("2020")),
        ];

        let groups = group_by_year(&entries);
        assert_eq!(groups[0].year, "2021");
        let keys: Vec<&str> = groups[1].entries.iter().map(|e| e.cite_key.as_str()).collect();
        assert_eq!(keys, ["late", "later"]);
    }

    #[test]
    fn test_render_list_anchors() {
        let entries = vec![entry("smith20", Some("2020"))];
        let groups = group_by_year(&entries);

        let html = render_list(&groups);
        assert!(html.contains("<h3 class=\"year-heading\" id=\"year-2020\">2020</h3>"));
        assert!(html.contains("<div class=\"publication\" id=\"pub-smith20\">"));
        assert!(html.contains("<div class=\"publication-title\">Untitled</div>"));
    }

    #[test]
    fn test_render_entry_rows() {
        let mut e = entry("full", Some("2020"));
        e.fields.insert("title".into(), "A Title".into());
        e.fields.insert("author".into(), "Smith, John".into());
        e.fields.insert("journal".into(), "J. Tests".into());
        e.fields.insert("doi".into(), "10.1/x".into());
        e.fields.insert("url".into(), "https://example.com".into());

        let html = render_entry(&e);
        assert!(html.contains("<div class=\"publication-authors\">Smith, John</div>"));
        assert!(html.contains("<div class=\"publication-venue\">J. Tests</div>"));
        assert!(html.contains("<strong>DOI:</strong> 10.1/x"));
        // DOI present suppresses the URL display row but not the URL link.
        assert!(!html.contains("<strong>URL:</strong>"));
        assert!(html.contains("<a href=\"https://doi.org/10.1/x\" target=\"_blank\">DOI</a>"));
        assert!(html.contains("<a href=\"https://example.com\" target=\"_blank\">Link</a>"));
    }

    #[test]
    fn test_render_entry_without_links_omits_links_row() {
        let html = render_entry(&entry("bare", Some("2020")));
        assert!(!html.contains("publication-links"));
    }

    #[test]
    fn test_year_filter_needs_two_groups() {
        let single = [entry("a", Some("2020"))];
        let one = group_by_year(&single);
        assert_eq!(render_year_filter(&one), None);

        let pair = [entry("a", Some("2020")), entry("b", Some("2019"))];
        let two = group_by_year(&pair);
        let filter = render_year_filter(&two).unwrap();
        assert_eq!(
            filter,
            "<strong>Jump to year:</strong> \
             <a href=\"#year-2020\" class=\"year-link\">2020</a> | \
             <a href=\"#year-2019\" class=\"year-link\">2019</a>"
        );
    }

    #[test]
    fn test_dropdown_items() {
        let entries = [entry("a", Some("2020")), entry("b", None)];
        let groups = group_by_year(&entries);

        let dropdown = render_dropdown(&groups).unwrap();
        assert_eq!(
            dropdown,
            "<li><a href=\"#year-2020\">2020</a></li>\
             <li><a href=\"#year-Unknown\">Unknown</a></li>"
        );
        assert_eq!(render_dropdown(&[]), None);
    }
}
