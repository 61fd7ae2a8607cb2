//! Project section rendering.
//!
//! A project is one markdown file: an optional leading `###` heading
//! supplies the display title, the body gets its citations substituted and
//! is then converted to HTML, and a references block for the resolved
//! citations is appended inside the section.

use super::escape_html;
use crate::PublicationIndex;
use crate::cite::process_citations;
use crate::render::references;
use itertools::Itertools;
use pulldown_cmark::{Parser, html};
use regex::Regex;
use std::sync::LazyLock;

/// First `###` heading in the file, used as the display title.
static TITLE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"###\s+(.+)").unwrap());

/// Dropdown labels longer than this are truncated.
const DROPDOWN_TITLE_LIMIT: usize = 50;

/// One rendered project section.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// 1-based index from the filename scan; doubles as the anchor number.
    pub number: usize,
    /// Display title from the leading heading, or `"Project <n>"`.
    pub title: String,
    /// Full section markup, references included.
    pub html: String,
}

impl Project {
    /// Anchor id of this section (`project-<n>`).
    pub fn anchor_id(&self) -> String {
        format!("project-{}", self.number)
    }
}

/// Render one project from its markdown source.
///
/// Citation markers are substituted before markdown conversion so the
/// emitted link markup passes through the converter verbatim.
pub fn render_project(number: usize, markdown: &str, index: &PublicationIndex) -> Project {
    let title = TITLE_HEADING
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| format!("Project {number}"));

    let processed = process_citations(markdown, index);
    let body = markdown_to_html(&processed.text);
    let refs = references(&processed.citations);

    Project {
        number,
        title,
        html: format!("<div class=\"project\" id=\"project-{number}\">{body}{refs}</div>"),
    }
}

/// Delegate markdown conversion to pulldown-cmark; its output is trusted
/// and embedded verbatim.
fn markdown_to_html(text: &str) -> String {
    let parser = Parser::new(text);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render the projects navigation dropdown items.
///
/// Long titles are truncated for display, with the full title carried in
/// the link's `title` attribute.
pub fn render_dropdown(projects: &[Project]) -> Option<String> {
    if projects.is_empty() {
        return None;
    }

    let items = projects
        .iter()
        .map(|project| {
            let anchor = project.anchor_id();
            match truncated_label(&project.title) {
                Some(label) => format!(
                    "<li><a href=\"#{anchor}\" title=\"{}\">{}</a></li>",
                    escape_html(&project.title),
                    escape_html(&label),
                ),
                None => format!(
                    "<li><a href=\"#{anchor}\">{}</a></li>",
                    escape_html(&project.title)
                ),
            }
        })
        .join("");
    Some(items)
}

fn truncated_label(title: &str) -> Option<String> {
    if title.chars().count() <= DROPDOWN_TITLE_LIMIT {
        return None;
    }
    let mut label: String = title.chars().take(DROPDOWN_TITLE_LIMIT - 3).collect();
    label.push_str("...");
    Some(label)
}
