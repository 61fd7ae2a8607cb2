//! File loading, scan policy, and page assembly.
//!
//! This is the only layer that touches the filesystem. Reads are sequential
//! and synchronous; the one ordering guarantee the pipeline needs is that
//! the publication index is fully built before any project text is
//! processed, which [`SitePage::build`] enforces by loading publications
//! strictly before starting the project scan. Every failure is converted to
//! user-visible status text at this boundary; nothing is retried and no
//! error escapes [`SitePage::build`].

use crate::error::SiteError;
use crate::render::projects::{self, Project};
use crate::render::publications;
use crate::{BibtexParser, Entry, PublicationIndex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Status text when the bibliography parses to zero entries.
pub const NO_PUBLICATIONS_STATUS: &str = "No publications found.";

/// Status text replacing the publication list when the bibliography file
/// cannot be read; names the configured bibliography filename.
pub fn bibliography_error_status(bib_file: &str) -> String {
    format!("Error loading publications. Make sure {bib_file} exists.")
}

/// Status text when the project scan finds nothing at index 1.
pub const NO_PROJECTS_STATUS: &str = "No projects found. Add markdown files named \
     project-1.md, project-2.md, etc. to the projects/ folder.";

/// Where the site's input files live and how far the project scan runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root directory; the bibliography path and projects directory
    /// are resolved relative to it.
    pub root: PathBuf,
    /// Bibliography filename under the root.
    pub bib_file: String,
    /// Directory of numbered project markdown files, under the root.
    pub projects_dir: String,
    /// Ceiling on project indices tried by the scan.
    pub max_projects: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            bib_file: "publications.bib".to_string(),
            projects_dir: "projects".to_string(),
            max_projects: 20,
        }
    }
}

impl SiteConfig {
    /// Config rooted at the given directory, with default file locations.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Override the bibliography filename.
    #[must_use]
    pub fn with_bib_file(mut self, name: impl Into<String>) -> Self {
        self.bib_file = name.into();
        self
    }

    /// Override the projects directory name.
    #[must_use]
    pub fn with_projects_dir(mut self, dir: impl Into<String>) -> Self {
        self.projects_dir = dir.into();
        self
    }

    /// Override the project scan ceiling.
    #[must_use]
    pub fn with_max_projects(mut self, max: usize) -> Self {
        self.max_projects = max;
        self
    }

    fn bib_path(&self) -> PathBuf {
        self.root.join(&self.bib_file)
    }

    fn projects_path(&self) -> PathBuf {
        self.root.join(&self.projects_dir)
    }
}

/// Contiguous-numbering project scan: indices start at 1, each index tries
/// `project-<n>.md` then `project<n>.md`, and the first index where neither
/// file is readable ends the scan.
///
/// The stop rule is deliberate: a gap at index 3 hides projects 4 and up
/// even when their files exist. A different discovery strategy (say, a
/// directory listing) can replace this policy without changing the
/// rendering contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContiguousScan {
    max_attempts: usize,
}

impl ContiguousScan {
    /// Policy with the given attempt ceiling.
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Indices the scan will try, in order.
    pub fn indices(&self) -> RangeInclusive<usize> {
        1..=self.max_attempts
    }

    /// Filename conventions tried for one index, in order.
    pub fn candidates(&self, index: usize) -> [String; 2] {
        [format!("project-{index}.md"), format!("project{index}.md")]
    }

    /// Run the scan against a directory, returning `(index, contents)` for
    /// every file found before the first total miss.
    pub fn scan(&self, dir: &Path) -> Vec<(usize, String)> {
        let mut found = Vec::new();
        for index in self.indices() {
            match self.read_any_candidate(dir, index) {
                Some(text) => found.push((index, text)),
                None => {
                    debug!(index, "no project file under either naming convention; ending scan");
                    break;
                }
            }
        }
        found
    }

    fn read_any_candidate(&self, dir: &Path, index: usize) -> Option<String> {
        for name in self.candidates(index) {
            match fs::read_to_string(dir.join(&name)) {
                Ok(text) => return Some(text),
                Err(err) => debug!(file = %name, error = %err, "project candidate unreadable"),
            }
        }
        None
    }
}

/// Read and parse the bibliography file.
///
/// This is the one fatal failure mode of the pipeline; the caller decides
/// whether to surface the error or convert it to status text.
pub fn load_publications(config: &SiteConfig) -> Result<Vec<Entry>, SiteError> {
    let path = config.bib_path();
    let text = fs::read_to_string(&path).map_err(|source| SiteError::BibliographyRead {
        path: path.clone(),
        source,
    })?;
    Ok(BibtexParser::new().parse(&text))
}

/// Rendered fragments for the publications area of the page.
///
/// When `status` is set the list was not rendered and the host page shows
/// the status text instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationsSection {
    /// Grouped publication list markup.
    pub list: Option<String>,
    /// "Jump to year" filter bar, present only with more than one year.
    pub year_filter: Option<String>,
    /// Navigation dropdown items.
    pub dropdown: Option<String>,
    /// Replacement status text when there is no list.
    pub status: Option<String>,
}

/// Rendered fragments for the projects area of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsSection {
    /// Concatenated project section markup.
    pub html: Option<String>,
    /// Navigation dropdown items.
    pub dropdown: Option<String>,
    /// Replacement status text when no projects were found. Empty entirely
    /// when the scan never ran.
    pub status: Option<String>,
}

/// The assembled page content: everything the host page embeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitePage {
    /// Publications area fragments.
    pub publications: PublicationsSection,
    /// Projects area fragments.
    pub projects: ProjectsSection,
}

impl SitePage {
    /// Load, process, and render the whole page from files under the
    /// configured root.
    ///
    /// Publications load first and the project scan only starts once the
    /// index is built, so citation resolution never races an empty index.
    /// A bibliography read failure yields the error status text and skips
    /// the project scan entirely.
    pub fn build(config: &SiteConfig) -> Self {
        let entries = match load_publications(config) {
            Ok(entries) => entries,
            Err(err) => {
                error!(error = %err, "failed to load publications");
                return Self {
                    publications: PublicationsSection {
                        status: Some(bibliography_error_status(&config.bib_file)),
                        ..Default::default()
                    },
                    projects: ProjectsSection::default(),
                };
            }
        };

        let index = PublicationIndex::new(entries);
        Self {
            publications: publications_section(&index),
            projects: projects_section(config, &index),
        }
    }
}

fn publications_section(index: &PublicationIndex) -> PublicationsSection {
    if index.is_empty() {
        return PublicationsSection {
            status: Some(NO_PUBLICATIONS_STATUS.to_string()),
            ..Default::default()
        };
    }

    let groups = publications::group_by_year(index.entries());
    PublicationsSection {
        list: Some(publications::render_list(&groups)),
        year_filter: publications::render_year_filter(&groups),
        dropdown: publications::render_dropdown(&groups),
        status: None,
    }
}

fn projects_section(config: &SiteConfig, index: &PublicationIndex) -> ProjectsSection {
    let scan = ContiguousScan::new(config.max_projects);
    let files = scan.scan(&config.projects_path());
    if files.is_empty() {
        return ProjectsSection {
            status: Some(NO_PROJECTS_STATUS.to_string()),
            ..Default::default()
        };
    }

    let rendered: Vec<Project> = files
        .iter()
        .map(|(number, text)| projects::render_project(*number, text, index))
        .collect();
    ProjectsSection {
        html: Some(rendered.iter().map(|project| project.html.as_str()).collect()),
        dropdown: projects::render_dropdown(&rendered),
        status: None,
    }
}
