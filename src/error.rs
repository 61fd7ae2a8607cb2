//! Error types for the page loading boundary.
//!
//! Parsing and rendering never fail in this crate; the error surface is
//! limited to file loading. Failures are converted into user-visible status
//! text at the page boundary and never propagate past it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading site inputs from disk.
#[derive(Error, Debug)]
pub enum SiteError {
    /// The bibliography file could not be read. Fatal to publication
    /// rendering; the page boundary replaces the list with a status message.
    #[error("could not read bibliography file {path}: {source}")]
    BibliographyRead {
        /// Path of the bibliography file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
