/*!
 * arcscan - Flatten files and directory trees into one text stream
 *
 * This library walks the given paths, filters files with gitignore rules and
 * admission checks, and renders each admitted file between start and end
 * markers, optionally without comments or compressed.
 */

pub mod admission;
pub mod binary;
pub mod clipboard;
pub mod compress;
pub mod config;
pub mod error;
pub mod gitignore;
pub mod language;
pub mod pattern;
pub mod render;
pub mod report;
pub mod scanner;
pub mod strip;
pub mod writer;


// Re-export main components for easier access
pub use admission::{should_admit, AdmissionDecision, Criterion};
pub use config::{Args, ScanCriteria};
pub use error::{ArcError, Result};
pub use gitignore::{GitignoreIndex, GitignoreRule};
pub use language::LanguageClass;
pub use render::{render, Body, RenderedUnit};
pub use report::{Reporter, ScanReport};
pub use scanner::{ScanStatistics, Scanner};
pub use writer::OutputSink;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
