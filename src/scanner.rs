/*!
 * Directory and file scanning functionality
 *
 * Drives the traversal of every target path: gitignore exclusion, admission,
 * rendering, and sequential emission of the rendered units.
 */

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::admission::{prune_directory, should_admit};
use crate::bail;
use crate::config::ScanCriteria;
use crate::error::{ArcError, Result};
use crate::gitignore::GitignoreIndex;
use crate::render::{render, RenderedUnit};

/// Files handed to the worker pool at once
const BATCH_SIZE: usize = 64;

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Files written to the output
    pub files_rendered: usize,
    /// Files excluded by `.gitignore` rules
    pub skipped_gitignore: usize,
    /// Files rejected by the admission checks
    pub skipped_criteria: usize,
    /// Files that failed to render
    pub failed: usize,
    /// Bytes written for rendered units
    pub bytes_emitted: usize,
}

/// What happened to a single candidate file
enum FileOutcome {
    Rendered(RenderedUnit),
    SkippedGitignore,
    SkippedCriteria,
    Failed(ArcError),
}

/// Scanner for files and directory trees
pub struct Scanner {
    /// Scan configuration
    criteria: ScanCriteria,
    /// Scanner statistics
    statistics: Mutex<ScanStatistics>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(criteria: ScanCriteria) -> Self {
        Self {
            criteria,
            statistics: Mutex::new(ScanStatistics::default()),
        }
    }

    /// Get scanner statistics
    pub fn statistics(&self) -> ScanStatistics {
        self.statistics.lock().unwrap().clone()
    }

    /// Scan a file or a directory tree and write the result to `out`
    pub fn scan_path<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        if path.is_dir() {
            self.scan_directory(path, out)
        } else if path.is_file() {
            self.scan_file(path, out)
        } else {
            bail!(PathNotFound, "{}", path.display())
        }
    }

    /// Render a file named explicitly on the command line.
    ///
    /// Explicit targets skip the gitignore rules but not the admission
    /// checks. A rejected target is skipped silently; an admitted file that
    /// cannot be decoded or stripped aborts the run.
    pub fn scan_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        log::info!("Scanning file: {}", path.display());

        let decision = should_admit(path, &self.criteria);
        if let Some(criterion) = decision.rejected_by {
            log::info!("Skipping {}: rejected by {} check", path.display(), criterion);
            self.statistics.lock().unwrap().skipped_criteria += 1;
            return Ok(());
        }

        let unit = render(path, &self.criteria)?;
        self.emit(path, FileOutcome::Rendered(unit), out)
    }

    /// Walk `root` and render every admitted file, in traversal order
    pub fn scan_directory<W: Write>(&self, root: &Path, out: &mut W) -> Result<()> {
        log::info!("Scanning directory: {}", root.display());

        let gitignore = if self.criteria.respect_gitignore {
            GitignoreIndex::build(root)
        } else {
            GitignoreIndex::default()
        };
        log::debug!("{} gitignore rule(s) under {}", gitignore.len(), root.display());

        let candidates = self.collect_candidates(root);
        log::debug!("{} candidate file(s) under {}", candidates.len(), root.display());

        for batch in candidates.chunks(BATCH_SIZE) {
            let outcomes: Vec<FileOutcome> = batch
                .par_iter()
                .map(|path| self.process_file(path, &gitignore))
                .collect();

            for (path, outcome) in batch.iter().zip(outcomes) {
                self.emit(path, outcome, out)?;
            }
        }

        Ok(())
    }

    /// Files under `root`, a directory's files before its subdirectories
    fn collect_candidates(&self, root: &Path) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        let mut candidates = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if !entry.file_type().is_dir() && entry.path().is_file() => {
                    candidates.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable entry: {}", e),
            }
        }
        candidates
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && prune_directory(&entry.file_name().to_string_lossy(), &self.criteria)
    }

    fn process_file(&self, path: &Path, gitignore: &GitignoreIndex) -> FileOutcome {
        if !gitignore.is_empty() && gitignore.is_excluded(path) {
            return FileOutcome::SkippedGitignore;
        }

        let decision = should_admit(path, &self.criteria);
        if let Some(criterion) = decision.rejected_by {
            log::trace!("{} rejected by {} check", path.display(), criterion);
            return FileOutcome::SkippedCriteria;
        }

        match render(path, &self.criteria) {
            Ok(unit) => FileOutcome::Rendered(unit),
            Err(e) => FileOutcome::Failed(e),
        }
    }

    fn emit<W: Write>(&self, path: &Path, outcome: FileOutcome, out: &mut W) -> Result<()> {
        let mut stats = self.statistics.lock().unwrap();
        match outcome {
            FileOutcome::Rendered(unit) => {
                let text = unit.to_string();
                out.write_all(text.as_bytes())?;
                stats.files_rendered += 1;
                stats.bytes_emitted += text.len();
            }
            FileOutcome::SkippedGitignore => {
                stats.skipped_gitignore += 1;
                if self.criteria.verbose {
                    writeln!(out, "Skipped (gitignored): {}", path.display())?;
                }
            }
            FileOutcome::SkippedCriteria => {
                stats.skipped_criteria += 1;
                if self.criteria.verbose {
                    writeln!(out, "Skipped file: {}", path.display())?;
                }
            }
            FileOutcome::Failed(e) => {
                stats.failed += 1;
                log::error!("{}", e);
            }
        }
        Ok(())
    }
}
