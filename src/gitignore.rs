/*!
 * Directory-scoped `.gitignore` exclusion
 *
 * The index is built once per scan root and is read-only afterwards, so it
 * can be shared across worker threads by reference.
 */

use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ArcError;
use crate::pattern::Glob;

/// File name looked up in every directory of the scanned tree
pub const GITIGNORE_FILE: &str = ".gitignore";

/// One pattern scoped to the directory of the `.gitignore` that defined it
#[derive(Debug, Clone)]
pub struct GitignoreRule {
    /// Directory containing the defining `.gitignore`
    pub base_directory: PathBuf,
    /// Pattern text as written in the file (trimmed)
    pub raw_pattern: String,
    glob: Glob,
}

impl GitignoreRule {
    /// Create a rule scoped to `base_directory`
    pub fn new(base_directory: impl Into<PathBuf>, raw_pattern: impl Into<String>) -> Self {
        let raw_pattern = raw_pattern.into();
        Self {
            base_directory: base_directory.into(),
            glob: Glob::new(&raw_pattern),
            raw_pattern,
        }
    }

    /// Whether the pattern only applies to directories
    pub fn is_directory_only(&self) -> bool {
        self.raw_pattern.ends_with('/')
    }

    /// Test the rule against `path`. Paths outside `base_directory` never match.
    pub fn matches(&self, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(&self.base_directory) else {
            return false;
        };
        let segments: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if self.is_directory_only() {
            let dirs = segments.len().saturating_sub(1);
            segments[..dirs]
                .iter()
                .any(|segment| self.glob.is_match(&format!("{}/", segment)))
        } else {
            self.glob.is_match(&segments.join("/"))
        }
    }
}

/// All `.gitignore` rules found under a scan root, in discovery order
#[derive(Debug, Clone, Default)]
pub struct GitignoreIndex {
    rules: Vec<GitignoreRule>,
}

impl GitignoreIndex {
    /// Walk `root` and collect the rules of every `.gitignore` in the tree.
    ///
    /// Directories are visited in pre-order with siblings sorted by name.
    /// Unreadable `.gitignore` files and directories are logged and skipped.
    pub fn build(root: &Path) -> Self {
        let mut rules = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_type().is_dir());

        for entry in walker {
            let dir = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable directory while loading gitignore rules: {}", e);
                    continue;
                }
            };

            let candidate = dir.path().join(GITIGNORE_FILE);
            if !candidate.is_file() {
                continue;
            }

            match Self::read_rules(&candidate, dir.path()) {
                Ok(found) => {
                    log::debug!("Loaded {} rule(s) from {}", found.len(), candidate.display());
                    rules.extend(found);
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        Self { rules }
    }

    fn read_rules(file: &Path, base: &Path) -> Result<Vec<GitignoreRule>, ArcError> {
        let text = fs::read_to_string(file).map_err(|source| ArcError::UnreadableGitignore {
            path: file.to_path_buf(),
            source,
        })?;

        Ok(parse_patterns(&text)
            .map(|pattern| GitignoreRule::new(base, pattern))
            .collect())
    }

    /// Whether any rule excludes `path`
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[GitignoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Significant patterns of a `.gitignore` body: trimmed, no blanks, no comments
fn parse_patterns(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
