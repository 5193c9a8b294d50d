/*!
 * Per-file admission
 *
 * Combines the binary heuristic, name and path filters and the path/content
 * whitelist into one decision. Checks run in a fixed order and stop at the
 * first failing one.
 */

use std::fs;
use std::path::Path;

use strum::Display;

use crate::binary::is_binary;
use crate::config::ScanCriteria;

/// One admission check, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Criterion {
    Binary,
    Hidden,
    FileType,
    IgnoredSubstring,
    PathOrContentFilter,
}

/// Outcome of [`should_admit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionDecision {
    pub admit: bool,
    /// First check that failed, if any
    pub rejected_by: Option<Criterion>,
}

impl AdmissionDecision {
    fn admitted() -> Self {
        Self {
            admit: true,
            rejected_by: None,
        }
    }

    fn rejected(criterion: Criterion) -> Self {
        Self {
            admit: false,
            rejected_by: Some(criterion),
        }
    }
}

/// Decide whether the file at `path` should be rendered
pub fn should_admit(path: &Path, criteria: &ScanCriteria) -> AdmissionDecision {
    should_admit_traced(path, criteria, |_| {})
}

/// Like [`should_admit`], calling `observe` with every check as it is evaluated
pub fn should_admit_traced<F>(path: &Path, criteria: &ScanCriteria, mut observe: F) -> AdmissionDecision
where
    F: FnMut(Criterion),
{
    let path_str = path.to_string_lossy();

    observe(Criterion::Binary);
    if !criteria.include_binary && is_binary(path) {
        return AdmissionDecision::rejected(Criterion::Binary);
    }

    observe(Criterion::Hidden);
    if criteria.ignore_hidden && is_hidden(path) {
        return AdmissionDecision::rejected(Criterion::Hidden);
    }

    observe(Criterion::FileType);
    if !criteria.file_type_suffixes.is_empty()
        && !criteria
            .file_type_suffixes
            .iter()
            .any(|suffix| path_str.ends_with(suffix.as_str()))
    {
        return AdmissionDecision::rejected(Criterion::FileType);
    }

    observe(Criterion::IgnoredSubstring);
    if criteria
        .ignore_substrings
        .iter()
        .any(|ignored| path_str.contains(ignored.as_str()))
    {
        return AdmissionDecision::rejected(Criterion::IgnoredSubstring);
    }

    if criteria.has_whitelist() {
        observe(Criterion::PathOrContentFilter);
        if !path_or_content_contains(path, &path_str, criteria) {
            return AdmissionDecision::rejected(Criterion::PathOrContentFilter);
        }
    }

    AdmissionDecision::admitted()
}

/// Whether the base name starts with a dot
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Path whitelist first; the content is only read when that fails
fn path_or_content_contains(path: &Path, path_str: &str, criteria: &ScanCriteria) -> bool {
    if criteria
        .path_substrings
        .iter()
        .any(|wanted| path_str.contains(wanted.as_str()))
    {
        return true;
    }

    if criteria.content_substrings.is_empty() {
        return false;
    }

    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => criteria
                .content_substrings
                .iter()
                .any(|wanted| content.contains(wanted.as_str())),
            Err(_) => {
                log::debug!("{} is not valid UTF-8; content filter does not match", path.display());
                false
            }
        },
        Err(e) => {
            // Let the renderer surface the read error
            log::warn!("Could not read {} for content filter: {}", path.display(), e);
            true
        }
    }
}

/// Whether traversal should skip a directory named `name` entirely
pub fn prune_directory(name: &str, criteria: &ScanCriteria) -> bool {
    (criteria.ignore_hidden && name.starts_with('.'))
        || criteria
            .ignore_substrings
            .iter()
            .any(|ignored| name.contains(ignored.as_str()))
}
