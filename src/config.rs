/*!
 * Configuration handling for arcscan
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;

/// Command-line arguments for arcscan
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "arcscan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scan directories and print/compile file contents",
    long_about = "Walks files and directories and prints their contents as one stream, \
                  with optional filtering, comment stripping, compression and clipboard copy."
)]
pub struct Args {
    /// Files or directories to scan
    #[clap(required_unless_present = "generate")]
    pub paths: Vec<PathBuf>,

    /// Only include files ending with one of these suffixes (e.g. .py .js .c)
    #[clap(short = 't', long, num_args = 1..)]
    pub file_types: Vec<String>,

    /// Ignore files and folders whose path contains one of these strings
    #[clap(short = 'I', long, num_args = 1..)]
    pub ignore_file_strings: Vec<String>,

    /// Copy the output to the system clipboard
    #[clap(short = 'x', long)]
    pub clipboard: bool,

    /// Suppress terminal output (useful with --clipboard)
    #[clap(short, long)]
    pub quiet: bool,

    /// Include hidden directories and files
    #[clap(short = 'S', long)]
    pub show_hidden: bool,

    /// Print skipped files; repeat for more log output
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Remove comments from files before printing
    #[clap(short = 'N', long)]
    pub no_comments: bool,

    /// Compress content instead of printing plain text
    #[clap(short = 'z', long)]
    pub compress: bool,

    /// Only include files whose path contains one of these strings
    #[clap(short = 'p', long, num_args = 1..)]
    pub path_contains: Vec<String>,

    /// Only include files whose content contains one of these strings
    #[clap(short = 'C', long, num_args = 1..)]
    pub content_contains: Vec<String>,

    /// Do not respect .gitignore files during the scan
    #[clap(short = 'G', long)]
    pub no_gitignore: bool,

    /// Also scan binary files (skipped by default)
    #[clap(short = 'b', long)]
    pub scan_binary_files: bool,

    /// Number of threads used to filter and render files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Print a summary table to stderr when done
    #[clap(long)]
    pub summary: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Immutable scan configuration, built once and shared by reference
#[derive(Clone, Debug)]
pub struct ScanCriteria {
    /// Only files whose path ends with one of these (empty: no restriction)
    pub file_type_suffixes: Vec<String>,
    /// Skip files and directories whose path contains any of these
    pub ignore_substrings: Vec<String>,
    /// Skip dot-files and dot-directories
    pub ignore_hidden: bool,
    /// Whitelist by path substring
    pub path_substrings: Vec<String>,
    /// Whitelist by content substring
    pub content_substrings: Vec<String>,
    /// Apply `.gitignore` rules under each scanned directory
    pub respect_gitignore: bool,
    /// Admit files that look binary
    pub include_binary: bool,
    /// Strip comments before rendering
    pub no_comments: bool,
    /// Render zlib-compressed bodies
    pub compress: bool,
    /// Emit skip notices to the output
    pub verbose: bool,
}

impl Default for ScanCriteria {
    fn default() -> Self {
        Self {
            file_type_suffixes: Vec::new(),
            ignore_substrings: Vec::new(),
            ignore_hidden: true,
            path_substrings: Vec::new(),
            content_substrings: Vec::new(),
            respect_gitignore: true,
            include_binary: false,
            no_comments: false,
            compress: false,
            verbose: false,
        }
    }
}

impl ScanCriteria {
    /// Create criteria from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            file_type_suffixes: args.file_types.clone(),
            ignore_substrings: args.ignore_file_strings.clone(),
            ignore_hidden: !args.show_hidden,
            path_substrings: args.path_contains.clone(),
            content_substrings: args.content_contains.clone(),
            respect_gitignore: !args.no_gitignore,
            include_binary: args.scan_binary_files,
            no_comments: args.no_comments,
            compress: args.compress,
            verbose: args.verbose > 0 && !args.quiet,
        }
    }

    /// Whether a path or content whitelist is active
    pub fn has_whitelist(&self) -> bool {
        !self.path_substrings.is_empty() || !self.content_substrings.is_empty()
    }
}

impl Args {
    /// Validate argument combinations that clap cannot express
    pub fn validate(&self) -> Result<()> {
        ensure!(self.threads > 0, InvalidArgument, "--threads must be at least 1");
        for suffix in &self.file_types {
            ensure!(!suffix.is_empty(), InvalidArgument, "empty file type suffix");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["arcscan", "src"]);
        let criteria = ScanCriteria::from_args(&args);
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
        assert!(criteria.ignore_hidden);
        assert!(criteria.respect_gitignore);
        assert!(!criteria.include_binary);
        assert!(!criteria.verbose);
        assert!(!criteria.has_whitelist());
        assert_eq!(args.threads, 4);
    }

    #[test]
    fn test_flags_map_to_criteria() {
        let args = parse(&[
            "arcscan", "a", "b.py", "-t", ".py", ".rs", "-I", "venv", "-S", "-N", "-z", "-G", "-b",
            "-v", "-p", "core", "-C", "TODO",
        ]);
        let criteria = ScanCriteria::from_args(&args);
        assert_eq!(args.paths.len(), 2);
        assert_eq!(criteria.file_type_suffixes, vec![".py", ".rs"]);
        assert_eq!(criteria.ignore_substrings, vec!["venv"]);
        assert!(!criteria.ignore_hidden);
        assert!(criteria.no_comments);
        assert!(criteria.compress);
        assert!(!criteria.respect_gitignore);
        assert!(criteria.include_binary);
        assert!(criteria.verbose);
        assert_eq!(criteria.path_substrings, vec!["core"]);
        assert_eq!(criteria.content_substrings, vec!["TODO"]);
    }

    #[test]
    fn test_quiet_silences_verbose() {
        let args = parse(&["arcscan", ".", "-v", "-q"]);
        assert!(!ScanCriteria::from_args(&args).verbose);
    }

    #[test]
    fn test_paths_required_unless_generating() {
        assert!(Args::try_parse_from(["arcscan"]).is_err());
        assert!(Args::try_parse_from(["arcscan", "--generate", "bash"]).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let args = parse(&["arcscan", ".", "--threads", "0"]);
        assert!(args.validate().is_err());
        assert!(parse(&["arcscan", "."]).validate().is_ok());
    }
}
