/*!
 * Pattern-based comment removal for shell-style and template files
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// A whole line whose first non-blank character is `#`, with its line break
static HASH_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#[^\n]*(?:\n|\z)").expect("valid hash comment regex"));

/// `{# ... #}`, shortest match, may span lines
static TEMPLATE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{#.*?#\}").expect("valid template comment regex"));

/// Remove full-line `#` comments.
///
/// Trailing `# ...` after real content on the same line is kept.
pub fn strip_hash(content: &str) -> String {
    HASH_LINE.replace_all(content, "").trim().to_string()
}

/// Remove `{# ... #}` template comments
pub fn strip_template(content: &str) -> String {
    TEMPLATE_COMMENT.replace_all(content, "").trim().to_string()
}
