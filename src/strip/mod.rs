/*!
 * Comment stripping
 *
 * One strategy per [`LanguageClass`]. Every strategy trims leading and
 * trailing whitespace from its result.
 */

mod brace;
mod error;
mod lexer;
mod markup;
mod python;

pub use error::{StripError, StripResult};
pub use lexer::{tokenize, Token, TokenKind};

use std::path::Path;

use crate::language::LanguageClass;

/// Strip comments from `content` using the strategy for `class`
pub fn strip_class(content: &str, class: LanguageClass) -> StripResult<String> {
    match class {
        LanguageClass::PythonLike => python::strip(content),
        LanguageClass::BraceDelimited => Ok(brace::strip(content)),
        LanguageClass::HashCommented => Ok(markup::strip_hash(content)),
        LanguageClass::TemplateDelimited => Ok(markup::strip_template(content)),
        LanguageClass::Unrecognized => Ok(content.trim().to_string()),
    }
}

/// Strip comments from `content`, choosing the strategy by file extension
/// (`".py"` or `"py"`, any case)
pub fn strip_comments(content: &str, extension: &str) -> StripResult<String> {
    strip_class(content, LanguageClass::from_extension(extension))
}

/// Strip comments from the content of the file at `path`
pub fn strip_for_path(content: &str, path: &Path) -> StripResult<String> {
    strip_class(content, LanguageClass::from_path(path))
}
