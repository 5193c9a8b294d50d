/*!
 * Language classification by file extension
 */

use std::path::Path;

use strum::{Display, EnumIter};

/// Comment syntax family a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum LanguageClass {
    /// Indentation-sensitive, `#` comments and docstrings
    PythonLike,
    /// `//` and `/* */` comments with quoted literals
    BraceDelimited,
    /// Full-line `#` comments
    HashCommented,
    /// `{# ... #}` template comments
    TemplateDelimited,
    /// Passed through unchanged
    Unrecognized,
}

impl LanguageClass {
    /// Classify an extension, with or without its leading dot. Case-insensitive.
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "py" | "pyw" | "pyi" => Self::PythonLike,
            "c" | "h" | "cc" | "cpp" | "cxx" | "hh" | "hpp" | "hxx" | "js" | "mjs" | "cjs"
            | "jsx" | "ts" | "tsx" | "java" | "cs" | "go" | "kt" | "kts" | "scala" | "swift"
            | "dart" => Self::BraceDelimited,
            "sh" | "bash" | "zsh" | "yml" | "yaml" | "toml" | "cfg" | "conf" | "rb" | "pl" => {
                Self::HashCommented
            }
            "j2" | "jinja" | "jinja2" | "tpl" | "twig" => Self::TemplateDelimited,
            _ => Self::Unrecognized,
        }
    }

    /// Classify a path by its extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .map(|ext| Self::from_extension(&ext.to_string_lossy()))
            .unwrap_or(Self::Unrecognized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_known_extensions() {
        assert_eq!(LanguageClass::from_extension(".py"), LanguageClass::PythonLike);
        assert_eq!(LanguageClass::from_extension(".c"), LanguageClass::BraceDelimited);
        assert_eq!(LanguageClass::from_extension(".cpp"), LanguageClass::BraceDelimited);
        assert_eq!(LanguageClass::from_extension(".h"), LanguageClass::BraceDelimited);
        assert_eq!(LanguageClass::from_extension(".js"), LanguageClass::BraceDelimited);
        assert_eq!(LanguageClass::from_extension(".sh"), LanguageClass::HashCommented);
        assert_eq!(LanguageClass::from_extension(".bash"), LanguageClass::HashCommented);
        assert_eq!(LanguageClass::from_extension(".yml"), LanguageClass::HashCommented);
        assert_eq!(LanguageClass::from_extension(".yaml"), LanguageClass::HashCommented);
        assert_eq!(LanguageClass::from_extension(".j2"), LanguageClass::TemplateDelimited);
        assert_eq!(LanguageClass::from_extension(".jinja"), LanguageClass::TemplateDelimited);
        assert_eq!(LanguageClass::from_extension(".jinja2"), LanguageClass::TemplateDelimited);
        assert_eq!(LanguageClass::from_extension(".tpl"), LanguageClass::TemplateDelimited);
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_dot_optional() {
        assert_eq!(LanguageClass::from_extension(".PY"), LanguageClass::PythonLike);
        assert_eq!(LanguageClass::from_extension("Js"), LanguageClass::BraceDelimited);
        assert_eq!(LanguageClass::from_path(Path::new("deploy/CI.YML")), LanguageClass::HashCommented);
    }

    #[test]
    fn test_unmapped_is_unrecognized() {
        assert_eq!(LanguageClass::from_extension(".unknown"), LanguageClass::Unrecognized);
        assert_eq!(LanguageClass::from_extension(""), LanguageClass::Unrecognized);
        assert_eq!(LanguageClass::from_path(Path::new("Makefile")), LanguageClass::Unrecognized);
        // Lifetimes would be mistaken for char literals
        assert_eq!(LanguageClass::from_path(Path::new("lib.rs")), LanguageClass::Unrecognized);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = LanguageClass::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "python-like",
                "brace-delimited",
                "hash-commented",
                "template-delimited",
                "unrecognized"
            ]
        );
    }
}
