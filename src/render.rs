/*!
 * Rendering of admitted files into framed output units
 */

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compress::{compress, to_byte_literal};
use crate::config::ScanCriteria;
use crate::error::{ArcError, Result};
use crate::strip::strip_for_path;

/// Label printed before compressed bodies
pub const COMPRESSED_LABEL: &str = "COMPRESSED CODE:";

/// Body of a rendered unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Plain (possibly comment-stripped) text
    Text(String),
    /// zlib-compressed text
    Compressed(Vec<u8>),
}

/// One file, framed by start and end markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// Source path as it was reached during the scan
    pub path: PathBuf,
    pub header: String,
    pub body: Body,
    pub footer: String,
}

impl fmt::Display for RenderedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        match &self.body {
            Body::Text(text) => writeln!(f, "{}", text)?,
            Body::Compressed(bytes) => {
                writeln!(f, "{}", COMPRESSED_LABEL)?;
                writeln!(f, "{}", to_byte_literal(bytes))?;
            }
        }
        writeln!(f, "{}", self.footer)?;
        writeln!(f)
    }
}

/// Start marker for `path`
pub fn header_for(path: &Path) -> String {
    format!("<< START: {} >>", path.display())
}

/// End marker
pub fn footer() -> String {
    "<< END >>".to_string()
}

/// Read, optionally strip and compress, and frame the file at `path`
pub fn render(path: &Path, criteria: &ScanCriteria) -> Result<RenderedUnit> {
    let bytes = fs::read(path)?;
    let mut text = String::from_utf8(bytes).map_err(|_| ArcError::UndecodableFileContent {
        path: path.to_path_buf(),
    })?;

    if criteria.no_comments {
        text = strip_for_path(&text, path).map_err(|source| ArcError::MalformedSource {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let body = if criteria.compress {
        Body::Compressed(compress(&text)?)
    } else {
        Body::Text(text)
    };

    Ok(RenderedUnit {
        path: path.to_path_buf(),
        header: header_for(path),
        body,
        footer: footer(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::decompress;
    use tempfile::tempdir;

    #[test]
    fn test_plain_render_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.txt");
        fs::write(&path, "hello\n").unwrap();

        let unit = render(&path, &ScanCriteria::default()).unwrap();
        assert_eq!(unit.body, Body::Text("hello\n".to_string()));
        assert_eq!(
            unit.to_string(),
            format!("<< START: {} >>\nhello\n\n<< END >>\n\n", path.display())
        );
    }

    #[test]
    fn test_comments_stripped_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.py");
        fs::write(&path, "\"\"\"Doc.\"\"\"\n# note\nx = 1\n").unwrap();

        let criteria = ScanCriteria {
            no_comments: true,
            ..ScanCriteria::default()
        };
        let unit = render(&path, &criteria).unwrap();
        assert_eq!(unit.body, Body::Text("x = 1".to_string()));
    }

    #[test]
    fn test_compressed_body_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.c");
        fs::write(&path, "int x; /* gone */\n").unwrap();

        let criteria = ScanCriteria {
            no_comments: true,
            compress: true,
            ..ScanCriteria::default()
        };
        let unit = render(&path, &criteria).unwrap();
        let Body::Compressed(bytes) = &unit.body else {
            panic!("expected a compressed body");
        };
        assert_eq!(decompress(bytes).unwrap(), "int x;");

        let rendered = unit.to_string();
        assert!(rendered.contains(&format!("\nCOMPRESSED CODE:\n{}\n", to_byte_literal(bytes))));
        assert!(rendered.ends_with("<< END >>\n\n"));
    }

    #[test]
    fn test_undecodable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9\n").unwrap();

        let err = render(&path, &ScanCriteria::default()).unwrap_err();
        assert!(matches!(err, ArcError::UndecodableFileContent { .. }));
    }

    #[test]
    fn test_malformed_python_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.py");
        fs::write(&path, "s = 'unterminated\n").unwrap();

        let criteria = ScanCriteria {
            no_comments: true,
            ..ScanCriteria::default()
        };
        let err = render(&path, &criteria).unwrap_err();
        assert!(matches!(err, ArcError::MalformedSource { .. }));
        // Without stripping the file renders as-is
        assert!(render(&path, &ScanCriteria::default()).is_ok());
    }
}
