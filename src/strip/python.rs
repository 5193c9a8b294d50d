/*!
 * Comment and docstring removal for Python sources
 *
 * Works on the token stream from [`super::lexer`], so `#` inside strings and
 * ordinary triple-quoted strings are never touched. Output is the original
 * text minus the dropped token spans.
 */

use std::ops::Range;

use super::error::StripResult;
use super::lexer::{self, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocstringState {
    /// Nothing significant seen yet
    ExpectModuleDocstring,
    /// Right after a block was opened
    ExpectSuiteDocstring,
    Normal,
}

/// Progress through the `:` NEWLINE INDENT sequence that opens a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockOpener {
    None,
    Colon,
    ColonNewline,
}

/// Remove comments, the module docstring and suite docstrings
pub fn strip(content: &str) -> StripResult<String> {
    let tokens = lexer::tokenize(content)?;
    let removed = removable_spans(content, &tokens);
    Ok(rebuild(content, &removed).trim().to_string())
}

/// Spans to drop, in source order
fn removable_spans(content: &str, tokens: &[Token]) -> Vec<Range<usize>> {
    let mut removed = Vec::new();
    let mut state = DocstringState::ExpectModuleDocstring;
    let mut opener = BlockOpener::None;
    let mut depth = 0usize;

    for token in tokens {
        match token.kind {
            TokenKind::Comment => removed.push(token.span()),
            TokenKind::Nl | TokenKind::EndMarker => {}
            TokenKind::Newline => {
                opener = if opener == BlockOpener::Colon {
                    BlockOpener::ColonNewline
                } else {
                    BlockOpener::None
                };
            }
            TokenKind::Indent => {
                depth += 1;
                if opener == BlockOpener::ColonNewline {
                    state = DocstringState::ExpectSuiteDocstring;
                }
                opener = BlockOpener::None;
            }
            TokenKind::Dedent => {
                depth = depth.saturating_sub(1);
                opener = BlockOpener::None;
            }
            TokenKind::String | TokenKind::Name | TokenKind::Number | TokenKind::Op => {
                let is_string = token.kind == TokenKind::String;
                let drop = match state {
                    DocstringState::ExpectModuleDocstring => {
                        is_string && depth == 0 && starts_line(content, token)
                    }
                    DocstringState::ExpectSuiteDocstring => is_string,
                    DocstringState::Normal => false,
                };
                if drop {
                    removed.push(token.span());
                }

                state = DocstringState::Normal;
                opener = if token.kind == TokenKind::Op && token.text(content) == ":" {
                    BlockOpener::Colon
                } else {
                    BlockOpener::None
                };
            }
        }
    }

    removed
}

/// Whether `token` is the first thing on its physical line
fn starts_line(content: &str, token: &Token) -> bool {
    let line_start = content[..token.start].rfind('\n').map_or(0, |i| i + 1);
    content[line_start..token.start]
        .chars()
        .all(|c| c == '\u{feff}')
}

/// Copy `content` without the `removed` spans.
///
/// Lines that only held removed text become empty and are dropped; space
/// left dangling before a removed trailing comment is trimmed.
fn rebuild(content: &str, removed: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut next = 0;
    let mut line_start = 0;

    for line in content.split_inclusive('\n') {
        let line_end = line_start + line.len();
        let body_end = line_start + line.trim_end_matches(['\n', '\r']).len();

        // Spans ending before this line are done with
        while next < removed.len() && removed[next].end <= line_start {
            next += 1;
        }

        let mut kept = String::new();
        let mut cursor = line_start;
        let mut touched = false;
        let mut touches_end = false;
        let mut idx = next;
        while idx < removed.len() && removed[idx].start < line_end {
            let span = &removed[idx];
            touched = true;
            let cut_start = span.start.max(line_start).min(body_end);
            let cut_end = span.end.min(body_end);
            if cut_start > cursor {
                kept.push_str(&content[cursor..cut_start]);
            }
            cursor = cursor.max(cut_end);
            if span.end >= body_end {
                touches_end = true;
            }
            idx += 1;
        }
        if cursor < body_end {
            kept.push_str(&content[cursor..body_end]);
        }

        if !touched {
            out.push_str(line);
        } else if !kept.trim().is_empty() {
            if touches_end {
                out.push_str(kept.trim_end());
            } else {
                out.push_str(&kept);
            }
            out.push_str(&content[body_end..line_end]);
        }

        line_start = line_end;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::StripError;

    #[test]
    fn test_comments_and_docstrings_removed() {
        let src = r#""""module docstring should go away"""

# a comment
x = 1  # inline comment
y = "string with # not a comment"

def f():
    """function docstring should go away"""
    s = """triple quoted but not a docstring"""
    return x
"#;
        let out = strip(src).unwrap();
        assert!(!out.contains("module docstring"));
        assert!(!out.contains("function docstring"));
        assert!(!out.contains("a comment\n"));
        assert!(!out.contains("inline comment"));
        assert!(out.contains(r#"y = "string with # not a comment""#));
        assert!(out.contains(r#"s = """triple quoted but not a docstring""""#));
        assert_eq!(
            out,
            "x = 1\ny = \"string with # not a comment\"\n\ndef f():\n    s = \"\"\"triple quoted but not a docstring\"\"\"\n    return x"
        );
    }

    #[test]
    fn test_module_docstring_after_comments() {
        let src = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n'''Doc.'''\nimport os\n";
        assert_eq!(strip(src).unwrap(), "import os");
    }

    #[test]
    fn test_string_after_code_is_not_module_docstring() {
        let src = "import os\n\"\"\"not a docstring\"\"\"\n";
        assert_eq!(strip(src).unwrap(), src.trim());
    }

    #[test]
    fn test_suite_docstrings_in_nested_blocks() {
        let src = "class A:\n    '''class doc'''\n\n    def m(self):\n        \"\"\"\n        method doc\n        \"\"\"\n        return 'kept'\n";
        let out = strip(src).unwrap();
        assert_eq!(out, "class A:\n\n    def m(self):\n        return 'kept'");
    }

    #[test]
    fn test_only_first_statement_of_suite_is_docstring() {
        let src = "def f():\n    x = 1\n    \"\"\"late string\"\"\"\n";
        assert_eq!(strip(src).unwrap(), src.trim());
    }

    #[test]
    fn test_suite_docstring_after_comment_line() {
        let src = "def f():  # why\n    # explain\n    \"doc\"\n    pass\n";
        assert_eq!(strip(src).unwrap(), "def f():\n    pass");
    }

    #[test]
    fn test_colon_outside_block_opener_keeps_strings() {
        let src = "d = {'a': 'b'}\nf = lambda: 'c'\nx: str = 'd'\n";
        assert_eq!(strip(src).unwrap(), src.trim());
    }

    #[test]
    fn test_hash_in_strings_preserved() {
        let src = "print('# hello')  # bye\nurl = \"http://x/#frag\"\n";
        assert_eq!(strip(src).unwrap(), "print('# hello')\nurl = \"http://x/#frag\"");
    }

    #[test]
    fn test_comment_inside_brackets() {
        let src = "items = [\n    1,  # one\n    # standalone\n    2,\n]\n";
        assert_eq!(strip(src).unwrap(), "items = [\n    1,\n    2,\n]");
    }

    #[test]
    fn test_idempotent() {
        let src = "\"\"\"Doc.\"\"\"\nimport sys  # sys\n\n\nclass C:\n    \"\"\"C doc\"\"\"\n    value = '''kept'''\n\n    def go(self):\n        # nothing\n        return self.value\n";
        let once = strip(src).unwrap();
        assert_eq!(strip(&once).unwrap(), once);
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        let err = strip("def f():\n    return 'oops\n").unwrap_err();
        assert!(matches!(err, StripError::Tokenize { line: 2, .. }));
    }

    #[test]
    fn test_rebuild_multiline_span() {
        let src = "a\n  \"\"\"x\ny\"\"\"\nb\n";
        let start = src.find("\"\"\"").unwrap();
        let end = src.rfind("\"\"\"").unwrap() + 3;
        assert_eq!(rebuild(src, &[start..end]), "a\nb\n");
    }
}
