/*!
 * Shell-style glob matching
 *
 * Anchored `fnmatch` semantics: `*` matches any run of characters (path
 * separators included), `?` matches exactly one character and `[...]`
 * matches a character class. Everything else matches literally.
 */

/// One element of a compiled class such as `[a-z_]`
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// `*`
    AnyRun,
    /// `?`
    AnyOne,
    /// `[...]` or `[!...]`
    Class { negated: bool, items: Vec<ClassItem> },
    Literal(char),
}

impl Token {
    fn matches_one(&self, c: char) -> bool {
        match self {
            Token::AnyRun => true,
            Token::AnyOne => true,
            Token::Literal(l) => *l == c,
            Token::Class { negated, items } => {
                let hit = items.iter().any(|item| match *item {
                    ClassItem::Single(s) => s == c,
                    ClassItem::Range(lo, hi) => lo <= c && c <= hi,
                });
                hit != *negated
            }
        }
    }
}

/// A compiled glob pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    tokens: Vec<Token>,
}

impl Glob {
    /// Compile a pattern. Never fails: a `[` without a closing `]` is
    /// matched as a literal bracket.
    pub fn new(pattern: &str) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '*' => {
                    // Consecutive stars are equivalent to one
                    if tokens.last() != Some(&Token::AnyRun) {
                        tokens.push(Token::AnyRun);
                    }
                    i += 1;
                }
                '?' => {
                    tokens.push(Token::AnyOne);
                    i += 1;
                }
                '[' => match parse_class(&chars, i + 1) {
                    Some((token, next)) => {
                        tokens.push(token);
                        i = next;
                    }
                    None => {
                        tokens.push(Token::Literal('['));
                        i += 1;
                    }
                },
                c => {
                    tokens.push(Token::Literal(c));
                    i += 1;
                }
            }
        }

        Self { tokens }
    }

    /// Test whether the whole of `text` matches this pattern
    pub fn is_match(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().collect();
        let tokens = &self.tokens;
        let (mut t, mut p) = (0, 0);
        // Token index after the most recent `*` and the text position it resumes from
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            if let Some(token) = tokens.get(p) {
                if *token == Token::AnyRun {
                    backtrack = Some((p + 1, t));
                    p += 1;
                    continue;
                }
                if token.matches_one(text[t]) {
                    p += 1;
                    t += 1;
                    continue;
                }
            }

            match backtrack {
                Some((resume_p, resume_t)) => {
                    p = resume_p;
                    t = resume_t + 1;
                    backtrack = Some((resume_p, resume_t + 1));
                }
                None => return false,
            }
        }

        tokens[p..].iter().all(|token| *token == Token::AnyRun)
    }
}

/// Parse a class body starting right after `[`. Returns the token and the
/// index just past the closing `]`, or `None` when there is no closing bracket.
fn parse_class(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let mut j = start;
    let negated = chars.get(j) == Some(&'!');
    if negated {
        j += 1;
    }
    let body_start = j;
    // A `]` right after the opening bracket is part of the class
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    if j >= chars.len() {
        return None;
    }

    let body = &chars[body_start..j];
    let mut items = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            let (lo, hi) = (body[k], body[k + 2]);
            // Reversed ranges match nothing
            if lo <= hi {
                items.push(ClassItem::Range(lo, hi));
            }
            k += 3;
        } else {
            items.push(ClassItem::Single(body[k]));
            k += 1;
        }
    }

    Some((Token::Class { negated, items }, j + 1))
}

/// Match `text` against a shell-style `pattern`
pub fn matches(text: &str, pattern: &str) -> bool {
    Glob::new(pattern).is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_and_anchoring() {
        assert!(matches("build.txt", "build.txt"));
        assert!(!matches("build.txt.bak", "build.txt"));
        assert!(!matches("xbuild.txt", "build.txt"));
        assert!(matches("", ""));
        assert!(!matches("a", ""));
    }

    #[test]
    fn test_star() {
        assert!(matches("x.log", "*.log"));
        assert!(matches(".log", "*.log"));
        assert!(!matches("x.log.txt", "*.log"));
        assert!(matches("nested/dir/x.log", "*.log"));
        assert!(matches("anything", "*"));
        assert!(matches("", "*"));
        assert!(matches("abcabd", "a*b*d"));
        assert!(matches("aaa", "a**a"));
    }

    #[test]
    fn test_question_mark() {
        assert!(matches("a.c", "a?c"));
        assert!(!matches("ac", "a?c"));
        assert!(!matches("abbc", "a?c"));
    }

    #[test]
    fn test_classes() {
        assert!(matches("file1", "file[0-9]"));
        assert!(!matches("filex", "file[0-9]"));
        assert!(matches("filex", "file[!0-9]"));
        assert!(matches("b", "[abc]"));
        assert!(matches("]", "[]]"));
        assert!(matches("-", "[a-]"));
        assert!(!matches("m", "[z-a]"));
    }

    #[test]
    fn test_malformed_bracket_is_literal() {
        assert!(matches("[abc", "[abc"));
        assert!(!matches("a", "[abc"));
        assert!(matches("x[1", "x[*"));
    }

    #[test]
    fn test_directory_patterns() {
        assert!(matches("build/", "build/"));
        assert!(!matches("build", "build/"));
        assert!(matches("target/", "*/"));
    }

    #[test]
    fn test_multibyte() {
        assert!(matches("héllo", "h?llo"));
        assert!(matches("日本語.md", "*.md"));
    }
}
