/*!
 * Comment removal for C-like and JS-like sources
 *
 * A single pass over the characters. Quoted literals are copied verbatim so
 * that comment delimiters inside them are never mistaken for comments.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InLineComment,
    InBlockComment,
    InStringLiteral,
    InCharLiteral,
}

/// Remove `//` and `/* */` comments, keeping string and char literals intact
pub fn strip(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut state = State::Normal;
    let mut escape = false;

    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::InLineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::InBlockComment;
                }
                '"' => {
                    out.push(c);
                    state = State::InStringLiteral;
                }
                '\'' => {
                    out.push(c);
                    state = State::InCharLiteral;
                }
                _ => out.push(c),
            },
            State::InLineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Normal;
                }
            }
            State::InBlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Normal;
                }
            }
            State::InStringLiteral | State::InCharLiteral => {
                out.push(c);
                let quote = if state == State::InStringLiteral { '"' } else { '\'' };
                if escape {
                    escape = false;
                } else if c == '\\' {
                    escape = true;
                } else if c == quote {
                    state = State::Normal;
                }
            }
        }
    }

    out.trim().to_string()
}
