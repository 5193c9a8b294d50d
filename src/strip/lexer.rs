/*!
 * Python lexer
 *
 * Splits Python source into tokens with byte spans, including the logical
 * `Newline`/`Indent`/`Dedent` structure. It recognises just enough of the
 * lexical grammar to tell comments and strings apart from everything else;
 * it does not validate syntax.
 */

use std::ops::Range;

use super::error::{StripError, StripResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    String,
    Name,
    Number,
    Op,
    /// End of a logical line
    Newline,
    /// Line break that does not end a logical line
    Nl,
    Indent,
    Dedent,
    EndMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
}

impl Token {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

const TRIPLE_OPS: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
const DOUBLE_OPS: &[&str] = &[
    "**", "//", ">>", "<<", "<=", ">=", "==", "!=", "->", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "@=", ":=",
];
const SINGLE_OPS: &str = "+-*/%@&|^~<>=.,:;!";
const STRING_PREFIXES: &[&str] = &["r", "u", "b", "f", "br", "rb", "fr", "rf"];
const TAB_SIZE: usize = 8;

/// Tokenize Python source
pub fn tokenize(source: &str) -> StripResult<Vec<Token>> {
    Lexer::new(source).run()
}

/// Byte offsets at which each physical line starts
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str, first_line_start: usize) -> Self {
        let mut starts = vec![first_line_start];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// 1-based line and 0-based character column of `offset`
    pub fn location(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        let line_start = self.starts[line - 1].min(offset);
        (line, source[line_start..offset].chars().count())
    }
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    lines: LineIndex,
    indents: Vec<usize>,
    /// Open brackets with their offsets
    brackets: Vec<(u8, usize)>,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        let bom = if src.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
        Self {
            src,
            bytes: src.as_bytes(),
            pos: bom,
            lines: LineIndex::new(src, bom),
            indents: vec![0],
            brackets: Vec::new(),
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> StripError {
        let (line, column) = self.lines.location(self.src, offset);
        StripError::Tokenize {
            line,
            column,
            message: message.into(),
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token { kind, start, end });
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn run(mut self) -> StripResult<Vec<Token>> {
        loop {
            if self.at_line_start && self.brackets.is_empty() {
                if !self.line_start()? {
                    break;
                }
                continue;
            }

            while matches!(self.peek_byte(0), Some(b' ' | b'\t' | b'\x0c')) {
                self.pos += 1;
            }

            let Some(c) = self.peek_char() else {
                break;
            };

            match c {
                '#' => self.comment(),
                '\n' | '\r' => self.line_break(),
                '\\' => self.continuation()?,
                '"' | '\'' => self.string(self.pos)?,
                c if c.is_ascii_digit() => self.number(),
                '.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => self.number(),
                c if is_identifier_start(c) => self.name_or_prefixed_string()?,
                '(' | '[' | '{' => {
                    self.brackets.push((c as u8, self.pos));
                    self.push(TokenKind::Op, self.pos, self.pos + 1);
                    self.pos += 1;
                }
                ')' | ']' | '}' => self.close_bracket(c as u8)?,
                _ => self.operator(c)?,
            }
        }

        self.finish()
    }

    /// Handle the start of a physical line outside brackets: blank and
    /// comment-only lines, then indentation. Returns `false` at end of input.
    fn line_start(&mut self) -> StripResult<bool> {
        let line_begin = self.pos;
        let mut width = 0;
        let mut cursor = self.pos;
        while let Some(&b) = self.bytes.get(cursor) {
            match b {
                b' ' => width += 1,
                b'\t' => width = (width / TAB_SIZE + 1) * TAB_SIZE,
                b'\x0c' => width = 0,
                _ => break,
            }
            cursor += 1;
        }

        match self.bytes.get(cursor) {
            None => {
                self.pos = cursor;
                return Ok(false);
            }
            Some(b'#') => {
                self.pos = cursor;
                self.comment();
                // The line break that follows is an Nl, never a Newline
                if matches!(self.peek_byte(0), Some(b'\n' | b'\r')) {
                    let start = self.pos;
                    self.consume_line_break();
                    self.push(TokenKind::Nl, start, self.pos);
                }
                return Ok(true);
            }
            Some(b'\n' | b'\r') => {
                self.pos = cursor;
                let start = self.pos;
                self.consume_line_break();
                self.push(TokenKind::Nl, start, self.pos);
                return Ok(true);
            }
            Some(_) => {}
        }

        let current = self.indents.last().copied().unwrap_or(0);
        if width > current {
            self.indents.push(width);
            self.push(TokenKind::Indent, line_begin, cursor);
        } else if width < current {
            while self.indents.last().is_some_and(|&level| width < level) {
                self.indents.pop();
                self.push(TokenKind::Dedent, cursor, cursor);
            }
            if self.indents.last() != Some(&width) {
                return Err(self.error(
                    cursor,
                    "unindent does not match any outer indentation level",
                ));
            }
        }

        self.pos = cursor;
        self.at_line_start = false;
        Ok(true)
    }

    fn consume_line_break(&mut self) {
        if self.peek_byte(0) == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek_byte(0) == Some(b'\n') {
            self.pos += 1;
        }
    }

    fn comment(&mut self) {
        let start = self.pos;
        while !matches!(self.peek_byte(0), None | Some(b'\n' | b'\r')) {
            self.pos += 1;
        }
        self.push(TokenKind::Comment, start, self.pos);
    }

    fn line_break(&mut self) {
        let start = self.pos;
        self.consume_line_break();
        if self.brackets.is_empty() {
            self.push(TokenKind::Newline, start, self.pos);
            self.at_line_start = true;
        } else {
            self.push(TokenKind::Nl, start, self.pos);
        }
    }

    fn continuation(&mut self) -> StripResult<()> {
        let start = self.pos;
        self.pos += 1;
        match self.peek_byte(0) {
            Some(b'\n' | b'\r') => {
                self.consume_line_break();
                Ok(())
            }
            None => Err(self.error(start, "unexpected EOF after line continuation character")),
            Some(_) => Err(self.error(
                start,
                "unexpected character after line continuation character",
            )),
        }
    }

    fn number(&mut self) {
        let start = self.pos;
        let is_hex_like = self.bytes[start] == b'0'
            && matches!(self.peek_byte(1), Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B'));
        let mut prev = 0u8;
        while let Some(b) = self.peek_byte(0) {
            let exponent_sign =
                matches!(b, b'+' | b'-') && matches!(prev, b'e' | b'E') && !is_hex_like;
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || exponent_sign {
                prev = b;
                self.pos += 1;
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start, self.pos);
    }

    fn name_or_prefixed_string(&mut self) -> StripResult<()> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if is_identifier_continue(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        let word = self.src[start..self.pos].to_ascii_lowercase();
        if matches!(self.peek_byte(0), Some(b'"' | b'\'')) && STRING_PREFIXES.contains(&word.as_str()) {
            return self.string(start);
        }

        self.push(TokenKind::Name, start, self.pos);
        Ok(())
    }

    /// Lex a string literal whose prefix (possibly empty) starts at `start`
    /// and whose opening quote is at the current position.
    fn string(&mut self, start: usize) -> StripResult<()> {
        let quote = self.bytes[self.pos];
        let triple = self.peek_byte(1) == Some(quote) && self.peek_byte(2) == Some(quote);
        let mut i = self.pos + if triple { 3 } else { 1 };

        loop {
            let Some(&b) = self.bytes.get(i) else {
                let message = if triple {
                    "EOF in multi-line string"
                } else {
                    "unterminated string literal"
                };
                return Err(self.error(start, message));
            };

            match b {
                // Continuation bytes of multi-byte characters never equal
                // an ASCII quote or backslash, so skipping one byte is safe.
                // A CRLF continuation is one escaped line break
                b'\\' if self.bytes.get(i + 1) == Some(&b'\r')
                    && self.bytes.get(i + 2) == Some(&b'\n') =>
                {
                    i += 3
                }
                b'\\' => i += 2,
                b'\n' | b'\r' if !triple => {
                    return Err(self.error(start, "unterminated string literal"));
                }
                _ if b == quote => {
                    if !triple {
                        i += 1;
                        break;
                    }
                    if self.bytes.get(i + 1) == Some(&quote) && self.bytes.get(i + 2) == Some(&quote) {
                        i += 3;
                        break;
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }

        self.pos = i;
        self.push(TokenKind::String, start, i);
        Ok(())
    }

    fn close_bracket(&mut self, close: u8) -> StripResult<()> {
        let expected = match close {
            b')' => b'(',
            b']' => b'[',
            _ => b'{',
        };
        match self.brackets.pop() {
            Some((open, _)) if open == expected => {
                self.push(TokenKind::Op, self.pos, self.pos + 1);
                self.pos += 1;
                Ok(())
            }
            Some((open, _)) => Err(self.error(
                self.pos,
                format!(
                    "closing parenthesis '{}' does not match opening parenthesis '{}'",
                    close as char, open as char
                ),
            )),
            None => Err(self.error(self.pos, format!("unmatched '{}'", close as char))),
        }
    }

    fn operator(&mut self, c: char) -> StripResult<()> {
        let rest = &self.src[self.pos..];
        let len = TRIPLE_OPS
            .iter()
            .chain(DOUBLE_OPS)
            .find(|op| rest.starts_with(*op))
            .map(|op| op.len())
            .or_else(|| SINGLE_OPS.contains(c).then_some(1));

        match len {
            Some(len) => {
                self.push(TokenKind::Op, self.pos, self.pos + len);
                self.pos += len;
                Ok(())
            }
            None => Err(self.error(self.pos, format!("invalid character '{}'", c))),
        }
    }

    fn finish(mut self) -> StripResult<Vec<Token>> {
        if let Some(&(open, offset)) = self.brackets.first() {
            return Err(self.error(
                offset,
                format!("unexpected EOF in multi-line statement: '{}' was never closed", open as char),
            ));
        }

        let end = self.src.len();
        if !self.at_line_start {
            self.push(TokenKind::Newline, end, end);
        }
        for _ in 1..self.indents.len() {
            self.push(TokenKind::Dedent, end, end);
        }
        self.push(TokenKind::EndMarker, end, end);
        Ok(self.tokens)
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
