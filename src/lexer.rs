use std::io::BufRead;

use log::trace;

use crate::token::Token;

pub mod error;
pub(crate) mod scan;

pub use error::{LexError, LexResult};

/// Spaces per indentation level.
const INDENT_WIDTH: usize = 2;

const KEYWORDS: [(&str, Token); 12] = [
    ("class", Token::Class),
    ("return", Token::Return),
    ("if", Token::If),
    ("else", Token::Else),
    ("def", Token::Def),
    ("print", Token::Print),
    ("and", Token::And),
    ("or", Token::Or),
    ("not", Token::Not),
    ("None", Token::None),
    ("True", Token::True),
    ("False", Token::False),
];

const COMPARISONS: [(&str, Token); 4] = [
    ("==", Token::Eq),
    ("!=", Token::NotEq),
    ("<=", Token::LessOrEq),
    (">=", Token::GreaterOrEq),
];

const KNOWN_CHARS: &str = "=.,():+-*/<>";

/// Pull-model lexer with one token of lookahead.
///
/// Source is consumed one line at a time. Indentation is compared against a
/// running level each time a fresh line is entered; at most one `Indent` or
/// `Dedent` is produced per call, so a jump of several levels is drained over
/// several calls before the line's first real token appears.
pub struct Lexer<R> {
    input: R,
    line: String,
    pos: usize,
    line_number: usize,
    indentation: usize,
    token: Token,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(input: R) -> LexResult<Self> {
        let mut lexer = Self {
            input,
            line: String::new(),
            pos: 0,
            line_number: 0,
            indentation: 0,
            token: Token::Eof,
        };
        lexer.next_token()?;
        Ok(lexer)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Advances to the next token and returns it.
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.token = self.read_token()?;
        Ok(self.token.clone())
    }

    /// 1-based number of the source line the lexer is positioned on.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_token(&mut self) -> LexResult<Token> {
        if !self.line.is_empty() && scan::is_blank(&self.line[self.pos..]) {
            self.line.clear();
            self.pos = 0;
            return Ok(Token::Newline);
        }

        if self.line.is_empty() {
            self.fetch_line()?;
        }

        if self.pos == 0 {
            if let Some(token) = self.indentation_token()? {
                return Ok(token);
            }
            if self.line.is_empty() {
                return Ok(Token::Eof);
            }
        }

        let rest = &self.line[self.pos..];
        let trimmed = rest.trim_start_matches([' ', '\t']);
        let skipped = rest.len() - trimmed.len();
        let (token, consumed) = scan_token(trimmed, self.line_number)?;
        self.pos += skipped + consumed;
        Ok(token)
    }

    /// Loads the next non-blank line; leaves the buffer empty at end of input.
    fn fetch_line(&mut self) -> LexResult<()> {
        self.pos = 0;
        loop {
            self.line.clear();
            let read = self
                .input
                .read_line(&mut self.line)
                .map_err(|err| LexError::Input {
                    message: err.to_string(),
                    line: self.line_number + 1,
                })?;
            if read == 0 {
                self.line.clear();
                return Ok(());
            }
            self.line_number += 1;
            let content_len = self.line.trim_end_matches(['\n', '\r']).len();
            self.line.truncate(content_len);
            if !scan::is_blank(&self.line) {
                trace!("line {}: {:?}", self.line_number, self.line);
                return Ok(());
            }
        }
    }

    fn indentation_token(&mut self) -> LexResult<Option<Token>> {
        let spaces = scan::leading_spaces(&self.line);
        if self.line[spaces..].starts_with('\t') {
            return Err(LexError::TabIndentation {
                line: self.line_number,
            });
        }
        let target = spaces / INDENT_WIDTH;
        if target > self.indentation {
            self.indentation += 1;
            Ok(Some(Token::Indent))
        } else if target < self.indentation {
            self.indentation -= 1;
            Ok(Some(Token::Dedent))
        } else {
            Ok(None)
        }
    }
}

/// Recognizes one token at the start of `text`, returning it with the number
/// of bytes it spans. Rules are tried in a fixed priority order.
fn scan_token(text: &str, line: usize) -> LexResult<(Token, usize)> {
    let consumed = |rest: &str| text.len() - rest.len();

    if let Some((digits, rest)) = scan::take_number(text) {
        let value = digits
            .parse::<i64>()
            .map_err(|_| LexError::InvalidIntegerLiteral {
                literal: digits.to_string(),
                line,
            })?;
        return Ok((Token::Number(value), consumed(rest)));
    }
    if let Some((keyword, rest)) = scan::take_keyword(text, &KEYWORDS) {
        return Ok((keyword, consumed(rest)));
    }
    if let Some((name, rest)) = scan::take_identifier(text) {
        return Ok((Token::Identifier(name.to_string()), consumed(rest)));
    }
    if let Some((comparison, rest)) = scan::take_pattern(text, &COMPARISONS) {
        return Ok((comparison, consumed(rest)));
    }
    if let Some(c) = text.chars().next().filter(|c| KNOWN_CHARS.contains(*c)) {
        return Ok((Token::Char(c), c.len_utf8()));
    }
    for quote in ['\'', '"'] {
        match scan::take_quoted(text, quote) {
            Some(Ok((literal, rest))) => {
                return Ok((Token::String(literal.to_string()), consumed(rest)));
            }
            Some(Err(())) => return Err(LexError::UnterminatedString { line }),
            None => {}
        }
    }
    Err(LexError::UnrecognizedToken {
        remainder: text.to_string(),
        line,
    })
}

/// Collects every token of `input` up to and including the first `Eof`.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(input.as_bytes())?;
    let mut tokens = vec![lexer.current_token().clone()];
    while *lexer.current_token() != Token::Eof {
        tokens.push(lexer.next_token()?);
    }
    Ok(tokens)
}
