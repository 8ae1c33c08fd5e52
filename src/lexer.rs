use crate::error::Span;
use crate::token::{Token, TokenKind};
use log::trace;

/// Streaming lexer: tokens are produced on demand by `next_token`.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    read_position: usize,
    ch: char,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: '\0',
            line: 1,
            column: 0,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns an EOF token at the same position.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        // Position is taken before the token is consumed
        let line = self.line;
        let column = self.column;
        let start = self.position;

        if self.is_at_end() {
            return Token::new(
                TokenKind::Eof,
                String::new(),
                line,
                column,
                Span::new(self.input.len(), self.input.len()),
            );
        }

        if self.ch.is_ascii_alphabetic() {
            let literal = self.read_identifier();
            let kind = TokenKind::keyword(&literal).unwrap_or(TokenKind::Ident);
            return Token::new(kind, literal, line, column, Span::new(start, self.position));
        }

        if self.ch.is_ascii_digit() {
            let (literal, is_real) = self.read_number();
            let kind = if is_real {
                TokenKind::RealLit
            } else {
                TokenKind::IntLit
            };
            return Token::new(kind, literal, line, column, Span::new(start, self.position));
        }

        if self.ch == '\'' {
            let literal = self.read_string();
            let kind = if literal.chars().count() == 1 {
                TokenKind::CharLit
            } else {
                TokenKind::StringLit
            };
            return Token::new(kind, literal, line, column, Span::new(start, self.position));
        }

        let kind = match self.ch {
            ':' if self.peek_char() == '=' => {
                self.read_char();
                TokenKind::Assign
            }
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '.' => TokenKind::Dot,
            _ => TokenKind::Illegal,
        };
        self.read_char();

        let literal = self.input[start..self.position].to_string();
        if kind == TokenKind::Illegal {
            trace!("illegal character {:?} at {}:{}", literal, line, column);
        }
        Token::new(kind, literal, line, column, Span::new(start, self.position))
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn read_char(&mut self) {
        self.position = self.read_position;
        match self.input[self.read_position..].chars().next() {
            Some(c) => {
                self.ch = c;
                self.read_position += c.len_utf8();
            }
            None => self.ch = '\0',
        }

        if self.ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn peek_char(&self) -> char {
        self.input[self.read_position..].chars().next().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && matches!(self.ch, ' ' | '\t' | '\n' | '\r') {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while !self.is_at_end() && self.ch.is_ascii_alphanumeric() {
            self.read_char();
        }
        self.input[start..self.position].to_ascii_lowercase()
    }

    fn read_number(&mut self) -> (String, bool) {
        let start = self.position;
        let mut is_real = false;

        while !self.is_at_end() && self.ch.is_ascii_digit() {
            self.read_char();
        }

        // A dot only belongs to the number when a digit follows it
        if self.ch == '.' && self.peek_char().is_ascii_digit() {
            is_real = true;
            self.read_char();
            while !self.is_at_end() && self.ch.is_ascii_digit() {
                self.read_char();
            }
        }

        (self.input[start..self.position].to_string(), is_real)
    }

    fn read_string(&mut self) -> String {
        // Skip the opening quote
        self.read_char();
        let start = self.position;

        while !self.is_at_end() && self.ch != '\'' {
            self.read_char();
        }

        let content = self.input[start..self.position].to_string();
        if !self.is_at_end() {
            self.read_char();
        }
        content
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first EOF.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}
