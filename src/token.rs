use crate::error::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,

    // Identifiers + literals
    Ident,
    IntLit,
    RealLit,
    CharLit,
    StringLit,
    True,
    False,

    // Operators
    Assign,
    Plus,
    Minus,
    Star,
    Slash,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    Dot,

    // Keywords
    And,
    Array,
    Begin,
    Case,
    Const,
    Div,
    Do,
    Downto,
    Else,
    End,
    File,
    For,
    Forward,
    Function,
    Goto,
    If,
    In,
    Label,
    Mod,
    Nil,
    Not,
    Of,
    Or,
    Packed,
    Procedure,
    Program,
    Record,
    Repeat,
    Set,
    Then,
    To,
    Type,
    Until,
    Var,
    While,
    With,
    Writeln,

    // Type names
    Integer,
    Real,
    Boolean,
    Char,
    String,
}

impl TokenKind {
    /// Resolves an already lowercased word against the reserved-word table.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "and" => TokenKind::And,
            "array" => TokenKind::Array,
            "begin" => TokenKind::Begin,
            "case" => TokenKind::Case,
            "const" => TokenKind::Const,
            "div" => TokenKind::Div,
            "do" => TokenKind::Do,
            "downto" => TokenKind::Downto,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "file" => TokenKind::File,
            "for" => TokenKind::For,
            "forward" => TokenKind::Forward,
            "function" => TokenKind::Function,
            "goto" => TokenKind::Goto,
            "if" => TokenKind::If,
            "in" => TokenKind::In,
            "label" => TokenKind::Label,
            "mod" => TokenKind::Mod,
            "nil" => TokenKind::Nil,
            "not" => TokenKind::Not,
            "of" => TokenKind::Of,
            "or" => TokenKind::Or,
            "packed" => TokenKind::Packed,
            "procedure" => TokenKind::Procedure,
            "program" => TokenKind::Program,
            "record" => TokenKind::Record,
            "repeat" => TokenKind::Repeat,
            "set" => TokenKind::Set,
            "then" => TokenKind::Then,
            "to" => TokenKind::To,
            "type" => TokenKind::Type,
            "until" => TokenKind::Until,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            "with" => TokenKind::With,
            "writeln" => TokenKind::Writeln,
            "integer" => TokenKind::Integer,
            "real" => TokenKind::Real,
            "boolean" => TokenKind::Boolean,
            "char" => TokenKind::Char,
            "string" => TokenKind::String,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// True for the five keywords accepted after `:` in a declaration.
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Real
                | TokenKind::Boolean
                | TokenKind::Char
                | TokenKind::String
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::IntLit => "INT",
            TokenKind::RealLit => "REAL_LIT",
            TokenKind::CharLit => "CHAR_LIT",
            TokenKind::StringLit => "STRING_LIT",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Dot => "DOT",
            TokenKind::And => "AND",
            TokenKind::Array => "ARRAY",
            TokenKind::Begin => "BEGIN",
            TokenKind::Case => "CASE",
            TokenKind::Const => "CONST",
            TokenKind::Div => "DIV",
            TokenKind::Do => "DO",
            TokenKind::Downto => "DOWNTO",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::File => "FILE",
            TokenKind::For => "FOR",
            TokenKind::Forward => "FORWARD",
            TokenKind::Function => "FUNCTION",
            TokenKind::Goto => "GOTO",
            TokenKind::If => "IF",
            TokenKind::In => "IN",
            TokenKind::Label => "LABEL",
            TokenKind::Mod => "MOD",
            TokenKind::Nil => "NIL",
            TokenKind::Not => "NOT",
            TokenKind::Of => "OF",
            TokenKind::Or => "OR",
            TokenKind::Packed => "PACKED",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Program => "PROGRAM",
            TokenKind::Record => "RECORD",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Set => "SET",
            TokenKind::Then => "THEN",
            TokenKind::To => "TO",
            TokenKind::Type => "TYPE",
            TokenKind::Until => "UNTIL",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::With => "WITH",
            TokenKind::Writeln => "WRITELN",
            TokenKind::Integer => "INTEGER",
            TokenKind::Real => "REAL",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Char => "CHAR",
            TokenKind::String => "STRING",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lexical unit. `line` and `column` are 1-based and point at the first
/// character; `span` is the byte range used when rendering diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: String, line: usize, column: usize, span: Span) -> Self {
        Self {
            kind,
            literal,
            line,
            column,
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
