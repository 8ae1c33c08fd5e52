use crate::ast::{BinaryOp, CompoundStmt, Expr, Program, Stmt, VarDecl};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use log::{debug, trace};

/// Recursive-descent parser with one token of lookahead.
///
/// Diagnostics accumulate in `errors`; a production that fails returns
/// `None` and its caller leaves it out of the tree.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// program := "program" IDENT ";" {varDecl} compound "."
    pub fn parse_program(&mut self) -> Option<Program> {
        if !self.current_is(TokenKind::Program) {
            self.error_got(
                "Expected 'program' keyword",
                "A Pascal program must start with the 'program' keyword.",
            );
            return None;
        }
        self.next_token();

        if !self.current_is(TokenKind::Ident) {
            self.error_got(
                "Expected program name",
                "The 'program' keyword must be followed by an identifier.",
            );
            return None;
        }
        let name = self.current.literal.clone();
        self.next_token();

        if !self.current_is(TokenKind::Semicolon) {
            self.error_got("Expected semicolon", "Statements must end with a semicolon.");
            return None;
        }
        self.next_token();

        let mut declarations = Vec::new();
        while self.current_is(TokenKind::Var) {
            if let Some(decl) = self.parse_var_decl() {
                declarations.push(decl);
            }
        }

        if !self.current_is(TokenKind::Begin) {
            self.error_got(
                "Expected 'begin' block",
                "A Pascal program must have a 'begin' block to define its main body.",
            );
            return None;
        }
        let main = self.parse_compound();

        if !self.current_is(TokenKind::Dot) {
            self.error_got(
                "Expected '.' at the end of the program",
                "A Pascal program must end with a period ('.').",
            );
            return None;
        }

        debug!(
            "parsed program '{}': {} declaration(s), {} statement(s)",
            name,
            declarations.len(),
            main.statements.len()
        );
        Some(Program {
            name,
            declarations,
            main,
        })
    }

    /// varDecl := "var" IDENT ":" typeKeyword ";"
    fn parse_var_decl(&mut self) -> Option<VarDecl> {
        self.next_token();

        if !self.current_is(TokenKind::Ident) {
            self.error_got(
                "Expected variable name after 'var'",
                "Variable declarations must start with a valid identifier.",
            );
            return None;
        }
        let name = self.current.literal.clone();
        self.next_token();

        if !self.current_is(TokenKind::Colon) {
            self.error_got(
                "Expected ':' after variable name",
                "Variable declarations must specify a type after the colon.",
            );
            return None;
        }
        self.next_token();

        if !self.current.kind.is_type_name() {
            self.error_got(
                "Expected type for variable",
                "Supported types are: integer, real, boolean, char, string.",
            );
            return None;
        }
        let type_name = self.current.literal.clone();
        self.next_token();

        if !self.current_is(TokenKind::Semicolon) {
            self.error_got(
                "Expected ';' after variable declaration",
                "Variable declarations must end with a semicolon.",
            );
            return None;
        }
        self.next_token();

        Some(VarDecl { name, type_name })
    }

    /// compound := "begin" {statement} "end"
    ///
    /// Statements are tried at every token until `end`, `.` or EOF, so a
    /// broken statement only costs the tokens up to the next one that
    /// starts a statement.
    fn parse_compound(&mut self) -> CompoundStmt {
        let mut statements = Vec::new();
        self.next_token();

        while !matches!(
            self.current.kind,
            TokenKind::End | TokenKind::Eof | TokenKind::Dot
        ) {
            match self.parse_statement() {
                // A nested block has already stepped past its own `end`
                Some(stmt @ Stmt::Compound(_)) => {
                    statements.push(stmt);
                    continue;
                }
                Some(stmt) => statements.push(stmt),
                None => {}
            }
            self.next_token();
        }

        if self.current_is(TokenKind::End) {
            self.next_token();
        }

        CompoundStmt { statements }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current.kind {
            TokenKind::Ident if self.peek.is(TokenKind::Assign) => self.parse_assignment(),
            TokenKind::Ident => {
                self.error(
                    format!("Unexpected identifier '{}'", self.current.literal),
                    "This identifier is not part of an assignment or recognized statement.",
                    "Make sure you're using ':=' for assignments or a known keyword like 'writeln'.",
                );
                self.next_token();
                None
            }
            TokenKind::Writeln => self.parse_print(),
            TokenKind::Begin => Some(Stmt::Compound(self.parse_compound())),
            _ => {
                trace!(
                    "skipping {} {:?} at {}:{}",
                    self.current.kind,
                    self.current.literal,
                    self.current.line,
                    self.current.column
                );
                None
            }
        }
    }

    /// assignment := IDENT ":=" expression ";"
    fn parse_assignment(&mut self) -> Option<Stmt> {
        let name = self.current.literal.clone();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression()?;

        if !self.current_is(TokenKind::Semicolon) {
            self.error_got(
                "Expected semicolon at the end of assignment",
                "Assignments must end with a semicolon.",
            );
            return None;
        }

        Some(Stmt::Assign { name, value })
    }

    /// printStmt := "writeln" "(" expression ")" ";"
    fn parse_print(&mut self) -> Option<Stmt> {
        self.next_token();

        if !self.current_is(TokenKind::LParen) {
            self.error_got(
                "Expected '(' after 'writeln'",
                "The 'writeln' keyword must be followed by parentheses containing the argument.",
            );
            return None;
        }
        self.next_token();

        let argument = self.parse_expression()?;

        if !self.current_is(TokenKind::RParen) {
            self.error_got(
                "Expected ')' after writeln argument",
                "Ensure the argument to 'writeln' is enclosed in parentheses.",
            );
            return None;
        }
        self.next_token();

        if !self.current_is(TokenKind::Semicolon) {
            self.error_got("Expected ';' after writeln", "Statements must end with a semicolon.");
            return None;
        }

        Some(Stmt::Print { argument })
    }

    /// expression := term {("+"|"-") term}
    pub fn parse_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let operator = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.next_token();
            let right = self.parse_term()?;
            left = Expr::binary(left, operator, right);
        }

        Some(left)
    }

    /// term := factor {("*"|"/") factor}
    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_factor()?;

        loop {
            let operator = match self.current.kind {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.next_token();
            let right = self.parse_factor()?;
            left = Expr::binary(left, operator, right);
        }

        Some(left)
    }

    fn parse_factor(&mut self) -> Option<Expr> {
        let expr = match self.current.kind {
            TokenKind::LParen => {
                self.next_token();
                let inner = self.parse_expression()?;

                if !self.current_is(TokenKind::RParen) {
                    self.error_got(
                        "Expected closing parenthesis",
                        "Ensure all opening parentheses have matching closing parentheses.",
                    );
                    return None;
                }
                inner
            }
            TokenKind::IntLit => match self.current.literal.parse::<i64>() {
                Ok(n) => Expr::IntegerLiteral(n),
                Err(_) => {
                    self.error(
                        "Integer literal out of range",
                        format!("'{}' does not fit in a 64-bit integer.", self.current.literal),
                        "Use a smaller number or a real literal.",
                    );
                    return None;
                }
            },
            TokenKind::RealLit => match self.current.literal.parse::<f64>() {
                Ok(n) => Expr::RealLiteral(n),
                Err(_) => {
                    self.error_got("Invalid real literal", "Real literals look like 3.14.");
                    return None;
                }
            },
            TokenKind::True => Expr::BooleanLiteral(true),
            TokenKind::False => Expr::BooleanLiteral(false),
            TokenKind::CharLit => match self.current.literal.chars().next() {
                Some(c) => Expr::CharLiteral(c),
                None => {
                    self.error_got("Invalid character literal", "Character literals hold exactly one character.");
                    return None;
                }
            },
            TokenKind::StringLit => Expr::StringLiteral(self.current.literal.clone()),
            TokenKind::Ident => Expr::Identifier(self.current.literal.clone()),
            _ => {
                self.error_got(
                    "Unexpected token in primary expression",
                    "Check the syntax of your expression.",
                );
                return None;
            }
        };

        self.next_token();
        Some(expr)
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.is(kind) {
            self.next_token();
            return true;
        }
        let token = self.peek.clone();
        self.error_at(
            &token,
            format!("Expected next token to be {}", kind),
            format!("Got {:?} ({}) instead.", token.literal, token.kind),
            "Check the syntax of your program.",
        );
        false
    }

    /// Records an error whose detail names the current token.
    fn error_got(&mut self, message: &str, hint: &str) {
        let detail = format!("Got {:?} ({}) instead.", self.current.literal, self.current.kind);
        self.error(message, detail, hint);
    }

    fn error(&mut self, message: impl Into<String>, detail: impl Into<String>, hint: impl Into<String>) {
        let token = self.current.clone();
        self.error_at(&token, message, detail, hint);
    }

    fn error_at(
        &mut self,
        token: &Token,
        message: impl Into<String>,
        detail: impl Into<String>,
        hint: impl Into<String>,
    ) {
        let error = ParseError {
            message: message.into(),
            detail: detail.into(),
            hint: hint.into(),
            line: token.line,
            column: token.column,
            span: token.span.clone(),
        };
        debug!("{}", error);
        self.errors.push(error);
    }
}
