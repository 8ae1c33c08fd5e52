use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A syntax diagnostic. Parsing collects these instead of stopping at the
/// first one.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub detail: String,
    pub hint: String,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl ParseError {
    pub fn report(&self, source: &str, filename: Option<&str>) -> std::io::Result<()> {
        let filename = filename.unwrap_or("<input>");
        // Zero-width spans (EOF) still need something to point at
        let end = self.span.end.max(self.span.start + 1).min(source.len().max(1));
        let start = self.span.start.min(end.saturating_sub(1));

        // Spans hold byte offsets
        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(format!("{}: {}", "Parse Error".fg(Color::Yellow), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.detail)
                    .with_color(Color::Yellow),
            );

        if !self.hint.is_empty() {
            report_builder = report_builder.with_help(&self.hint);
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line > 0 {
            write!(
                f,
                "[Parser Error] at line {}, column {}: {}",
                self.line, self.column, self.message
            )?;
        } else {
            write!(f, "[Parser Error] {}", self.message)?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n  -> {}", self.detail)?;
        }
        if !self.hint.is_empty() {
            write!(f, "\n  Hint: {}", self.hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndeclaredVariable,
    UndefinedVariable,
    TypeMismatch,
    DivisionByZero,
    Output,
}

/// A fatal evaluation error. Carries no position: the tree holds none.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
    pub detail: String,
    pub hint: String,
}

impl RuntimeError {
    pub fn new(
        kind: RuntimeErrorKind,
        message: impl Into<String>,
        detail: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: detail.into(),
            hint: hint.into(),
        }
    }

    pub fn undeclared_variable(name: &str) -> Self {
        Self::new(
            RuntimeErrorKind::UndeclaredVariable,
            format!("Undeclared variable '{}'", name),
            "This variable is being assigned but was never declared with a type.",
            format!("Try adding `var {}: integer;` at the top of your program.", name),
        )
    }

    pub fn undefined_variable(name: &str) -> Self {
        Self::new(
            RuntimeErrorKind::UndefinedVariable,
            format!("Undefined variable '{}'", name),
            "This variable is being used but was never declared.",
            format!("Declare the variable using `var {}: integer;` before using it.", name),
        )
    }

    pub fn type_mismatch(operator: &str, left: &str, right: &str) -> Self {
        Self::new(
            RuntimeErrorKind::TypeMismatch,
            format!("Type mismatch for operator '{}'", operator),
            format!("Cannot apply '{}' to {} and {}.", operator, left, right),
            match operator {
                "+" => "'+' works on numbers (integer, real) or text (char, string).",
                _ => "Arithmetic operators only work on integer and real values.",
            },
        )
    }

    pub fn division_by_zero() -> Self {
        Self::new(
            RuntimeErrorKind::DivisionByZero,
            "Division by zero",
            "An attempt was made to divide by zero.",
            "Ensure the divisor is not zero before performing division.",
        )
    }

    pub fn output(err: std::io::Error) -> Self {
        Self::new(
            RuntimeErrorKind::Output,
            "Failed to write output",
            err.to_string(),
            "Check that the output stream is still open.",
        )
    }

    pub fn report(&self, source: &str, filename: Option<&str>) -> std::io::Result<()> {
        let filename = filename.unwrap_or("<input>");

        Report::<(&str, std::ops::Range<usize>)>::build(ReportKind::Error, filename, 0)
            .with_message(format!("{}: {}", "Runtime Error".fg(Color::Magenta), self.message))
            .with_note(&self.detail)
            .with_help(&self.hint)
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[Runtime Error] {}", self.message)?;
        if !self.detail.is_empty() {
            write!(f, "\n  -> {}", self.detail)?;
        }
        if !self.hint.is_empty() {
            write!(f, "\n  Hint: {}", self.hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

/// Failure of a whole lex/parse/run pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{} parse error(s)", .0.len())]
    Parse(Vec<ParseError>),
    #[error("{error}")]
    Runtime { error: RuntimeError, output: String },
}
