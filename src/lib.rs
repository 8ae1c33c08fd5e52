// Pastel Language Interpreter Library
//
// Core of the interpreter for a small Pascal-like language: a streaming
// lexer, a recursive-descent parser that collects diagnostics, and a
// tree-walking evaluator over a single global scope.

// Public modules
pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runner;
pub mod token;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, CompoundStmt, Expr, Program, Stmt, VarDecl};
pub use environment::Environment;
pub use error::{ParseError, PipelineError, RuntimeError, RuntimeErrorKind, Span};
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};
pub use value::{Value, ValueKind};

// Re-export main functions
pub use runner::{interpret, parse, run, RunOutcome};
