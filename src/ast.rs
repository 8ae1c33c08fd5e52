//! Syntax tree for a single program. Every node owns its children.

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub declarations: Vec<VarDecl>,
    pub main: CompoundStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    /// Lowercased type keyword as written in the source.
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStmt {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { name: String, value: Expr },
    Print { argument: Expr },
    Compound(CompoundStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLiteral(i64),
    RealLiteral(f64),
    BooleanLiteral(bool),
    CharLiteral(char),
    StringLiteral(String),
    Identifier(String),
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}
