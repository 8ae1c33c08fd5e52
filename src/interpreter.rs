use crate::ast::{BinaryOp, Expr, Program, Stmt};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::value::{Value, ValueKind};
use log::debug;
use std::io::{self, Write};

/// Tree-walking evaluator. Owns the environment for one run and the sink
/// that `writeln` output goes to.
pub struct Interpreter<W: Write = io::Stdout> {
    environment: Environment,
    output: W,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(output: W) -> Self {
        Self {
            environment: Environment::new(),
            output,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Declares every variable with its type's zero value, then runs the
    /// main block. Stops at the first runtime error.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for decl in &program.declarations {
            let kind = ValueKind::from_type_name(&decl.type_name);
            debug!("declare {}: {}", decl.name, kind);
            self.environment.define(&decl.name, Value::zero(kind));
        }

        for stmt in &program.main.statements {
            self.exec(stmt)?;
        }
        self.output.flush().map_err(RuntimeError::output)
    }

    pub fn exec(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Assign { name, value } => {
                if !self.environment.exists(name) {
                    return Err(RuntimeError::undeclared_variable(name));
                }
                let value = self.eval(value)?;
                debug!("{} := {}", name, value);
                if !self.environment.set(name, value) {
                    return Err(RuntimeError::undeclared_variable(name));
                }
            }
            Stmt::Print { argument } => {
                let value = self.eval(argument)?;
                writeln!(self.output, "{}", value).map_err(RuntimeError::output)?;
            }
            Stmt::Compound(block) => {
                for stmt in &block.statements {
                    self.exec(stmt)?;
                }
            }
        }
        Ok(())
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntegerLiteral(n) => Ok(Value::Integer(*n)),
            Expr::RealLiteral(n) => Ok(Value::Real(*n)),
            Expr::BooleanLiteral(b) => Ok(Value::Boolean(*b)),
            Expr::CharLiteral(c) => Ok(Value::Char(*c)),
            Expr::StringLiteral(s) => Ok(Value::String(s.clone())),
            Expr::Identifier(name) => self
                .environment
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::undefined_variable(name)),
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary_op(*operator, left, right)
            }
        }
    }
}

fn evaluate_binary_op(operator: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator {
        BinaryOp::Add => match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l.wrapping_add(r))),
            (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
            (Value::String(mut l), Value::Char(r)) => {
                l.push(r);
                Ok(Value::String(l))
            }
            (Value::Char(l), Value::String(r)) => Ok(Value::String(format!("{}{}", l, r))),
            (Value::Char(l), Value::Char(r)) => Ok(Value::String(format!("{}{}", l, r))),
            (l, r) => real_op(operator, &l, &r, |a, b| a + b),
        },
        BinaryOp::Subtract => match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l.wrapping_sub(r))),
            (l, r) => real_op(operator, &l, &r, |a, b| a - b),
        },
        BinaryOp::Multiply => match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l.wrapping_mul(r))),
            (l, r) => real_op(operator, &l, &r, |a, b| a * b),
        },
        BinaryOp::Divide => {
            if is_zero(&right) {
                return Err(RuntimeError::division_by_zero());
            }
            match (left, right) {
                // Truncates toward zero
                (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l.wrapping_div(r))),
                (l, r) => real_op(operator, &l, &r, |a, b| a / b),
            }
        }
    }
}

/// Widens integer operands and applies `op` when both sides are numeric.
fn real_op(
    operator: BinaryOp,
    left: &Value,
    right: &Value,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (as_real(left), as_real(right)) {
        (Some(l), Some(r)) => Ok(Value::Real(op(l, r))),
        _ => Err(RuntimeError::type_mismatch(
            operator.symbol(),
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn as_real(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Real(n) => Some(*n),
        _ => None,
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Integer(n) => *n == 0,
        Value::Real(n) => *n == 0.0,
        _ => false,
    }
}
