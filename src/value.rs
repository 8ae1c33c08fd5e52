use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Real,
    Boolean,
    Char,
    String,
}

impl ValueKind {
    /// Maps a declared type name to its kind. Unknown names fall back to
    /// integer.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "real" => ValueKind::Real,
            "boolean" => ValueKind::Boolean,
            "char" => ValueKind::Char,
            "string" => ValueKind::String,
            _ => ValueKind::Integer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::Boolean => "boolean",
            ValueKind::Char => "char",
            ValueKind::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Char(char),
    String(String),
}

impl Value {
    /// The value a freshly declared variable of `kind` holds.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Real => Value::Real(0.0),
            ValueKind::Boolean => Value::Boolean(false),
            ValueKind::Char => Value::Char(' '),
            ValueKind::String => Value::String(String::new()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(n) => write!(f, "{}", format_real(*n)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest `%g` rendering: plain decimal for exponents in [-4, 6),
/// otherwise `d.ddde+XX`.
fn format_real(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if n == 0.0 {
        return format!("{}", n);
    }

    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return format!("{}", n),
    };

    if (-4..6).contains(&exponent) {
        format!("{}", n)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
