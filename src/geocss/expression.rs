//! Expression codec
//!
//!     Property values and selector conditions are both read into a small prefix-notation
//!     tree: an [Expression] is either a literal or a tagged list `[operator, args...]`.
//!     The tag says how the arguments must be understood (`hex` is a colour, `get` an
//!     attribute reference, `symbol` a well-known mark name, `any`/`all` filter combinations
//!     and so on).
//!
//! Reading And Writing
//!
//!     [read] strips the tags and hands back a plain [Value]. That loses information, so the
//!     write direction does not invert `read`: the mapper rebuilds the tagged form that fits
//!     the property it is writing with the constructors on [Expression] (`hex`, `symbol`,
//!     `array`, ...). Tags this module does not know are kept verbatim as [Operator::Other]
//!     and surface from `read` as [Value::Unknown].
//!
//!     Text forms live in the submodules: [value_parser] parses property values,
//!     [condition] parses and writes the contents of selector brackets and [filter] maps
//!     condition expressions to and from the style document's filters.

pub mod condition;
pub mod filter;
pub mod value_parser;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Any,
    All,
    Not,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    ILike,
    Get,
    Hex,
    Symbol,
    Url,
    Array,
    Bool,
    Text,
    Brace,
    Other(String),
}

impl Operator {
    pub fn from_name(name: &str) -> Self {
        match name {
            "any" => Operator::Any,
            "all" => Operator::All,
            "!" | "not" => Operator::Not,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            "like" => Operator::Like,
            "ilike" => Operator::ILike,
            "get" => Operator::Get,
            "hex" => Operator::Hex,
            "symbol" => Operator::Symbol,
            "url" => Operator::Url,
            "array" => Operator::Array,
            "bool" => Operator::Bool,
            "text" => Operator::Text,
            "brace" => Operator::Brace,
            other => Operator::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Operator::Any => "any",
            Operator::All => "all",
            Operator::Not => "!",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Like => "like",
            Operator::ILike => "ilike",
            Operator::Get => "get",
            Operator::Hex => "hex",
            Operator::Symbol => "symbol",
            Operator::Url => "url",
            Operator::Array => "array",
            Operator::Bool => "bool",
            Operator::Text => "text",
            Operator::Brace => "brace",
            Operator::Other(name) => name,
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Ne
                | Operator::Gt
                | Operator::Ge
                | Operator::Lt
                | Operator::Le
                | Operator::Like
                | Operator::ILike
        )
    }

    pub fn is_combination(&self) -> bool {
        matches!(self, Operator::Any | Operator::All)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Tagged { op: Operator, args: Vec<Expression> },
}

impl Expression {
    pub fn tagged(op: Operator, args: Vec<Expression>) -> Self {
        Expression::Tagged { op, args }
    }

    pub fn null() -> Self {
        Expression::Literal(Literal::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Expression::Literal(Literal::Number(value))
    }

    pub fn hex(color: impl Into<String>) -> Self {
        Self::tagged(Operator::Hex, vec![Self::string(color)])
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::tagged(Operator::Symbol, vec![Self::string(name)])
    }

    pub fn url(href: impl Into<String>) -> Self {
        Self::tagged(Operator::Url, vec![Self::string(href)])
    }

    pub fn get(attribute: impl Into<String>) -> Self {
        Self::tagged(Operator::Get, vec![Self::string(attribute)])
    }

    pub fn boolean(value: bool) -> Self {
        Self::tagged(Operator::Bool, vec![Self::string(value.to_string())])
    }

    pub fn array(items: Vec<Expression>) -> Self {
        Self::tagged(Operator::Array, items)
    }

    pub fn op(&self) -> Option<&Operator> {
        match self {
            Expression::Tagged { op, .. } => Some(op),
            Expression::Literal(_) => None,
        }
    }

    pub fn args(&self) -> &[Expression] {
        match self {
            Expression::Tagged { args, .. } => args,
            Expression::Literal(_) => &[],
        }
    }

    pub fn is_tagged(&self, expected: &Operator) -> bool {
        self.op() == Some(expected)
    }
}

/// Untagged value produced by [read]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Unknown(Expression),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numbers, and strings holding a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Strings as-is, numbers in their shortest display form
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn into_list(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }
}

/// Strip the tags off an expression.
pub fn read(expression: &Expression) -> Value {
    match expression {
        Expression::Literal(Literal::Null) => Value::Null,
        Expression::Literal(Literal::Bool(b)) => Value::Bool(*b),
        Expression::Literal(Literal::Number(n)) => Value::Number(*n),
        Expression::Literal(Literal::String(s)) => Value::String(s.clone()),
        Expression::Tagged { op, args } => match op {
            Operator::Array => Value::List(args.iter().map(read).collect()),
            Operator::Get | Operator::Hex | Operator::Symbol | Operator::Url => {
                args.first().map(read).unwrap_or(Value::Null)
            }
            Operator::Bool => match args.first().map(read) {
                Some(Value::Bool(b)) => Value::Bool(b),
                Some(Value::String(s)) => Value::Bool(s == "true"),
                _ => Value::Bool(false),
            },
            _ => Value::Unknown(expression.clone()),
        },
    }
}

/// GeoCSS property value text for an expression
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal) => write_literal(f, literal),
            Expression::Tagged { op, args } => match op {
                Operator::Hex | Operator::Get => match args.first() {
                    Some(Expression::Literal(Literal::String(s))) => write!(f, "{}", s),
                    Some(other) => write!(f, "{}", other),
                    None => Ok(()),
                },
                Operator::Bool => match read(self) {
                    Value::Bool(b) => write!(f, "{}", b),
                    _ => write!(f, "false"),
                },
                Operator::Symbol | Operator::Url => {
                    let inner = args.first().map(read).and_then(|v| v.to_text());
                    write!(f, "{}({})", op.name(), quote(&inner.unwrap_or_default()))
                }
                Operator::Array | Operator::Text => write_joined(f, args, " "),
                Operator::Brace => {
                    write!(f, "[")?;
                    write_joined(f, args, " ")?;
                    write!(f, "]")
                }
                Operator::Other(name) => {
                    write!(f, "{}(", name)?;
                    write_joined(f, args, ", ")?;
                    write!(f, ")")
                }
                _ => write!(f, "{}", condition::write_condition(self).unwrap_or_default()),
            },
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, args: &[Expression], separator: &str) -> fmt::Result {
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

fn write_literal(f: &mut fmt::Formatter<'_>, literal: &Literal) -> fmt::Result {
    match literal {
        Literal::Null => write!(f, "null"),
        Literal::Bool(b) => write!(f, "{}", b),
        Literal::Number(n) => write!(f, "{}", n),
        Literal::String(s) if value_parser::is_bare_word(s) => write!(f, "{}", s),
        Literal::String(s) => write!(f, "{}", quote(s)),
    }
}

/// Quote text for GeoCSS output: single quotes, or double quotes when the text holds a
/// single quote. There is no escape syntax, so text holding both kinds cannot be written.
pub fn quote(text: &str) -> String {
    if text.contains('\'') && !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        format!("'{}'", text)
    }
}
