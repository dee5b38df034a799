//! Selector conditions
//!
//! The text between the brackets of an attribute selector, `[type = 'road' and lanes > 2]`,
//! is a small boolean language. It is lexed with logos and read by a precedence-climbing
//! parser into filter-shaped expressions:
//!
//!     or   := and ('or' and)*
//!     and  := not ('and' not)*
//!     not  := 'not' not | '(' or ')' | comparison
//!     comparison := attr op value | attr ['not'] ('like' | 'ilike') value | attr 'is' ['not'] 'null'
//!
//! Keywords are case-insensitive. `is null` is represented as `['==', ['get', attr], null]`.
//! [write_condition] produces the canonical text form the writer emits.

use super::{quote, read, Expression, Literal, Operator, Value};
use crate::geocss::error::GeoCssError;
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
enum ConditionToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("=")]
    #[token("==")]
    Eq,
    #[token("!=")]
    #[token("<>")]
    Ne,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,

    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("like", ignore(ascii_case))]
    Like,
    #[token("ilike", ignore(ascii_case))]
    ILike,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("null", ignore(ascii_case))]
    Null,

    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r#"'[^']*'|"[^"]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Quoted(String),

    #[regex(r"[A-Za-z_@][A-Za-z0-9_\-.:]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

/// Parse the inside of a selector bracket.
pub fn parse_condition(text: &str) -> Result<Expression, GeoCssError> {
    let mut tokens = Vec::new();
    for token in ConditionToken::lexer(text) {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(GeoCssError::invalid_filter(text, "unrecognized condition syntax")),
        }
    }

    let mut parser = ConditionParser {
        tokens,
        pos: 0,
        text,
    };
    let expr = parser.or()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct ConditionParser<'a> {
    tokens: Vec<ConditionToken>,
    pos: usize,
    text: &'a str,
}

impl<'a> ConditionParser<'a> {
    fn error(&self, message: &str) -> GeoCssError {
        GeoCssError::invalid_filter(self.text, message)
    }

    fn peek(&self) -> Option<&ConditionToken> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, expected: &ConditionToken) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn next(&mut self) -> Option<ConditionToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn or(&mut self) -> Result<Expression, GeoCssError> {
        let mut operands = vec![self.and()?];
        while self.eat(&ConditionToken::Or) {
            operands.push(self.and()?);
        }
        Ok(combine(Operator::Any, operands))
    }

    fn and(&mut self) -> Result<Expression, GeoCssError> {
        let mut operands = vec![self.not()?];
        while self.eat(&ConditionToken::And) {
            operands.push(self.not()?);
        }
        Ok(combine(Operator::All, operands))
    }

    fn not(&mut self) -> Result<Expression, GeoCssError> {
        if self.eat(&ConditionToken::Not) {
            let inner = self.not()?;
            return Ok(Expression::tagged(Operator::Not, vec![inner]));
        }
        if self.eat(&ConditionToken::LParen) {
            let inner = self.or()?;
            if !self.eat(&ConditionToken::RParen) {
                return Err(self.error("missing ')'"));
            }
            return Ok(inner);
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expression, GeoCssError> {
        let attribute = match self.next() {
            Some(ConditionToken::Identifier(name)) => name,
            _ => return Err(self.error("expected an attribute name")),
        };
        let property = Expression::get(attribute);

        let op = match self.next() {
            Some(ConditionToken::Eq) => Operator::Eq,
            Some(ConditionToken::Ne) => Operator::Ne,
            Some(ConditionToken::Gt) => Operator::Gt,
            Some(ConditionToken::Ge) => Operator::Ge,
            Some(ConditionToken::Lt) => Operator::Lt,
            Some(ConditionToken::Le) => Operator::Le,
            Some(ConditionToken::Like) => Operator::Like,
            Some(ConditionToken::ILike) => Operator::ILike,
            Some(ConditionToken::Not) => {
                let op = match self.next() {
                    Some(ConditionToken::Like) => Operator::Like,
                    Some(ConditionToken::ILike) => Operator::ILike,
                    _ => return Err(self.error("expected 'like' after 'not'")),
                };
                let value = self.value()?;
                let inner = Expression::tagged(op, vec![property, value]);
                return Ok(Expression::tagged(Operator::Not, vec![inner]));
            }
            Some(ConditionToken::Is) => {
                let negated = self.eat(&ConditionToken::Not);
                if !self.eat(&ConditionToken::Null) {
                    return Err(self.error("expected 'null' after 'is'"));
                }
                let is_null = Expression::tagged(Operator::Eq, vec![property, Expression::null()]);
                return Ok(if negated {
                    Expression::tagged(Operator::Not, vec![is_null])
                } else {
                    is_null
                });
            }
            _ => return Err(self.error("expected a comparison operator")),
        };

        let value = self.value()?;
        Ok(Expression::tagged(op, vec![property, value]))
    }

    fn value(&mut self) -> Result<Expression, GeoCssError> {
        match self.next() {
            Some(ConditionToken::Number(n)) => Ok(Expression::number(n)),
            Some(ConditionToken::Quoted(s)) => Ok(Expression::string(s)),
            Some(ConditionToken::Null) => Ok(Expression::null()),
            Some(ConditionToken::Identifier(word)) => Ok(match word.as_str() {
                "true" => Expression::Literal(Literal::Bool(true)),
                "false" => Expression::Literal(Literal::Bool(false)),
                _ => Expression::string(word),
            }),
            _ => Err(self.error("expected a value")),
        }
    }
}

fn combine(op: Operator, mut operands: Vec<Expression>) -> Expression {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        Expression::tagged(op, operands)
    }
}

/// Canonical condition text for a filter-shaped expression.
pub fn write_condition(expr: &Expression) -> Result<String, GeoCssError> {
    let Expression::Tagged { op, args } = expr else {
        return Err(GeoCssError::invalid_filter(
            format!("{:?}", expr),
            "a condition must be an operator expression",
        ));
    };

    match op {
        Operator::Any => join_operands(args, " or "),
        Operator::All => join_operands(args, " and "),
        Operator::Not => {
            let inner = args.first().ok_or_else(|| {
                GeoCssError::invalid_filter("not", "negation without operand")
            })?;
            if let Some(attribute) = null_test(inner) {
                return Ok(format!("{} is not null", attribute));
            }
            match inner.op() {
                Some(Operator::Like) | Some(Operator::ILike) => {
                    let (attribute, value) = comparison_parts(inner)?;
                    Ok(format!("{} not {} {}", attribute, inner_op_name(inner), value))
                }
                _ => Ok(format!("not ({})", write_condition(inner)?)),
            }
        }
        op if op.is_comparison() => {
            if let Some(attribute) = null_test(expr) {
                return Ok(format!("{} is null", attribute));
            }
            let (attribute, value) = comparison_parts(expr)?;
            let symbol = match op {
                Operator::Eq => "=",
                Operator::Like => "like",
                Operator::ILike => "ilike",
                other => other.name(),
            };
            Ok(format!("{} {} {}", attribute, symbol, value))
        }
        other => Err(GeoCssError::invalid_filter(
            other.name(),
            "not a filter operator",
        )),
    }
}

fn inner_op_name(expr: &Expression) -> &str {
    expr.op().map(|op| op.name()).unwrap_or_default()
}

/// Nested combinations are parenthesized so they read back with the same shape.
fn join_operands(args: &[Expression], separator: &str) -> Result<String, GeoCssError> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        let text = write_condition(arg)?;
        if arg.op().is_some_and(|op| op.is_combination()) {
            parts.push(format!("({})", text));
        } else {
            parts.push(text);
        }
    }
    Ok(parts.join(separator))
}

/// `['==', ['get', attr], null]` -> attr
fn null_test(expr: &Expression) -> Option<String> {
    match expr {
        Expression::Tagged {
            op: Operator::Eq,
            args,
        } if args.len() == 2 && args[1] == Expression::null() => args[0].to_text_attribute(),
        _ => None,
    }
}

fn comparison_parts(expr: &Expression) -> Result<(String, String), GeoCssError> {
    let args = expr.args();
    let attribute = args
        .first()
        .and_then(|arg| arg.to_text_attribute())
        .ok_or_else(|| GeoCssError::invalid_filter(format!("{:?}", expr), "missing attribute"))?;
    let value = match args.get(1).map(read) {
        Some(Value::String(s)) => quote(&s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) => "null".to_string(),
        _ => {
            return Err(GeoCssError::invalid_filter(
                format!("{:?}", expr),
                "unsupported comparison value",
            ))
        }
    };
    Ok((attribute, value))
}

impl Expression {
    /// The attribute name of a `['get', name]` reference
    fn to_text_attribute(&self) -> Option<String> {
        match self {
            Expression::Tagged {
                op: Operator::Get,
                args,
            } => args.first().and_then(|arg| read(arg).to_text()),
            _ => None,
        }
    }
}
