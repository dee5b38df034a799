//! Filter codec
//!
//! Maps condition expressions to the style document's [Filter] and back, and turns a
//! rule's selector alternatives into a filter plus a scale range.
//!
//! A selector list `[a=1][b=2], [c=3]` is a disjunction of conjunctions: each alternative
//! ANDs its bracketed conditions, the alternatives are ORed. Conditions on a scale
//! attribute (`@sd`, `@scale`) are pulled out into the [ScaleDenominator] and never reach
//! the filter. Writing goes the other way round: top level `Or` branches become selector
//! alternatives, top level `And` operands become adjacent brackets.

use super::condition::{parse_condition, write_condition};
use super::{read, Expression, Literal, Operator, Value};
use crate::geocss::error::GeoCssError;
use crate::geocss::style::{ComparisonOperator, Filter, FilterValue, ScaleDenominator};
use once_cell::sync::Lazy;
use regex::Regex;

static BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("valid bracket regex"));

/// Filter and scale range derived from a rule's selectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorFilter {
    pub filter: Option<Filter>,
    pub scale_denominator: Option<ScaleDenominator>,
}

/// Convert a filter-shaped expression into a style filter.
pub fn to_filter(expr: &Expression) -> Result<Filter, GeoCssError> {
    let invalid = |message: &str| GeoCssError::invalid_filter(expr.to_string(), message);

    let Expression::Tagged { op, args } = expr else {
        return Err(invalid("a literal is not a filter"));
    };

    match op {
        Operator::Any | Operator::All => {
            let mut filters = args.iter().map(to_filter).collect::<Result<Vec<_>, _>>()?;
            match filters.len() {
                0 => Err(invalid("empty combination")),
                1 => Ok(filters.remove(0)),
                _ if *op == Operator::Any => Ok(Filter::Or { filters }),
                _ => Ok(Filter::And { filters }),
            }
        }
        Operator::Not => {
            let inner = args.first().ok_or_else(|| invalid("negation without operand"))?;
            Ok(Filter::Not {
                filter: Box::new(to_filter(inner)?),
            })
        }
        op if op.is_comparison() => {
            let property = match args.first() {
                Some(Expression::Tagged {
                    op: Operator::Get,
                    args,
                }) => args.first().map(read).and_then(|v| v.to_text()),
                _ => None,
            }
            .ok_or_else(|| invalid("comparison without attribute"))?;

            let value = match args.get(1).map(read) {
                Some(Value::Null) if *op == Operator::Eq => return Ok(Filter::IsNull { property }),
                Some(Value::Bool(b)) => FilterValue::Bool(b),
                Some(Value::Number(n)) => FilterValue::Number(n),
                Some(Value::String(s)) => FilterValue::String(s),
                _ => return Err(invalid("unsupported comparison value")),
            };

            let operator = match op {
                Operator::Eq => ComparisonOperator::Equal,
                Operator::Ne => ComparisonOperator::NotEqual,
                Operator::Gt => ComparisonOperator::Greater,
                Operator::Ge => ComparisonOperator::GreaterOrEqual,
                Operator::Lt => ComparisonOperator::Less,
                Operator::Le => ComparisonOperator::LessOrEqual,
                _ => ComparisonOperator::Like,
            };
            Ok(Filter::Comparison {
                operator,
                property,
                value,
            })
        }
        _ => Err(invalid("not a filter operator")),
    }
}

/// Convert a style filter into its condition expression.
pub fn from_filter(filter: &Filter) -> Expression {
    match filter {
        Filter::And { filters } => {
            Expression::tagged(Operator::All, filters.iter().map(from_filter).collect())
        }
        Filter::Or { filters } => {
            Expression::tagged(Operator::Any, filters.iter().map(from_filter).collect())
        }
        Filter::Not { filter } => Expression::tagged(Operator::Not, vec![from_filter(filter)]),
        Filter::IsNull { property } => Expression::tagged(
            Operator::Eq,
            vec![Expression::get(property.clone()), Expression::null()],
        ),
        Filter::Comparison {
            operator,
            property,
            value,
        } => {
            let op = match operator {
                ComparisonOperator::Equal => Operator::Eq,
                ComparisonOperator::NotEqual => Operator::Ne,
                ComparisonOperator::Greater => Operator::Gt,
                ComparisonOperator::GreaterOrEqual => Operator::Ge,
                ComparisonOperator::Less => Operator::Lt,
                ComparisonOperator::LessOrEqual => Operator::Le,
                ComparisonOperator::Like => Operator::Like,
            };
            let value = match value {
                FilterValue::Bool(b) => Expression::Literal(Literal::Bool(*b)),
                FilterValue::Number(n) => Expression::number(*n),
                FilterValue::String(s) => Expression::string(s.clone()),
            };
            Expression::tagged(op, vec![Expression::get(property.clone()), value])
        }
    }
}

/// Read a rule's selector alternatives into a filter and a scale range.
pub fn read_selectors(
    selectors: &[String],
    scale_attributes: &[String],
) -> Result<SelectorFilter, GeoCssError> {
    let mut scale = ScaleDenominator::default();
    let mut alternatives = Vec::new();
    let mut unconditional = false;

    for selector in selectors {
        let rest = BRACKET.replace_all(selector, "");
        if !matches!(rest.trim(), "" | "*") {
            return Err(GeoCssError::invalid_filter(
                selector.clone(),
                "only '*' and bracketed conditions are supported",
            ));
        }

        let mut conditions = Vec::new();
        for capture in BRACKET.captures_iter(selector) {
            let text = capture[1].trim();
            if text.is_empty() {
                continue;
            }
            let expr = parse_condition(text)?;
            match scale_bound(&expr, scale_attributes) {
                Some(ScaleBound::Min(value)) => scale.min = Some(value),
                Some(ScaleBound::Max(value)) => scale.max = Some(value),
                None => conditions.push(expr),
            }
        }

        match conditions.len() {
            0 => unconditional = true,
            1 => alternatives.extend(conditions),
            _ => alternatives.push(Expression::tagged(Operator::All, conditions)),
        }
    }

    let filter = if unconditional || alternatives.is_empty() {
        None
    } else {
        Some(to_filter(&Expression::tagged(Operator::Any, alternatives))?)
    };

    Ok(SelectorFilter {
        filter,
        scale_denominator: (!scale.is_empty()).then_some(scale),
    })
}

/// Selector alternatives for a filter and scale range.
pub fn write_selectors(
    filter: Option<&Filter>,
    scale: Option<&ScaleDenominator>,
    scale_attribute: &str,
) -> Result<Vec<String>, GeoCssError> {
    let mut scale_brackets = String::new();
    if let Some(scale) = scale {
        if let Some(min) = scale.min {
            scale_brackets.push_str(&format!("[{} > {}]", scale_attribute, min));
        }
        if let Some(max) = scale.max {
            scale_brackets.push_str(&format!("[{} < {}]", scale_attribute, max));
        }
    }

    let Some(filter) = filter else {
        if scale_brackets.is_empty() {
            return Ok(vec!["*".to_string()]);
        }
        return Ok(vec![scale_brackets]);
    };

    let expr = from_filter(filter);
    let branches = match expr {
        Expression::Tagged {
            op: Operator::Any,
            args,
        } => args,
        other => vec![other],
    };

    let mut selectors = Vec::with_capacity(branches.len());
    for branch in branches {
        let conjuncts = match branch {
            Expression::Tagged {
                op: Operator::All,
                args,
            } => args,
            other => vec![other],
        };
        let mut selector = String::new();
        for conjunct in &conjuncts {
            selector.push_str(&format!("[{}]", write_condition(conjunct)?));
        }
        selector.push_str(&scale_brackets);
        selectors.push(selector);
    }
    Ok(selectors)
}

enum ScaleBound {
    Min(f64),
    Max(f64),
}

fn scale_bound(expr: &Expression, scale_attributes: &[String]) -> Option<ScaleBound> {
    let Expression::Tagged { op, args } = expr else {
        return None;
    };
    let attribute = match args.first()? {
        Expression::Tagged {
            op: Operator::Get,
            args,
        } => read(args.first()?).to_text()?,
        _ => return None,
    };
    if !scale_attributes.iter().any(|a| *a == attribute) {
        return None;
    }
    let bound = read(args.get(1)?).as_f64()?;
    match op {
        Operator::Gt | Operator::Ge => Some(ScaleBound::Min(bound)),
        Operator::Lt | Operator::Le => Some(ScaleBound::Max(bound)),
        _ => None,
    }
}
