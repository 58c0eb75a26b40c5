//! The tiny expression language used by pipeline steps.
//!
//! Three shapes, all binary with a fixed left-hand side:
//! - predicates: `value OP literal`, OP one of `== != < <= > >=`
//! - arithmetic: `value OP number`, OP one of `+ - * / %`
//! - reducers:   `acc OP value`
//!
//! Literals are JSON (`3`, `2.5`, `true`, `null`, `"s"`) or single-quoted
//! strings; anything else is taken as a bare string.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Number, Value};

use crate::error::{PlanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

// Two-character operators first so `<=` is not read as `<`.
const COMPARE_OPS: [(&str, CompareOp); 6] = [
    ("==", CompareOp::Eq),
    ("!=", CompareOp::Ne),
    ("<=", CompareOp::Le),
    (">=", CompareOp::Ge),
    ("<", CompareOp::Lt),
    (">", CompareOp::Gt),
];

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

const ARITH_OPS: [(&str, ArithOp); 5] = [
    ("+", ArithOp::Add),
    ("-", ArithOp::Sub),
    ("*", ArithOp::Mul),
    ("/", ArithOp::Div),
    ("%", ArithOp::Rem),
];

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }

    /// Integer arithmetic when both sides are integers and the result is
    /// exact, float arithmetic otherwise. Results JSON cannot hold (NaN,
    /// infinities, integer remainder by zero) become `null`.
    pub fn apply(self, a: &Number, b: &Number) -> Value {
        if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
            let exact = match self {
                ArithOp::Add => x.checked_add(y),
                ArithOp::Sub => x.checked_sub(y),
                ArithOp::Mul => x.checked_mul(y),
                ArithOp::Div if y != 0 && x.checked_rem(y) == Some(0) => x.checked_div(y),
                ArithOp::Div => None,
                ArithOp::Rem => match x.checked_rem(y) {
                    Some(r) => Some(r),
                    None => return Value::Null,
                },
            };
            if let Some(r) = exact {
                return Value::from(r);
            }
        }
        let (x, y) = match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => (x, y),
            _ => return Value::Null,
        };
        let r = match self {
            ArithOp::Add => x + y,
            ArithOp::Sub => x - y,
            ArithOp::Mul => x * y,
            ArithOp::Div => x / y,
            ArithOp::Rem => x % y,
        };
        Value::from(r)
    }
}

/// `value OP literal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub op: CompareOp,
    pub literal: Value,
}

impl Predicate {
    pub fn parse(expr: &str) -> Result<Self> {
        let (op, rhs) = split_binary(expr, "value", &COMPARE_OPS)?;
        Ok(Self {
            op,
            literal: parse_literal(rhs),
        })
    }

    /// Numbers compare numerically, strings and booleans by their natural
    /// order. Mixed or structured operands only support `==`/`!=`.
    pub fn matches(&self, value: &Value) -> bool {
        let ordering = match (value, &self.literal) {
            (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (a, b) => {
                return match self.op {
                    CompareOp::Eq => a == b,
                    CompareOp::Ne => a != b,
                    _ => false,
                }
            }
        };
        ordering.map_or(false, |o| self.op.holds(o))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} {}", self.op.symbol(), self.literal)
    }
}

/// `value OP number`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arith {
    pub op: ArithOp,
    pub operand: Number,
}

impl Arith {
    pub fn parse(expr: &str) -> Result<Self> {
        let (op, rhs) = split_binary(expr, "value", &ARITH_OPS)?;
        match parse_literal(rhs) {
            Value::Number(operand) => Ok(Self { op, operand }),
            other => Err(PlanError::expr(
                expr,
                format!("operand must be a number, got {}", other),
            )),
        }
    }

    /// Non-numeric values map to `null`.
    pub fn apply(&self, value: &Value) -> Value {
        match value {
            Value::Number(n) => self.op.apply(n, &self.operand),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for Arith {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} {}", self.op.symbol(), self.operand)
    }
}

/// `acc OP value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    pub op: ArithOp,
}

impl Reducer {
    pub fn parse(expr: &str) -> Result<Self> {
        let (op, rhs) = split_binary(expr, "acc", &ARITH_OPS)?;
        if rhs != "value" {
            return Err(PlanError::expr(expr, "right-hand side must be `value`"));
        }
        Ok(Self { op })
    }

    pub fn apply(&self, acc: Value, value: &Value) -> Value {
        match (&acc, value) {
            (Value::Number(a), Value::Number(b)) => self.op.apply(a, b),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acc {} value", self.op.symbol())
    }
}

fn split_binary<'e, Op: Copy>(
    expr: &'e str,
    lhs: &str,
    ops: &[(&str, Op)],
) -> Result<(Op, &'e str)> {
    let rest = expr
        .trim()
        .strip_prefix(lhs)
        .ok_or_else(|| PlanError::expr(expr, format!("left-hand side must be `{}`", lhs)))?
        .trim_start();
    for (symbol, op) in ops {
        if let Some(rhs) = rest.strip_prefix(symbol) {
            let rhs = rhs.trim();
            if rhs.is_empty() {
                return Err(PlanError::expr(expr, "missing right-hand side"));
            }
            return Ok((*op, rhs));
        }
    }
    Err(PlanError::expr(expr, "unknown operator"))
}

fn parse_literal(text: &str) -> Value {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        return Value::String(text[1..text.len() - 1].to_string());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
