//! Arithmetic behind the `calc` command.

use crate::error::ShellError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Plain decimal literal, optionally signed, with an optional exponent.
///
/// `f64::from_str` would also take `inf` and `NaN`, which `calc` rejects.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid number pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl FromStr for Operator {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            _ => Err(ShellError::UnsupportedOperator),
        }
    }
}

fn parse_number(token: &str) -> Result<f64, ShellError> {
    if !NUMBER.is_match(token) {
        return Err(ShellError::InvalidNumbers);
    }
    token.parse().map_err(|_| ShellError::InvalidNumbers)
}

pub fn apply(lhs: f64, op: Operator, rhs: f64) -> Result<f64, ShellError> {
    match op {
        Operator::Add => Ok(lhs + rhs),
        Operator::Sub => Ok(lhs - rhs),
        Operator::Mul => Ok(lhs * rhs),
        Operator::Div if rhs == 0.0 => Err(ShellError::DivisionByZero),
        Operator::Div => Ok(lhs / rhs),
    }
}

/// Evaluate `<num1> <op> <num2>`, tokens separated by single spaces.
///
/// Checks happen in a fixed order: shape, numbers, operator, division by zero.
pub fn evaluate(expr: &str) -> Result<f64, ShellError> {
    let parts: Vec<&str> = expr.split(' ').collect();
    let [lhs, op, rhs] = parts.as_slice() else {
        return Err(ShellError::InvalidExpression);
    };
    let lhs = parse_number(lhs)?;
    let rhs = parse_number(rhs)?;
    apply(lhs, op.parse()?, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(evaluate("5 + 3"), Ok(8.0));
        assert_eq!(evaluate("5 - 8"), Ok(-3.0));
        assert_eq!(evaluate("2.5 * 4"), Ok(10.0));
        assert_eq!(evaluate("10 / 4"), Ok(2.5));
        assert_eq!(evaluate("-1.5e2 + .5"), Ok(-149.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("10 / 0"), Err(ShellError::DivisionByZero));
        assert_eq!(evaluate("10 / -0.0"), Err(ShellError::DivisionByZero));
    }

    #[test]
    fn test_shape_is_checked_first() {
        assert_eq!(evaluate("1 +"), Err(ShellError::InvalidExpression));
        assert_eq!(evaluate("1 + 2 + 3"), Err(ShellError::InvalidExpression));
        assert_eq!(evaluate("1  + 2"), Err(ShellError::InvalidExpression));
    }

    #[test]
    fn test_numbers_before_operator() {
        assert_eq!(evaluate("x % 2"), Err(ShellError::InvalidNumbers));
        assert_eq!(evaluate("inf + 1"), Err(ShellError::InvalidNumbers));
        assert_eq!(evaluate("1 ^ NaN"), Err(ShellError::InvalidNumbers));
        assert_eq!(evaluate("1 % 2"), Err(ShellError::UnsupportedOperator));
    }
}
