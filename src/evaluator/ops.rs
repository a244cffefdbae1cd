use crate::evaluator::engine::Interpreter;
use crate::evaluator::errors::RuntimeError;
use crate::evaluator::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};
use std::cmp::Ordering;

impl Interpreter {
    /// Apply a non-short-circuiting binary operator to two evaluated operands
    pub(crate) fn apply_binary(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let value = match op {
            BinOp::Add => add_values(left, right),
            BinOp::Sub => Value::Number(left.to_number() - right.to_number()),
            BinOp::Mul => Value::Number(left.to_number() * right.to_number()),
            BinOp::Div | BinOp::Mod => {
                let divisor = right.to_number();
                if divisor == 0.0 {
                    return Err(RuntimeError::DivisionByZero { location });
                }
                let dividend = left.to_number();
                if op == BinOp::Div {
                    Value::Number(dividend / divisor)
                } else {
                    // f64 `%` keeps the sign of the dividend
                    Value::Number(dividend % divisor)
                }
            }
            BinOp::Eq => Value::Bool(left.loose_equals(right)),
            BinOp::Ne => Value::Bool(!left.loose_equals(right)),
            BinOp::StrictEq => Value::Bool(left.strict_equals(right)),
            BinOp::StrictNe => Value::Bool(!left.strict_equals(right)),
            BinOp::Lt => Value::Bool(compare(left, right) == Some(Ordering::Less)),
            BinOp::Le => Value::Bool(matches!(
                compare(left, right),
                Some(Ordering::Less | Ordering::Equal)
            )),
            BinOp::Gt => Value::Bool(compare(left, right) == Some(Ordering::Greater)),
            BinOp::Ge => Value::Bool(matches!(
                compare(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            )),
            // Short-circuit operators never reach here with both sides evaluated
            BinOp::And => {
                if left.is_truthy() {
                    right.clone()
                } else {
                    left.clone()
                }
            }
            BinOp::Or => {
                if left.is_truthy() {
                    left.clone()
                } else {
                    right.clone()
                }
            }
        };

        Ok(value)
    }
}

/// `+` concatenates as soon as either side is a string
fn add_values(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Str(_), _) | (_, Value::Str(_)) => Value::Str(format!("{}{}", left, right)),
        _ => Value::Number(left.to_number() + right.to_number()),
    }
}

/// Relational ordering: lexicographic for two strings, numeric otherwise.
/// `None` when either side is NaN.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        Interpreter::default().apply_binary(op, &left, &right, SourceLocation::new(1, 1))
    }

    #[test]
    fn test_add_numbers_and_strings() {
        assert_eq!(
            apply(BinOp::Add, 3.0.into(), 4.0.into()).unwrap(),
            Value::Number(7.0)
        );
        assert_eq!(
            apply(BinOp::Add, "x".into(), 1.0.into()).unwrap(),
            Value::from("x1")
        );
        assert_eq!(
            apply(BinOp::Add, true.into(), 1.0.into()).unwrap(),
            Value::Number(2.0)
        );
    }

    #[test]
    fn test_division_by_zero() {
        let err = apply(BinOp::Div, 1.0.into(), 0.0.into()).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::DivisionByZero {
                location: SourceLocation::new(1, 1)
            }
        );

        assert!(apply(BinOp::Mod, 5.0.into(), 0.0.into()).is_err());
    }

    #[test]
    fn test_modulo_sign_follows_dividend() {
        assert_eq!(
            apply(BinOp::Mod, (-7.0).into(), 3.0.into()).unwrap(),
            Value::Number(-1.0)
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            apply(BinOp::Lt, "apple".into(), "banana".into()).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(BinOp::Ge, "10".into(), 9.0.into()).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(BinOp::Le, Value::Undefined, 0.0.into()).unwrap(),
            Value::Bool(false)
        );
    }
}
