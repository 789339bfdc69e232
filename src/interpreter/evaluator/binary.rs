use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, number::Number},
    },
    util::num::i64_to_f64,
};

impl Interpreter<'_> {
    /// Evaluates a binary operation between two already evaluated values.
    ///
    /// Arithmetic operators require two numbers, except `+`, which also
    /// concatenates two strings. Comparisons yield a boolean. `and` and `or`
    /// are handled here without short-circuiting; [`Interpreter::eval`]
    /// short-circuits them before both sides are evaluated.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use relief::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add, &Value::from(3), &Value::from(4), 1);
    /// assert_eq!(sum.unwrap(), Value::from(7));
    ///
    /// let text = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                     &Value::from("a"),
    ///                                     &Value::from("b"),
    ///                                     1);
    /// assert_eq!(text.unwrap(), Value::from("ab"));
    ///
    /// let mixed = Interpreter::eval_binary(BinaryOperator::Add, &Value::from("a"), &Value::from(1), 1);
    /// assert!(mixed.is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{And, Or};

        match (op, left, right) {
            (And, ..) => Ok(if left.is_truthy() { right } else { left }.clone()),
            (Or, ..) => Ok(if left.is_truthy() { left } else { right }.clone()),
            (op, ..) if op.is_comparison() => {
                Self::eval_comparison(op, left, right, line).map(Value::Boolean)
            },
            (BinaryOperator::Add, Value::String(a), Value::String(b)) => {
                Ok(Value::String(format!("{a}{b}")))
            },
            (op, Value::Number(a), Value::Number(b)) => {
                Self::eval_arithmetic(op, *a, *b, line).map(Value::Number)
            },
            _ => Err(RuntimeError::TypeError { details: format!("unsupported operand types for {op}: {} and {}",
                                                                left.type_name(),
                                                                right.type_name()),
                                               line }),
        }
    }

    /// Evaluates a comparison operator.
    ///
    /// Equality is defined between any two values; values of different
    /// kinds are unequal. Ordering is defined between two numbers, two
    /// strings (lexicographically) or two booleans (`False < True`). A
    /// comparison involving a real `nan` is false.
    ///
    /// # Errors
    /// Returns `TypeError` when ordering values of different kinds or
    /// callable blocks.
    ///
    /// # Example
    /// ```
    /// use relief::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let less = Interpreter::eval_comparison(BinaryOperator::Less,
    ///                                         &Value::from(1),
    ///                                         &Value::from(1.5),
    ///                                         1);
    /// assert!(less.unwrap());
    ///
    /// let equal = Interpreter::eval_comparison(BinaryOperator::Equal,
    ///                                          &Value::from("1"),
    ///                                          &Value::from(1),
    ///                                          1);
    /// assert!(!equal.unwrap());
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<bool> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let ordering = match op {
            Equal => return Ok(left == right),
            NotEqual => return Ok(left != right),
            _ => match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
                _ => {
                    return Err(RuntimeError::TypeError { details: format!("'{op}' is not supported between {} and {}",
                                                                          left.type_name(),
                                                                          right.type_name()),
                                                         line });
                },
            },
        };

        Ok(ordering.is_some_and(|ordering| match op {
                                    Less => ordering == Ordering::Less,
                                    Greater => ordering == Ordering::Greater,
                                    LessEqual => ordering != Ordering::Greater,
                                    GreaterEqual => ordering != Ordering::Less,
                                    _ => false,
                                }))
    }

    /// Evaluates an arithmetic operator on two numbers.
    ///
    /// Two integers stay integers except under `/`, a negative exponent, or
    /// overflow, where the operation is carried out on reals instead. Any
    /// real operand makes the result real.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for `/`, `//` and `%` by zero and for zero
    /// raised to a negative power.
    ///
    /// # Example
    /// ```
    /// use relief::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::number::Number},
    /// };
    ///
    /// let floor = Interpreter::eval_arithmetic(BinaryOperator::FloorDiv,
    ///                                          Number::Integer(-7),
    ///                                          Number::Integer(2),
    ///                                          1);
    /// assert_eq!(floor.unwrap(), Number::Integer(-4));
    ///
    /// let modulo = Interpreter::eval_arithmetic(BinaryOperator::Mod,
    ///                                           Number::Integer(-7),
    ///                                           Number::Integer(3),
    ///                                           1);
    /// assert_eq!(modulo.unwrap(), Number::Integer(2));
    ///
    /// let quotient = Interpreter::eval_arithmetic(BinaryOperator::Div,
    ///                                             Number::Integer(1),
    ///                                             Number::Integer(0),
    ///                                             1);
    /// assert!(quotient.is_err());
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: Number,
                           right: Number,
                           line: usize)
                           -> EvalResult<Number> {
        match (left, right) {
            (Number::Integer(a), Number::Integer(b)) => Self::eval_integer_op(op, a, b, line),
            _ => Self::eval_real_op(op, left.as_real(), right.as_real(), line).map(Number::Real),
        }
    }

    fn eval_integer_op(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<Number> {
        use BinaryOperator::{Add, FloorDiv, Mod, Mul, Pow, Sub};

        let checked = match op {
            Add => a.checked_add(b),
            Sub => a.checked_sub(b),
            Mul => a.checked_mul(b),
            FloorDiv | Mod if b == 0 => return Err(RuntimeError::DivisionByZero { line }),
            FloorDiv => a.checked_div(b).map(|quotient| {
                                            if a % b != 0 && (a < 0) != (b < 0) {
                                                quotient - 1
                                            } else {
                                                quotient
                                            }
                                        }),
            Mod => Some(floored_remainder(a, b)),
            Pow => u32::try_from(b).ok().and_then(|exponent| a.checked_pow(exponent)),
            _ => None,
        };

        match checked {
            Some(n) => Ok(Number::Integer(n)),
            None => {
                tracing::trace!(line, %op, "integer operation carried out on reals");
                Self::eval_real_op(op, i64_to_f64(a), i64_to_f64(b), line).map(Number::Real)
            },
        }
    }

    fn eval_real_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<f64> {
        use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Sub};

        match op {
            Add => Ok(a + b),
            Sub => Ok(a - b),
            Mul => Ok(a * b),
            Div | FloorDiv | Mod if b == 0.0 => Err(RuntimeError::DivisionByZero { line }),
            Div => Ok(a / b),
            FloorDiv => Ok((a / b).floor()),
            Mod => {
                let remainder = a % b;
                if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                    Ok(remainder + b)
                } else {
                    Ok(remainder)
                }
            },
            Pow if a == 0.0 && b < 0.0 => Err(RuntimeError::DivisionByZero { line }),
            Pow => Ok(a.powf(b)),
            _ => Err(RuntimeError::TypeError { details: format!("'{op}' is not an arithmetic operator"),
                                               line }),
        }
    }
}

/// Integer remainder that takes the sign of the divisor.
fn floored_remainder(a: i64, b: i64) -> i64 {
    // `i64::MIN % -1` overflows; the remainder is zero.
    let remainder = a.checked_rem(b).unwrap_or(0);
    if remainder != 0 && (remainder < 0) != (b < 0) {
        remainder + b
    } else {
        remainder
    }
}
