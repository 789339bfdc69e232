use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, number::Number},
    },
    util::num::i64_to_f64,
};

impl Interpreter<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation. Negating `i64::MIN` yields a real.
    /// - `Plus`: numeric identity.
    /// - `Not`: boolean negation of the operand's truthiness, for any value.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use relief::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::from(5), 1).unwrap();
    /// assert_eq!(v, Value::from(-5));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::from(""), 1).unwrap();
    /// assert_eq!(v, Value::from(true));
    ///
    /// assert!(Interpreter::eval_unary(UnaryOperator::Negate, &Value::from("x"), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Not, value) => Ok(Value::Boolean(!value.is_truthy())),
            (UnaryOperator::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
            (UnaryOperator::Negate, Value::Number(Number::Integer(n))) => {
                Ok(n.checked_neg()
                    .map_or_else(|| Value::from(-i64_to_f64(*n)), Value::from))
            },
            (UnaryOperator::Negate, Value::Number(Number::Real(r))) => Ok(Value::from(-r)),
            (op, value) => Err(RuntimeError::TypeError { details: format!("bad operand type for unary {op}: {}",
                                                                         value.type_name()),
                                                        line }),
        }
    }
}
