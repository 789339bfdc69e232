use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while a statement executes.
pub enum RuntimeError {
    /// A `rep`, `if`, `else`, `defy` or `wait` statement was malformed.
    InvalidSyntax {
        /// The statement keyword that failed to parse.
        statement: String,
        /// What was wrong with it.
        details:   String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The target of an assignment is not a valid identifier.
    InvalidVariableName {
        /// The rejected assignment target.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use an unbound variable.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that is unbound or not a callable block.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `wait.<unit>(...)` named a unit other than `milsec`, `sec`, `min` or
    /// `hrs`.
    UnknownWaitUnit {
        /// The unit that was given.
        unit: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Callable blocks invoked each other too deeply, usually through
    /// unbounded recursion.
    RecursionLimit {
        /// The block whose call exceeded the limit.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Standard input reached end of file while a line was requested.
    InputClosed {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reading from or writing to the console failed.
    Io {
        /// The underlying I/O error message.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The expression text could not be parsed.
    Parse(ParseError),
}

impl From<ParseError> for RuntimeError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax { statement,
                                  details,
                                  line, } => {
                write!(f, "Error on line {line}: Invalid '{statement}' syntax: {details}.")
            },
            Self::InvalidVariableName { name, line } => {
                write!(f, "Error on line {line}: Invalid variable name '{name}'.")
            },
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::UndefinedFunction { name, line } => {
                write!(f, "Error on line {line}: Undefined function '{name}'.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::UnknownWaitUnit { unit, line } => write!(f,
                                                           "Error on line {line}: Unknown wait unit '{unit}'. Expected milsec, sec, min or hrs."),
            Self::RecursionLimit { name, line } => write!(f,
                                                          "Error on line {line}: Calling '{name}' exceeds the maximum call depth."),
            Self::InputClosed { line } => {
                write!(f, "Error on line {line}: Standard input is closed.")
            },
            Self::Io { details, line } => write!(f, "Error on line {line}: I/O failure: {details}."),
            Self::Parse(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            _ => None,
        }
    }
}

impl RuntimeError {
    /// Returns the source line the error refers to, when it has one.
    #[must_use]
    pub const fn line_number(&self) -> Option<usize> {
        match self {
            Self::InvalidSyntax { line, .. }
            | Self::InvalidVariableName { line, .. }
            | Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::TypeError { line, .. }
            | Self::DivisionByZero { line }
            | Self::UnknownWaitUnit { line, .. }
            | Self::RecursionLimit { line, .. }
            | Self::InputClosed { line }
            | Self::Io { line, .. } => Some(*line),
            Self::Parse(ParseError::EntryPointNotFound) => None,
            Self::Parse(ParseError::UnexpectedToken { line, .. }
                        | ParseError::UnexpectedEndOfInput { line }
                        | ParseError::ExpectedClosingParen { line }
                        | ParseError::UnterminatedString { line }
                        | ParseError::UnexpectedTrailingTokens { line, .. }
                        | ParseError::LiteralTooLarge { line }) => Some(*line),
        }
    }
}
