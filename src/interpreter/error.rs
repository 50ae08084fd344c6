use std::error;
use std::fmt;

/// Ways a single dispatched line can fail.
///
/// Every kind is fatal to the current run; the interpreter attaches the
/// failing line number and gives up, there is no instruction-level recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunErrorKind {
    /// An operand that must name a register does not.
    InvalidRegister { name: String },
    /// A source operand that is neither a register name nor an integer.
    InvalidOperand { token: String },
    /// An opcode outside the fixed instruction set.
    UnknownInstruction { name: String },
    /// A line with fewer tokens than its opcode requires.
    MalformedInstruction { line: String },
    /// `DIV` with a divisor that resolved to zero.
    DivisionByZero,
    /// The configured instruction ceiling ran out before the program ended.
    StepLimitExceeded { limit: usize },
}

impl fmt::Display for RunErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunErrorKind::InvalidRegister { name } => {
                write!(f, "invalid register `{}`", name)
            }
            RunErrorKind::InvalidOperand { token } => {
                write!(f, "invalid value or register `{}`", token)
            }
            RunErrorKind::UnknownInstruction { name } => {
                write!(f, "unknown instruction `{}`", name)
            }
            RunErrorKind::MalformedInstruction { line } => {
                write!(f, "malformed instruction `{}`", line)
            }
            RunErrorKind::DivisionByZero => f.write_str("division by zero"),
            RunErrorKind::StepLimitExceeded { limit } => {
                write!(f, "step limit of `{}` instructions exceeded", limit)
            }
        }
    }
}

/// A failed run, carrying the 1-based number of the line that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    /// What went wrong on the line
    pub kind: RunErrorKind,
    /// 1-based line number the failure happened on
    pub line_nr: usize,
}

impl RunError {
    pub fn new(kind: RunErrorKind, line_nr: usize) -> Self {
        Self { kind, line_nr }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error on line {}: {}", self.line_nr, self.kind)
    }
}

impl error::Error for RunError {}

pub type Result<T, E = RunError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::Result;

    #[test]
    fn test_error_renders_line_and_cause() -> Result<()> {
        let err = RunError::new(RunErrorKind::DivisionByZero, 3);
        assert_eq!(err.to_string(), "Error on line 3: division by zero");

        Ok(())
    }

    #[test]
    fn test_kind_details_are_quoted() -> Result<()> {
        let kind = RunErrorKind::UnknownInstruction {
            name: "FOO".to_string(),
        };
        assert_eq!(kind.to_string(), "unknown instruction `FOO`");

        let kind = RunErrorKind::InvalidOperand {
            token: "abc".to_string(),
        };
        assert_eq!(kind.to_string(), "invalid value or register `abc`");

        Ok(())
    }
}
