use core::fmt;

use crate::{Builtin, Object, ObjectKind};

/// A malformed script, caught at the evaluator/builtin boundary.
///
/// Every variant is a precondition the script builder is expected to
/// uphold; the runtime reports them instead of reading out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The receiver's table has no entry for this builtin.
    UnknownBuiltin {
        builtin: Builtin,
        receiver: ObjectKind,
    },
    /// Sends to user-defined identifiers have no handler to run.
    UserSelector { id: u32 },
    MissingArgument { builtin: Builtin, index: usize },
    TypeMismatch {
        expected: ObjectKind,
        found: ObjectKind,
    },
    RangeOutOfBounds { start: i64, end: i64, len: usize },
    NestingTooDeep { limit: usize },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBuiltin { builtin, receiver } => {
                write!(f, "{receiver} does not understand `{builtin}`")
            }
            Self::UserSelector { id } => {
                write!(f, "no handler for user message #{id}")
            }
            Self::MissingArgument { builtin, index } => {
                write!(f, "`{builtin}` is missing argument {index}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::RangeOutOfBounds { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds for length {len}")
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "argument scripts nested deeper than {limit}")
            }
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for Fault {}

/// Why evaluation stopped before reaching the end of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwind {
    /// `halt` asked the firmware to power off and the request returned.
    Halted,
    Fault(Fault),
}

impl From<Fault> for Unwind {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

pub type ExecutionResult<'s> = Result<Object<'s>, Unwind>;
