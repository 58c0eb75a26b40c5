use std::fmt;

use thiserror::Error;

/// Canonical result for the cursor protocol.
pub type Result<T> = std::result::Result<T, Error>;

/// The cursor operation a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Next,
    /// The early-stop operation (`return` in the iteration protocol).
    Return,
    /// The abort operation (`throw` in the iteration protocol).
    Throw,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Next => "next",
            Operation::Return => "return",
            Operation::Throw => "throw",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a producer's output failed the result-shape contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The producer returned nothing at all.
    NonObject,
    /// The producer returned an object with neither `done` nor `value`.
    NotAResult,
    /// An end-of-sequence handler produced a value instead of a terminal result.
    NotTerminal,
}

/// A producer handed back something that is not an iteration result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ProtocolViolation {
    pub operation: Operation,
    pub kind: ViolationKind,
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::NonObject => {
                write!(f, "iterator.{}() returned a non-object value", self.operation)
            }
            ViolationKind::NotAResult => write!(
                f,
                "object returned by iterator.{}() does not implement the iteration result interface",
                self.operation
            ),
            ViolationKind::NotTerminal => write!(
                f,
                "end-of-iteration handler for iterator.{}() returned a non-terminal result",
                self.operation
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    #[error("cursor does not support iterator.{operation}()")]
    Unsupported { operation: Operation },
}

impl Error {
    pub fn violation(operation: Operation, kind: ViolationKind) -> Self {
        Error::Protocol(ProtocolViolation { operation, kind })
    }

    pub fn unsupported(operation: Operation) -> Self {
        Error::Unsupported { operation }
    }

    /// The operation the error was raised from.
    pub fn operation(&self) -> Operation {
        match self {
            Error::Protocol(v) => v.operation,
            Error::Unsupported { operation } => *operation,
        }
    }

    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }
}
