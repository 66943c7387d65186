//! Errors that can occur while executing a program.

use std::io;

use gdvm_bytecode::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("division by zero at offset {pc}")]
    ZeroDivision { pc: usize },

    #[error("operand stack is empty at offset {pc}")]
    EmptyOperandStack { pc: usize },

    #[error("`ret` with an empty call stack at offset {pc}")]
    EmptyCallStack { pc: usize },

    #[error("undefined command {byte:#04x} at offset {pc}")]
    UndefinedCommand { byte: u8, pc: usize },

    #[error("memory index {index} out of bounds (size {size}) at offset {pc}")]
    MemoryOutOfBounds { index: f64, size: usize, pc: usize },

    #[error("square root of negative number {value} at offset {pc}")]
    NegativeSqrtArgument { value: f64, pc: usize },

    #[error("invalid register index {index} at offset {pc}")]
    InvalidRegister { index: u8, pc: usize },

    #[error("unexpected end of bytecode at offset {pc}")]
    UnexpectedEnd { pc: usize },

    #[error("jump target {target} is outside the program ({len} bytes) at offset {pc}")]
    InvalidJumpTarget { target: u32, len: usize, pc: usize },

    /// Execution fuel exhausted (too many instructions).
    #[error("runtime execution limit exceeded ({0} instructions)")]
    ExecFuelExhausted(u64),

    /// Too many nested `call`s.
    #[error("runtime recursion limit exceeded ({0} frames)")]
    RecursionLimitExceeded(usize),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    /// Body offset the error is attributed to, if it has one.
    pub fn pc(&self) -> Option<usize> {
        match self {
            Self::ZeroDivision { pc }
            | Self::EmptyOperandStack { pc }
            | Self::EmptyCallStack { pc }
            | Self::UndefinedCommand { pc, .. }
            | Self::MemoryOutOfBounds { pc, .. }
            | Self::NegativeSqrtArgument { pc, .. }
            | Self::InvalidRegister { pc, .. }
            | Self::UnexpectedEnd { pc }
            | Self::InvalidJumpTarget { pc, .. } => Some(*pc),
            Self::ExecFuelExhausted(_) | Self::RecursionLimitExceeded(_) | Self::Output(_) => None,
        }
    }
}

impl From<DecodeError> for RuntimeError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UndefinedCommand { byte, offset } => {
                Self::UndefinedCommand { byte, pc: offset }
            }
            DecodeError::InvalidRegister { index, offset } => {
                Self::InvalidRegister { index, pc: offset }
            }
            DecodeError::UnexpectedEnd { offset } => Self::UnexpectedEnd { pc: offset },
        }
    }
}
