//! Result and errors.
use std::fmt::{self, Display, Formatter};

use crate::constants::Address;

pub type Chip8Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug)]
pub enum Chip8Error {
    /// VM fault during interpreter loop.
    Runtime(Fault),
    /// Attempt to load a bytecode program that can't fit in memory.
    LargeProgram,
    /// Invalid keyboard mapping.
    KeyMap(String),
    Fmt(fmt::Error),
}

/// Unrecoverable machine fault caused by a malformed program.
///
/// Carries the address of the failing instruction and the stack
/// pointer at the time of the fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `CALL` nested deeper than the call stack allows.
    StackOverflow { pc: Address, sp: usize },
    /// `RET` without a matching `CALL`.
    StackUnderflow { pc: Address, sp: usize },
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackOverflow { pc, sp } => {
                write!(f, "call stack overflow at 0x{pc:03X} (sp={sp})")
            }
            Self::StackUnderflow { pc, sp } => {
                write!(f, "call stack underflow at 0x{pc:03X} (sp={sp})")
            }
        }
    }
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime(fault) => write!(f, "runtime error: {}", fault),
            Self::LargeProgram => write!(f, "program too large for VM memory"),
            Self::KeyMap(msg) => write!(f, "key map error: {}", msg),
            Self::Fmt(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Chip8Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fmt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Fault> for Chip8Error {
    fn from(fault: Fault) -> Self {
        Chip8Error::Runtime(fault)
    }
}

impl From<fmt::Error> for Chip8Error {
    fn from(err: fmt::Error) -> Self {
        Chip8Error::Fmt(err)
    }
}
