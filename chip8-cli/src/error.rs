//! Application errors
use std::fmt;

#[derive(Debug)]
pub struct CliError {
    pub kind: ErrorKind,
}

impl std::error::Error for CliError {}

#[derive(Debug)]
pub enum ErrorKind {
    Chip8(chip8::Chip8Error),
    Io(std::io::Error),
    Config(serde_yaml::Error),
}

impl CliError {
    /// Whether the error halted a running program.
    pub fn is_fault(&self) -> bool {
        matches!(self.kind, ErrorKind::Chip8(chip8::Chip8Error::Runtime(_)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "application error: {}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chip8(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl From<chip8::Chip8Error> for CliError {
    fn from(err: chip8::Chip8Error) -> Self {
        Self {
            kind: ErrorKind::Chip8(err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(err),
        }
    }
}

impl From<std::fmt::Error> for CliError {
    fn from(err: std::fmt::Error) -> Self {
        Self {
            kind: ErrorKind::Chip8(err.into()),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self {
            kind: ErrorKind::Config(err),
        }
    }
}
