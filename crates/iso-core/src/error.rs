use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "grid size mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {}
