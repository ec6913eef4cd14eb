use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The initial values do not have the requested length.
    InvalidSize { expected: usize, actual: usize },
    /// `2 * capacity` for the requested length does not fit in `usize`.
    CapacityOverflow { requested: usize },
    /// A position or range bound lies outside `[0, len]`.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidSize { expected, actual } => write!(
                f,
                "invalid size: expected {expected} initial values, got {actual}"
            ),
            Self::CapacityOverflow { requested } => {
                write!(f, "invalid size: cannot allocate a tree for {requested} elements")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_offending_values() {
        let err = Error::InvalidSize {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid size: expected 5 initial values, got 3"
        );

        let err = Error::IndexOutOfRange { index: 11, len: 10 };
        assert_eq!(err.to_string(), "index 11 out of range for length 10");
    }
}
