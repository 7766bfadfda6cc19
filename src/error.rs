//! Error taxonomy shared by every container in the crate.

use core::fmt;

/// The error type for deque and block operations.
///
/// Every failure is reported at the point of detection. A failed precondition
/// never leaves the container partially modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DequeError {
    /// Indexed access or position arithmetic left the valid range.
    IndexOutOfBound,
    /// `front`, `back` or a pop was attempted on an empty container.
    EmptyContainer,
    /// A position was dereferenced, erased or inserted at while pointing at
    /// the end, at nothing, at a removed node, or into another container.
    InvalidIterator,
    /// Two positions from different containers were compared or subtracted.
    CrossContainerIterator,
    /// A [`DequeConfig`](crate::DequeConfig) failed validation.
    InvalidConfig(&'static str),
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBound => f.write_str("index out of bound"),
            Self::EmptyContainer => f.write_str("container is empty"),
            Self::InvalidIterator => f.write_str("invalid iterator"),
            Self::CrossContainerIterator => {
                f.write_str("iterators belong to different containers")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for DequeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(DequeError::IndexOutOfBound.to_string(), "index out of bound");
        assert_eq!(DequeError::EmptyContainer.to_string(), "container is empty");
        assert_eq!(
            DequeError::InvalidConfig("min_block_size must be positive").to_string(),
            "invalid configuration: min_block_size must be positive"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DequeError::InvalidIterator);
        assert_eq!(err.to_string(), "invalid iterator");
    }
}
