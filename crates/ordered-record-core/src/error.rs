//! Conversion errors.

use thiserror::Error;

use crate::Shape;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors produced while converting a value into an [`OrderedMap`](crate::OrderedMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The top-level value is neither a record nor a reference to one.
    #[error("unsupported data type: {shape}")]
    UnsupportedType {
        /// Shape of the rejected value.
        shape: Shape,
    },
    /// An internal conversion step was handed a shape it does not accept.
    ///
    /// Well-formed input never produces this; it points at a broken `ToOrdered`
    /// implementation or a reference to an opaque value.
    #[error("internal invariant violated: {message}")]
    InvariantViolation {
        /// What the failing step expected.
        message: String,
    },
}

impl ConvertError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}
