use thiserror::Error as ThisError;

///
/// DocValError
///
/// Error taxonomy for the value model. Construction-time misuse
/// (invalid filter bounds, empty mutation paths, wrong operand kinds)
/// surfaces as `InvalidArgument`. Anything the codec or comparator
/// should have ruled out by construction (an unknown type rank, a
/// map decoded with duplicate or unsorted keys) surfaces as `Internal`
/// and is a bug, not a recoverable condition.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DocValError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl DocValError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

pub type DocValResult<T> = Result<T, DocValError>;
