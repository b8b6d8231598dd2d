//! Captured failures of bound operations.

use serde::{Deserialize, Serialize};
use std::any::Any;
use thiserror::Error;

/// Failure captured from a bound operation.
///
/// Containers never propagate these to the construction site. They are
/// stored in the record's `error` field and handed back to whoever awaited
/// the action.
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum OperationFailure<E> {
    /// The operation resolved to `Err`
    #[error("Operation rejected: {0}")]
    Rejected(E),

    /// The operation panicked, either while producing its future or while
    /// the future was polled
    #[error("Operation panicked: {0}")]
    Panicked(String),

    /// The operation could not be driven to completion: no tokio runtime
    /// was available, or its task was cancelled by runtime shutdown
    #[error("Operation aborted: {0}")]
    Aborted(String),
}

impl<E> OperationFailure<E> {
    /// The rejection value, if the operation returned `Err`.
    pub fn rejection(&self) -> Option<&E> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Panicked(_) | Self::Aborted(_) => None,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_exposes_inner_error() {
        let failure: OperationFailure<&str> = OperationFailure::Rejected("boom");
        assert_eq!(failure.rejection(), Some(&"boom"));
        assert!(!failure.is_panic());
    }

    #[test]
    fn panic_payloads_become_messages() {
        let from_str: OperationFailure<()> = OperationFailure::from_panic(Box::new("static"));
        assert_eq!(from_str, OperationFailure::Panicked("static".to_string()));

        let from_string: OperationFailure<()> =
            OperationFailure::from_panic(Box::new("owned".to_string()));
        assert_eq!(from_string, OperationFailure::Panicked("owned".to_string()));

        let opaque: OperationFailure<()> = OperationFailure::from_panic(Box::new(42_u8));
        assert!(opaque.is_panic());
        assert_eq!(opaque.rejection(), None);
    }

    #[test]
    fn aborted_has_no_rejection() {
        let failure: OperationFailure<String> = OperationFailure::Aborted("shutdown".to_string());
        assert!(failure.is_aborted());
        assert!(!failure.is_panic());
        assert_eq!(failure.rejection(), None);
        assert_eq!(failure.to_string(), "Operation aborted: shutdown");
    }

    #[test]
    fn display_includes_cause() {
        let failure: OperationFailure<String> = OperationFailure::Rejected("timeout".to_string());
        assert_eq!(failure.to_string(), "Operation rejected: timeout");
    }
}
