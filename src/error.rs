//! Errors returned by the handle registry.
//!
//! The dictionary itself never fails: a missing key is an ordinary
//! `None`. Only the handle boundary can be misused.

use crate::registry::Handle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictError {
    /// The handle was never issued or has already been destroyed.
    #[error("unknown dictionary handle: {0}")]
    UnknownHandle(Handle),

    /// An argument violates the call contract (e.g. a negative result count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DictError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        DictError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DictError>;
