//! Exposes the cmdsync error type

use std::sync::PoisonError;

use thiserror::Error;

use crate::core::command::CmdId;

/// Error type that cmdsync can return.
///
/// Broken marker nesting is never an error. The resolver recovers from it and logs what it did, so
/// every variant here means the resolution pass was aborted or could not start.
#[derive(Error, Debug)]
pub enum Error {
    /// The replay engine was cancelled while mutating a command.
    #[error("Replay was cancelled.")]
    Cancelled,
    /// Replaying a command failed. The underlying replay error is attached as the source.
    #[error("Replay of command `{0}` failed.")]
    ReplayFailed(CmdId),
    /// Poisoned mutex
    #[error("Poisoned mutex")]
    PoisonError,
}

impl<T> From<PoisonError<T>> for Error {
    fn from(_: PoisonError<T>) -> Self {
        Error::PoisonError
    }
}

/// Returns true if [`Error::Cancelled`] appears anywhere in the error's chain of causes.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<Error>(), Some(Error::Cancelled)))
}
