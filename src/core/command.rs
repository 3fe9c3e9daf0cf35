//! Identities of commands and submissions in a recorded stream.

use std::fmt::{Display, Formatter};

/// Position of a top-level command in the recorded stream.
///
/// [`CmdId::NONE`] is reserved and never names a real command.
#[derive(Debug, Default, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CmdId(pub u64);

impl CmdId {
    /// Sentinel meaning "no command".
    pub const NONE: CmdId = CmdId(0);

    /// Returns true if this is the [`CmdId::NONE`] sentinel.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl From<u64> for CmdId {
    fn from(value: u64) -> Self {
        CmdId(value)
    }
}

impl Display for CmdId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the top-level command whose submission is currently executing, e.g. one `vkQueueSubmit` call.
/// The replay engine hands this out, and it must stay stable for every subcommand of that submission.
#[derive(Debug, Default, Copy, Clone, Hash, Eq, PartialEq)]
pub struct SubmissionId(pub u64);

/// Identifies the initial call of a command recorded into a command buffer.
///
/// When a secondary command buffer is executed from a primary one, its commands are replayed again
/// under the primary's submission. The initial call identity stays the same, which lets the resolver
/// find the top-level command that recorded it.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct InitialCallId(pub u64);
