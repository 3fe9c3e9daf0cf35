//! Tracks which top-level command every submission and recorded command belongs to.

use std::collections::HashMap;

use crate::core::command::{CmdId, InitialCallId, SubmissionId};

/// Maps submissions and recorded command buffer commands to the top-level commands that issued them.
///
/// A submission is attributed to the command that was being replayed when it was first seen. Later
/// commands that execute the same submission again, for example when it is re-submitted, keep
/// reporting their subcommands under that first command.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    submissions: HashMap<SubmissionId, CmdId>,
    commands: HashMap<InitialCallId, CmdId>,
}

impl SubmissionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the command a submission belongs to, attributing it to `current` if it was not seen before.
    pub fn register(&mut self, submission: SubmissionId, current: CmdId) -> CmdId {
        *self.submissions.entry(submission).or_insert(current)
    }

    /// The command a submission belongs to, if it was seen.
    pub fn root_of(&self, submission: SubmissionId) -> Option<CmdId> {
        self.submissions.get(&submission).copied()
    }

    /// Record that the command buffer command with the given initial call was recorded by `current`.
    pub fn add_command(&mut self, initial_call: InitialCallId, current: CmdId) {
        self.commands.insert(initial_call, current);
    }

    /// The command that recorded a command buffer command, or [`CmdId::NONE`] if it is unknown.
    pub fn origin_of(&self, initial_call: Option<InitialCallId>) -> CmdId {
        initial_call
            .and_then(|call| self.commands.get(&call))
            .copied()
            .unwrap_or(CmdId::NONE)
    }
}
