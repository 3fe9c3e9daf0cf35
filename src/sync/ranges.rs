//! Incremental construction of the per-command output tables.

use crate::core::command::CmdId;
use crate::core::index::SubCmdIdx;
use crate::sync::data::{SubcommandReference, SyncData};

/// Builds command ranges, subcommand groups and subcommand references as subcommands finish.
#[derive(Debug, Default)]
pub struct RangeAccumulator {
    last_subcommand: SubCmdIdx,
    last_cmd: Option<CmdId>,
}

impl RangeAccumulator {
    /// Create an accumulator that has not observed any subcommand yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root command of the most recently finished subcommand, if any subcommand finished.
    pub fn last_cmd(&self) -> Option<CmdId> {
        self.last_cmd
    }

    /// Local index of the most recently finished subcommand.
    pub fn last_subcommand(&self) -> &SubCmdIdx {
        &self.last_subcommand
    }

    /// Record a finished subcommand at local `index`, executed under `root` while replaying `current`.
    pub fn record(&mut self, data: &mut SyncData, root: CmdId, current: CmdId, index: &SubCmdIdx, origin: CmdId) {
        data.subcommand_references.insert(
            root,
            SubcommandReference {
                index: index.clone(),
                generating_cmd: origin,
                indirect: false,
            },
        );

        // Anything other than the direct successor starts a new run.
        if let Some(last_cmd) = self.last_cmd {
            if index.decremented() != self.last_subcommand {
                data.subcommand_groups.insert(last_cmd, self.last_subcommand.clone());
            }
        }
        self.last_subcommand = index.clone();
        self.last_cmd = Some(root);

        data.extend_range(root, current, index);
    }

    /// Close the run of the last observed command.
    pub fn finish(&mut self, data: &mut SyncData) {
        if let Some(last_cmd) = self.last_cmd.take() {
            data.subcommand_groups
                .insert(last_cmd, std::mem::take(&mut self.last_subcommand));
        }
    }
}
