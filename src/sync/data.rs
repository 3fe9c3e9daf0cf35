//! Output tables of a resolution pass.

use std::collections::{BTreeMap, HashMap};

use multimap::MultiMap;
use static_assertions::assert_impl_all;

use crate::core::command::CmdId;
use crate::core::index::SubCmdIdx;
use crate::markers::group::MarkerGroups;

/// Subcommands reached by one top-level command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutionRanges {
    /// Local index of the last subcommand that executed under this command.
    pub last_index: SubCmdIdx,
    /// Local index of every subcommand that executed under this command, in execution order.
    pub trail: Vec<SubCmdIdx>,
    /// For each command whose replay reached this command's subcommands, the last local index it reached.
    pub by_command: BTreeMap<CmdId, SubCmdIdx>,
}

impl ExecutionRanges {
    fn extend(&mut self, current: CmdId, index: &SubCmdIdx) {
        self.last_index = index.clone();
        self.trail.push(index.clone());
        self.by_command.insert(current, index.clone());
    }

    /// Local index reached by the `n`-th subcommand of this command.
    pub fn nth(&self, n: usize) -> Option<&SubCmdIdx> {
        self.trail.get(n)
    }
}

/// Where a subcommand logically comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandReference {
    /// Local index of the subcommand.
    pub index: SubCmdIdx,
    /// Top-level command that recorded the subcommand, or [`CmdId::NONE`] if it was not recorded through a known
    /// command buffer command.
    pub generating_cmd: CmdId,
    /// Whether the reference was produced through a callback indirection.
    pub indirect: bool,
}

/// Everything a resolution pass produces. Handed out once the pass completes and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SyncData {
    /// Subcommand ranges per top-level command.
    pub command_ranges: HashMap<CmdId, ExecutionRanges>,
    /// Per top-level command, the last local index of every contiguous run of subcommands that executed in the same
    /// command buffer context. Runs are listed in execution order.
    pub subcommand_groups: MultiMap<CmdId, SubCmdIdx>,
    /// Per top-level command, the origin of every subcommand it executed, in execution order.
    pub subcommand_references: MultiMap<CmdId, SubcommandReference>,
    /// All closed marker groups, in closing order.
    pub marker_groups: MarkerGroups,
}

assert_impl_all!(SyncData: Send, Sync);

impl Default for SyncData {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncData {
    /// Create empty output tables.
    pub fn new() -> Self {
        SyncData {
            command_ranges: HashMap::new(),
            subcommand_groups: MultiMap::new(),
            subcommand_references: MultiMap::new(),
            marker_groups: MarkerGroups::new(),
        }
    }

    pub(crate) fn extend_range(&mut self, root: CmdId, current: CmdId, index: &SubCmdIdx) {
        self.command_ranges.entry(root).or_default().extend(current, index);
    }

    /// Group boundaries recorded for a command. Empty if the command executed no subcommands.
    pub fn groups_of(&self, cmd: CmdId) -> &[SubCmdIdx] {
        self.subcommand_groups
            .get_vec(&cmd)
            .map(|groups| groups.as_slice())
            .unwrap_or_default()
    }

    /// Subcommand references recorded for a command. Empty if the command executed no subcommands.
    pub fn references_of(&self, cmd: CmdId) -> &[SubcommandReference] {
        self.subcommand_references
            .get_vec(&cmd)
            .map(|references| references.as_slice())
            .unwrap_or_default()
    }
}
