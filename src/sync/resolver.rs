//! The subcommand synchronization resolver and the driver running it over a command stream.

use anyhow::{Context, Result};

use crate::core::command::CmdId;
use crate::core::error::Error;
use crate::core::index::SubCmdIdx;
use crate::core::settings::ResolveSettings;
use crate::markers::group::MarkerType;
use crate::markers::tracker::MarkerTracker;
use crate::sync::data::SyncData;
use crate::sync::ranges::RangeAccumulator;
use crate::sync::replay::{Command, CommandBufferCommand, SubcommandContext, SubcommandHooks};
use crate::sync::submission::SubmissionTracker;

/// State of one resolution pass.
///
/// The driver calls [`SyncResolver::begin_command`] before replaying each top-level command, and the replay engine
/// reports subcommands through the [`SubcommandHooks`] implementation. Call [`SyncResolver::finish`] once the
/// whole stream was replayed to obtain the output tables.
#[derive(Debug)]
pub struct SyncResolver {
    settings: ResolveSettings,
    current: CmdId,
    submissions: SubmissionTracker,
    markers: MarkerTracker,
    ranges: RangeAccumulator,
    data: SyncData,
}

impl SyncResolver {
    /// Start a new resolution pass.
    pub fn new(settings: ResolveSettings) -> Self {
        SyncResolver {
            markers: MarkerTracker::new(&settings),
            settings,
            current: CmdId::NONE,
            submissions: SubmissionTracker::new(),
            ranges: RangeAccumulator::new(),
            data: SyncData::new(),
        }
    }

    /// Set the top-level command that is about to be replayed.
    pub fn begin_command(&mut self, id: CmdId) {
        self.current = id;
    }

    /// The top-level command currently being replayed.
    pub fn current(&self) -> CmdId {
        self.current
    }

    /// Marker state of the pass so far.
    pub fn markers(&self) -> &MarkerTracker {
        &self.markers
    }

    /// Output tables built so far. Groups of the last command and markers that are still open are only added by
    /// [`SyncResolver::finish`].
    pub fn data(&self) -> &SyncData {
        &self.data
    }

    fn full_index(&self, cx: &SubcommandContext<'_>) -> SubCmdIdx {
        let root = self.submissions.root_of(cx.submission).unwrap_or(CmdId::NONE);
        SubCmdIdx::with_root(root, cx.index)
    }

    /// Prepare marker state for a subcommand that is about to execute.
    pub fn on_pre_subcommand(&mut self, cx: &SubcommandContext<'_>) {
        let root = self.submissions.register(cx.submission, self.current);
        let full_index = SubCmdIdx::with_root(root, cx.index);

        if self.ranges.last_cmd().is_some() {
            self.markers.close_abandoned(cx.queue, &full_index, &mut self.data.marker_groups);
            if self.settings.carry_markers_across_boundaries && self.markers.left_scope(cx.queue, &full_index) {
                debug!("Execution moved to {full_index} with open markers, reopening them in the new command buffer");
                self.markers.carry_over(cx.queue, &full_index, &mut self.data.marker_groups);
            }
        }

        self.markers.open_pending(cx.queue, &full_index);
    }

    /// Record a subcommand that just finished executing.
    pub fn on_post_subcommand(&mut self, cx: &SubcommandContext<'_>, data: &CommandBufferCommand) {
        // Subcommands of synthetic rebuild commands are not part of the capture.
        if cx.rebuilding {
            return;
        }

        let root = self.submissions.register(cx.submission, self.current);
        let origin = self.submissions.origin_of(data.initial_call);
        self.ranges.record(&mut self.data, root, self.current, cx.index, origin);
        self.markers.refresh_ends(cx.queue, cx.end());
    }

    /// Remember which top-level command recorded a command buffer command.
    pub fn on_add_command(&mut self, data: &CommandBufferCommand) {
        if let Some(initial_call) = data.initial_call {
            self.submissions.add_command(initial_call, self.current);
        }
    }

    /// Open a marker at the current subcommand, or at the next one if `next` is set.
    pub fn on_push_marker(&mut self, cx: &SubcommandContext<'_>, name: &str, next: bool, ty: MarkerType) {
        let full_index = self.full_index(cx);
        self.markers.push(cx.queue, &full_index, name, next, ty);
    }

    /// Close the innermost marker of the given kind, including the current subcommand.
    pub fn on_pop_marker(&mut self, cx: &SubcommandContext<'_>, ty: MarkerType) {
        self.markers.pop(cx.queue, cx.end(), ty, &mut self.data.marker_groups);
    }

    /// End the pass and return its output tables.
    pub fn finish(mut self) -> SyncData {
        self.ranges.finish(&mut self.data);
        if self.settings.flush_unclosed_markers {
            self.markers.flush(&mut self.data.marker_groups);
        } else {
            self.markers.clear();
        }
        debug!(
            "Resolved synchronization of capture `{}`: {} commands with subcommands, {} marker groups",
            self.settings.name,
            self.data.command_ranges.len(),
            self.data.marker_groups.len()
        );
        self.data
    }
}

impl SubcommandHooks for SyncResolver {
    fn pre_subcommand(&mut self, cx: &SubcommandContext<'_>) {
        self.on_pre_subcommand(cx)
    }

    fn post_subcommand(&mut self, cx: &SubcommandContext<'_>, data: &CommandBufferCommand) {
        self.on_post_subcommand(cx, data)
    }

    fn add_command(&mut self, data: &CommandBufferCommand) {
        self.on_add_command(data)
    }

    fn push_marker(&mut self, cx: &SubcommandContext<'_>, name: &str, next: bool, ty: MarkerType) {
        self.on_push_marker(cx, name, next, ty)
    }

    fn pop_marker(&mut self, cx: &SubcommandContext<'_>, ty: MarkerType) {
        self.on_pop_marker(cx, ty)
    }
}

/// Replay a command stream in order and resolve its subcommand synchronization.
/// # Errors
/// - Fails with [`Error::ReplayFailed`] as soon as a command fails to replay. The replay error is kept as the source,
///   so cancellation can still be detected with [`is_cancelled`](crate::core::error::is_cancelled).
pub fn resolve_synchronization<S, C, I>(settings: &ResolveSettings, state: &mut S, commands: I) -> Result<SyncData>
where
    C: Command<S>,
    I: IntoIterator<Item = (CmdId, C)>, {
    debug!("Resolving synchronization of capture `{}`", settings.name);
    let mut resolver = SyncResolver::new(settings.clone());
    for (id, cmd) in commands {
        trace!("Mutating command {id} ({})", cmd.name());
        resolver.begin_command(id);
        cmd.mutate(id, state, &mut resolver)
            .with_context(|| Error::ReplayFailed(id))?;
    }
    Ok(resolver.finish())
}
