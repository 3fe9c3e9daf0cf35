//! The seam between the resolver and the replay engine.
//!
//! The replay engine owns the recorded state and knows how to execute each command. While doing so it reports
//! every subcommand to a [`SubcommandHooks`] implementation, with a [`SubcommandContext`] describing where it
//! executes.

use anyhow::Result;
use ash::vk;

use crate::core::command::{CmdId, InitialCallId, SubmissionId};
use crate::core::error::is_cancelled;
use crate::core::index::SubCmdIdx;
use crate::markers::group::MarkerType;

/// Where a subcommand executes.
#[derive(Debug, Copy, Clone)]
pub struct SubcommandContext<'a> {
    /// The submission that is currently executing.
    pub submission: SubmissionId,
    /// The queue the submission targets.
    pub queue: vk::Queue,
    /// Local index of the subcommand inside its top-level command.
    pub index: &'a SubCmdIdx,
    /// Set while the engine replays synthetic commands to rebuild state. Those subcommands are not part of the capture.
    pub rebuilding: bool,
}

impl SubcommandContext<'_> {
    /// End of a marker group that includes this subcommand.
    pub fn end(&self) -> u64 {
        self.index.last().unwrap_or_default() + 1
    }
}

/// Data of a command recorded into a command buffer.
#[derive(Debug, Default, Copy, Clone)]
pub struct CommandBufferCommand {
    /// Identity of the call that recorded this command, if known.
    pub initial_call: Option<InitialCallId>,
}

/// Callbacks invoked by the replay engine. Every callback has an empty default implementation.
pub trait SubcommandHooks {
    /// Called right before a subcommand executes.
    fn pre_subcommand(&mut self, _cx: &SubcommandContext<'_>) {}
    /// Called right after a subcommand executed.
    fn post_subcommand(&mut self, _cx: &SubcommandContext<'_>, _data: &CommandBufferCommand) {}
    /// Called when a command is recorded into a command buffer.
    fn add_command(&mut self, _data: &CommandBufferCommand) {}
    /// Called by commands that open a marker region. With `next` set, the region starts at the next subcommand.
    fn push_marker(&mut self, _cx: &SubcommandContext<'_>, _name: &str, _next: bool, _ty: MarkerType) {}
    /// Called by commands that close a marker region.
    fn pop_marker(&mut self, _cx: &SubcommandContext<'_>, _ty: MarkerType) {}
}

/// A recorded top-level command that can be replayed on a state of type `S`.
pub trait Command<S> {
    /// Apply the command to `state`, reporting every subcommand it executes to `hooks`.
    /// # Errors
    /// Any error aborts the resolution pass. Cancellation must be reported as [`Error::Cancelled`](crate::Error::Cancelled).
    fn mutate(&self, id: CmdId, state: &mut S, hooks: &mut dyn SubcommandHooks) -> Result<()>;

    /// Display name of the command, e.g. `vkQueueSubmit`.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<S, C: Command<S> + ?Sized> Command<S> for &C {
    fn mutate(&self, id: CmdId, state: &mut S, hooks: &mut dyn SubcommandHooks) -> Result<()> {
        (**self).mutate(id, state, hooks)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S, C: Command<S> + ?Sized> Command<S> for Box<C> {
    fn mutate(&self, id: CmdId, state: &mut S, hooks: &mut dyn SubcommandHooks) -> Result<()> {
        (**self).mutate(id, state, hooks)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Callback receiving the full index of a subcommand.
pub type SubcommandCallback<'f> = &'f mut dyn FnMut(&SubCmdIdx);

#[derive(Derivative)]
#[derivative(Debug)]
struct CallbackHooks<'f> {
    id: CmdId,
    #[derivative(Debug = "ignore")]
    pre: Option<SubcommandCallback<'f>>,
    #[derivative(Debug = "ignore")]
    post: Option<SubcommandCallback<'f>>,
}

impl SubcommandHooks for CallbackHooks<'_> {
    fn pre_subcommand(&mut self, cx: &SubcommandContext<'_>) {
        if let Some(pre) = self.pre.as_mut() {
            pre(&SubCmdIdx::with_root(self.id, cx.index));
        }
    }

    fn post_subcommand(&mut self, cx: &SubcommandContext<'_>, _data: &CommandBufferCommand) {
        if let Some(post) = self.post.as_mut() {
            post(&SubCmdIdx::with_root(self.id, cx.index));
        }
    }
}

/// Replay a single command, calling `pre` and `post` around each of its subcommands with the subcommand's full index.
///
/// Replay errors other than cancellation are logged and ignored, so a broken command still reports the subcommands
/// it reached.
/// # Errors
/// - Returns the replay error if it was caused by [`Error::Cancelled`](crate::Error::Cancelled).
/// # Example
/// ```
/// # use cmdsync::prelude::*;
/// # struct Noop;
/// # impl Command<()> for Noop {
/// #     fn mutate(&self, _: CmdId, _: &mut (), _: &mut dyn SubcommandHooks) -> anyhow::Result<()> { Ok(()) }
/// # }
/// let mut visited = Vec::new();
/// mutate_subcommands(CmdId(3), &Noop, &mut (), None, Some(&mut |index: &SubCmdIdx| visited.push(index.clone())))?;
/// assert!(visited.is_empty());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn mutate_subcommands<'f, S, C: Command<S> + ?Sized>(
    id: CmdId,
    cmd: &C,
    state: &mut S,
    pre: Option<SubcommandCallback<'f>>,
    post: Option<SubcommandCallback<'f>>,
) -> Result<()> {
    let mut hooks = CallbackHooks { id, pre, post };
    match cmd.mutate(id, state, &mut hooks) {
        Err(err) if is_cancelled(&err) => Err(err),
        Err(err) => {
            debug!("Ignoring replay error of command {id} ({}): {err:#}", cmd.name());
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}
