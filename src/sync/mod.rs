//! The sync module resolves how the subcommands of a replayed capture relate to its top-level commands.
//!
//! - The [`resolver`] module holds [`SyncResolver`](crate::SyncResolver), the state of a single resolution pass,
//! and [`resolve_synchronization`](crate::resolve_synchronization), which drives it over a command stream.
//! - The [`replay`] module defines the interface to the replay engine: the [`Command`](crate::Command) trait it
//! implements and the [`SubcommandHooks`](crate::SubcommandHooks) it calls back into.
//! - The [`submission`] module tracks which top-level command every submission and recorded command belongs to.
//! - The [`ranges`] module accumulates the per-command output tables.
//! - The [`data`] module holds those output tables, [`SyncData`](crate::SyncData).
//!
//! # Example
//!
//! A `vkQueueSubmit` of one command buffer holding a debug label around a draw call reports the following to the
//! resolver. The replay engine usually does this from inside [`Command::mutate`](crate::Command::mutate).
//! ```
//! use cmdsync::prelude::*;
//!
//! let queue = vk::Queue::null();
//! let mut resolver = SyncResolver::new(ResolveSettings::default());
//! resolver.begin_command(CmdId(7));
//!
//! let data = CommandBufferCommand::default();
//! for (i, command) in ["begin label", "draw", "end label"].into_iter().enumerate() {
//!     let index = SubCmdIdx::from(vec![0, 0, i as u64]);
//!     let cx = SubcommandContext { submission: SubmissionId(1), queue, index: &index, rebuilding: false };
//!     resolver.pre_subcommand(&cx);
//!     match command {
//!         "begin label" => resolver.push_marker(&cx, "gbuffer", false, MarkerType::Debug),
//!         "end label" => resolver.pop_marker(&cx, MarkerType::Debug),
//!         _ => {}
//!     }
//!     resolver.post_subcommand(&cx, &data);
//! }
//!
//! let data = resolver.finish();
//! let group = &data.marker_groups.as_slice()[0];
//! assert_eq!((group.start, group.end), (0, 3));
//! assert_eq!(group.parent, SubCmdIdx::from(vec![7, 0, 0]));
//! ```

pub mod data;
pub mod ranges;
pub mod replay;
pub mod resolver;
pub mod submission;
