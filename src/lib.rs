//! Subcommand synchronization resolver for recorded Vulkan command streams.
//!
//! A recorded capture is a flat list of top-level commands, but commands like `vkQueueSubmit` execute
//! many nested subcommands when replayed: command buffers, the commands recorded into them, secondary
//! command buffers executed through `vkCmdExecuteCommands`, and so on. Tooling that visualizes a capture
//! on a timeline needs to know which subcommands each top-level command produced, which debug label and
//! render pass regions they fall into, and which command originally recorded them.
//!
//! This crate computes that information in a single replay pass. The replay engine itself is not part of
//! this crate. It is plugged in through the [`Command`](crate::sync::replay::Command) trait, and calls back
//! into the resolver through [`SubcommandHooks`](crate::sync::replay::SubcommandHooks) for every subcommand
//! it executes.
//!
//! # Example
//!
//! ```
//! use cmdsync::prelude::*;
//!
//! // Any replay state your engine needs while mutating commands.
//! struct State;
//!
//! struct Submit;
//!
//! impl Command<State> for Submit {
//!     fn mutate(&self, _id: CmdId, _state: &mut State, hooks: &mut dyn SubcommandHooks) -> anyhow::Result<()> {
//!         let index = SubCmdIdx::from(vec![0, 0, 0]);
//!         let cx = SubcommandContext {
//!             submission: SubmissionId(1),
//!             queue: vk::Queue::null(),
//!             index: &index,
//!             rebuilding: false,
//!         };
//!         hooks.pre_subcommand(&cx);
//!         hooks.post_subcommand(&cx, &CommandBufferCommand::default());
//!         Ok(())
//!     }
//! }
//!
//! let settings = ResolveBuilder::new().name("example capture").build();
//! let data = resolve_synchronization(&settings, &mut State, [(CmdId(1), Submit)])?;
//! assert_eq!(data.command_ranges[&CmdId(1)].last_index, SubCmdIdx::from(vec![0, 0, 0]));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! For further details, check out the following modules
//! - [`core`] for indices, identities, errors and resolve settings.
//! - [`markers`] for marker group tracking.
//! - [`sync`] for the resolver itself and its output tables.
//! - [`extensions`] for registering custom command groupers.

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate log;

pub mod prelude;
pub use crate::prelude::*;

pub mod core;
pub mod markers;
pub mod sync;
pub mod extensions;
