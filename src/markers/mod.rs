//! Marker groups are named regions over a run of subcommands: debug labels and render passes.
//!
//! The replay engine reports a marker being opened or closed through
//! [`SubcommandHooks::push_marker`](crate::sync::replay::SubcommandHooks::push_marker) and
//! [`SubcommandHooks::pop_marker`](crate::sync::replay::SubcommandHooks::pop_marker). Those requests are not
//! trusted to be well nested. A pop of one kind closes any marker of the other kind above it, markers left open
//! when execution moves to another command buffer are carried over, and markers left open at the end of
//! the stream are closed there.
//!
//! - The [`tracker`] module keeps the open marker stacks per queue.
//! - The [`group`] module holds the marker values and the list of closed groups.
//!
//! # Example
//!
//! ```
//! use cmdsync::prelude::*;
//!
//! let queue = vk::Queue::null();
//! let mut tracker = MarkerTracker::default();
//! let mut groups = MarkerGroups::new();
//!
//! tracker.push(queue, &SubCmdIdx::from(vec![1, 0, 0]), "shadow pass", false, MarkerType::RenderPass);
//! tracker.push(queue, &SubCmdIdx::from(vec![1, 0, 1]), "cascade 0", false, MarkerType::Debug);
//! // Closing the render pass closes the debug label inside it as well.
//! tracker.pop(queue, 3, MarkerType::RenderPass, &mut groups);
//! assert_eq!(groups.len(), 2);
//! // The debug label will be opened again at the next subcommand.
//! assert_eq!(tracker.pending_markers(queue).len(), 1);
//! ```

pub mod group;
pub mod tracker;
