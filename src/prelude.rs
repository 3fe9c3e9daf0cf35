pub use ash::vk;

pub use crate::core::command::{CmdId, InitialCallId, SubmissionId};
pub use crate::core::error::Error;
pub use crate::core::index::SubCmdIdx;
pub use crate::core::settings::*;

pub use crate::markers::group::{MarkerGroup, MarkerGroups, MarkerInfo, MarkerType};
pub use crate::markers::tracker::MarkerTracker;

pub use crate::sync::data::{ExecutionRanges, SubcommandReference, SyncData};
pub use crate::sync::replay::*;
pub use crate::sync::resolver::{resolve_synchronization, SyncResolver};
pub use crate::sync::submission::SubmissionTracker;

pub use crate::extensions::{CmdGroup, CmdGrouper, Extension};
