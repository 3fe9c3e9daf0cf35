//! Marker group values, both open ones tracked during a pass and closed ones emitted as output.

use std::fmt::{Display, Formatter};

use crate::core::index::SubCmdIdx;

/// Kind of marker region.
#[derive(Debug, Default, Copy, Clone, Hash, Eq, PartialEq)]
pub enum MarkerType {
    /// A debug label region, e.g. `vkCmdBeginDebugUtilsLabelEXT` / `vkCmdEndDebugUtilsLabelEXT`.
    #[default]
    Debug,
    /// A render pass region, e.g. `vkCmdBeginRenderPass` / `vkCmdEndRenderPass`.
    RenderPass,
}

impl Display for MarkerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerType::Debug => write!(f, "debug marker"),
            MarkerType::RenderPass => write!(f, "renderpass marker"),
        }
    }
}

/// A marker that is open, or waiting to be opened, on some queue.
#[derive(Debug, Clone)]
pub struct MarkerInfo {
    /// Display name of the region.
    pub name: String,
    /// Kind of region.
    pub ty: MarkerType,
    /// Last index component of the subcommand the marker was opened at, inclusive.
    pub start: u64,
    /// Last known end, exclusive. Zero until the first subcommand inside the marker finishes.
    pub end: u64,
    /// Full index of the scope the marker was opened in.
    pub parent: SubCmdIdx,
}

impl MarkerInfo {
    /// A marker that has only been requested, and has no position yet.
    pub(crate) fn pending(name: impl Into<String>, ty: MarkerType) -> Self {
        MarkerInfo {
            name: name.into(),
            ty,
            start: 0,
            end: 0,
            parent: SubCmdIdx::new(),
        }
    }

    /// Open a marker at the given full subcommand index.
    pub(crate) fn open_at(name: impl Into<String>, ty: MarkerType, full_index: &SubCmdIdx) -> Self {
        MarkerInfo {
            name: name.into(),
            ty,
            start: full_index.last().unwrap_or_default(),
            end: 0,
            parent: full_index.parent(),
        }
    }
}

/// A closed marker region over the subcommands `[start, end)` of the scope `parent`.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct MarkerGroup {
    /// Full index of the scope containing the group.
    pub parent: SubCmdIdx,
    /// Display name of the region.
    pub name: String,
    /// First subcommand in the group.
    pub start: u64,
    /// One past the last subcommand in the group.
    pub end: u64,
    /// Kind of region the group was created from.
    pub ty: MarkerType,
}

/// Flat list of closed marker groups, in the order they were closed.
#[derive(Debug, Default, Clone)]
pub struct MarkerGroups {
    groups: Vec<MarkerGroup>,
}

impl MarkerGroups {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Close a marker at `end` and append the resulting group.
    ///
    /// An end before the marker's start means the marker never saw a finished subcommand, the group is
    /// then recorded as empty at its start.
    pub fn close(&mut self, marker: &MarkerInfo, end: u64) {
        #[cfg(feature = "log-markers")]
        trace!("Closing {} `{}` at {}: [{}, {})", marker.ty, marker.name, marker.parent, marker.start, end);
        self.groups.push(MarkerGroup {
            parent: marker.parent.clone(),
            name: marker.name.clone(),
            start: marker.start,
            end: end.max(marker.start),
            ty: marker.ty,
        });
    }

    /// Iterate over all groups in closing order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerGroup> {
        self.groups.iter()
    }

    /// All groups directly inside the given scope.
    pub fn in_scope<'a>(&'a self, parent: &'a SubCmdIdx) -> impl Iterator<Item = &'a MarkerGroup> + 'a {
        self.groups.iter().filter(move |group| &group.parent == parent)
    }

    /// Number of closed groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no group was closed.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get the groups as a slice.
    pub fn as_slice(&self) -> &[MarkerGroup] {
        &self.groups
    }
}

impl<'a> IntoIterator for &'a MarkerGroups {
    type Item = &'a MarkerGroup;
    type IntoIter = std::slice::Iter<'a, MarkerGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
