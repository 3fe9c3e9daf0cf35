//! Hierarchical subcommand indices.

use std::fmt::{Display, Formatter};

use crate::core::command::CmdId;

/// A path into nested subcommand scopes, outermost scope first.
///
/// For a `vkQueueSubmit` the local index of a draw call could be `[submit_info, command_buffer, command]`.
/// Prepending the id of the top-level command gives the full index of that subcommand in the capture,
/// see [`SubCmdIdx::with_root`].
///
/// Indices compare lexicographically, which is also the order in which subcommands execute.
/// # Example
/// ```
/// # use cmdsync::*;
/// let buffer = SubCmdIdx::from(vec![4, 0, 1]);
/// let draw = SubCmdIdx::from(vec![4, 0, 1, 7]);
/// assert!(buffer.contains(&draw));
/// assert!(buffer < draw);
/// ```
#[derive(Debug, Default, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SubCmdIdx(Vec<u64>);

impl SubCmdIdx {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full index of a subcommand by prepending the top-level command it executes under.
    pub fn with_root(root: CmdId, local: &SubCmdIdx) -> Self {
        let mut indices = Vec::with_capacity(local.len() + 1);
        indices.push(root.0);
        indices.extend_from_slice(local.as_slice());
        SubCmdIdx(indices)
    }

    /// Step back to the index immediately before this one.
    ///
    /// The last component is decremented. If it was already zero it wraps around and the
    /// component before it is decremented instead, like a borrow in subtraction.
    /// Decrementing an empty index does nothing.
    pub fn decrement(&mut self) {
        for component in self.0.iter_mut().rev() {
            let (value, borrow) = component.overflowing_sub(1);
            *component = value;
            if !borrow {
                break;
            }
        }
    }

    /// Returns a copy of this index, decremented once. See [`SubCmdIdx::decrement`].
    pub fn decremented(&self) -> Self {
        let mut previous = self.clone();
        previous.decrement();
        previous
    }

    /// Returns true if this index is a prefix of `other`, or equal to it.
    pub fn contains(&self, other: &SubCmdIdx) -> bool {
        other.0.starts_with(&self.0)
    }

    /// All components except the last one. Empty for indices of length zero or one.
    pub fn parent(&self) -> SubCmdIdx {
        match self.0.split_last() {
            None => SubCmdIdx::new(),
            Some((_, parent)) => SubCmdIdx(parent.to_vec()),
        }
    }

    /// The innermost component, if any.
    pub fn last(&self) -> Option<u64> {
        self.0.last().copied()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this index has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the components of this index.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

impl From<Vec<u64>> for SubCmdIdx {
    fn from(value: Vec<u64>) -> Self {
        SubCmdIdx(value)
    }
}

impl From<&[u64]> for SubCmdIdx {
    fn from(value: &[u64]) -> Self {
        SubCmdIdx(value.to_vec())
    }
}

impl Display for SubCmdIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, component) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{component}")?;
        }
        write!(f, "]")
    }
}
