//! Per-queue tracking of open marker regions.

use std::collections::HashMap;

use ash::vk;
use ash::vk::Handle;

use crate::core::index::SubCmdIdx;
use crate::core::settings::ResolveSettings;
use crate::markers::group::{MarkerGroups, MarkerInfo, MarkerType};

#[derive(Debug, Default)]
struct QueueMarkers {
    /// Open markers, innermost last.
    open: Vec<MarkerInfo>,
    /// Markers to open at the next subcommand on this queue.
    pending: Vec<MarkerInfo>,
}

/// Tracks the marker stacks of every queue during a resolution pass.
///
/// Marker nesting is a per-queue concept, so two queues never see each other's markers. Closing
/// a marker does not hand it back to the caller: it is appended to a [`MarkerGroups`] list instead.
#[derive(Debug)]
pub struct MarkerTracker {
    queues: HashMap<vk::Queue, QueueMarkers>,
    resurrect_spilled_debug_markers: bool,
}

impl Default for MarkerTracker {
    fn default() -> Self {
        Self::new(&ResolveSettings::default())
    }
}

impl MarkerTracker {
    /// Create an empty tracker.
    pub fn new(settings: &ResolveSettings) -> Self {
        MarkerTracker {
            queues: HashMap::new(),
            resurrect_spilled_debug_markers: settings.resurrect_spilled_debug_markers,
        }
    }

    /// Open a marker on a queue.
    ///
    /// With `next` set, the marker is only queued and opens at the next subcommand on this queue,
    /// see [`MarkerTracker::open_pending`]. Otherwise it opens right away at `full_index`.
    pub fn push(&mut self, queue: vk::Queue, full_index: &SubCmdIdx, name: &str, next: bool, ty: MarkerType) {
        let markers = self.queues.entry(queue).or_default();
        if next {
            markers.pending.push(MarkerInfo::pending(name, ty));
        } else {
            #[cfg(feature = "log-markers")]
            trace!("Opening {ty} `{name}` at {full_index}");
            markers.open.push(MarkerInfo::open_at(name, ty, full_index));
        }
    }

    /// Close the innermost marker of the given kind on a queue, ending it at `end`.
    ///
    /// Markers of another kind above it are closed at `end` too. Spilled debug markers are queued to reopen in the
    /// next subcommand, spilled render pass markers stay closed.
    pub fn pop(&mut self, queue: vk::Queue, end: u64, ty: MarkerType, out: &mut MarkerGroups) {
        let markers = self.queues.entry(queue).or_default();
        if markers.open.is_empty() {
            warn!("Cannot pop {ty} on queue {queue:?}, no open marker at subcommand end {end}");
            return;
        }

        while let Some(top) = markers.open.last() {
            if top.ty == ty {
                break;
            }
            warn!("Type of the top marker `{}` ({}) does not match with the pop request ({ty})", top.name, top.ty);
            out.close(top, end);
            let Some(spilled) = markers.open.pop() else { break };
            match spilled.ty {
                MarkerType::Debug if self.resurrect_spilled_debug_markers => {
                    debug!("Debug marker `{}` popped due to popping {ty}, it will be opened again in the next subcommand", spilled.name);
                    markers.pending.push(MarkerInfo::pending(spilled.name, spilled.ty));
                }
                _ => {
                    warn!("{} `{}` popped due to popping {ty}, the group will be closed here", spilled.ty, spilled.name);
                }
            }
        }

        match markers.open.pop() {
            Some(marker) => out.close(&marker, end),
            None => warn!("No open {ty} found on queue {queue:?}, every open marker was closed instead"),
        }
    }

    /// Close markers that were opened deeper than `full_index` can reach.
    ///
    /// These were opened inside a secondary command buffer that finished without closing them. They end at
    /// their last known end.
    pub fn close_abandoned(&mut self, queue: vk::Queue, full_index: &SubCmdIdx, out: &mut MarkerGroups) {
        let Some(markers) = self.queues.get_mut(&queue) else { return };
        while let Some(top) = markers.open.last() {
            if top.parent.len() <= full_index.len() {
                break;
            }
            error!("{} `{}` began in a secondary command buffer and was never closed. Closing it now", top.ty, top.name);
            out.close(top, top.end);
            markers.open.pop();
        }
    }

    /// Returns true if the innermost open marker on `queue` was opened in a scope that does not contain `full_index`.
    pub fn left_scope(&self, queue: vk::Queue, full_index: &SubCmdIdx) -> bool {
        self.open_markers(queue)
            .last()
            .map_or(false, |top| !top.parent.contains(full_index))
    }

    /// Move every open marker on `queue` into the scope of `full_index`.
    ///
    /// Each marker is closed at its last known end and an identically named marker of the same kind is opened
    /// at `full_index`, preserving the nesting order.
    pub fn carry_over(&mut self, queue: vk::Queue, full_index: &SubCmdIdx, out: &mut MarkerGroups) {
        let Some(markers) = self.queues.get_mut(&queue) else { return };
        let carried = std::mem::take(&mut markers.open);
        for marker in carried {
            out.close(&marker, marker.end);
            self.push(queue, full_index, &marker.name, false, marker.ty);
        }
    }

    /// Open every queued marker on `queue` at `full_index`, most recently queued first.
    pub fn open_pending(&mut self, queue: vk::Queue, full_index: &SubCmdIdx) {
        let Some(markers) = self.queues.get_mut(&queue) else { return };
        let pending = std::mem::take(&mut markers.pending);
        for marker in pending.into_iter().rev() {
            self.push(queue, full_index, &marker.name, false, marker.ty);
        }
    }

    /// Set the last known end of every open marker on `queue`.
    pub fn refresh_ends(&mut self, queue: vk::Queue, end: u64) {
        if let Some(markers) = self.queues.get_mut(&queue) {
            for marker in &mut markers.open {
                marker.end = end;
            }
        }
    }

    /// Close every marker that is still open, innermost first, at its last known end. Queued markers that never
    /// opened are dropped.
    pub fn flush(&mut self, out: &mut MarkerGroups) {
        let mut queues = self.queues.drain().collect::<Vec<_>>();
        queues.sort_by_key(|(queue, _)| queue.as_raw());
        for (queue, mut markers) in queues {
            while let Some(marker) = markers.open.pop() {
                warn!("{} `{}` on queue {queue:?} was never closed. Closing it at the end of the stream", marker.ty, marker.name);
                out.close(&marker, marker.end);
            }
            for marker in markers.pending {
                debug!("Dropping {} `{}` on queue {queue:?}, no subcommand followed it", marker.ty, marker.name);
            }
        }
    }

    /// Drop all marker state without emitting anything.
    pub fn clear(&mut self) {
        self.queues.clear();
    }

    /// Open markers on a queue, innermost last.
    pub fn open_markers(&self, queue: vk::Queue) -> &[MarkerInfo] {
        self.queues.get(&queue).map(|markers| markers.open.as_slice()).unwrap_or_default()
    }

    /// Markers queued to open at the next subcommand on a queue, in the order they were queued.
    pub fn pending_markers(&self, queue: vk::Queue) -> &[MarkerInfo] {
        self.queues.get(&queue).map(|markers| markers.pending.as_slice()).unwrap_or_default()
    }
}
