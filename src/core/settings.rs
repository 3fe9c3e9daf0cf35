//! Exposes the settings used to configure a resolution pass.

/// Settings for one resolution pass over a capture.
///
/// The defaults match what timeline front ends expect. The switches exist to inspect captures
/// with broken marker nesting, where seeing the raw groups can be more useful than the recovered ones.
#[derive(Debug, Clone)]
pub struct ResolveSettings {
    /// Name of the capture being resolved. Only used in log messages.
    pub name: String,
    /// Emit marker groups that are still open when the stream ends. When disabled, such markers are dropped.
    pub flush_unclosed_markers: bool,
    /// Reopen a debug marker in the next subcommand after it was implicitly closed by popping a render pass marker
    /// below it. Render pass markers are never reopened.
    pub resurrect_spilled_debug_markers: bool,
    /// Close open markers and reopen them with the same name when execution moves to an unrelated command buffer
    /// or submission without closing them first.
    pub carry_markers_across_boundaries: bool,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        ResolveBuilder::new().build()
    }
}

/// The resolve builder is a convenience struct to easily create [`ResolveSettings`].
///
/// For information about each of the fields, see [`ResolveSettings`]
/// # Example
/// ```
/// # use cmdsync::*;
/// let settings = ResolveBuilder::new()
///     .name("frame 42")
///     .flush_unclosed_markers(false)
///     .build();
/// assert!(settings.resurrect_spilled_debug_markers);
/// ```
pub struct ResolveBuilder {
    inner: ResolveSettings,
}

impl Default for ResolveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveBuilder {
    /// Create a new resolve builder with default settings.
    pub fn new() -> Self {
        ResolveBuilder {
            inner: ResolveSettings {
                name: String::from(""),
                flush_unclosed_markers: true,
                resurrect_spilled_debug_markers: true,
                carry_markers_across_boundaries: true,
            },
        }
    }

    /// Sets the capture name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    /// Emit or drop markers still open at the end of the stream.
    pub fn flush_unclosed_markers(mut self, enabled: bool) -> Self {
        self.inner.flush_unclosed_markers = enabled;
        self
    }

    /// Reopen debug markers that were spilled by a render pass marker pop.
    pub fn resurrect_spilled_debug_markers(mut self, enabled: bool) -> Self {
        self.inner.resurrect_spilled_debug_markers = enabled;
        self
    }

    /// Carry open markers over command buffer and submission boundaries.
    pub fn carry_markers_across_boundaries(mut self, enabled: bool) -> Self {
        self.inner.carry_markers_across_boundaries = enabled;
        self
    }

    /// Build the resulting resolve settings.
    pub fn build(self) -> ResolveSettings {
        self.inner
    }
}
