//! Process-wide registry of extensions.
//!
//! Extensions provide custom command groupers, which split a command stream into named ranges of top-level commands
//! (for example one group per frame). Extensions are registered once at application startup and read back as a
//! snapshot.
//!
//! # Example
//! ```
//! use cmdsync::prelude::*;
//! use cmdsync::extensions;
//!
//! fn no_groupers() -> Vec<Box<dyn CmdGrouper>> {
//!     Vec::new()
//! }
//!
//! extensions::register(Extension { name: String::from("empty"), cmd_groupers: no_groupers })?;
//! assert!(extensions::get()?.iter().any(|extension| extension.name == "empty"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::sync::Mutex;

use anyhow::Result;

use crate::core::command::CmdId;
use crate::core::error::Error;

static EXTENSIONS: Mutex<Vec<Extension>> = Mutex::new(Vec::new());

/// A named range of top-level commands, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdGroup {
    /// First command in the group.
    pub start: CmdId,
    /// One past the last command in the group.
    pub end: CmdId,
    /// Display name of the group.
    pub name: String,
}

/// Groups top-level commands while they are streamed through it.
pub trait CmdGrouper {
    /// Observe the next command in the stream.
    fn process(&mut self, id: CmdId, name: &str);
    /// Return all groups built so far. `end` is one past the last command of the stream.
    fn build(&mut self, end: CmdId) -> Vec<CmdGroup>;
}

/// An extension registered with [`register`].
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Extension {
    /// Name of the extension.
    pub name: String,
    /// Creates fresh instances of the extension's command groupers.
    #[derivative(Debug = "ignore")]
    pub cmd_groupers: fn() -> Vec<Box<dyn CmdGrouper>>,
}

/// Register an extension. It stays registered for the lifetime of the process.
pub fn register(extension: Extension) -> Result<()> {
    let mut extensions = EXTENSIONS.lock().map_err(Error::from)?;
    debug!("Registering extension `{}`", extension.name);
    extensions.push(extension);
    Ok(())
}

/// Returns a copy of every registered extension, in registration order.
pub fn get() -> Result<Vec<Extension>> {
    let extensions = EXTENSIONS.lock().map_err(Error::from)?;
    Ok(extensions.clone())
}

/// Run the groupers of every registered extension over a stream of `(id, name)` pairs and collect their groups.
pub fn group_commands<'a>(commands: impl IntoIterator<Item = (CmdId, &'a str)>) -> Result<Vec<CmdGroup>> {
    let mut groupers = get()?
        .iter()
        .flat_map(|extension| (extension.cmd_groupers)())
        .collect::<Vec<_>>();
    let mut end = CmdId::NONE;
    for (id, name) in commands {
        for grouper in &mut groupers {
            grouper.process(id, name);
        }
        end = CmdId(id.0.saturating_add(1));
    }
    Ok(groupers.iter_mut().flat_map(|grouper| grouper.build(end)).collect())
}
