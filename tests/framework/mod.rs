#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use anyhow::{bail, Result};
use ash::vk;
use ash::vk::Handle;
use log::{Level, LevelFilter, Log, Metadata, Record};

use cmdsync::prelude::*;

/// State shared by the scripted commands of a test stream.
#[derive(Debug, Default)]
pub struct ReplayState {
    /// Every command that was mutated, in order.
    pub mutated: Vec<CmdId>,
}

#[derive(Debug, Clone)]
enum Action {
    Push(String, bool, MarkerType),
    Pop(MarkerType),
}

#[derive(Debug, Clone)]
struct Subcommand {
    index: SubCmdIdx,
    initial_call: Option<InitialCallId>,
    rebuilding: bool,
    actions: Vec<Action>,
}

#[derive(Debug, Clone)]
enum Step {
    Record(InitialCallId),
    Execute(Subcommand),
    Fail,
    Cancel,
}

/// A top-level command that replays a fixed script of subcommands on one queue.
#[derive(Debug, Clone)]
pub struct ScriptedCommand {
    name: String,
    submission: SubmissionId,
    queue: vk::Queue,
    steps: Vec<Step>,
}

/// Build a queue handle for tests.
pub fn queue(raw: u64) -> vk::Queue {
    vk::Queue::from_raw(raw)
}

/// Shorthand for building an index from a slice.
pub fn idx(components: &[u64]) -> SubCmdIdx {
    SubCmdIdx::from(components)
}

impl ScriptedCommand {
    /// A command that executes a submission on the given queue.
    pub fn submit(submission: u64, queue_handle: u64) -> Self {
        ScriptedCommand {
            name: String::from("vkQueueSubmit"),
            submission: SubmissionId(submission),
            queue: queue(queue_handle),
            steps: vec![],
        }
    }

    /// A command that records into a command buffer and executes nothing.
    pub fn record(initial_call: u64) -> Self {
        ScriptedCommand {
            name: String::from("vkCmdDraw"),
            submission: SubmissionId(0),
            queue: queue(0),
            steps: vec![Step::Record(InitialCallId(initial_call))],
        }
    }

    /// Execute a subcommand at the given local index.
    pub fn subcommand(mut self, index: &[u64]) -> Self {
        self.steps.push(Step::Execute(Subcommand {
            index: idx(index),
            initial_call: None,
            rebuilding: false,
            actions: vec![],
        }));
        self
    }

    /// Execute one subcommand per index.
    pub fn subcommands(self, indices: &[&[u64]]) -> Self {
        indices.iter().fold(self, |cmd, index| cmd.subcommand(index))
    }

    fn last_subcommand(&mut self) -> &mut Subcommand {
        match self.steps.last_mut() {
            Some(Step::Execute(subcommand)) => subcommand,
            _ => panic!("test script: marker or call data given before any subcommand"),
        }
    }

    /// The last subcommand was recorded by the given initial call.
    pub fn from_call(mut self, initial_call: u64) -> Self {
        self.last_subcommand().initial_call = Some(InitialCallId(initial_call));
        self
    }

    /// The last subcommand belongs to a state rebuild.
    pub fn rebuilding(mut self) -> Self {
        self.last_subcommand().rebuilding = true;
        self
    }

    /// The last subcommand opens a marker.
    pub fn push(mut self, name: &str, ty: MarkerType) -> Self {
        self.last_subcommand().actions.push(Action::Push(name.to_string(), false, ty));
        self
    }

    /// The last subcommand requests a marker that opens at the next subcommand.
    pub fn push_next(mut self, name: &str, ty: MarkerType) -> Self {
        self.last_subcommand().actions.push(Action::Push(name.to_string(), true, ty));
        self
    }

    /// The last subcommand closes a marker.
    pub fn pop(mut self, ty: MarkerType) -> Self {
        self.last_subcommand().actions.push(Action::Pop(ty));
        self
    }

    /// Replay fails at this point.
    pub fn fail(mut self) -> Self {
        self.steps.push(Step::Fail);
        self
    }

    /// Replay is cancelled at this point.
    pub fn cancel(mut self) -> Self {
        self.steps.push(Step::Cancel);
        self
    }
}

impl Command<ReplayState> for ScriptedCommand {
    fn mutate(&self, id: CmdId, state: &mut ReplayState, hooks: &mut dyn SubcommandHooks) -> Result<()> {
        state.mutated.push(id);
        for step in &self.steps {
            match step {
                Step::Record(initial_call) => hooks.add_command(&CommandBufferCommand {
                    initial_call: Some(*initial_call),
                }),
                Step::Execute(subcommand) => {
                    let cx = SubcommandContext {
                        submission: self.submission,
                        queue: self.queue,
                        index: &subcommand.index,
                        rebuilding: subcommand.rebuilding,
                    };
                    hooks.pre_subcommand(&cx);
                    for action in &subcommand.actions {
                        match action {
                            Action::Push(name, next, ty) => hooks.push_marker(&cx, name, *next, *ty),
                            Action::Pop(ty) => hooks.pop_marker(&cx, *ty),
                        }
                    }
                    hooks.post_subcommand(&cx, &CommandBufferCommand {
                        initial_call: subcommand.initial_call,
                    });
                }
                Step::Fail => bail!("scripted replay failure"),
                Step::Cancel => return Err(Error::Cancelled.into()),
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Number the commands of a stream starting at 1, since 0 is reserved.
pub fn stream(commands: impl IntoIterator<Item = ScriptedCommand>) -> Vec<(CmdId, ScriptedCommand)> {
    commands
        .into_iter()
        .enumerate()
        .map(|(i, cmd)| (CmdId(i as u64 + 1), cmd))
        .collect()
}

/// Resolve a stream with default settings.
pub fn resolve(commands: impl IntoIterator<Item = ScriptedCommand>) -> Result<SyncData> {
    resolve_with(&ResolveSettings::default(), commands)
}

/// Resolve a stream with the given settings.
pub fn resolve_with(settings: &ResolveSettings, commands: impl IntoIterator<Item = ScriptedCommand>) -> Result<SyncData> {
    let mut state = ReplayState::default();
    resolve_synchronization(settings, &mut state, stream(commands))
}

/// Closed marker groups as `(name, parent, start, end)`, in closing order.
pub fn groups(data: &SyncData) -> Vec<(String, SubCmdIdx, u64, u64)> {
    data.marker_groups
        .iter()
        .map(|group| (group.name.clone(), group.parent.clone(), group.start, group.end))
        .collect()
}

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

/// Records every log message on the thread that emitted it, and forwards to a regular
/// `pretty_env_logger` so `RUST_LOG` still works when debugging a test.
struct CaptureLogger {
    inner: Box<dyn Log>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

static INIT_LOGGER: Once = Once::new();

/// Install the capturing logger and drop anything captured on this thread so far.
pub fn capture_logs() {
    INIT_LOGGER.call_once(|| {
        let mut builder = pretty_env_logger::formatted_builder();
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        let logger = CaptureLogger {
            inner: Box::new(builder.build()),
        };
        log::set_logger(Box::leak(Box::new(logger))).expect("test framework: a logger was already installed.");
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Every message captured on this thread at the given level since the last [`capture_logs`].
pub fn logs_at(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(record_level, _)| *record_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
