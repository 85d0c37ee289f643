#![forbid(unsafe_code)]

//! The `Model`/`Cmd` contract between controllers and the dispatcher.

use std::time::Duration;

/// Names a scheduled timer so it can be replaced or cancelled.
///
/// Scheduling a new timer under a key that already has one pending
/// replaces the pending timer. Controllers use one key per logical timer
/// ("loading.done", "report.dismiss", ...).
pub type TimerKey = &'static str;

/// A state machine driven by messages.
pub trait Model {
    /// The message type this model consumes.
    type Message;

    /// Called once when the dispatcher starts, before any message.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::None
    }

    /// Process a message, returning follow-up work.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;
}

/// Side effects returned from `init()` and `update()`.
///
/// Commands never execute inline; the dispatcher enqueues resulting
/// messages so updates observe a strict FIFO order.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Send a message to the model.
    Msg(M),
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Deliver `msg` after `after` of logical time, replacing any pending
    /// timer with the same key.
    Schedule {
        key: TimerKey,
        after: Duration,
        msg: M,
    },
    /// Cancel the pending timer with this key, if any.
    Cancel(TimerKey),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Schedule { key, after, msg } => f
                .debug_struct("Schedule")
                .field("key", key)
                .field("after", after)
                .field("msg", msg)
                .finish(),
            Self::Cancel(key) => f.debug_tuple("Cancel").field(key).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a batch, collapsing trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<_> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a scheduled-delivery command.
    #[inline]
    pub fn schedule(key: TimerKey, after: Duration, msg: M) -> Self {
        Self::Schedule { key, after, msg }
    }

    /// Create a timer-cancel command.
    #[inline]
    pub fn cancel(key: TimerKey) -> Self {
        Self::Cancel(key)
    }

    /// Stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Msg(_) => "Msg",
            Self::Batch(_) => "Batch",
            Self::Schedule { .. } => "Schedule",
            Self::Cancel(_) => "Cancel",
        }
    }

    /// Count atomic commands, recursing through batches.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}
