#![forbid(unsafe_code)]

//! Deterministic message dispatcher with a logical timer wheel.
//!
//! Messages are processed strictly in dispatch order: commands enqueue
//! follow-up messages rather than recursing into `update`, so a model
//! never observes reentrancy. Timers fire only from [`Dispatcher::advance`],
//! in deadline order with scheduling order as the tie-break.

use std::collections::VecDeque;
use std::time::Duration;

use crate::model::{Cmd, Model, TimerKey};

struct PendingTimer<M> {
    key: TimerKey,
    deadline: Duration,
    seq: u64,
    msg: M,
}

/// Runs a [`Model`], owning its message queue and pending timers.
pub struct Dispatcher<M: Model> {
    model: M,
    queue: VecDeque<M::Message>,
    timers: Vec<PendingTimer<M::Message>>,
    /// Logical elapsed time since construction.
    now: Duration,
    seq: u64,
}

impl<M: Model> Dispatcher<M> {
    /// Wrap a model and run its `init` command.
    pub fn new(mut model: M) -> Self {
        let cmd = model.init();
        let mut dispatcher = Self {
            model,
            queue: VecDeque::new(),
            timers: Vec::new(),
            now: Duration::ZERO,
            seq: 0,
        };
        dispatcher.apply(cmd);
        dispatcher.drain();
        dispatcher
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Logical time elapsed across all `advance` calls.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now
    }

    /// Number of timers currently pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether a timer with this key is pending.
    #[must_use]
    pub fn has_timer(&self, key: TimerKey) -> bool {
        self.timers.iter().any(|t| t.key == key)
    }

    /// Feed one message to the model and process everything it causes.
    pub fn dispatch(&mut self, msg: M::Message) {
        self.queue.push_back(msg);
        self.drain();
    }

    /// Move logical time forward, firing due timers in deadline order.
    ///
    /// Time steps to each firing timer's deadline before its message is
    /// processed, so a handler that reschedules itself (a repeating tick)
    /// counts from its own deadline rather than the end of the window. A
    /// timer's message is fully processed, cascades included, before the
    /// next due timer fires, so cancellations issued by one timer
    /// suppress later ones.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while let Some((idx, deadline)) = self.next_due(target) {
            self.now = self.now.max(deadline);
            let timer = self.timers.swap_remove(idx);
            tracing::trace!(key = timer.key, "timer fired");
            self.queue.push_back(timer.msg);
            self.drain();
        }
        self.now = target;
    }

    /// Drop every pending timer. Called on teardown so nothing fires into
    /// a dead controller.
    pub fn cancel_all_timers(&mut self) {
        if !self.timers.is_empty() {
            tracing::debug!(count = self.timers.len(), "cancelling all pending timers");
            self.timers.clear();
        }
    }

    fn next_due(&self, target: Duration) -> Option<(usize, Duration)> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= target)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(idx, t)| (idx, t.deadline))
    }

    fn drain(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            let cmd = self.model.update(msg);
            self.apply(cmd);
        }
    }

    fn apply(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(msg) => self.queue.push_back(msg),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.apply(cmd);
                }
            }
            Cmd::Schedule { key, after, msg } => {
                // One pending timer per key: reschedule replaces.
                self.timers.retain(|t| t.key != key);
                self.seq += 1;
                tracing::trace!(key, after_ms = after.as_millis() as u64, "timer scheduled");
                self.timers.push(PendingTimer {
                    key,
                    deadline: self.now + after,
                    seq: self.seq,
                    msg,
                });
            }
            Cmd::Cancel(key) => {
                let before = self.timers.len();
                self.timers.retain(|t| t.key != key);
                if self.timers.len() != before {
                    tracing::trace!(key, "timer cancelled");
                }
            }
        }
    }
}
