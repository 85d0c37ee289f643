#![forbid(unsafe_code)]

//! Deterministic Elm-style runtime for the iQpay controllers.
//!
//! A controller implements [`Model`]: it receives messages, mutates its
//! own state, and returns a [`Cmd`] describing follow-up work. The
//! [`Dispatcher`] executes commands without threads or wall-clock
//! dependence: scheduled timers live on a logical timer wheel that only
//! moves when [`Dispatcher::advance`] is called, so tests drive time
//! explicitly and production hosts map `advance` onto real elapsed time.

pub mod clock;
pub mod dispatch;
pub mod model;

pub use clock::{Clock, ManualClock, SystemClock, epoch_millis, year_utc};
pub use dispatch::Dispatcher;
pub use model::{Cmd, Model, TimerKey};
