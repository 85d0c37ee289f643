#![forbid(unsafe_code)]

//! Property tests for the dispatcher's timer wheel.

use std::time::Duration;

use iqpay_runtime::{Cmd, Dispatcher, Model};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Msg {
    Start,
    Fired(usize),
}

const KEYS: [&str; 4] = ["a", "b", "c", "d"];

struct Scheduler {
    plan: Vec<(usize, u64)>,
    fired: Vec<usize>,
}

impl Model for Scheduler {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Start => Cmd::batch(
                self.plan
                    .iter()
                    .enumerate()
                    .map(|(i, (key, delay))| {
                        Cmd::schedule(KEYS[*key], Duration::from_millis(*delay), Msg::Fired(i))
                    })
                    .collect(),
            ),
            Msg::Fired(i) => {
                self.fired.push(i);
                Cmd::None
            }
        }
    }
}

proptest! {
    #[test]
    fn last_schedule_per_key_fires_in_deadline_order(
        plan in proptest::collection::vec((0usize..KEYS.len(), 0u64..500), 0..24)
    ) {
        let mut d = Dispatcher::new(Scheduler { plan: plan.clone(), fired: Vec::new() });
        d.dispatch(Msg::Start);
        d.advance(Duration::from_millis(1_000));

        // Rescheduling a key replaces its pending timer, so only the last
        // plan entry per key survives.
        let mut expected: Vec<(usize, u64)> = Vec::new();
        for (i, (key, delay)) in plan.iter().enumerate() {
            expected.retain(|(j, _)| plan[*j].0 != *key);
            expected.push((i, *delay));
        }
        expected.sort_by_key(|(i, delay)| (*delay, *i));
        let expected: Vec<usize> = expected.into_iter().map(|(i, _)| i).collect();

        prop_assert_eq!(&d.model().fired, &expected);
        prop_assert_eq!(d.pending_timers(), 0);
    }

    #[test]
    fn nothing_fires_before_its_deadline(
        plan in proptest::collection::vec((0usize..KEYS.len(), 1u64..500), 1..12),
        cut in 0u64..500
    ) {
        let mut d = Dispatcher::new(Scheduler { plan: plan.clone(), fired: Vec::new() });
        d.dispatch(Msg::Start);
        d.advance(Duration::from_millis(cut));

        for &i in &d.model().fired {
            prop_assert!(plan[i].1 <= cut, "timer {} fired {}ms early", i, plan[i].1 - cut);
        }
    }
}
