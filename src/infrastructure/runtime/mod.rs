//! Runtime infrastructure - Tokio-backed background work

mod drain;

pub use drain::{DrainTimer, Tick, TickReceiver, MAX_PERIOD, MIN_PERIOD};
