//! Infrastructure layer - runtime services behind the dashboard
//!
//! This layer contains:
//! - The Tokio-backed battery drain timer
//! - Log output setup for the binary

pub mod logging;
pub mod runtime;

pub use runtime::{DrainTimer, Tick, TickReceiver};
