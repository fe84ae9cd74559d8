//! Shared context passed to modules

use crate::domain::dashboard::{DashboardSnapshot, Notification};

/// Shared context available to all modules
#[derive(Debug, Default)]
pub struct Context {
    /// Latest controller snapshot
    pub snapshot: DashboardSnapshot,

    /// Recent notifications, newest first
    pub activity: Vec<Notification>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}
