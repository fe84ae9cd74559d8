//! Guide robot control panel: a simulated dashboard for an assistive
//! navigation robot.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod ui;
