//! UI Modules
//!
//! Each module implements the Module trait and handles its own:
//! - Key input processing
//! - Rendering
//!
//! Modules:
//! - dashboard: sensor, voice, navigation and activity panels

pub mod dashboard;
