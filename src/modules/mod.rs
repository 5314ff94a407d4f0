//! UI Modules
//!
//! Tab bodies implement the Module trait and handle their own key input
//! and rendering:
//! - dashboard: four chart cards over the static datasets
//! - chat: rooms, shared message log, draft input
//!
//! export writes the log and datasets to disk.

pub mod chat;
pub mod dashboard;
pub mod export;
