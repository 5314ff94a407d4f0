//! ProcessPro: process planning dashboards and team chat in the terminal.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod modules;
pub mod state;
pub mod ui;
