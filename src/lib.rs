//! Core library surface for the Rhythm Game Picker TUI application.
//!
//! The sampler (`picker`) and the sidecar bootstrap (`sidecar`) are the two
//! pieces with real logic; `service` wires them to the SQLite store for the
//! `bin` target and for any other tooling that wants the same behavior.
pub mod config;
pub mod db;
pub mod models;
pub mod palette;
pub mod picker;
pub mod service;
pub mod sidecar;
pub mod ui;

pub use config::Config;
pub use models::{NewSong, SelectionCriteria, Song};
pub use service::PickerService;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
