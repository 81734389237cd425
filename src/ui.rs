//! Ratatui front-end for the picker: a browsable catalog, song forms and the
//! random pick dialog, split into state (`app`), form input (`forms`),
//! list screens (`screens`) and the terminal loop (`terminal`).

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
