// Library target shared by the binary and the integration tests in tests/.
// main.rs only wires the terminal, logging and the provider worker around it.

pub mod app;
pub mod config;
pub mod content;
pub mod engine;
pub mod event;
pub mod model;
pub mod provider;
pub mod session;
pub mod ui;
