//! File I/O for the `gridstate` CLI: configs, action files, settings.

pub mod settings;
pub mod state_store;
