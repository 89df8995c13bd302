//! Deterministic, pure grid state logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return new values suitable for tests.

pub mod action;
pub mod data;
pub mod merge;
pub mod props;
pub mod reducer;
pub mod selectors;
pub mod types;
pub mod visibility;
