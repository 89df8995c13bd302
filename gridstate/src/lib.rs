//! State reduction for a tabular data-grid view.
//!
//! A grid's view state (rows, paging, sorting, filter, column visibility) is
//! an immutable [`core::types::GridState`]. Every user or data event is an
//! [`core::action::Action`], and [`core::reducer::reduce`] maps the previous
//! state plus an action to the next state.
//!
//! - **[`core`]**: Pure, deterministic logic (transitions, prop merging,
//!   derived views). No I/O, fully testable in isolation.
//! - **[`io`]**: Config, action-file and settings loading.
//!
//! [`replay`] ties both together for the CLI.

pub mod core;
pub mod io;
pub mod logging;
pub mod replay;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
