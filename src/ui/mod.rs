//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, mode switching
//! - **[`panes`]**: render functions for each visible pane (instructions, yard,
//!   transcript, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point is [`App`]: construct it with one recorded [`Replay`] per
//! mode and call [`App::run`] to start the event loop. The viewer never mutates
//! a stack collection; it only moves the replay cursors.
//!
//! [`Replay`]: crate::engine::Replay
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
