//! # Introduction
//!
//! Cranetty replays crane instructions over a yard of crate stacks and reports
//! the top crate of every stack. Each run is simulated twice: once with a crane
//! that moves crates one at a time (the moved run ends up reversed) and once
//! with a crane that lifts the whole run at once (order preserved). Recorded
//! runs can be stepped forward and backward in a terminal viewer built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! ByteSource → Container<u8> → Parser → StackCollection + Instructions → Crane → tops
//!                                                                      ↘ Replay → TUI
//! ```
//!
//! 1. [`input`]: reads a [`input::ByteSource`] into one owned buffer.
//! 2. [`parser`]: splits the buffer into line slices, builds the
//!    [`memory::StackCollection`] from the crate diagram and parses the
//!    `move N from S to D` block.
//! 3. [`memory`]: [`memory::Container`], the growable raw-storage sequence
//!    every other structure is built on, and the stack types made from it.
//! 4. [`engine`]: the [`engine::Crane`] in both [`engine::MoveMode`]s and the
//!    [`engine::Replay`] recorder.
//! 5. [`snapshot`]: bounded snapshot history and the move transcript.
//! 6. [`driver`]: the end-to-end `solve` used by the binary.
//! 7. [`config`]: command-line options.
//! 8. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Input format
//!
//! ```text
//!     [D]
//! [N] [C]
//! [Z] [M] [P]
//!  1   2   3
//!
//! move 1 from 2 to 1
//! move 3 from 1 to 3
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod input;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;
