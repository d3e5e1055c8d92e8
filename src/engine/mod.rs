//! Crane simulation engine
//!
//! This module provides the core execution logic:
//! - [`crane`]: [`Crane`] and the two [`MoveMode`]s
//! - [`replay`]: [`Replay`], a recorded run with time-travel navigation
//! - [`errors`]: [`SimulationError`] and [`InstructionFault`]
//! - [`constants`]: default limits
//!
//! # Execution Model
//!
//! Instructions are applied strictly in input order, each to the state left by
//! the previous one. A stack collection is consumed by a run; simulating the
//! other mode needs a freshly parsed collection.

pub mod constants;
pub mod crane;
pub mod errors;
pub mod replay;

pub use crane::{Crane, MoveMode};
pub use errors::{InstructionFault, SimulationError};
pub use replay::Replay;
