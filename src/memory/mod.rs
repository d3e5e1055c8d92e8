//! Memory model for the crane simulator
//!
//! This module provides the storage abstractions everything else is built on:
//! - [`container`]: [`Container`], an owning growable sequence over a raw allocation
//! - [`stack`]: [`Stack`] piles and the [`StackCollection`] that owns them
//! - [`error`]: [`AllocError`] for growth failures
//!
//! # Ownership Layers
//!
//! ```text
//! StackCollection
//! └── Container<Stack>          one slot per labelled column
//!     └── Container<u8>         crate identifiers, bottom → top
//! ```
//!
//! Dropping the collection releases every stack. Moving a crate between stacks
//! copies a byte; moving a stack out of the collection transfers the whole
//! allocation without running its destructor.

pub mod container;
pub mod error;
pub mod stack;

pub use container::Container;
pub use error::AllocError;
pub use stack::{Stack, StackCollection};
