//! Allocation errors for [`Container`](super::container::Container)

use std::fmt;

/// Failure to grow a container's backing storage.
///
/// Both variants leave the container exactly as it was before the call that
/// tried to grow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The allocator refused the request, or the request went past the
    /// container's capacity ceiling.
    OutOfMemory {
        /// Element slots the container tried to reach
        requested: usize,
        /// Ceiling in element slots (`usize::MAX` when unbounded)
        limit: usize,
    },

    /// The requested capacity does not fit in a `Layout`
    CapacityOverflow,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfMemory { requested, limit } if *limit == usize::MAX => {
                write!(f, "Out of memory: could not grow to {} slots", requested)
            }
            AllocError::OutOfMemory { requested, limit } => {
                write!(
                    f,
                    "Out of memory: requested {} slots, limit is {}",
                    requested, limit
                )
            }
            AllocError::CapacityOverflow => write!(f, "Capacity overflow"),
        }
    }
}

impl std::error::Error for AllocError {}
