//! Growable owning sequence backed by a raw allocation
//!
//! [`Container`] is the storage primitive every other structure in the crate is
//! built from: crate stacks, the stack collection, instruction lists, line tables
//! and the input buffer itself.
//!
//! # Growth Policy
//!
//! Capacity is always `0` or `4 * 2^k`:
//! ```text
//! 0 → 4 → 8 → 16 → ...
//! ```
//! A push that would exceed capacity grows the allocation once, to the smallest
//! capacity in that sequence that fits. Capacity never shrinks.
//!
//! # Ownership
//!
//! Elements in `0..len` are initialized and owned by the container. Removing an
//! element is always explicit about intent:
//! - [`Container::pop_take`] hands ownership of the last element to the caller
//! - [`Container::pop_discard`] destroys the last element in place
//!
//! Dropping a container drops every live element in index order before the
//! storage is released, so a container of containers tears down recursively.
//!
//! # Failure Modes
//!
//! Growth failures are reported as [`AllocError`] and leave the container in the
//! state it had before the call. A capacity ceiling set with
//! [`Container::with_max_capacity`] is enforced the same way as a refusal from
//! the system allocator.

use super::error::AllocError;
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

/// Owning, growable sequence of `T` with an explicit growth policy.
///
/// # Invariants
/// - `len <= cap` at all times.
/// - Slots in `0..len` are initialized; slots in `len..cap` are not.
/// - `cap` is `0` or a power-of-two multiple of [`Container::INITIAL_CAPACITY`].
pub struct Container<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    max_cap: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the container uniquely owns its elements, same as `Vec<T>`.
unsafe impl<T: Send> Send for Container<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for Container<T> {}

impl<T> Container<T> {
    /// Capacity of the first allocation
    pub const INITIAL_CAPACITY: usize = 4;

    /// Create an empty container. Nothing is allocated until the first push.
    pub const fn new() -> Self {
        Self::with_max_capacity(usize::MAX)
    }

    /// Create an empty container that refuses to grow beyond `max_capacity`
    /// element slots.
    pub const fn with_max_capacity(max_capacity: usize) -> Self {
        Container {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            max_cap: max_capacity,
            _owns: PhantomData,
        }
    }

    /// Build a container holding clones of `items`, all-or-nothing.
    pub fn try_from_slice(items: &[T]) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut container = Self::new();
        container.try_extend_from_slice(items)?;
        Ok(container)
    }

    /// Size in bytes of one element slot
    pub const fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated element slots
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Growth ceiling in element slots (`usize::MAX` when unbounded)
    pub fn max_capacity(&self) -> usize {
        self.max_cap
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity the growth policy picks for `required` slots.
    fn grown_capacity(&self, required: usize) -> Result<usize, AllocError> {
        let mut cap = if self.cap == 0 {
            Self::INITIAL_CAPACITY
        } else {
            self.cap
        };
        while cap < required {
            cap = cap.checked_mul(2).ok_or(AllocError::CapacityOverflow)?;
        }
        if cap > self.max_cap {
            return Err(AllocError::OutOfMemory {
                requested: cap,
                limit: self.max_cap,
            });
        }
        Ok(cap)
    }

    /// Make room for at least `required` elements with a single reallocation.
    fn grow_to(&mut self, required: usize) -> Result<(), AllocError> {
        if required <= self.cap {
            return Ok(());
        }
        let new_cap = self.grown_capacity(required)?;

        if mem::size_of::<T>() == 0 {
            self.cap = new_cap;
            return Ok(());
        }

        let new_layout = Layout::array::<T>(new_cap).map_err(|_| AllocError::CapacityOverflow)?;
        let raw = if self.cap == 0 {
            // SAFETY: T is not zero-sized and new_cap >= 4, so the layout is non-zero.
            unsafe { alloc::alloc(new_layout) }
        } else {
            let old_layout =
                Layout::array::<T>(self.cap).map_err(|_| AllocError::CapacityOverflow)?;
            // SAFETY: ptr was allocated by this container with old_layout, and the
            // new size is non-zero and was validated by Layout::array.
            unsafe { alloc::realloc(self.ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size()) }
        };

        // A failed realloc leaves the old block in place, so the container is untouched.
        self.ptr = NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory {
            requested: new_cap,
            limit: self.max_cap,
        })?;
        self.cap = new_cap;
        Ok(())
    }

    /// Grow ahead of time so that `additional` more pushes cannot fail.
    pub fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;
        self.grow_to(required)
    }

    /// Append `item`, growing the storage first when it is full.
    ///
    /// # Errors
    /// On [`AllocError`] the container is unchanged and `item` is dropped.
    pub fn push(&mut self, item: T) -> Result<(), AllocError> {
        let required = self.len.checked_add(1).ok_or(AllocError::CapacityOverflow)?;
        self.grow_to(required)?;
        // SAFETY: len < cap after growth and the slot at len is uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(item) };
        self.len = required;
        Ok(())
    }

    /// Append clones of `items` one at a time, stopping at the first growth
    /// failure.
    ///
    /// Returns how many elements were appended; callers compare it against
    /// `items.len()`.
    pub fn extend_from_slice(&mut self, items: &[T]) -> usize
    where
        T: Clone,
    {
        let mut appended = 0;
        for item in items {
            if self.push(item.clone()).is_err() {
                break;
            }
            appended += 1;
        }
        appended
    }

    /// Append clones of `items`, all-or-nothing.
    ///
    /// The storage is grown to the final length before any element is written,
    /// so a failure leaves the container exactly as it was.
    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.reserve(items.len())?;
        for item in items {
            // SAFETY: reserve made room for every item; len tracks each write so a
            // panicking clone leaves only initialized slots counted.
            unsafe { self.ptr.as_ptr().add(self.len).write(item.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Element at `index`, or `None` when `index >= len`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Remove the last element and transfer ownership of it to the caller.
    ///
    /// The element is not destroyed; whatever it owns moves with it.
    pub fn pop_take(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was initialized and is now outside the live range, so
        // reading it moves the value out exactly once.
        Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Remove and destroy the last element.
    ///
    /// Returns `false` when the container was already empty.
    pub fn pop_discard(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        // SAFETY: the slot was initialized and is no longer counted as live.
        unsafe { ptr::drop_in_place(self.ptr.as_ptr().add(self.len)) };
        true
    }

    /// Shorten the container to `len` elements, destroying the rest in index
    /// order. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        // SAFETY: slots in len..self.len are initialized; len is lowered first so
        // a panicking destructor cannot cause a second drop.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr().add(len), self.len - len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Destroy every element but keep the storage allocated.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is non-null and aligned (dangling when cap == 0), and the
        // first len slots are initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see as_slice; &mut self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Clone the container with the same capacity and ceiling, reporting
    /// allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut copy = Self::with_max_capacity(self.max_cap);
        copy.grow_to(self.cap)?;
        copy.try_extend_from_slice(self.as_slice())?;
        Ok(copy)
    }
}

impl<T> Drop for Container<T> {
    fn drop(&mut self) {
        self.clear();
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            // SAFETY: ptr was allocated by this container with exactly this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Container<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(_) => match Layout::array::<T>(self.cap) {
                Ok(layout) => alloc::handle_alloc_error(layout),
                Err(_) => panic!("capacity overflow while cloning container"),
            },
        }
    }
}

impl<T> Deref for Container<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Container<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Container<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq> PartialEq for Container<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Container<T> {}

impl<T: fmt::Debug> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
