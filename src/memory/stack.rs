//! Crate stacks and the collection that owns them
//!
//! - [`Stack`]: crate identifiers of one pile, index 0 at the bottom
//! - [`StackCollection`]: every pile in the yard, index `i` is stack number `i + 1`
//!
//! The collection is a container of containers. Dropping it drops every
//! [`Stack`], and stacks are never inserted or removed after construction, so
//! instruction indices stay valid for a whole run.

use super::container::Container;
use super::error::AllocError;
use rustc_hash::FxHashMap;
use std::mem;
use std::slice;

/// One pile of crates, bottom to top
pub type Stack = Container<u8>;

/// All piles in the yard, in label order
#[derive(Debug, PartialEq, Eq, Default)]
pub struct StackCollection {
    stacks: Container<Stack>,
}

impl StackCollection {
    /// Create `count` empty stacks.
    pub fn with_count(count: usize) -> Result<Self, AllocError> {
        let mut stacks = Container::new();
        stacks.reserve(count)?;
        for _ in 0..count {
            stacks.push(Stack::new())?;
        }
        Ok(StackCollection { stacks })
    }

    /// Build a collection from literal piles, each listed bottom to top.
    pub fn from_piles(piles: &[&[u8]]) -> Result<Self, AllocError> {
        let mut collection = Self::with_count(piles.len())?;
        for (stack, pile) in collection.stacks.iter_mut().zip(piles) {
            stack.try_extend_from_slice(pile)?;
        }
        Ok(collection)
    }

    /// Number of stacks
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Stack at 0-based `index`
    pub fn stack(&self, index: usize) -> Option<&Stack> {
        self.stacks.get(index)
    }

    pub fn stack_mut(&mut self, index: usize) -> Option<&mut Stack> {
        self.stacks.get_mut(index)
    }

    /// Put a crate on top of the stack at `index`.
    ///
    /// Returns `Ok(false)` when there is no such stack.
    pub fn push_crate(&mut self, index: usize, id: u8) -> Result<bool, AllocError> {
        match self.stacks.get_mut(index) {
            Some(stack) => stack.push(id).map(|()| true),
            None => Ok(false),
        }
    }

    /// Mutable access to two different stacks at once.
    ///
    /// Returns `None` if either index is out of range or both are equal.
    pub fn pair_mut(&mut self, first: usize, second: usize) -> Option<(&mut Stack, &mut Stack)> {
        if first == second || first >= self.len() || second >= self.len() {
            return None;
        }
        let stacks = self.stacks.as_mut_slice();
        if first < second {
            let (low, high) = stacks.split_at_mut(second);
            Some((&mut low[first], &mut high[0]))
        } else {
            let (low, high) = stacks.split_at_mut(first);
            Some((&mut high[0], &mut low[second]))
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Stack> {
        self.stacks.iter()
    }

    /// Top crate of every non-empty stack, left to right
    pub fn tops(&self) -> String {
        self.stacks
            .iter()
            .filter_map(|stack| stack.last())
            .map(|&id| char::from(id))
            .collect()
    }

    /// Number of crates per identifier across all stacks
    pub fn census(&self) -> FxHashMap<u8, usize> {
        let mut counts = FxHashMap::default();
        for &id in self.stacks.iter().flat_map(|stack| stack.iter()) {
            *counts.entry(id).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of crates in the yard
    pub fn total_crates(&self) -> usize {
        self.stacks.iter().map(|stack| stack.len()).sum()
    }

    /// Height of the tallest stack
    pub fn tallest(&self) -> usize {
        self.stacks.iter().map(|stack| stack.len()).max().unwrap_or(0)
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self, AllocError> {
        let mut stacks = Container::new();
        stacks.reserve(self.stacks.len())?;
        for stack in &self.stacks {
            stacks.push(stack.try_clone()?)?;
        }
        Ok(StackCollection { stacks })
    }

    /// Rough heap footprint in bytes, used for snapshot budgeting
    pub fn estimated_size(&self) -> usize {
        let outer = self.stacks.capacity() * mem::size_of::<Stack>();
        let inner: usize = self.stacks.iter().map(|stack| stack.capacity()).sum();
        outer + inner
    }
}

impl Clone for StackCollection {
    fn clone(&self) -> Self {
        StackCollection {
            stacks: self.stacks.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a StackCollection {
    type Item = &'a Stack;
    type IntoIter = slice::Iter<'a, Stack>;

    fn into_iter(self) -> Self::IntoIter {
        self.stacks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StackCollection {
        StackCollection::from_piles(&[b"ZN", b"MCD", b"P"]).unwrap()
    }

    #[test]
    fn test_with_count_creates_empty_stacks() {
        let stacks = StackCollection::with_count(3).unwrap();
        assert_eq!(stacks.len(), 3);
        assert!(stacks.iter().all(|s| s.is_empty()));
        assert_eq!(stacks.tops(), "");
    }

    #[test]
    fn test_tops_skip_empty_stacks() {
        let stacks = StackCollection::from_piles(&[b"AB", b"", b"C"]).unwrap();
        assert_eq!(stacks.tops(), "BC");
    }

    #[test]
    fn test_push_crate() {
        let mut stacks = sample();
        assert!(stacks.push_crate(2, b'X').unwrap());
        assert!(!stacks.push_crate(3, b'Y').unwrap());
        assert_eq!(stacks.stack(2).unwrap().as_slice(), b"PX");
    }

    #[test]
    fn test_pair_mut_in_both_orders() {
        let mut stacks = sample();
        {
            let (src, dst) = stacks.pair_mut(1, 0).unwrap();
            assert_eq!(src.as_slice(), b"MCD");
            assert_eq!(dst.as_slice(), b"ZN");
        }
        {
            let (src, dst) = stacks.pair_mut(0, 2).unwrap();
            assert_eq!(src.as_slice(), b"ZN");
            assert_eq!(dst.as_slice(), b"P");
        }
        assert!(stacks.pair_mut(1, 1).is_none());
        assert!(stacks.pair_mut(0, 3).is_none());
    }

    #[test]
    fn test_census_and_totals() {
        let stacks = StackCollection::from_piles(&[b"AAB", b"B", b""]).unwrap();
        let census = stacks.census();
        assert_eq!(census.get(&b'A'), Some(&2));
        assert_eq!(census.get(&b'B'), Some(&2));
        assert_eq!(stacks.total_crates(), 4);
        assert_eq!(stacks.tallest(), 3);
    }

    #[test]
    fn test_try_clone_is_deep() {
        let original = sample();
        let mut copy = original.try_clone().unwrap();
        assert_eq!(copy, original);
        copy.push_crate(0, b'Q').unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.stack(0).unwrap().as_slice(), b"ZN");
    }
}
