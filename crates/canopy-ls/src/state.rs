// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Mutable cover state for local search.
//!
//! `CoverState` keeps the current index set in an explicit member list plus
//! a membership bitset, and maintains for every element how many members
//! contain it. Adding or removing a subset therefore costs the size of that
//! subset, and the number of uncovered elements is always known.

use crate::eval::Evaluation;
use canopy_model::{index::SubsetIndex, instance::Instance, solution::Cover};
use fixedbitset::FixedBitSet;

/// The current index set of a local search run with incremental coverage
/// counts.
///
/// `len()` and `uncovered()` are kept up to date by `insert` and `remove`,
/// so `evaluation()` is constant time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverState {
    /// The members, in insertion order modulo `swap_remove`.
    members: Vec<SubsetIndex>,
    /// Membership by subset index.
    in_cover: FixedBitSet,
    /// For element `e`, the number of members containing it, at `e - 1`.
    coverage: Vec<u32>,
    /// Elements with a zero coverage count.
    uncovered: usize,
}

impl CoverState {
    /// An empty state: no members, every element uncovered.
    pub fn new(instance: &Instance) -> Self {
        Self {
            members: Vec::new(),
            in_cover: FixedBitSet::with_capacity(instance.num_subsets()),
            coverage: vec![0; instance.universe_size()],
            uncovered: instance.universe_size(),
        }
    }

    /// Builds the state of `cover`. Indices beyond the instance are ignored.
    pub fn from_cover(instance: &Instance, cover: &Cover) -> Self {
        let mut state = Self::new(instance);
        for &index in cover.indices() {
            if index.get() < instance.num_subsets() {
                state.insert(instance, index);
            }
        }
        state
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The members in their current internal order.
    #[inline]
    pub fn members(&self) -> &[SubsetIndex] {
        &self.members
    }

    #[inline]
    pub fn contains(&self, index: SubsetIndex) -> bool {
        self.in_cover.contains(index.get())
    }

    /// Number of universe elements no member contains.
    #[inline]
    pub fn uncovered(&self) -> usize {
        self.uncovered
    }

    /// Whether the members cover the whole universe.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.uncovered == 0
    }

    #[inline]
    pub fn evaluation(&self) -> Evaluation {
        Evaluation::new(self.members.len(), self.uncovered)
    }

    /// Adds `index`; returns `false` if it was already a member.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a subset of `instance`.
    pub fn insert(&mut self, instance: &Instance, index: SubsetIndex) -> bool {
        if self.in_cover.put(index.get()) {
            return false;
        }
        self.members.push(index);
        for &element in instance.subset(index).elements() {
            let count = &mut self.coverage[element - 1];
            if *count == 0 {
                self.uncovered -= 1;
            }
            *count += 1;
        }
        true
    }

    /// Removes `index`; returns `false` if it was not a member.
    ///
    /// The last member takes the removed member's slot.
    ///
    /// # Panics
    ///
    /// Panics if `instance` is not the instance the member was inserted from.
    pub fn remove(&mut self, instance: &Instance, index: SubsetIndex) -> bool {
        let Some(position) = self.members.iter().position(|&m| m == index) else {
            return false;
        };
        self.members.swap_remove(position);
        self.in_cover.set(index.get(), false);
        for &element in instance.subset(index).elements() {
            let count = &mut self.coverage[element - 1];
            *count -= 1;
            if *count == 0 {
                self.uncovered += 1;
            }
        }
        true
    }

    /// Snapshot of the members as a `Cover`.
    #[inline]
    pub fn to_cover(&self) -> Cover {
        Cover::new(self.members.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_model::instance::InstanceBuilder;

    fn instance() -> Instance {
        InstanceBuilder::new(5)
            .with_subset([1, 2, 3])
            .with_subset([2, 4])
            .with_subset([3, 4])
            .with_subset([4, 5])
            .build()
    }

    #[test]
    fn test_from_cover_counts_uncovered() {
        let instance = instance();
        let state = CoverState::from_cover(
            &instance,
            &Cover::new([SubsetIndex::new(0), SubsetIndex::new(3)]),
        );
        assert_eq!(state.len(), 2);
        assert!(state.is_complete());
        assert_eq!(state.evaluation(), Evaluation::new(2, 0));

        let partial = CoverState::from_cover(&instance, &Cover::new([SubsetIndex::new(1)]));
        assert_eq!(partial.uncovered(), 3);
    }

    #[test]
    fn test_insert_and_remove_are_inverse() {
        let instance = instance();
        let mut state = CoverState::new(&instance);
        assert_eq!(state.uncovered(), 5);

        assert!(state.insert(&instance, SubsetIndex::new(1)));
        assert!(!state.insert(&instance, SubsetIndex::new(1)));
        assert!(state.insert(&instance, SubsetIndex::new(2)));
        assert_eq!(state.uncovered(), 2);

        assert!(state.remove(&instance, SubsetIndex::new(1)));
        assert!(!state.remove(&instance, SubsetIndex::new(1)));
        assert_eq!(state.uncovered(), 3);
        assert!(!state.contains(SubsetIndex::new(1)));
        assert!(state.contains(SubsetIndex::new(2)));
    }

    #[test]
    fn test_shared_elements_stay_covered() {
        let instance = instance();
        let mut state = CoverState::from_cover(
            &instance,
            &Cover::new([SubsetIndex::new(1), SubsetIndex::new(2)]),
        );
        // Element 4 is in both; removing one keeps it covered.
        state.remove(&instance, SubsetIndex::new(2));
        assert_eq!(state.uncovered(), 3);
        assert_eq!(instance.uncovered_by(state.members()), vec![1, 3, 5]);
    }

    #[test]
    fn test_to_cover_is_sorted() {
        let instance = instance();
        let mut state = CoverState::new(&instance);
        state.insert(&instance, SubsetIndex::new(3));
        state.insert(&instance, SubsetIndex::new(0));
        assert_eq!(
            state.to_cover(),
            Cover::new([SubsetIndex::new(0), SubsetIndex::new(3)])
        );
    }
}
