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

//! The swap-2-out/1-in neighborhood.
//!
//! A move removes two distinct members chosen uniformly at random and then
//! adds one index chosen uniformly from all indices not in the reduced set.
//! The added index may be one of the two just removed, so a move always
//! shrinks the cover by exactly one subset. Whether the result still covers
//! the universe is up to the acceptance rule.

use crate::state::CoverState;
use canopy_model::{index::SubsetIndex, instance::Instance};
use rand::Rng;

/// A concrete swap that can be applied to and undone on a `CoverState`.
///
/// `apply` followed by `undo` restores the member set and the coverage
/// counts exactly; only the internal member order may differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    /// The two distinct members taken out.
    removed: [SubsetIndex; 2],
    /// The index put back in. May equal one of `removed`.
    added: SubsetIndex,
}

impl SwapMove {
    #[inline]
    pub fn new(removed: [SubsetIndex; 2], added: SubsetIndex) -> Self {
        Self { removed, added }
    }

    #[inline]
    pub fn removed(&self) -> [SubsetIndex; 2] {
        self.removed
    }

    #[inline]
    pub fn added(&self) -> SubsetIndex {
        self.added
    }

    /// Removes both `removed` members, then inserts `added`.
    ///
    /// # Panics
    ///
    /// Panics if `added` is not a subset of `instance`.
    pub fn apply(&self, instance: &Instance, state: &mut CoverState) {
        state.remove(instance, self.removed[0]);
        state.remove(instance, self.removed[1]);
        state.insert(instance, self.added);
    }

    /// Reverts `apply`. Must be called on the state `apply` left behind.
    pub fn undo(&self, instance: &Instance, state: &mut CoverState) {
        state.remove(instance, self.added);
        state.insert(instance, self.removed[1]);
        state.insert(instance, self.removed[0]);
    }
}

impl std::fmt::Display for SwapMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SwapMove(out: [{}, {}], in: {})",
            self.removed[0].one_based(),
            self.removed[1].one_based(),
            self.added.one_based()
        )
    }
}

/// Proposes `SwapMove`s uniformly at random.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapTwoOutOneIn;

impl SwapTwoOutOneIn {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Draws a move, or `None` if the state has fewer than two members.
    pub fn propose<R>(
        &self,
        state: &CoverState,
        num_subsets: usize,
        rng: &mut R,
    ) -> Option<SwapMove>
    where
        R: Rng + ?Sized,
    {
        let len = state.len();
        if len < 2 {
            return None;
        }

        let picks = rand::seq::index::sample(rng, len, 2);
        let first = state.members()[picks.index(0)];
        let second = state.members()[picks.index(1)];

        let available = num_subsets - len + 2;
        let mut remaining = rng.random_range(0..available);
        for i in 0..num_subsets {
            let index = SubsetIndex::new(i);
            if state.contains(index) && index != first && index != second {
                continue;
            }
            if remaining == 0 {
                return Some(SwapMove::new([first, second], index));
            }
            remaining -= 1;
        }

        debug_assert!(false, "candidate scan ran past {} indices", num_subsets);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_model::{instance::InstanceBuilder, solution::Cover};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn instance() -> Instance {
        InstanceBuilder::new(5)
            .with_subset([1, 2, 3])
            .with_subset([2, 4])
            .with_subset([3, 4])
            .with_subset([4, 5])
            .build()
    }

    #[test]
    fn test_too_small_state_has_no_move() {
        let instance = instance();
        let state = CoverState::from_cover(&instance, &Cover::new([SubsetIndex::new(0)]));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(SwapTwoOutOneIn::new().propose(&state, 4, &mut rng).is_none());
    }

    #[test]
    fn test_move_shrinks_cover_by_one() {
        let instance = instance();
        let start = CoverState::from_cover(
            &instance,
            &Cover::new([0, 1, 2].map(SubsetIndex::new)),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mut state = start.clone();
            let mv = SwapTwoOutOneIn::new()
                .propose(&state, instance.num_subsets(), &mut rng)
                .expect("three members allow a move");
            assert_ne!(mv.removed()[0], mv.removed()[1]);
            assert!(start.contains(mv.removed()[0]) && start.contains(mv.removed()[1]));

            mv.apply(&instance, &mut state);
            assert_eq!(state.len(), 2);
            assert!(state.contains(mv.added()));

            mv.undo(&instance, &mut state);
            assert_eq!(state.to_cover(), start.to_cover());
            assert_eq!(state.uncovered(), start.uncovered());
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let instance = instance();
        let state = CoverState::from_cover(
            &instance,
            &Cover::new([0, 1, 2, 3].map(SubsetIndex::new)),
        );
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20)
                .filter_map(|_| SwapTwoOutOneIn::new().propose(&state, 4, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}
