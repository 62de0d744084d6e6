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

//! Deterministic greedy construction.
//!
//! Classic greedy set cover on the explicit subset lists: repeatedly take
//! the subset that contains the most still-uncovered elements, breaking ties
//! towards the smallest index, until the universe is covered. If the
//! universe is not yet covered but no subset adds anything, the instance has
//! no cover at all and the constructor returns `UncoverableElements` rather
//! than a partial result. For an empty universe the empty cover is a
//! success.
//!
//! Each round scans every subset, so a call costs `O(k * sum |S_i|)` for a
//! cover of size `k`. It runs once per solver invocation.

use canopy_model::{index::SubsetIndex, instance::Instance, solution::Cover};
use log::debug;
use thiserror::Error;

/// The greedy construction found no cover: these (one-based) universe
/// elements are contained in no subset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} universe element(s) cannot be covered by any subset (first: {})", .elements.len(), .elements.first().copied().unwrap_or_default())]
pub struct UncoverableElements {
    elements: Vec<usize>,
}

impl UncoverableElements {
    #[inline]
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyConstructor;

impl GreedyConstructor {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Builds a greedy cover of `instance`.
    pub fn construct(&self, instance: &Instance) -> Result<Cover, UncoverableElements> {
        let n = instance.universe_size();
        let mut uncovered = vec![true; n];
        let mut remaining = n;
        let mut chosen = Vec::new();

        while remaining > 0 {
            let mut best: Option<(SubsetIndex, usize)> = None;
            for (index, subset) in instance.subsets() {
                let gain = subset
                    .elements()
                    .iter()
                    .filter(|&&e| uncovered[e - 1])
                    .count();
                if gain > best.map_or(0, |(_, g)| g) {
                    best = Some((index, gain));
                }
            }

            let Some((index, gain)) = best else {
                let elements: Vec<usize> = uncovered
                    .iter()
                    .enumerate()
                    .filter(|&(_, &u)| u)
                    .map(|(i, _)| i + 1)
                    .collect();
                debug!(
                    "greedy construction stuck with {} uncovered element(s)",
                    elements.len()
                );
                return Err(UncoverableElements { elements });
            };

            for &e in instance.subset(index).elements() {
                uncovered[e - 1] = false;
            }
            remaining -= gain;
            chosen.push(index);
        }

        debug!("greedy construction picked {} subset(s)", chosen.len());
        Ok(Cover::new(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_model::instance::InstanceBuilder;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn one_based(cover: &Cover) -> Vec<usize> {
        cover.one_based().collect()
    }

    #[test]
    fn test_five_element_scenario() {
        init_logger();
        let instance = InstanceBuilder::new(5)
            .with_subset([1, 2, 3])
            .with_subset([2, 4])
            .with_subset([3, 4, 5])
            .with_subset([4, 5])
            .build();

        let cover = GreedyConstructor::new().construct(&instance).unwrap();
        assert_eq!(one_based(&cover), vec![1, 3]);
        assert!(cover.covers(&instance));
    }

    #[test]
    fn test_ties_prefer_smallest_index() {
        let instance = InstanceBuilder::new(4)
            .with_subset([3, 4])
            .with_subset([1, 2])
            .with_subset([1, 2])
            .build();

        let cover = GreedyConstructor::new().construct(&instance).unwrap();
        assert_eq!(one_based(&cover), vec![1, 2]);
    }

    #[test]
    fn test_no_subsets_is_infeasible() {
        let instance = InstanceBuilder::new(3).build();
        let err = GreedyConstructor::new().construct(&instance).unwrap_err();
        assert_eq!(err.elements(), &[1, 2, 3]);
    }

    #[test]
    fn test_partially_uncoverable_is_infeasible() {
        let instance = InstanceBuilder::new(4)
            .with_subset([1, 2])
            .with_subset([2, 3])
            .build();
        let err = GreedyConstructor::new().construct(&instance).unwrap_err();
        assert_eq!(err.elements(), &[4]);
    }

    #[test]
    fn test_empty_universe_yields_empty_cover() {
        let instance = InstanceBuilder::new(0)
            .with_subset(std::iter::empty::<usize>())
            .build();
        let cover = GreedyConstructor::new().construct(&instance).unwrap();
        assert!(cover.is_empty());
    }

    #[test]
    fn test_greedy_is_not_always_optimal() {
        // Greedy takes the big middle subset first and then needs both halves.
        let instance = InstanceBuilder::new(6)
            .with_subset([1, 2, 3])
            .with_subset([4, 5, 6])
            .with_subset([2, 3, 4, 5])
            .build();
        let cover = GreedyConstructor::new().construct(&instance).unwrap();
        assert_eq!(one_based(&cover), vec![1, 2, 3]);
    }
}
