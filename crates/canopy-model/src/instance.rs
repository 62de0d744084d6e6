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

//! Immutable set cover instances.
//!
//! An `Instance` is the universe size `n` together with the ordered list of
//! `m` subsets. The universe is implicitly `{1..n}`; subsets keep their
//! elements sorted and deduplicated so that membership tests are binary
//! searches and cover checks are linear in the total subset size.
//!
//! Elements outside the universe are tolerated by the builder: they are
//! dropped with a warning, since they can never contribute to covering
//! `{1..n}`. Universe elements that no subset contains are reported once
//! when the instance is built; such an instance is valid to hold but has no
//! cover, which every solver surfaces as an infeasible result.

use crate::index::SubsetIndex;
use log::warn;

/// One candidate subset: its in-universe elements, ascending and unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subset {
    elements: Vec<usize>,
}

impl Subset {
    /// Returns the elements of the subset in ascending order.
    #[inline]
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn contains(&self, element: usize) -> bool {
        self.elements.binary_search(&element).is_ok()
    }
}

/// A minimum set cover instance. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    universe_size: usize,
    subsets: Vec<Subset>,
}

impl Instance {
    /// Returns `n`, the size of the universe `{1..n}`.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Returns `m`, the number of subsets.
    #[inline]
    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    /// Returns the subset at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than `num_subsets()`.
    #[inline]
    pub fn subset(&self, index: SubsetIndex) -> &Subset {
        let i = index.get();
        assert!(
            i < self.subsets.len(),
            "called `Instance::subset` with index out of bounds: the len is {} but the index is {}",
            self.subsets.len(),
            i
        );
        &self.subsets[i]
    }

    /// Iterates over all subsets together with their index.
    #[inline]
    pub fn subsets(&self) -> impl Iterator<Item = (SubsetIndex, &Subset)> + '_ {
        self.subsets
            .iter()
            .enumerate()
            .map(|(i, s)| (SubsetIndex::new(i), s))
    }

    /// Iterates over all subset indices in ascending order.
    #[inline]
    pub fn subset_indices(&self) -> impl Iterator<Item = SubsetIndex> {
        (0..self.subsets.len()).map(SubsetIndex::new)
    }

    /// Returns the universe elements contained in no subset.
    pub fn uncoverable_elements(&self) -> Vec<usize> {
        self.uncovered_by_iter(self.subset_indices())
    }

    /// Returns `true` if the union of all subsets is the whole universe.
    #[inline]
    pub fn is_coverable(&self) -> bool {
        self.uncoverable_elements().is_empty()
    }

    /// Returns the universe elements that the given subsets leave uncovered,
    /// in ascending order. Indices outside the instance contribute nothing.
    pub fn uncovered_by(&self, indices: &[SubsetIndex]) -> Vec<usize> {
        self.uncovered_by_iter(indices.iter().copied())
    }

    /// Returns `true` if the union of the given subsets equals the universe.
    #[inline]
    pub fn is_cover(&self, indices: &[SubsetIndex]) -> bool {
        self.uncovered_by(indices).is_empty()
    }

    fn uncovered_by_iter<I>(&self, indices: I) -> Vec<usize>
    where
        I: IntoIterator<Item = SubsetIndex>,
    {
        let mut covered = vec![false; self.universe_size];
        for index in indices {
            let Some(subset) = self.subsets.get(index.get()) else {
                debug_assert!(
                    false,
                    "called `Instance::uncovered_by` with unknown subset {}",
                    index
                );
                continue;
            };
            for &element in subset.elements() {
                covered[element - 1] = true;
            }
        }

        covered
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .map(|(i, _)| i + 1)
            .collect()
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(n: {}, m: {})",
            self.universe_size,
            self.subsets.len()
        )
    }
}

/// Incrementally assembles an `Instance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceBuilder {
    universe_size: usize,
    subsets: Vec<Subset>,
    dropped_elements: usize,
}

impl InstanceBuilder {
    /// Creates a builder for the universe `{1..universe_size}`.
    #[inline]
    pub fn new(universe_size: usize) -> Self {
        Self {
            universe_size,
            subsets: Vec::new(),
            dropped_elements: 0,
        }
    }

    /// Upper limit on the subsets `with_capacity` reserves up front.
    pub const MAX_RESERVED_SUBSETS: usize = 1 << 16;

    /// Creates a builder with room for `num_subsets` subsets, reserving at
    /// most `MAX_RESERVED_SUBSETS` up front.
    #[inline]
    pub fn with_capacity(universe_size: usize, num_subsets: usize) -> Self {
        Self {
            universe_size,
            subsets: Vec::with_capacity(num_subsets.min(Self::MAX_RESERVED_SUBSETS)),
            dropped_elements: 0,
        }
    }

    /// Appends a subset and returns its index.
    ///
    /// Duplicates are collapsed. Elements outside `{1..n}` are dropped and
    /// logged.
    pub fn add_subset<I>(&mut self, elements: I) -> SubsetIndex
    where
        I: IntoIterator<Item = usize>,
    {
        let index = SubsetIndex::new(self.subsets.len());
        let n = self.universe_size;

        let mut kept = Vec::new();
        for element in elements {
            if (1..=n).contains(&element) {
                kept.push(element);
            } else {
                warn!(
                    "subset {} contains element {} outside the universe 1..={}; ignoring it",
                    index.one_based(),
                    element,
                    n
                );
                self.dropped_elements += 1;
            }
        }
        kept.sort_unstable();
        kept.dedup();

        self.subsets.push(Subset { elements: kept });
        index
    }

    /// Chaining variant of `add_subset`.
    #[inline]
    pub fn with_subset<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_subset(elements);
        self
    }

    /// Returns how many out-of-universe elements were dropped so far.
    #[inline]
    pub fn dropped_elements(&self) -> usize {
        self.dropped_elements
    }

    #[inline]
    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    /// Finalizes the instance and warns about uncoverable elements.
    pub fn build(self) -> Instance {
        let instance = Instance {
            universe_size: self.universe_size,
            subsets: self.subsets,
        };

        let uncoverable = instance.uncoverable_elements();
        if !uncoverable.is_empty() {
            warn!(
                "{} universe element(s) appear in no subset (first: {}); the instance has no cover",
                uncoverable.len(),
                uncoverable[0]
            );
        }

        instance
    }
}
