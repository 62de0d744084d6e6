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

//! Bitmask encoding of subsets for the exact solver.
//!
//! Element `e` of the universe `{1..n}` is assigned bit `e - 1` (ascending
//! element order), and every subset becomes a `CoverMask` with the bits of
//! its elements set. The branch-and-bound search then reduces its hot
//! operations (overlap tests, coverage counts, removing covered elements)
//! to word-wise boolean arithmetic.
//!
//! ## Word capacity
//!
//! A `CoverMask` is a fixed-width, multi-word bit vector backed by
//! `fixedbitset::FixedBitSet`, which stores bits in blocks of
//! `usize::BITS` bits (64 on 64-bit targets). A universe of `n` elements
//! therefore occupies `n.div_ceil(MASK_WORD_BITS)` words per mask, and
//! every mask produced by one encoder has the same width `n`. Operations
//! between masks of different widths are a logic error; debug builds assert
//! against them.

use crate::{
    index::{ElementIndex, SubsetIndex},
    instance::{Instance, Subset},
};
use fixedbitset::FixedBitSet;

/// Number of bits held by one storage word of a `CoverMask`.
pub const MASK_WORD_BITS: usize = usize::BITS as usize;

/// A set of universe elements stored as a multi-word bit vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CoverMask {
    bits: FixedBitSet,
}

impl CoverMask {
    /// Creates a mask of the given width with no bits set.
    #[inline]
    pub fn empty(width: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(width),
        }
    }

    /// Creates a mask of the given width with every bit set.
    #[inline]
    pub fn full(width: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(width);
        bits.insert_range(..);
        Self { bits }
    }

    /// Returns the number of bit positions the mask spans.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns the number of storage words backing the mask.
    #[inline]
    pub fn words(&self) -> usize {
        self.width().div_ceil(MASK_WORD_BITS)
    }

    /// Overwrites `self` with the bits of `other`, reusing the allocation.
    #[inline]
    pub fn copy_from(&mut self, other: &CoverMask) {
        self.bits.clone_from(&other.bits);
    }

    #[inline]
    pub fn insert(&mut self, bit: ElementIndex) {
        self.bits.insert(bit.get());
    }

    #[inline]
    pub fn contains(&self, bit: ElementIndex) -> bool {
        self.bits.contains(bit.get())
    }

    /// Number of set bits.
    #[inline]
    pub fn popcount(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_clear(&self) -> bool {
        self.bits.is_clear()
    }

    /// Returns `true` if the masks share at least one bit.
    #[inline]
    pub fn intersects(&self, other: &CoverMask) -> bool {
        debug_assert_eq!(self.width(), other.width());
        !self.bits.is_disjoint(&other.bits)
    }

    /// Popcount of `self & other`, without materializing the intersection.
    #[inline]
    pub fn intersection_count(&self, other: &CoverMask) -> usize {
        debug_assert_eq!(self.width(), other.width());
        self.bits.intersection_count(&other.bits)
    }

    /// In-place `self &= !other`.
    #[inline]
    pub fn remove_all(&mut self, other: &CoverMask) {
        debug_assert_eq!(self.width(), other.width());
        self.bits.difference_with(&other.bits);
    }

    /// In-place `self |= other`.
    #[inline]
    pub fn union_with(&mut self, other: &CoverMask) {
        debug_assert_eq!(self.width(), other.width());
        self.bits.union_with(&other.bits);
    }

    /// Returns `true` if every bit of `self` is also set in `other`.
    #[inline]
    pub fn is_subset(&self, other: &CoverMask) -> bool {
        debug_assert_eq!(self.width(), other.width());
        self.bits.is_subset(&other.bits)
    }

    /// Iterates over the universe elements (one-based) whose bits are set.
    #[inline]
    pub fn elements(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones().map(|bit| bit + 1)
    }
}

/// Maps elements to bit positions and subsets to `CoverMask`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmaskEncoder {
    universe_size: usize,
    masks: Vec<CoverMask>,
    full: CoverMask,
}

impl BitmaskEncoder {
    /// Encodes every subset of `instance`.
    pub fn new(instance: &Instance) -> Self {
        let universe_size = instance.universe_size();
        let mut encoder = Self {
            universe_size,
            masks: Vec::with_capacity(instance.num_subsets()),
            full: CoverMask::full(universe_size),
        };
        encoder.masks = instance
            .subsets()
            .map(|(_, subset)| encoder.encode(subset))
            .collect();
        encoder
    }

    /// Returns the bit position of `element`, or `None` if it lies outside
    /// the universe.
    #[inline]
    pub fn bit_position(&self, element: usize) -> Option<ElementIndex> {
        if (1..=self.universe_size).contains(&element) {
            Some(ElementIndex::new(element - 1))
        } else {
            None
        }
    }

    /// Encodes a subset as a mask over this encoder's universe.
    pub fn encode(&self, subset: &Subset) -> CoverMask {
        let mut mask = CoverMask::empty(self.universe_size);
        for &element in subset.elements() {
            if let Some(bit) = self.bit_position(element) {
                mask.insert(bit);
            }
        }
        mask
    }

    /// Number of elements in `mask`.
    #[inline]
    pub fn popcount(mask: &CoverMask) -> usize {
        mask.popcount()
    }

    /// Returns the mask of the subset at `index`.
    #[inline]
    pub fn mask(&self, index: SubsetIndex) -> &CoverMask {
        &self.masks[index.get()]
    }

    /// Returns all subset masks in index order.
    #[inline]
    pub fn masks(&self) -> &[CoverMask] {
        &self.masks
    }

    /// The mask with all `n` universe bits set.
    #[inline]
    pub fn full_mask(&self) -> &CoverMask {
        &self.full
    }

    #[inline]
    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Storage words per mask for this universe.
    #[inline]
    pub fn words_per_mask(&self) -> usize {
        self.full.words()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceBuilder;

    #[test]
    fn test_encode_sets_ascending_bit_positions() {
        let instance = InstanceBuilder::new(5)
            .with_subset([1, 2, 3])
            .with_subset([3, 4, 5])
            .build();
        let encoder = BitmaskEncoder::new(&instance);

        let s1 = encoder.mask(SubsetIndex::new(0));
        assert_eq!(s1.elements().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(s1.contains(ElementIndex::new(0)));
        assert!(!s1.contains(ElementIndex::new(3)));
        assert_eq!(BitmaskEncoder::popcount(s1), 3);
        assert_eq!(encoder.full_mask().popcount(), 5);
    }

    #[test]
    fn test_mask_operations() {
        let instance = InstanceBuilder::new(6)
            .with_subset([1, 2, 3, 4])
            .with_subset([3, 4, 5])
            .with_subset([6])
            .build();
        let encoder = BitmaskEncoder::new(&instance);
        let a = encoder.mask(SubsetIndex::new(0));
        let b = encoder.mask(SubsetIndex::new(1));
        let c = encoder.mask(SubsetIndex::new(2));

        assert_eq!(a.intersection_count(b), 2);
        assert!(a.intersects(b));
        assert!(!a.intersects(c));

        let mut remaining = encoder.full_mask().clone();
        remaining.remove_all(a);
        assert_eq!(remaining.elements().collect::<Vec<_>>(), vec![5, 6]);
        remaining.remove_all(b);
        remaining.remove_all(c);
        assert!(remaining.is_clear());

        let mut union = CoverMask::empty(6);
        union.union_with(b);
        union.union_with(c);
        assert!(c.is_subset(&union));
        assert_eq!(union.popcount(), 4);
    }

    #[test]
    fn test_universe_wider_than_one_word() {
        let n = 3 * MASK_WORD_BITS + 5;
        let instance = InstanceBuilder::new(n)
            .with_subset(1..=MASK_WORD_BITS)
            .with_subset((MASK_WORD_BITS - 1)..=n)
            .build();
        let encoder = BitmaskEncoder::new(&instance);

        assert_eq!(encoder.words_per_mask(), 4);
        let low = encoder.mask(SubsetIndex::new(0));
        let high = encoder.mask(SubsetIndex::new(1));
        assert_eq!(low.popcount(), MASK_WORD_BITS);
        assert_eq!(high.popcount(), n - MASK_WORD_BITS + 2);
        assert_eq!(low.intersection_count(high), 2);
        assert!(high.contains(ElementIndex::new(n - 1)));

        let mut remaining = encoder.full_mask().clone();
        remaining.remove_all(low);
        remaining.remove_all(high);
        assert!(remaining.is_clear());
    }

    #[test]
    fn test_empty_universe() {
        let instance = InstanceBuilder::new(0).build();
        let encoder = BitmaskEncoder::new(&instance);
        assert!(encoder.full_mask().is_clear());
        assert_eq!(encoder.words_per_mask(), 0);
    }

    #[test]
    fn test_bit_position_bounds() {
        let instance = InstanceBuilder::new(3).build();
        let encoder = BitmaskEncoder::new(&instance);
        assert_eq!(encoder.bit_position(1), Some(ElementIndex::new(0)));
        assert_eq!(encoder.bit_position(3), Some(ElementIndex::new(2)));
        assert_eq!(encoder.bit_position(0), None);
        assert_eq!(encoder.bit_position(4), None);
    }
}
