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

//! Lower bound on the number of subsets still needed.
//!
//! At a node with uncovered elements `remaining` and cursor `c` (only
//! subsets at search positions `>= c` may still be chosen), let `max_cov`
//! be the largest `|mask_i & remaining|` over `i >= c`. Any completion adds
//! at most `max_cov` new elements per subset, so at least
//! `ceil(|remaining| / max_cov)` more subsets are required. The scan stops
//! early once some subset covers everything that remains.
//!
//! Two situations have no completion at all and yield `None` (an infinite
//! bound): `max_cov == 0`, and `remaining` containing an element that no
//! subset at or after the cursor contains. The second test uses
//! precomputed suffix unions and is what lets uncoverable instances finish
//! at the root instead of enumerating the tree.

use canopy_model::bitmask::CoverMask;

#[derive(Debug, Clone)]
pub struct CoverageBound {
    /// `suffix_unions[i]` is the union of `masks[i..]`; one extra empty
    /// entry sits at `masks.len()`.
    suffix_unions: Vec<CoverMask>,
}

impl CoverageBound {
    /// Precomputes the suffix unions of `masks` (already in search order).
    pub fn new(masks: &[CoverMask], width: usize) -> Self {
        let mut suffix_unions = vec![CoverMask::empty(width); masks.len() + 1];
        for i in (0..masks.len()).rev() {
            let (head, tail) = suffix_unions.split_at_mut(i + 1);
            head[i].copy_from(&tail[0]);
            head[i].union_with(&masks[i]);
        }
        Self { suffix_unions }
    }

    /// Returns `true` if the subsets from `cursor` on can still cover
    /// `remaining`.
    #[inline]
    pub fn is_reachable(&self, remaining: &CoverMask, cursor: usize) -> bool {
        remaining.is_subset(&self.suffix_unions[cursor])
    }

    /// Lower bound on the additional subsets needed, or `None` if no
    /// completion exists.
    pub fn lower_bound(
        &self,
        masks: &[CoverMask],
        remaining: &CoverMask,
        cursor: usize,
    ) -> Option<usize> {
        let uncovered = remaining.popcount();
        if uncovered == 0 {
            return Some(0);
        }
        if !self.is_reachable(remaining, cursor) {
            return None;
        }

        let mut max_cov = 0;
        for mask in &masks[cursor..] {
            let coverage = mask.intersection_count(remaining);
            if coverage > max_cov {
                max_cov = coverage;
                if max_cov == uncovered {
                    break;
                }
            }
        }

        if max_cov == 0 {
            None
        } else {
            Some(uncovered.div_ceil(max_cov))
        }
    }
}
