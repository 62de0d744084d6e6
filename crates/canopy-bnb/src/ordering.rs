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

//! Search order of the subsets.
//!
//! Subsets are visited by descending popcount, ties broken by descending
//! original index. Trying high-coverage subsets first finds small covers
//! early, which tightens the upper bound before the bulk of the tree is
//! expanded. The order only affects running time; the tie-break between
//! equal-size covers is applied on original indices and is independent of
//! it.

use canopy_model::{bitmask::BitmaskEncoder, index::SubsetIndex};

/// Returns all subset indices in search order.
pub fn coverage_order(encoder: &BitmaskEncoder) -> Vec<SubsetIndex> {
    let popcounts: Vec<usize> = encoder.masks().iter().map(BitmaskEncoder::popcount).collect();
    let mut order: Vec<SubsetIndex> = (0..popcounts.len()).map(SubsetIndex::new).collect();
    order.sort_unstable_by(|a, b| {
        popcounts[b.get()]
            .cmp(&popcounts[a.get()])
            .then_with(|| b.cmp(a))
    });
    order
}
