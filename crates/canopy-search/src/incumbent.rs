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

//! The best-known cover of a search.
//!
//! An `Incumbent` holds the current upper bound and the cover that attains
//! it. A candidate replaces the incumbent iff it is strictly smaller, or it
//! has the same size and its sorted index tuple is lexicographically
//! smaller. The tie-break only makes results reproducible; it says nothing
//! about quality.
//!
//! When no warm start exists the incumbent starts from a sentinel bound
//! without a cover. The sentinel must exceed every achievable size (for
//! example `m + 1`), so the first complete cover always gets installed.

use canopy_model::solution::Cover;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent {
    upper_bound: usize,
    best: Option<Cover>,
}

impl Incumbent {
    /// Creates an incumbent that holds `cover`.
    #[inline]
    pub fn from_cover(cover: Cover) -> Self {
        Self {
            upper_bound: cover.size(),
            best: Some(cover),
        }
    }

    /// Creates an empty incumbent with an unreachable bound.
    #[inline]
    pub fn with_sentinel(upper_bound: usize) -> Self {
        Self {
            upper_bound,
            best: None,
        }
    }

    /// Size of the incumbent, or the sentinel.
    #[inline]
    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    #[inline]
    pub fn cover(&self) -> Option<&Cover> {
        self.best.as_ref()
    }

    #[inline]
    pub fn has_cover(&self) -> bool {
        self.best.is_some()
    }

    /// Returns `true` if `candidate` would replace the incumbent.
    #[inline]
    pub fn would_accept(&self, candidate: &Cover) -> bool {
        let size = candidate.size();
        size < self.upper_bound
            || (size == self.upper_bound
                && self.best.as_ref().is_some_and(|best| candidate < best))
    }

    /// Installs `candidate` if it beats the incumbent.
    /// Returns `true` if it was installed.
    pub fn try_install(&mut self, candidate: Cover) -> bool {
        if !self.would_accept(&candidate) {
            return false;
        }
        self.upper_bound = candidate.size();
        self.best = Some(candidate);
        true
    }

    #[inline]
    pub fn into_cover(self) -> Option<Cover> {
        self.best
    }
}
