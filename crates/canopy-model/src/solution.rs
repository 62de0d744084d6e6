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

//! Canonical cover records and the solution file format.
//!
//! A `Cover` is the output shape shared by every solver: the set of chosen
//! subset indices, kept sorted ascending and free of duplicates. Because
//! the representation is canonical, the derived `Ord` is exactly the
//! lexicographic comparison of sorted index tuples used to break ties
//! between equal-size covers.
//!
//! On disk a cover is two lines: the size `k`, then the `k` one-based
//! indices separated by single spaces. Writers that persist a final result
//! go through `write_verified`, which refuses covers that leave part of the
//! universe uncovered.

use crate::{index::SubsetIndex, instance::Instance};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use thiserror::Error;

/// Errors raised while persisting a cover.
#[derive(Debug, Error)]
pub enum SolutionWriteError {
    #[error("I/O error while writing solution: {0}")]
    Io(#[from] std::io::Error),
    #[error("refusing to write an invalid cover: {} element(s) uncovered, first is {}", .uncovered.len(), .uncovered.first().copied().unwrap_or_default())]
    InvalidCover { uncovered: Vec<usize> },
}

/// A set of subset indices, sorted ascending and unique.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cover {
    indices: Vec<SubsetIndex>,
}

impl Cover {
    /// Builds a cover from arbitrary indices; sorts and deduplicates.
    pub fn new<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = SubsetIndex>,
    {
        let mut indices: Vec<SubsetIndex> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    /// The empty cover, which is valid only for an empty universe.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of subsets in the cover.
    #[inline]
    pub fn size(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn indices(&self) -> &[SubsetIndex] {
        &self.indices
    }

    #[inline]
    pub fn contains(&self, index: SubsetIndex) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// The indices as they appear in files, one-based and ascending.
    #[inline]
    pub fn one_based(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().map(|i| i.one_based())
    }

    /// Returns `true` if `self` is a valid cover of `instance`.
    #[inline]
    pub fn covers(&self, instance: &Instance) -> bool {
        instance.is_cover(&self.indices)
    }

    /// Tie-break between covers: smaller size wins, then the
    /// lexicographically smaller sorted index tuple.
    #[inline]
    pub fn is_better_than(&self, other: &Cover) -> bool {
        self.size() < other.size() || (self.size() == other.size() && self < other)
    }

    /// Writes the two-line solution format without validation.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.size())?;
        let line = self
            .one_based()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
        writer.flush()
    }

    /// Writes the cover after checking that it covers `instance`.
    pub fn write_verified<W: Write>(
        &self,
        instance: &Instance,
        writer: W,
    ) -> Result<(), SolutionWriteError> {
        let uncovered = instance.uncovered_by(&self.indices);
        if !uncovered.is_empty() {
            return Err(SolutionWriteError::InvalidCover { uncovered });
        }
        self.write_to(writer)?;
        Ok(())
    }

    /// Verifies the cover and writes it to `path`. Nothing is created on
    /// disk when the cover is invalid.
    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        instance: &Instance,
        path: P,
    ) -> Result<(), SolutionWriteError> {
        let uncovered = instance.uncovered_by(&self.indices);
        if !uncovered.is_empty() {
            return Err(SolutionWriteError::InvalidCover { uncovered });
        }
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }
}

impl FromIterator<SubsetIndex> for Cover {
    fn from_iter<I: IntoIterator<Item = SubsetIndex>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cover(size: {}, indices: [", self.size())?;
        for (i, index) in self.one_based().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "])")
    }
}
