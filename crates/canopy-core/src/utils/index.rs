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

//! # Strongly Typed Indices
//!
//! Phantom-typed wrappers around `usize` that keep the index spaces of a set
//! cover run apart. A run juggles at least three of them at once: the
//! position of a subset in the instance file, the bit position of an
//! element, and the position of a subset in the branch-and-bound search
//! order. Mixing them up compiles fine with raw `usize` and produces covers
//! that are silently wrong.
//!
//! ## Highlights
//!
//! - `TypedIndexTag` supplies a human-readable `NAME` for `Display`/`Debug`.
//! - `TypedIndex<T>` is `#[repr(transparent)]` over `usize`.
//! - Indices are zero-based internally; `one_based` and `from_one_based`
//!   convert at the file boundary where humans count from one.
//!
//! ## Usage
//!
//! ```rust
//! use canopy_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone)]
//! struct SubsetTag;
//! impl TypedIndexTag for SubsetTag { const NAME: &'static str = "SubsetIndex"; }
//!
//! type SubsetIndex = TypedIndex<SubsetTag>;
//! let s = SubsetIndex::new(2);
//! assert_eq!(s.one_based(), 3);
//! assert_eq!(format!("{}", s), "SubsetIndex(2)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed, zero-based index associated with a tag type `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` from a zero-based position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates a `TypedIndex` from a one-based position.
    ///
    /// Returns `None` for `0`, which has no zero-based counterpart.
    ///
    /// ```rust
    /// # use canopy_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # #[derive(Clone)]
    /// # struct Tag;
    /// # impl TypedIndexTag for Tag { const NAME: &'static str = "Tag"; }
    /// assert_eq!(TypedIndex::<Tag>::from_one_based(1).map(|i| i.get()), Some(0));
    /// assert!(TypedIndex::<Tag>::from_one_based(0).is_none());
    /// ```
    #[inline(always)]
    pub const fn from_one_based(position: usize) -> Option<Self> {
        match position.checked_sub(1) {
            Some(index) => Some(Self::new(index)),
            None => None,
        }
    }

    /// Returns the underlying zero-based `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the one-based position used in external files.
    #[inline(always)]
    pub const fn one_based(&self) -> usize {
        self.index + 1
    }

    /// Checks if the index is zero.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<T>) -> Self {
        index.index
    }
}
