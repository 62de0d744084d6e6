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

//! # Canopy Model
//!
//! Data structures describing a minimum set cover instance and its
//! solutions. Everything in this crate is built once and then shared
//! read-only by the solvers.
//!
//! ## Modules
//!
//! - `index`: Typed indices for subsets (`SubsetIndex`) and element bit
//!   positions (`ElementIndex`).
//! - `instance`: The immutable `Instance` (universe size plus ordered
//!   subsets) and its `InstanceBuilder`, including cover verification.
//! - `bitmask`: `BitmaskEncoder` and the multi-word `CoverMask` used by the
//!   exact solver.
//! - `solution`: The canonical `Cover` record (size plus ascending indices)
//!   and the solution file writer.
//! - `loading`: Parser for the `n m` instance text format.
//! - `reference`: Reference optimum lookup and accuracy metrics.

pub mod bitmask;
pub mod index;
pub mod instance;
pub mod loading;
pub mod reference;
pub mod solution;
