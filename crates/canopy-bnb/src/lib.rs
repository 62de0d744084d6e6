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

//! # Canopy BnB
//!
//! Exact depth-first branch-and-bound for minimum set cover.
//!
//! ## Motivation
//!
//! Small and medium benchmark instances can be solved to proven optimality,
//! and the optimum is the yardstick the heuristics are measured against.
//! The search trades memory for speed by encoding every subset as a
//! multi-word bitmask, so that the per-node work is a handful of word-wise
//! operations.
//!
//! ## Highlights
//!
//! - Subsets are explored in descending coverage order (`ordering`).
//! - An admissible `ceil(|remaining| / max_cov)` lower bound, strengthened
//!   by a suffix-union reachability check (`bound`).
//! - Greedy warm start; a sentinel bound when the instance is uncoverable.
//! - Deterministic tie-breaking between equal-size covers.
//! - Cooperative cutoff and observation through `TreeSearchMonitor`s.
//! - A convergence trace of every incumbent change.
//!
//! ## Modules
//!
//! - `bnb`: `BnbSolver` and the recursive search session.
//! - `bound`, `ordering`: the pruning machinery.
//! - `monitor`: monitor trait plus composite, log, no-op and time-limit
//!   implementations.
//! - `result`, `stats`: the run outcome and its statistics.

pub mod bnb;
pub mod bound;
pub mod monitor;
pub mod ordering;
pub mod result;
pub mod stats;
