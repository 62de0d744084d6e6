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

//! # Canopy Search
//!
//! Building blocks shared by the exact and the heuristic solvers.
//!
//! ## Modules
//!
//! - `greedy`: The deterministic `GreedyConstructor` that provides the warm
//!   start for every solver, and its explicit infeasibility signal.
//! - `incumbent`: The best-known cover together with the size/lexicographic
//!   acceptance rule.
//! - `trace`: `TraceRecorder` and the immutable `Trace` of
//!   `(elapsed_seconds, best_size)` events, including the trace file writer
//!   and time-to-quality queries.
//! - `result`: `SolverResult` and `TerminationReason`.
//! - `monitor`: `SearchCommand` and the cooperative `TimeLimit` clock.

pub mod greedy;
pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod trace;
