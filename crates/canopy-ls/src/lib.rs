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

//! # Canopy LS
//!
//! Local search for minimum set cover.
//!
//! The engine walks over explicit index sets using a single shared move,
//! swap-2-out/1-in: two members leave the cover and one index not in the
//! reduced set joins. Whether a candidate becomes the new current cover is
//! decided by a pluggable `Metaheuristic`:
//!
//! - `HillClimbing` only accepts complete covers that are no larger.
//! - `SimulatedAnnealing` scores candidates with a penalized objective and
//!   accepts worsening moves with the Metropolis probability.
//!
//! All randomness flows through one generator handed to the engine, so a
//! fixed seed reproduces the move sequence exactly.

pub mod engine;
pub mod eval;
pub mod meta;
pub mod monitor;
pub mod neighborhood;
pub mod result;
pub mod state;
pub mod stats;
