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

//! # Canopy Solver
//!
//! A thin facade that runs one of the four set cover algorithms on an
//! instance under a validated configuration:
//!
//! | Selector | Algorithm                          |
//! |----------|------------------------------------|
//! | `BnB`    | exact branch-and-bound             |
//! | `Approx` | deterministic greedy construction  |
//! | `LS1`    | hill climbing                      |
//! | `LS2`    | simulated annealing                |
//!
//! The facade owns everything around the search: drawing and reporting a
//! seed, wiring the cutoff and progress logging into the solver monitors,
//! comparing against a reference optimum, and naming and writing the
//! `.sol` and `.trace` files.

pub mod config;
pub mod error;
pub mod output;
pub mod solver;
