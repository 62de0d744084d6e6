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

//! Acceptance policy interface.
//!
//! The engine owns move generation, bookkeeping of the best cover, the trace
//! and termination. A `Metaheuristic` only decides whether a candidate
//! replaces the current cover and whether that decision counts as progress
//! for the stagnation counter. Any randomness it needs comes from the
//! generator the engine passes in, never from a private one.

use crate::eval::Evaluation;
use canopy_model::solution::Cover;
use rand::RngCore;

/// The decision on a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Keep the candidate. `progress` resets the stagnation counter.
    Accept { progress: bool },
    /// Undo the move.
    Reject,
}

impl Verdict {
    #[inline]
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept { .. })
    }
}

pub trait Metaheuristic {
    /// Returns the name of the metaheuristic.
    fn name(&self) -> &str;

    /// Called once before the first iteration.
    fn on_start(&mut self, initial: &Evaluation);

    /// Decides whether `candidate` replaces `current`.
    fn evaluate(
        &mut self,
        current: &Evaluation,
        candidate: &Evaluation,
        rng: &mut dyn RngCore,
    ) -> Verdict;

    /// Called after a move is kept.
    fn on_accept(&mut self, _new_current: &Evaluation) {}

    /// Called after a move is undone.
    fn on_reject(&mut self, _rejected: &Evaluation) {}

    /// Called when the best complete cover strictly improves.
    fn on_new_best(&mut self, _best: &Cover) {}

    /// Called at the end of every iteration.
    fn on_iteration_end(&mut self) {}
}

impl std::fmt::Debug for dyn Metaheuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Metaheuristic {{ name: {} }}", self.name())
    }
}

impl std::fmt::Display for dyn Metaheuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Metaheuristic: {}", self.name())
    }
}
