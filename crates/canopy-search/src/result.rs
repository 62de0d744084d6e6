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

use canopy_model::solution::Cover;

/// What a solver run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// No cover of the universe exists.
    Infeasible,
    /// A cover that is proven minimum.
    Optimal(Cover),
    /// A valid cover without a proof of optimality.
    Feasible(Cover),
    /// The solver stopped without a cover and without an infeasibility proof.
    Unknown,
}

impl SolverResult {
    /// Returns the cover, if any.
    #[inline]
    pub fn cover(&self) -> Option<&Cover> {
        match self {
            SolverResult::Optimal(cover) | SolverResult::Feasible(cover) => Some(cover),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    #[inline]
    pub fn into_cover(self) -> Option<Cover> {
        match self {
            SolverResult::Optimal(cover) | SolverResult::Feasible(cover) => Some(cover),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_cover(&self) -> bool {
        self.cover().is_some()
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(cover) => write!(f, "Optimal(size={})", cover.size()),
            SolverResult::Feasible(cover) => write!(f, "Feasible(size={})", cover.size()),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search space was exhausted; the returned cover is minimum.
    OptimalityProven,
    /// The instance has no cover.
    InfeasibilityProven,
    /// The search was cut off early (time limit, monitor request).
    /// The string describes why.
    Aborted(String),
}

impl TerminationReason {
    /// `true` if the run finished with a proof rather than being cut off.
    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        !matches!(self, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}
