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

//! Local search outcome and termination reporting.
//!
//! A local search never proves optimality, so the result is `Feasible` with
//! the best complete cover, or `Infeasible` when the instance has no cover
//! at all. `fallback_substituted` records that the search itself never held
//! a complete cover and the greedy construction was returned instead.

use crate::stats::LocalSearchStatistics;
use canopy_model::solution::Cover;
use canopy_search::{result::SolverResult, trace::Trace};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalSearchTerminationReason {
    /// The stagnation counter reached its limit.
    Stagnation,

    /// The current cover has fewer than two members, so no move exists.
    NeighborhoodExhausted,

    /// The instance has no cover; the search did not start.
    Infeasible,

    /// A monitor stopped the search (cutoff, external request).
    Aborted(String),
}

impl std::fmt::Display for LocalSearchTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalSearchTerminationReason::Stagnation => write!(f, "Stagnation Limit Reached"),
            LocalSearchTerminationReason::NeighborhoodExhausted => {
                write!(f, "Neighborhood Exhausted")
            }
            LocalSearchTerminationReason::Infeasible => write!(f, "Infeasible Instance"),
            LocalSearchTerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome {
    result: SolverResult,
    termination_reason: LocalSearchTerminationReason,
    statistics: LocalSearchStatistics,
    trace: Trace,
    fallback_substituted: bool,
}

impl LocalSearchOutcome {
    /// A run that ended holding `best`.
    #[inline]
    pub fn feasible(
        best: Cover,
        termination_reason: LocalSearchTerminationReason,
        statistics: LocalSearchStatistics,
        trace: Trace,
        fallback_substituted: bool,
    ) -> Self {
        Self {
            result: SolverResult::Feasible(best),
            termination_reason,
            statistics,
            trace,
            fallback_substituted,
        }
    }

    /// The instance has no cover.
    #[inline]
    pub fn infeasible(statistics: LocalSearchStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: LocalSearchTerminationReason::Infeasible,
            statistics,
            trace: Trace::default(),
            fallback_substituted: false,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn cover(&self) -> Option<&Cover> {
        self.result.cover()
    }

    #[inline]
    pub fn termination_reason(&self) -> &LocalSearchTerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &LocalSearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    #[inline]
    pub fn fallback_substituted(&self) -> bool {
        self.fallback_substituted
    }

    #[inline]
    pub fn into_parts(
        self,
    ) -> (
        SolverResult,
        LocalSearchTerminationReason,
        LocalSearchStatistics,
        Trace,
        bool,
    ) {
        (
            self.result,
            self.termination_reason,
            self.statistics,
            self.trace,
            self.fallback_substituted,
        )
    }
}

impl std::fmt::Display for LocalSearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Local Search Outcome:")?;
        writeln!(f, "  Result:             {}", self.result)?;
        writeln!(f, "  Termination:        {}", self.termination_reason)?;
        if self.fallback_substituted {
            writeln!(f, "  Greedy fallback:    yes")?;
        }
        write!(f, "{}", self.statistics)
    }
}
