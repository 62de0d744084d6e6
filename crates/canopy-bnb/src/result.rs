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

use crate::stats::BnbSolverStatistics;
use canopy_model::solution::Cover;
use canopy_search::{
    result::{SolverResult, TerminationReason},
    trace::Trace,
};

/// Result of the branch-and-bound solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
    trace: Trace,
}

impl BnbSolverOutcome {
    /// The search space was exhausted with `cover` as the incumbent.
    #[inline]
    pub fn optimal(cover: Cover, statistics: BnbSolverStatistics, trace: Trace) -> Self {
        Self {
            result: SolverResult::Optimal(cover),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
            trace,
        }
    }

    /// No cover exists.
    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics, trace: Trace) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
            trace,
        }
    }

    /// The search was cut off. The best cover found so far, if any, is
    /// reported as feasible but unproven.
    #[inline]
    pub fn aborted<R>(
        cover: Option<Cover>,
        reason: R,
        statistics: BnbSolverStatistics,
        trace: Trace,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match cover {
            Some(cover) => SolverResult::Feasible(cover),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
            trace,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// `true` if the whole search space was explored, i.e. the result is a
    /// proof (of optimality or infeasibility) rather than a best effort.
    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        self.termination_reason.is_exhaustive()
    }

    #[inline]
    pub fn into_parts(self) -> (SolverResult, TerminationReason, BnbSolverStatistics, Trace) {
        (
            self.result,
            self.termination_reason,
            self.statistics,
            self.trace,
        )
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_model::index::SubsetIndex;

    fn stats() -> BnbSolverStatistics {
        BnbSolverStatistics::default()
    }

    #[test]
    fn test_aborted_without_cover_is_unknown() {
        let outcome = BnbSolverOutcome::aborted(None, "time limit", stats(), Trace::default());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert!(!outcome.is_exhaustive());
        match outcome.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "time limit"),
            other => panic!("expected Aborted, got {other:?}"),
        }
    }

    #[test]
    fn test_aborted_with_cover_is_feasible() {
        let cover = Cover::new([SubsetIndex::new(0)]);
        let outcome =
            BnbSolverOutcome::aborted(Some(cover.clone()), "stop", stats(), Trace::default());
        assert_eq!(outcome.result(), &SolverResult::Feasible(cover));
    }

    #[test]
    fn test_optimal_and_infeasible_are_exhaustive() {
        let cover = Cover::new([SubsetIndex::new(0)]);
        assert!(BnbSolverOutcome::optimal(cover, stats(), Trace::default()).is_exhaustive());
        assert!(BnbSolverOutcome::infeasible(stats(), Trace::default()).is_exhaustive());
    }
}
