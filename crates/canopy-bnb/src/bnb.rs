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

//! Depth-first branch-and-bound over subset bitmasks.
//!
//! The solver explores subsets in coverage order (see `ordering`). Every
//! node of the search tree is a frame of a recursive call carrying the
//! search cursor and the mask of still-uncovered elements; the chosen
//! subsets live in one path vector owned by the search session, pushed
//! before descending and popped right after the call returns. All mutable
//! state of a run (incumbent, trace, statistics, path, scratch masks) lives
//! in a single `BnbSearchSession` that is passed down by `&mut self`.
//!
//! A node runs through these steps in order:
//!
//! 1. If nothing is left to cover, the path is a complete cover and is
//!    offered to the incumbent (size first, then lexicographic tie-break).
//! 2. The monitor is polled; a `Terminate` unwinds the whole search while
//!    keeping the incumbent.
//! 3. The lower bound from `bound` prunes the node if no completion exists,
//!    or if `|path| + lb` is inferior to the incumbent under the configured
//!    `PruneRule`.
//! 4. Each subset from the cursor on that overlaps the uncovered mask is
//!    tried as the next choice, in order; disjoint subsets are skipped.
//!
//! The greedy cover provides the initial incumbent. If the greedy finds the
//! instance uncoverable, the incumbent starts from the sentinel `m + 1`
//! and the search proves infeasibility at the root.

use crate::{
    bound::CoverageBound,
    monitor::{
        no_op::NoOperationMonitor,
        time::TimeLimitMonitor,
        tree_search_monitor::{PruneReason, TreeSearchMonitor},
    },
    ordering::coverage_order,
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use canopy_model::{
    bitmask::{BitmaskEncoder, CoverMask},
    index::SubsetIndex,
    instance::Instance,
    solution::Cover,
};
use canopy_search::{
    greedy::GreedyConstructor, incumbent::Incumbent, monitor::search_monitor::SearchCommand,
    trace::TraceRecorder,
};
use log::{debug, info};
use std::time::{Duration, Instant};

/// When a node counts as unable to improve on the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneRule {
    /// Prune iff `|path| + lb > incumbent`. Subtrees that can at best tie
    /// the incumbent are still explored, so the lexicographically smallest
    /// optimal cover is found.
    #[default]
    StrictlyInferior,
    /// Prune iff `|path| + lb >= incumbent`. Explores fewer nodes; among
    /// optimal covers the first one found is kept.
    NonImproving,
}

impl PruneRule {
    /// Whether a node whose best completion has size `bound` is pruned
    /// against an incumbent of size `upper_bound`.
    #[inline]
    pub fn prunes(self, bound: usize, upper_bound: usize) -> bool {
        match self {
            PruneRule::StrictlyInferior => bound > upper_bound,
            PruneRule::NonImproving => bound >= upper_bound,
        }
    }
}

impl std::fmt::Display for PruneRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneRule::StrictlyInferior => write!(f, "StrictlyInferior"),
            PruneRule::NonImproving => write!(f, "NonImproving"),
        }
    }
}

/// Exact minimum set cover solver.
///
/// A solver holds only its configuration; every `solve` call builds its own
/// search session, so a solver can be reused and shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BnbSolver {
    /// When a node counts as unable to improve on the incumbent.
    prune_rule: PruneRule,
    /// Whether the coverage lower bound prunes at all.
    bound_pruning: bool,
}

impl Default for BnbSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BnbSolver {
    /// Creates a solver with strict-inferiority pruning and the lower bound
    /// enabled.
    #[inline]
    pub fn new() -> Self {
        Self {
            prune_rule: PruneRule::default(),
            bound_pruning: true,
        }
    }

    /// Replaces the prune rule.
    #[inline]
    pub fn with_prune_rule(mut self, prune_rule: PruneRule) -> Self {
        self.prune_rule = prune_rule;
        self
    }

    /// Enables or disables lower-bound pruning. Without it the search
    /// enumerates every overlapping subset sequence; only useful to
    /// cross-check the bound.
    #[inline]
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.bound_pruning = enabled;
        self
    }

    #[inline]
    pub fn prune_rule(&self) -> PruneRule {
        self.prune_rule
    }

    #[inline]
    pub fn bound_pruning(&self) -> bool {
        self.bound_pruning
    }

    /// Solves `instance`, reporting to and polling `monitor`.
    ///
    /// The monitor is entered before any preprocessing (bitmask encoding,
    /// ordering, greedy warm start), so a cutoff enforced by the monitor
    /// covers the whole call. The root lower bound is therefore not yet
    /// known in `on_enter_search`.
    ///
    /// Infeasible instances are not an error: the outcome carries
    /// `SolverResult::Infeasible` once the root node proves it.
    ///
    /// # Parameters:
    /// - `instance`: The instance to solve.
    /// - `monitor`: Observes the search and is polled once per node. A
    ///   `Terminate` unwinds the search and keeps the incumbent, which is
    ///   then reported as an aborted, non-exhaustive outcome.

    pub fn solve<M>(&self, instance: &Instance, monitor: &mut M) -> BnbSolverOutcome
    where
        M: TreeSearchMonitor + ?Sized,
    {
        let mut statistics = BnbSolverStatistics::default();
        monitor.on_enter_search(instance, &statistics);
        let start_time = Instant::now();

        let encoder = BitmaskEncoder::new(instance);
        let order = coverage_order(&encoder);
        let masks: Vec<CoverMask> = order.iter().map(|&i| encoder.mask(i).clone()).collect();
        let bound = CoverageBound::new(&masks, encoder.universe_size());

        let (incumbent, trace, uncoverable) = match GreedyConstructor::new().construct(instance) {
            Ok(cover) => {
                debug!("greedy warm start of size {}", cover.size());
                let trace = TraceRecorder::with_initial(cover.size());
                (Incumbent::from_cover(cover), trace, false)
            }
            Err(err) => {
                info!("no warm start available: {}", err);
                (
                    Incumbent::with_sentinel(instance.num_subsets() + 1),
                    TraceRecorder::new(),
                    true,
                )
            }
        };

        statistics.set_root_lower_bound(bound.lower_bound(&masks, encoder.full_mask(), 0));

        let mut session = BnbSearchSession {
            prune_rule: self.prune_rule,
            bound_pruning: self.bound_pruning,
            masks,
            order,
            bound,
            incumbent,
            trace,
            uncoverable,
            path: Vec::new(),
            pool: Vec::new(),
            statistics,
            monitor,
            start_time,
            abort_reason: None,
        };

        session.dfs(0, encoder.full_mask());
        session.finish()
    }

    /// Solves `instance` with an optional cutoff and no other monitoring.
    pub fn solve_with_time_limit(
        &self,
        instance: &Instance,
        time_limit: Option<Duration>,
    ) -> BnbSolverOutcome {
        match time_limit {
            Some(limit) => self.solve(instance, &mut TimeLimitMonitor::new(limit)),
            None => self.solve(instance, &mut NoOperationMonitor::new()),
        }
    }
}

/// Mutable state of one run.
struct BnbSearchSession<'a, M>
where
    M: TreeSearchMonitor + ?Sized,
{
    prune_rule: PruneRule,
    bound_pruning: bool,
    /// Subset masks in search order.
    masks: Vec<CoverMask>,
    /// Search position to original subset index.
    order: Vec<SubsetIndex>,
    bound: CoverageBound,
    /// Best cover so far, seeded with the greedy cover or the `m + 1` sentinel.
    incumbent: Incumbent,
    trace: TraceRecorder,
    /// The greedy proved that some element is in no subset.
    uncoverable: bool,
    /// Chosen search positions, root to current node.
    path: Vec<usize>,
    /// Recycled child masks, one per active recursion level.
    pool: Vec<CoverMask>,
    statistics: BnbSolverStatistics,
    monitor: &'a mut M,
    /// Taken right after the monitor was entered; trace times count from here.
    start_time: Instant,
    /// Set by the first `Terminate`; the search unwinds once it is `Some`.
    abort_reason: Option<String>,
}

impl<M> BnbSearchSession<'_, M>
where
    M: TreeSearchMonitor + ?Sized,
{
    fn dfs(&mut self, cursor: usize, remaining: &CoverMask) {
        let depth = self.path.len();
        self.statistics.on_node_explored();
        self.statistics.on_depth_update(depth as u64);
        self.monitor.on_node(depth, remaining, &self.statistics);

        if remaining.is_clear() {
            self.on_complete_cover();
            return;
        }

        if let SearchCommand::Terminate(reason) = self.monitor.search_command(&self.statistics) {
            debug!("search terminated at depth {}: {}", depth, reason);
            self.abort_reason = Some(reason);
            return;
        }

        if self.bound_pruning {
            match self.bound.lower_bound(&self.masks, remaining, cursor) {
                None => {
                    self.statistics.on_pruning_infeasible();
                    self.monitor
                        .on_prune(PruneReason::DeadEnd, &self.statistics);
                    return;
                }
                Some(lb)
                    if self
                        .prune_rule
                        .prunes(depth + lb, self.incumbent.upper_bound()) =>
                {
                    self.statistics.on_pruning_bound();
                    self.monitor
                        .on_prune(PruneReason::BoundDominated, &self.statistics);
                    return;
                }
                Some(_) => {}
            }
        }

        let mut child = self
            .pool
            .pop()
            .unwrap_or_else(|| CoverMask::empty(remaining.width()));

        for i in cursor..self.masks.len() {
            if !self.masks[i].intersects(remaining) {
                self.statistics.on_skipped_disjoint();
                continue;
            }

            child.copy_from(remaining);
            child.remove_all(&self.masks[i]);

            self.path.push(i);
            self.dfs(i + 1, &child);
            self.path.pop();

            if self.abort_reason.is_some() {
                break;
            }
        }

        self.pool.push(child);
        self.statistics.on_backtrack();
    }

    fn on_complete_cover(&mut self) {
        let candidate: Cover = self.path.iter().map(|&p| self.order[p]).collect();
        if !self.incumbent.try_install(candidate) {
            return;
        }

        let size = self.incumbent.upper_bound();
        self.statistics.on_solution_found();
        self.trace
            .record_improvement(self.start_time.elapsed().as_secs_f64(), size);
        debug!("incumbent improved to size {}", size);

        if let Some(cover) = self.incumbent.cover() {
            self.monitor.on_solution_found(cover, &self.statistics);
        }
    }

    fn finish(self) -> BnbSolverOutcome {
        let BnbSearchSession {
            incumbent,
            trace,
            uncoverable,
            mut statistics,
            monitor,
            start_time,
            abort_reason,
            ..
        } = self;

        statistics.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&statistics);
        let trace = trace.finish();

        match (abort_reason, incumbent.into_cover()) {
            (None, Some(cover)) => BnbSolverOutcome::optimal(cover, statistics, trace),
            (Some(reason), Some(cover)) => {
                BnbSolverOutcome::aborted(Some(cover), reason, statistics, trace)
            }
            (None, None) => BnbSolverOutcome::infeasible(statistics, trace),
            (Some(_), None) if uncoverable => BnbSolverOutcome::infeasible(statistics, trace),
            (Some(reason), None) => BnbSolverOutcome::aborted(None, reason, statistics, trace),
        }
    }
}
