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

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use ::log::info;
use canopy_model::{bitmask::CoverMask, instance::Instance, solution::Cover};
use std::time::{Duration, Instant};

/// Writes a progress table through the `log` facade at `info` level.
///
/// A line is emitted at most once per `log_interval`, and the clock is only
/// consulted on nodes where `nodes_explored & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_size: Option<usize>,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_size: None,
        }
    }

    fn log_header(&self) {
        info!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<10} | {:<14} | {:<14}",
            "Elapsed", "Nodes", "Depth", "Best", "Remaining", "Pruned (bound)", "Pruned (dead)"
        );
        info!("{}", "-".repeat(95));
    }

    fn log_line(&mut self, depth: usize, remaining: &CoverMask, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        let best = match self.best_size {
            Some(size) => size.to_string(),
            None => "Inf".to_string(),
        };

        info!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<10} | {:<14} | {:<14}",
            elapsed,
            stats.nodes_explored,
            depth,
            best,
            remaining.popcount(),
            stats.prunings_bound,
            stats.prunings_infeasible
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:.1}s, clock_check_mask: {})",
            self.log_interval.as_secs_f64(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_size = None;
        info!("branch-and-bound on {}", instance);
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        info!("{}", "-".repeat(95));
        info!(
            "search finished after {} node(s) in {:.2?}",
            statistics.nodes_explored,
            self.start_time.elapsed()
        );
    }

    fn on_node(&mut self, depth: usize, remaining: &CoverMask, statistics: &BnbSolverStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(depth, remaining, statistics);
        }
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, cover: &Cover, _statistics: &BnbSolverStatistics) {
        self.best_size = Some(cover.size());
        info!(
            "new incumbent of size {} after {:.3}s",
            cover.size(),
            self.start_time.elapsed().as_secs_f64()
        );
    }
}
