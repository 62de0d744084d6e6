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
use canopy_model::{bitmask::CoverMask, instance::Instance, solution::Cover};
use canopy_search::monitor::{search_monitor::SearchCommand, time_limit::TimeLimit};
use std::time::Duration;

/// A monitor that terminates the search once the cutoff has elapsed.
///
/// The clock is read on every node entry by default; a clock-check mask
/// reduces that to every `mask + 1`-th node.
///
/// The clock restarts in `on_enter_search`, which the solver calls before
/// any preprocessing, so the cutoff covers the whole `solve` call.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    clock: TimeLimit,
}

impl TimeLimitMonitor {
    /// Creates a monitor with the given cutoff, polled at every node.
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            clock: TimeLimit::new(Some(time_limit)),
        }
    }

    /// Creates a monitor that only reads the clock when
    /// `nodes & clock_check_mask == 0`.
    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock: TimeLimit::new(Some(time_limit)).with_clock_check_mask(clock_check_mask),
        }
    }

    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.clock.is_exceeded()
    }

    /// Time since the search was entered.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }
}

impl TreeSearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance, _statistics: &BnbSolverStatistics) {
        self.clock.restart();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        self.clock.poll()
    }

    fn on_node(
        &mut self,
        _depth: usize,
        _remaining: &CoverMask,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, _cover: &Cover, _statistics: &BnbSolverStatistics) {}
}
