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

//! Cutoff for local search.
//!
//! Wraps the shared `TimeLimit`. The clock restarts on `on_start`, which the
//! engine calls before building the warm start, so the cutoff covers the
//! whole run and a monitor can be reused across runs.

use crate::{
    eval::Evaluation, monitor::local_search_monitor::LocalSearchMonitor,
    stats::LocalSearchStatistics,
};
use canopy_model::{instance::Instance, solution::Cover};
use canopy_search::monitor::{search_monitor::SearchCommand, time_limit::TimeLimit};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TimeLimitLocalSearchMonitor {
    clock: TimeLimit,
}

impl TimeLimitLocalSearchMonitor {
    /// Creates a monitor that reads the clock every iteration.
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            clock: TimeLimit::new(Some(time_limit)),
        }
    }

    /// Creates a monitor that only reads the clock when
    /// `polls & clock_check_mask == 0`.
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

    /// Time since the run started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }
}

impl LocalSearchMonitor for TimeLimitLocalSearchMonitor {
    fn name(&self) -> &str {
        "TimeLimitLocalSearchMonitor"
    }

    fn on_start(&mut self, _instance: &Instance) {
        self.clock.restart();
    }

    fn on_end(&mut self, _best: Option<&Cover>, _statistics: &LocalSearchStatistics) {}

    fn on_iteration(&mut self, _current: &Evaluation, _statistics: &LocalSearchStatistics) {}

    fn on_move_accepted(&mut self, _current: &Evaluation, _statistics: &LocalSearchStatistics) {}

    fn on_move_rejected(&mut self, _candidate: &Evaluation, _statistics: &LocalSearchStatistics) {
    }

    fn on_new_best(&mut self, _best: &Cover, _statistics: &LocalSearchStatistics) {}

    fn search_command(&mut self, _statistics: &LocalSearchStatistics) -> SearchCommand {
        self.clock.poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_model::instance::InstanceBuilder;

    #[test]
    fn test_zero_cutoff_terminates_immediately() {
        let instance = InstanceBuilder::new(1).with_subset([1]).build();
        let stats = LocalSearchStatistics::default();
        let mut monitor = TimeLimitLocalSearchMonitor::new(Duration::ZERO);
        monitor.on_start(&instance);
        assert!(monitor.search_command(&stats).is_terminate());
        assert!(monitor.is_exceeded());
    }
}
