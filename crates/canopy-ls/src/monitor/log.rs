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
    eval::Evaluation, monitor::local_search_monitor::LocalSearchMonitor,
    stats::LocalSearchStatistics,
};
use ::log::info;
use canopy_model::{instance::Instance, solution::Cover};
use std::time::{Duration, Instant};

/// Periodically logs the progress of a local search at `info` level.
///
/// The clock is only read on iterations where
/// `iterations & clock_check_mask == 0`, and at most one line is written
/// per `log_interval`.
#[derive(Debug, Clone)]
pub struct LogLocalSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_size: Option<usize>,
}

impl LogLocalSearchMonitor {
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
            "{:<9} | {:<12} | {:<8} | {:<10} | {:<10} | {:<8}",
            "Elapsed", "Iterations", "Best", "Current", "Uncovered", "Accept %"
        );
        info!("{}", "-".repeat(72));
    }

    fn log_line(&mut self, current: &Evaluation, stats: &LocalSearchStatistics) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        let best = match self.best_size {
            Some(size) => size.to_string(),
            None => "Inf".to_string(),
        };
        info!(
            "{:<9} | {:<12} | {:<8} | {:<10} | {:<10} | {:<8.2}",
            elapsed,
            stats.iterations,
            best,
            current.size,
            current.uncovered,
            stats.acceptance_rate() * 100.0
        );
        self.last_log_time = now;
    }
}

impl Default for LogLocalSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1023)
    }
}

impl LocalSearchMonitor for LogLocalSearchMonitor {
    fn name(&self) -> &str {
        "LogLocalSearchMonitor"
    }

    fn on_start(&mut self, instance: &Instance) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_size = None;
        info!("local search on {}", instance);
        self.log_header();
    }

    fn on_end(&mut self, best: Option<&Cover>, statistics: &LocalSearchStatistics) {
        info!("{}", "-".repeat(72));
        match best {
            Some(cover) => info!(
                "local search finished after {} iteration(s) in {:.2?} with a cover of size {}",
                statistics.iterations,
                self.start_time.elapsed(),
                cover.size()
            ),
            None => info!(
                "local search finished after {} iteration(s) without a cover",
                statistics.iterations
            ),
        }
    }

    fn on_iteration(&mut self, current: &Evaluation, statistics: &LocalSearchStatistics) {
        if (statistics.iterations & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(current, statistics);
        }
    }

    fn on_move_accepted(&mut self, _current: &Evaluation, _statistics: &LocalSearchStatistics) {}

    fn on_move_rejected(&mut self, _candidate: &Evaluation, _statistics: &LocalSearchStatistics) {
    }

    fn on_new_best(&mut self, best: &Cover, _statistics: &LocalSearchStatistics) {
        self.best_size = Some(best.size());
        info!(
            "new best cover of size {} after {:.3}s",
            best.size(),
            self.start_time.elapsed().as_secs_f64()
        );
    }
}
