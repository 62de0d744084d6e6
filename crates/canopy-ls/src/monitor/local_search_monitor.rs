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

//! Monitoring interface for local search runs.
//!
//! Monitors observe the run lifecycle and may stop it by returning
//! `SearchCommand::Terminate` from `search_command`, which the engine polls
//! once at the top of every iteration. Only `search_command` has a default.

use crate::{eval::Evaluation, stats::LocalSearchStatistics};
use canopy_model::{instance::Instance, solution::Cover};
use canopy_search::monitor::search_monitor::SearchCommand;

pub trait LocalSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once when the run begins, before the warm start is built. A
    /// complete warm start is then reported through `on_new_best`.
    fn on_start(&mut self, instance: &Instance);

    /// Called once the run is over. `best` is `None` only for uncoverable instances.
    fn on_end(&mut self, best: Option<&Cover>, statistics: &LocalSearchStatistics);

    /// Called at the end of every iteration with the current cover's evaluation.
    fn on_iteration(&mut self, current: &Evaluation, statistics: &LocalSearchStatistics);

    /// Called when the metaheuristic keeps a candidate.
    fn on_move_accepted(&mut self, current: &Evaluation, statistics: &LocalSearchStatistics);

    /// Called when the metaheuristic rejects a candidate.
    fn on_move_rejected(&mut self, candidate: &Evaluation, statistics: &LocalSearchStatistics);

    /// Called for a complete warm start and whenever the best complete
    /// cover strictly improves.
    fn on_new_best(&mut self, best: &Cover, statistics: &LocalSearchStatistics);

    fn search_command(&mut self, _statistics: &LocalSearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl std::fmt::Debug for dyn LocalSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSearchMonitor {{ name: {} }}", self.name())
    }
}

impl std::fmt::Display for dyn LocalSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSearchMonitor: {}", self.name())
    }
}
