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

//! Fan-out of local search events to several monitors.
//!
//! Events reach the children in insertion order; `search_command` returns
//! the first `Terminate`.

use crate::{
    eval::Evaluation, monitor::local_search_monitor::LocalSearchMonitor,
    stats::LocalSearchStatistics,
};
use canopy_model::{instance::Instance, solution::Cover};
use canopy_search::monitor::search_monitor::SearchCommand;

pub struct CompositeLocalSearchMonitor<'a> {
    monitors: Vec<Box<dyn LocalSearchMonitor + 'a>>,
}

impl<'a> Default for CompositeLocalSearchMonitor<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeLocalSearchMonitor<'a> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: LocalSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl std::fmt::Debug for CompositeLocalSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl LocalSearchMonitor for CompositeLocalSearchMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeLocalSearchMonitor"
    }

    fn on_start(&mut self, instance: &Instance) {
        for monitor in &mut self.monitors {
            monitor.on_start(instance);
        }
    }

    fn on_end(&mut self, best: Option<&Cover>, statistics: &LocalSearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_end(best, statistics);
        }
    }

    fn on_iteration(&mut self, current: &Evaluation, statistics: &LocalSearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_iteration(current, statistics);
        }
    }

    fn on_move_accepted(&mut self, current: &Evaluation, statistics: &LocalSearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_move_accepted(current, statistics);
        }
    }

    fn on_move_rejected(&mut self, candidate: &Evaluation, statistics: &LocalSearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_move_rejected(candidate, statistics);
        }
    }

    fn on_new_best(&mut self, best: &Cover, statistics: &LocalSearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_new_best(best, statistics);
        }
    }

    fn search_command(&mut self, statistics: &LocalSearchStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let command = monitor.search_command(statistics);
            if command.is_terminate() {
                return command;
            }
        }
        SearchCommand::Continue
    }
}
