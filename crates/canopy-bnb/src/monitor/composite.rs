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

//! Monitoring combinators for tree search
//!
//! `CompositeTreeSearchMonitor` forwards every event to its children in
//! insertion order. `search_command` short-circuits on the first
//! `Terminate`, so stricter stop conditions belong first.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use canopy_model::{bitmask::CoverMask, instance::Instance, solution::Cover};
use canopy_search::monitor::search_monitor::SearchCommand;

/// A tree search monitor that fans events out to several monitors.
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl<'a> Default for CompositeTreeSearchMonitor<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
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

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(instance, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, statistics: &BnbSolverStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let command = monitor.search_command(statistics);
            if command.is_terminate() {
                return command;
            }
        }
        SearchCommand::Continue
    }

    fn on_node(&mut self, depth: usize, remaining: &CoverMask, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_node(depth, remaining, statistics);
        }
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(reason, statistics);
        }
    }

    fn on_solution_found(&mut self, cover: &Cover, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(cover, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    struct Recording {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        stop: bool,
    }

    impl TreeSearchMonitor for Recording {
        fn name(&self) -> &str {
            self.name
        }
        fn on_enter_search(&mut self, _: &Instance, _: &BnbSolverStatistics) {
            self.log.borrow_mut().push(format!("{}:enter", self.name));
        }
        fn on_exit_search(&mut self, _: &BnbSolverStatistics) {
            self.log.borrow_mut().push(format!("{}:exit", self.name));
        }
        fn search_command(&mut self, _: &BnbSolverStatistics) -> SearchCommand {
            self.log.borrow_mut().push(format!("{}:command", self.name));
            if self.stop {
                SearchCommand::Terminate(self.name.to_string())
            } else {
                SearchCommand::Continue
            }
        }
        fn on_node(&mut self, _: usize, _: &CoverMask, _: &BnbSolverStatistics) {}
        fn on_prune(&mut self, _: PruneReason, _: &BnbSolverStatistics) {}
        fn on_solution_found(&mut self, _: &Cover, _: &BnbSolverStatistics) {}
    }

    #[test]
    fn test_fan_out_and_short_circuit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(Recording {
            name: "a",
            log: log.clone(),
            stop: true,
        });
        composite.add_monitor(Recording {
            name: "b",
            log: log.clone(),
            stop: false,
        });
        assert_eq!(composite.len(), 2);

        let instance = canopy_model::instance::InstanceBuilder::new(1).build();
        let stats = BnbSolverStatistics::default();
        composite.on_enter_search(&instance, &stats);
        let command = composite.search_command(&stats);
        composite.on_exit_search(&stats);

        assert_eq!(command, SearchCommand::Terminate("a".to_string()));
        assert_eq!(
            *log.borrow(),
            vec!["a:enter", "b:enter", "a:command", "a:exit", "b:exit"]
        );
    }
}
