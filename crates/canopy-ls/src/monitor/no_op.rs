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
use canopy_model::{instance::Instance, solution::Cover};

/// A local search monitor that does nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOperationLocalSearchMonitor;

impl NoOperationLocalSearchMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl LocalSearchMonitor for NoOperationLocalSearchMonitor {
    fn name(&self) -> &str {
        "NoOperationLocalSearchMonitor"
    }

    #[inline(always)]
    fn on_start(&mut self, _instance: &Instance) {}

    #[inline(always)]
    fn on_end(&mut self, _best: Option<&Cover>, _statistics: &LocalSearchStatistics) {}

    #[inline(always)]
    fn on_iteration(&mut self, _current: &Evaluation, _statistics: &LocalSearchStatistics) {}

    #[inline(always)]
    fn on_move_accepted(&mut self, _current: &Evaluation, _statistics: &LocalSearchStatistics) {}

    #[inline(always)]
    fn on_move_rejected(&mut self, _candidate: &Evaluation, _statistics: &LocalSearchStatistics) {
    }

    #[inline(always)]
    fn on_new_best(&mut self, _best: &Cover, _statistics: &LocalSearchStatistics) {}
}
