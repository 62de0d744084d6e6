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

//! Cooperative cutoff clock.
//!
//! Solvers never get preempted. Instead they poll a `TimeLimit` at fixed
//! points (every branch-and-bound node entry, every local-search iteration)
//! and unwind once it reports `Terminate`. The clock is monotonic
//! (`std::time::Instant`). A clock-check mask trades precision for
//! overhead: with mask `k`, the clock is read only on polls whose counter
//! satisfies `polls & k == 0`. The default mask `0` reads it on every poll.
//!
//! Once the limit has been observed as exceeded the result is sticky, so a
//! masked poll never flips a terminated search back to `Continue`.

use crate::monitor::search_monitor::SearchCommand;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TimeLimit {
    limit: Option<Duration>,
    start: Instant,
    clock_check_mask: u64,
    polls: u64,
    exceeded: bool,
}

impl TimeLimit {
    /// Creates a clock with the given cutoff; `None` never expires.
    #[inline]
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            limit,
            start: Instant::now(),
            clock_check_mask: 0,
            polls: 0,
            exceeded: false,
        }
    }

    #[inline]
    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Reads the clock only on every `mask + 1`-th poll (for a mask of the
    /// form `2^k - 1`).
    #[inline]
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    /// Restarts the clock. Called when the search begins.
    #[inline]
    pub fn restart(&mut self) {
        self.start = Instant::now();
        self.polls = 0;
        self.exceeded = false;
    }

    #[inline]
    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    /// Polls the clock.
    pub fn poll(&mut self) -> SearchCommand {
        if !self.exceeded {
            let polls = self.polls;
            self.polls = self.polls.wrapping_add(1);

            if polls & self.clock_check_mask == 0
                && let Some(limit) = self.limit
                && self.start.elapsed() >= limit
            {
                self.exceeded = true;
            }
        }

        match (self.exceeded, self.limit) {
            (true, Some(limit)) => SearchCommand::Terminate(format!(
                "time limit of {:.3}s reached",
                limit.as_secs_f64()
            )),
            _ => SearchCommand::Continue,
        }
    }
}

impl Default for TimeLimit {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl std::fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.limit {
            Some(limit) => write!(f, "TimeLimit({:.3}s)", limit.as_secs_f64()),
            None => write!(f, "TimeLimit(unlimited)"),
        }
    }
}
