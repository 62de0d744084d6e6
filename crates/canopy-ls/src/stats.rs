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

//! Counters for a local search run.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalSearchStatistics {
    /// Moves proposed.
    pub iterations: u64,
    /// Candidates that became the current cover.
    pub accepted_moves: u64,
    /// Candidates that were undone.
    pub rejected_moves: u64,
    /// Strict improvements of the best complete cover.
    pub improvements: u64,
    /// Total time taken by the local search.
    pub time_total: Duration,
}

impl LocalSearchStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_accepted_move(&mut self) {
        self.accepted_moves = self.accepted_moves.saturating_add(1);
    }

    #[inline]
    pub fn on_rejected_move(&mut self) {
        self.rejected_moves = self.rejected_moves.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Fraction of proposed moves that were accepted.
    #[inline]
    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.iterations as f64
        }
    }
}

impl std::fmt::Display for LocalSearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Canopy-LS Solver Statistics:")?;
        writeln!(f, "   Iterations:        {}", self.iterations)?;
        writeln!(f, "   Accepted Moves:    {}", self.accepted_moves)?;
        writeln!(f, "   Rejected Moves:    {}", self.rejected_moves)?;
        writeln!(f, "   Improvements:      {}", self.improvements)?;
        writeln!(f, "   Total Time:        {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance_rate() {
        let mut stats = LocalSearchStatistics::default();
        assert_eq!(stats.acceptance_rate(), 0.0);
        for _ in 0..4 {
            stats.on_iteration();
        }
        stats.on_accepted_move();
        stats.on_rejected_move();
        stats.on_rejected_move();
        stats.on_rejected_move();
        assert_eq!(stats.acceptance_rate(), 0.25);
        assert_eq!(stats.rejected_moves, 3);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut stats = LocalSearchStatistics::default();
        stats.on_improvement();
        let text = stats.to_string();
        assert!(text.starts_with("Canopy-LS Solver Statistics:"));
        assert!(text.contains("Improvements:      1"));
    }
}
