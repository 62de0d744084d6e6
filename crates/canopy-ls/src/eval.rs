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

//! Candidate evaluation.

/// The two quantities every acceptance rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation {
    /// Number of subsets in the candidate.
    pub size: usize,
    /// Number of universe elements the candidate leaves uncovered.
    pub uncovered: usize,
}

impl Evaluation {
    #[inline]
    pub fn new(size: usize, uncovered: usize) -> Self {
        Self { size, uncovered }
    }

    /// Returns `true` if the candidate covers the whole universe.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.uncovered == 0
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Evaluation(size: {}, uncovered: {})",
            self.size, self.uncovered
        )
    }
}

/// Scores a candidate as `size + penalty_weight * uncovered`.
///
/// A large weight keeps incomplete covers strongly disfavored while still
/// letting the search pass through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenalizedObjective {
    penalty_weight: u64,
}

impl PenalizedObjective {
    pub const DEFAULT_PENALTY_WEIGHT: u64 = 10_000;

    #[inline]
    pub fn new(penalty_weight: u64) -> Self {
        Self { penalty_weight }
    }

    #[inline]
    pub fn penalty_weight(&self) -> u64 {
        self.penalty_weight
    }

    /// The penalized objective value, saturating at `u64::MAX`.
    #[inline]
    pub fn value(&self, evaluation: &Evaluation) -> u64 {
        (evaluation.size as u64)
            .saturating_add(self.penalty_weight.saturating_mul(evaluation.uncovered as u64))
    }

    /// `value(candidate) - value(current)` as a float.
    #[inline]
    pub fn delta(&self, current: &Evaluation, candidate: &Evaluation) -> f64 {
        self.value(candidate) as f64 - self.value(current) as f64
    }
}

impl Default for PenalizedObjective {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PENALTY_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_penalizes_uncovered() {
        let objective = PenalizedObjective::default();
        assert_eq!(objective.value(&Evaluation::new(3, 0)), 3);
        assert_eq!(objective.value(&Evaluation::new(2, 1)), 10_002);
    }

    #[test]
    fn test_delta_sign() {
        let objective = PenalizedObjective::new(5);
        let current = Evaluation::new(4, 0);
        assert_eq!(objective.delta(&current, &Evaluation::new(3, 0)), -1.0);
        assert_eq!(objective.delta(&current, &Evaluation::new(3, 2)), 9.0);
    }

    #[test]
    fn test_value_saturates() {
        let objective = PenalizedObjective::new(u64::MAX);
        assert_eq!(objective.value(&Evaluation::new(1, 2)), u64::MAX);
    }
}
