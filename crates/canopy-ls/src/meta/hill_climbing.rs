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

//! Hill climbing over complete covers.
//!
//! A candidate is kept only if it covers the universe and is no larger than
//! the current cover. Strictly smaller candidates count as progress; an
//! equal-size candidate is kept but still counts toward stagnation.

use crate::{
    eval::Evaluation,
    meta::metaheuristic::{Metaheuristic, Verdict},
};
use rand::RngCore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HillClimbing;

impl HillClimbing {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Metaheuristic for HillClimbing {
    fn name(&self) -> &str {
        "HillClimbing"
    }

    fn on_start(&mut self, _initial: &Evaluation) {}

    fn evaluate(
        &mut self,
        current: &Evaluation,
        candidate: &Evaluation,
        _rng: &mut dyn RngCore,
    ) -> Verdict {
        if candidate.is_complete() && candidate.size <= current.size {
            Verdict::Accept {
                progress: candidate.size < current.size,
            }
        } else {
            Verdict::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_acceptance_rule() {
        let mut hc = HillClimbing::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let current = Evaluation::new(4, 0);

        assert_eq!(
            hc.evaluate(&current, &Evaluation::new(3, 0), &mut rng),
            Verdict::Accept { progress: true }
        );
        assert_eq!(
            hc.evaluate(&current, &Evaluation::new(4, 0), &mut rng),
            Verdict::Accept { progress: false }
        );
        assert_eq!(
            hc.evaluate(&current, &Evaluation::new(5, 0), &mut rng),
            Verdict::Reject
        );
        assert_eq!(
            hc.evaluate(&current, &Evaluation::new(3, 1), &mut rng),
            Verdict::Reject,
            "incomplete candidates are never kept"
        );
    }
}
