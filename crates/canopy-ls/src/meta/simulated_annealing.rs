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

//! Simulated annealing on the penalized objective.
//!
//! Candidates are scored with `PenalizedObjective`. A candidate that does
//! not increase the objective is always kept; a worse one is kept with the
//! Metropolis probability `exp(-delta / T)`. The temperature comes from a
//! `CoolingSchedule` that is advanced once per iteration. Once the schedule
//! is frozen the rule degenerates to descent and no random number is drawn.

use crate::{
    eval::{Evaluation, PenalizedObjective},
    meta::metaheuristic::{Metaheuristic, Verdict},
};
use rand::{Rng, RngCore};

/// Controls the temperature over the course of a run.
pub trait CoolingSchedule: std::fmt::Debug {
    /// Resets the temperature to its initial value.
    fn on_start(&mut self);

    /// Advances the schedule by one iteration.
    fn update(&mut self);

    /// The current temperature.
    fn current(&self) -> f64;

    /// Returns `true` once worsening moves should no longer be considered.
    fn is_frozen(&self) -> bool;
}

/// `T_{k+1} = T_k * alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricCooling {
    initial: f64,
    current: f64,
    alpha: f64,
    min_temp: f64,
}

impl GeometricCooling {
    /// Creates a new geometric cooling schedule.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not strictly between `0.0` and `1.0`.
    #[inline]
    pub fn new(initial: f64, alpha: f64, min_temp: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha < 1.0,
            "called `GeometricCooling::new()` with invalid alpha: {}. Must be in (0.0, 1.0)",
            alpha
        );
        Self {
            initial,
            current: initial,
            alpha,
            min_temp,
        }
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl CoolingSchedule for GeometricCooling {
    #[inline]
    fn on_start(&mut self) {
        self.current = self.initial;
    }

    #[inline]
    fn update(&mut self) {
        self.current *= self.alpha;
    }

    #[inline]
    fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    fn is_frozen(&self) -> bool {
        self.current <= self.min_temp
    }
}

/// Tunables of `SimulatedAnnealing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedAnnealingParams {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    /// Temperatures at or below this value are treated as zero.
    pub min_temperature: f64,
    pub penalty_weight: u64,
}

impl Default for SimulatedAnnealingParams {
    fn default() -> Self {
        Self {
            initial_temperature: 25.0,
            cooling_rate: 0.99,
            min_temperature: 1e-8,
            penalty_weight: PenalizedObjective::DEFAULT_PENALTY_WEIGHT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<C = GeometricCooling>
where
    C: CoolingSchedule,
{
    cooling: C,
    objective: PenalizedObjective,
}

impl<C> SimulatedAnnealing<C>
where
    C: CoolingSchedule,
{
    #[inline]
    pub fn new(cooling: C, objective: PenalizedObjective) -> Self {
        Self { cooling, objective }
    }

    #[inline]
    pub fn temperature(&self) -> f64 {
        self.cooling.current()
    }

    #[inline]
    pub fn objective(&self) -> &PenalizedObjective {
        &self.objective
    }
}

impl SimulatedAnnealing<GeometricCooling> {
    /// Geometric cooling configured from `params`.
    ///
    /// # Panics
    ///
    /// Panics if `params.cooling_rate` is not strictly between `0.0` and `1.0`.
    pub fn from_params(params: &SimulatedAnnealingParams) -> Self {
        Self::new(
            GeometricCooling::new(
                params.initial_temperature,
                params.cooling_rate,
                params.min_temperature,
            ),
            PenalizedObjective::new(params.penalty_weight),
        )
    }
}

impl Default for SimulatedAnnealing<GeometricCooling> {
    fn default() -> Self {
        Self::from_params(&SimulatedAnnealingParams::default())
    }
}

impl<C> Metaheuristic for SimulatedAnnealing<C>
where
    C: CoolingSchedule,
{
    fn name(&self) -> &str {
        "SimulatedAnnealing"
    }

    fn on_start(&mut self, _initial: &Evaluation) {
        self.cooling.on_start();
    }

    fn evaluate(
        &mut self,
        current: &Evaluation,
        candidate: &Evaluation,
        rng: &mut dyn RngCore,
    ) -> Verdict {
        let delta = self.objective.delta(current, candidate);
        if delta <= 0.0 {
            return Verdict::Accept { progress: true };
        }
        if self.cooling.is_frozen() {
            return Verdict::Reject;
        }

        let probability = (-delta / self.cooling.current()).exp();
        if !probability.is_finite() {
            return Verdict::Reject;
        }
        if rng.random_bool(probability.clamp(0.0, 1.0)) {
            Verdict::Accept { progress: true }
        } else {
            Verdict::Reject
        }
    }

    fn on_iteration_end(&mut self) {
        self.cooling.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_geometric_cooling_decays_and_resets() {
        let mut cooling = GeometricCooling::new(25.0, 0.5, 1.0);
        cooling.update();
        assert_eq!(cooling.current(), 12.5);
        for _ in 0..10 {
            cooling.update();
        }
        assert!(cooling.is_frozen());
        cooling.on_start();
        assert_eq!(cooling.current(), 25.0);
    }

    #[test]
    #[should_panic(expected = "invalid alpha")]
    fn test_geometric_cooling_rejects_alpha_one() {
        let _ = GeometricCooling::new(25.0, 1.0, 0.0);
    }

    #[test]
    fn test_non_increasing_objective_always_accepted() {
        let mut sa = SimulatedAnnealing::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        sa.on_start(&Evaluation::new(5, 0));
        assert!(
            sa.evaluate(&Evaluation::new(5, 1), &Evaluation::new(4, 0), &mut rng)
                .is_accept()
        );
    }

    #[test]
    fn test_penalized_candidate_rejected_at_low_temperature() {
        let params = SimulatedAnnealingParams {
            initial_temperature: 1.0,
            ..SimulatedAnnealingParams::default()
        };
        let mut sa = SimulatedAnnealing::from_params(&params);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        sa.on_start(&Evaluation::new(5, 0));
        // delta ~ 10^4 at T = 1: exp(-9999) underflows to zero.
        for _ in 0..100 {
            assert_eq!(
                sa.evaluate(&Evaluation::new(5, 0), &Evaluation::new(4, 1), &mut rng),
                Verdict::Reject
            );
        }
    }

    #[test]
    fn test_small_worsening_sometimes_accepted_when_hot() {
        let params = SimulatedAnnealingParams {
            initial_temperature: 1_000.0,
            penalty_weight: 1,
            ..SimulatedAnnealingParams::default()
        };
        let mut sa = SimulatedAnnealing::from_params(&params);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        sa.on_start(&Evaluation::new(5, 0));
        let accepted = (0..100)
            .filter(|_| {
                sa.evaluate(&Evaluation::new(5, 0), &Evaluation::new(4, 2), &mut rng)
                    .is_accept()
            })
            .count();
        assert!(accepted > 90, "exp(-1/1000) is close to one: {}", accepted);
    }

    #[test]
    fn test_frozen_schedule_rejects_worsening() {
        let mut sa = SimulatedAnnealing::new(
            GeometricCooling::new(1e-9, 0.5, 1e-8),
            PenalizedObjective::new(1),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        sa.on_start(&Evaluation::new(2, 0));
        assert_eq!(
            sa.evaluate(&Evaluation::new(2, 0), &Evaluation::new(2, 1), &mut rng),
            Verdict::Reject
        );
    }
}
