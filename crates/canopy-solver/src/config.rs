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

//! Solver configuration.
//!
//! `SolverConfig` is assembled through a consuming builder and validated
//! once in `build`, so every search starts from values that are known to be
//! in range. Defaults match the engine-level parameter structs.

use crate::error::ConfigError;
use canopy_bnb::bnb::PruneRule;
use canopy_ls::{engine::LocalSearchParams, meta::simulated_annealing::SimulatedAnnealingParams};
use std::{str::FromStr, time::Duration};

/// The algorithm a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    BranchAndBound,
    Greedy,
    HillClimbing,
    SimulatedAnnealing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BranchAndBound,
        Algorithm::Greedy,
        Algorithm::HillClimbing,
        Algorithm::SimulatedAnnealing,
    ];

    /// The selector used in output file names: `BnB`, `Approx`, `LS1`, `LS2`.
    #[inline]
    pub fn short_name(&self) -> &'static str {
        match self {
            Algorithm::BranchAndBound => "BnB",
            Algorithm::Greedy => "Approx",
            Algorithm::HillClimbing => "LS1",
            Algorithm::SimulatedAnnealing => "LS2",
        }
    }

    /// Returns `true` for the algorithms that consume a seed.
    #[inline]
    pub fn is_randomized(&self) -> bool {
        matches!(
            self,
            Algorithm::HillClimbing | Algorithm::SimulatedAnnealing
        )
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::BranchAndBound => "BranchAndBound",
            Algorithm::Greedy => "Greedy",
            Algorithm::HillClimbing => "HillClimbing",
            Algorithm::SimulatedAnnealing => "SimulatedAnnealing",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    /// Accepts the short selectors and the full names, ignoring case,
    /// dashes, underscores and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "bnb" | "branchandbound" => Ok(Algorithm::BranchAndBound),
            "approx" | "greedy" => Ok(Algorithm::Greedy),
            "ls1" | "hillclimbing" => Ok(Algorithm::HillClimbing),
            "ls2" | "simulatedannealing" => Ok(Algorithm::SimulatedAnnealing),
            _ => Err(ConfigError::InvalidParameter {
                name: "algorithm",
                reason: format!("unknown algorithm {:?}, expected BnB, Approx, LS1 or LS2", s),
            }),
        }
    }
}

/// A validated solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    algorithm: Algorithm,
    cutoff: Option<Duration>,
    seed: Option<u64>,
    local_search: LocalSearchParams,
    annealing: SimulatedAnnealingParams,
    prune_rule: PruneRule,
    log_interval: Duration,
    trace_precision: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            cutoff: None,
            seed: None,
            local_search: LocalSearchParams::default(),
            annealing: SimulatedAnnealingParams::default(),
            prune_rule: PruneRule::default(),
            log_interval: Duration::from_secs(1),
            trace_precision: SolverConfig::DEFAULT_TRACE_PRECISION,
        }
    }
}

impl SolverConfig {
    pub const DEFAULT_TRACE_PRECISION: usize = 4;
    pub const MAX_TRACE_PRECISION: usize = 9;

    #[inline]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::default()
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// `None` means the run is not cut off.
    #[inline]
    pub fn cutoff(&self) -> Option<Duration> {
        self.cutoff
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn local_search(&self) -> &LocalSearchParams {
        &self.local_search
    }

    #[inline]
    pub fn annealing(&self) -> &SimulatedAnnealingParams {
        &self.annealing
    }

    #[inline]
    pub fn prune_rule(&self) -> PruneRule {
        self.prune_rule
    }

    #[inline]
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    /// Decimal places of the timestamps in trace files.
    #[inline]
    pub fn trace_precision(&self) -> usize {
        self.trace_precision
    }

    /// Checks every tunable against its admissible range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::InvalidParameter {
                name,
                reason: reason.into(),
            }
        }

        if self.local_search.stagnation_limit == 0 {
            return Err(invalid("stagnation_limit", "must be positive"));
        }
        if self.local_search.snapshot_interval == 0 {
            return Err(invalid("snapshot_interval", "must be positive"));
        }
        let t0 = self.annealing.initial_temperature;
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(invalid(
                "initial_temperature",
                format!("must be finite and positive, got {}", t0),
            ));
        }
        let alpha = self.annealing.cooling_rate;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(invalid(
                "cooling_rate",
                format!("must lie strictly between 0 and 1, got {}", alpha),
            ));
        }
        if self.annealing.penalty_weight == 0 {
            return Err(invalid("penalty_weight", "must be positive"));
        }
        if self.trace_precision > Self::MAX_TRACE_PRECISION {
            return Err(invalid(
                "trace_precision",
                format!(
                    "at most {} decimal places, got {}",
                    Self::MAX_TRACE_PRECISION,
                    self.trace_precision
                ),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolverConfig(algorithm: {}, cutoff: ", self.algorithm)?;
        match self.cutoff {
            Some(cutoff) => write!(f, "{:.3}s", cutoff.as_secs_f64())?,
            None => write!(f, "none")?,
        }
        match self.seed {
            Some(seed) => write!(f, ", seed: {})", seed),
            None => write!(f, ", seed: unset)"),
        }
    }
}

/// Consuming builder for `SolverConfig`.
#[derive(Debug, Clone, Default)]
pub struct SolverConfigBuilder {
    config: SolverConfig,
}

impl SolverConfigBuilder {
    #[inline]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn cutoff(mut self, cutoff: Duration) -> Self {
        self.config.cutoff = Some(cutoff);
        self
    }

    /// Sets the cutoff from seconds, rejecting negative and non-finite values.
    pub fn cutoff_secs(mut self, seconds: f64) -> Result<Self, ConfigError> {
        let cutoff =
            Duration::try_from_secs_f64(seconds).map_err(|_| ConfigError::InvalidCutoff(seconds))?;
        self.config.cutoff = Some(cutoff);
        Ok(self)
    }

    #[inline]
    pub fn unlimited(mut self) -> Self {
        self.config.cutoff = None;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[inline]
    pub fn stagnation_limit(mut self, limit: u64) -> Self {
        self.config.local_search.stagnation_limit = limit;
        self
    }

    #[inline]
    pub fn snapshot_interval(mut self, interval: u64) -> Self {
        self.config.local_search.snapshot_interval = interval;
        self
    }

    #[inline]
    pub fn initial_temperature(mut self, temperature: f64) -> Self {
        self.config.annealing.initial_temperature = temperature;
        self
    }

    #[inline]
    pub fn cooling_rate(mut self, alpha: f64) -> Self {
        self.config.annealing.cooling_rate = alpha;
        self
    }

    #[inline]
    pub fn penalty_weight(mut self, weight: u64) -> Self {
        self.config.annealing.penalty_weight = weight;
        self
    }

    #[inline]
    pub fn prune_rule(mut self, rule: PruneRule) -> Self {
        self.config.prune_rule = rule;
        self
    }

    #[inline]
    pub fn log_interval(mut self, interval: Duration) -> Self {
        self.config.log_interval = interval;
        self
    }

    #[inline]
    pub fn trace_precision(mut self, precision: usize) -> Self {
        self.config.trace_precision = precision;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
