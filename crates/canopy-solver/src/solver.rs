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

//! Running a configured algorithm and reporting the result.

use crate::{
    config::{Algorithm, SolverConfig},
    error::SolverError,
};
use canopy_bnb::{
    bnb::BnbSolver,
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        time::TimeLimitMonitor,
    },
};
use canopy_ls::{
    engine::LocalSearchEngine,
    meta::{
        hill_climbing::HillClimbing, metaheuristic::Metaheuristic,
        simulated_annealing::SimulatedAnnealing,
    },
    monitor::{
        composite::CompositeLocalSearchMonitor, log::LogLocalSearchMonitor,
        time::TimeLimitLocalSearchMonitor,
    },
    result::LocalSearchTerminationReason,
};
use canopy_model::{
    instance::Instance, loading::InstanceLoader, reference::{Accuracy, load_reference_optimum},
    solution::Cover,
};
use canopy_search::{
    greedy::GreedyConstructor,
    result::{SolverResult, TerminationReason},
    trace::{Trace, TraceRecorder},
};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::{
    path::Path,
    time::{Duration, Instant},
};

/// Clock-check mask for the cutoff monitors: the clock is read on every
/// 64th poll.
const CLOCK_CHECK_MASK: u64 = 0x3F;

/// Clock-check mask for the progress log monitors.
const LOG_CLOCK_CHECK_MASK: u64 = 0x0FFF;

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTermination {
    /// The greedy construction finished.
    Constructed,
    Exact(TerminationReason),
    LocalSearch(LocalSearchTerminationReason),
}

impl RunTermination {
    /// Returns `true` if the result is proven (optimal or infeasible).
    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        match self {
            RunTermination::Exact(reason) => reason.is_exhaustive(),
            RunTermination::Constructed | RunTermination::LocalSearch(_) => false,
        }
    }

    /// Returns `true` if the run was stopped by the cutoff.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            RunTermination::Exact(TerminationReason::Aborted(_))
                | RunTermination::LocalSearch(LocalSearchTerminationReason::Aborted(_))
        )
    }
}

impl std::fmt::Display for RunTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunTermination::Constructed => write!(f, "Greedy Construction Complete"),
            RunTermination::Exact(reason) => write!(f, "{}", reason),
            RunTermination::LocalSearch(reason) => write!(f, "{}", reason),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    algorithm: Algorithm,
    seed: Option<u64>,
    cutoff: Option<Duration>,
    result: SolverResult,
    termination: RunTermination,
    trace: Trace,
    fallback_substituted: bool,
    elapsed: Duration,
    accuracy: Option<Accuracy>,
}

impl RunReport {
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The seed the run used; `None` for deterministic algorithms.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn cutoff(&self) -> Option<Duration> {
        self.cutoff
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn cover(&self) -> Option<&Cover> {
        self.result.cover()
    }

    #[inline]
    pub fn termination(&self) -> &RunTermination {
        &self.termination
    }

    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        self.termination.is_exhaustive()
    }

    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Set when local search never held a complete cover and the greedy
    /// cover was reported instead.
    #[inline]
    pub fn fallback_substituted(&self) -> bool {
        self.fallback_substituted
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Comparison with the reference optimum, when one was available.
    #[inline]
    pub fn accuracy(&self) -> Option<&Accuracy> {
        self.accuracy.as_ref()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run Report:")?;
        writeln!(f, "  Algorithm:     {}", self.algorithm)?;
        if let Some(seed) = self.seed {
            writeln!(f, "  Seed:          {}", seed)?;
        }
        writeln!(f, "  Result:        {}", self.result)?;
        writeln!(f, "  Termination:   {}", self.termination)?;
        if self.fallback_substituted {
            writeln!(f, "  Greedy fallback substituted")?;
        }
        if let Some(accuracy) = &self.accuracy {
            writeln!(f, "  Accuracy:      {}", accuracy)?;
        }
        write!(f, "  Elapsed:       {:.3?}", self.elapsed)
    }
}

/// Runs the configured algorithm.
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Loads the instance at `path`, solves it, and compares the result
    /// with the reference optimum stored next to the instance, if any.
    pub fn solve_file<P: AsRef<Path>>(&self, path: P) -> Result<RunReport, SolverError> {
        let path = path.as_ref();
        let instance = InstanceLoader::new().from_path(path)?;
        let mut report = self.solve(&instance);

        match load_reference_optimum(path) {
            Ok(Some(optimum)) => {
                report.accuracy = report
                    .cover()
                    .map(|cover| Accuracy::new(cover.size(), optimum));
            }
            Ok(None) => info!("no reference optimum for {:?}", path),
            Err(err) => warn!("ignoring reference optimum: {}", err),
        }
        Ok(report)
    }

    /// Solves an already loaded instance.
    pub fn solve(&self, instance: &Instance) -> RunReport {
        let start_time = Instant::now();
        let algorithm = self.config.algorithm();
        let drawn_seed = self.config.seed().unwrap_or_else(rand::random::<u64>);
        let seed = algorithm.is_randomized().then_some(drawn_seed);

        info!(
            "solving {} with {} (cutoff: {}, seed: {})",
            instance,
            algorithm,
            self.config
                .cutoff()
                .map_or_else(|| "none".to_string(), |c| format!("{:.3}s", c.as_secs_f64())),
            seed.map_or_else(|| "n/a".to_string(), |s| s.to_string())
        );

        let (result, termination, trace, fallback_substituted) = match algorithm {
            Algorithm::BranchAndBound => self.run_branch_and_bound(instance),
            Algorithm::Greedy => Self::run_greedy(instance, start_time),
            Algorithm::HillClimbing => {
                self.run_local_search(instance, &mut HillClimbing::new(), drawn_seed)
            }
            Algorithm::SimulatedAnnealing => self.run_local_search(
                instance,
                &mut SimulatedAnnealing::from_params(self.config.annealing()),
                drawn_seed,
            ),
        };

        let elapsed = start_time.elapsed();
        info!("{} finished: {} ({})", algorithm, result, termination);

        RunReport {
            algorithm,
            seed,
            cutoff: self.config.cutoff(),
            result,
            termination,
            trace,
            fallback_substituted,
            elapsed,
            accuracy: None,
        }
    }

    fn run_branch_and_bound(
        &self,
        instance: &Instance,
    ) -> (SolverResult, RunTermination, Trace, bool) {
        let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
        if let Some(cutoff) = self.config.cutoff() {
            monitor.add_monitor(TimeLimitMonitor::with_clock_check_mask(
                cutoff,
                CLOCK_CHECK_MASK,
            ));
        }
        monitor.add_monitor(LogTreeSearchMonitor::new(
            self.config.log_interval(),
            LOG_CLOCK_CHECK_MASK,
        ));

        let outcome = BnbSolver::new()
            .with_prune_rule(self.config.prune_rule())
            .solve(instance, &mut monitor);
        let (result, reason, _statistics, trace) = outcome.into_parts();
        (result, RunTermination::Exact(reason), trace, false)
    }

    fn run_greedy(
        instance: &Instance,
        start_time: Instant,
    ) -> (SolverResult, RunTermination, Trace, bool) {
        match GreedyConstructor::new().construct(instance) {
            Ok(cover) => {
                let mut trace = TraceRecorder::new();
                trace.record_improvement(start_time.elapsed().as_secs_f64(), cover.size());
                (
                    SolverResult::Feasible(cover),
                    RunTermination::Constructed,
                    trace.finish(),
                    false,
                )
            }
            Err(err) => {
                info!("greedy construction failed: {}", err);
                (
                    SolverResult::Infeasible,
                    RunTermination::Constructed,
                    Trace::default(),
                    false,
                )
            }
        }
    }

    fn run_local_search(
        &self,
        instance: &Instance,
        metaheuristic: &mut dyn Metaheuristic,
        seed: u64,
    ) -> (SolverResult, RunTermination, Trace, bool) {
        let mut monitor = CompositeLocalSearchMonitor::new();
        if let Some(cutoff) = self.config.cutoff() {
            monitor.add_monitor(TimeLimitLocalSearchMonitor::with_clock_check_mask(
                cutoff,
                CLOCK_CHECK_MASK,
            ));
        }
        monitor.add_monitor(LogLocalSearchMonitor::new(
            self.config.log_interval(),
            LOG_CLOCK_CHECK_MASK,
        ));

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let outcome = LocalSearchEngine::with_params(*self.config.local_search()).solve(
            instance,
            metaheuristic,
            &mut monitor,
            &mut rng,
        );
        if outcome.fallback_substituted() {
            warn!("local search result replaced by the greedy cover");
        }
        let (result, reason, _statistics, trace, fallback) = outcome.into_parts();
        (result, RunTermination::LocalSearch(reason), trace, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_model::instance::InstanceBuilder;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn five_element() -> Instance {
        InstanceBuilder::new(5)
            .with_subset([1, 2, 3])
            .with_subset([2, 4])
            .with_subset([3, 4, 5])
            .with_subset([4, 5])
            .build()
    }

    fn config(algorithm: Algorithm) -> SolverConfig {
        SolverConfig::builder()
            .algorithm(algorithm)
            .cutoff(Duration::from_secs(10))
            .seed(7)
            .stagnation_limit(500)
            .build()
            .unwrap()
    }

    #[test]
    fn test_every_algorithm_finds_the_five_element_optimum() {
        init_logger();
        let instance = five_element();
        for algorithm in Algorithm::ALL {
            let report = Solver::new(config(algorithm)).solve(&instance);
            let cover = report.cover().expect("coverable instance");
            assert!(cover.covers(&instance), "{} returned an invalid cover", algorithm);
            assert_eq!(cover.one_based().collect::<Vec<_>>(), vec![1, 3]);
            assert_eq!(report.trace().final_size(), Some(2));
        }
    }

    #[test]
    fn test_only_exact_search_is_exhaustive() {
        let instance = five_element();
        let exact = Solver::new(config(Algorithm::BranchAndBound)).solve(&instance);
        assert!(exact.is_exhaustive());
        assert!(exact.result().is_optimal());
        assert_eq!(exact.seed(), None);

        let greedy = Solver::new(config(Algorithm::Greedy)).solve(&instance);
        assert!(!greedy.is_exhaustive());
        assert_eq!(greedy.termination(), &RunTermination::Constructed);
        assert_eq!(greedy.trace().len(), 1);
    }

    #[test]
    fn test_seed_is_reported() {
        let instance = five_element();
        let report = Solver::new(config(Algorithm::SimulatedAnnealing)).solve(&instance);
        assert_eq!(report.seed(), Some(7));

        let unseeded = SolverConfig::builder()
            .algorithm(Algorithm::HillClimbing)
            .stagnation_limit(100)
            .build()
            .unwrap();
        assert!(Solver::new(unseeded).solve(&instance).seed().is_some());
    }

    #[test]
    fn test_no_subsets_is_infeasible_for_every_algorithm() {
        init_logger();
        let instance = InstanceBuilder::new(3).build();
        for algorithm in Algorithm::ALL {
            let report = Solver::new(config(algorithm)).solve(&instance);
            assert!(
                report.result().is_infeasible(),
                "{} should report infeasibility",
                algorithm
            );
            assert!(report.cover().is_none());
            assert!(!report.fallback_substituted());
        }
    }

    #[test]
    fn test_zero_cutoff_still_reports_a_cover() {
        let instance = five_element();
        let config = SolverConfig::builder()
            .algorithm(Algorithm::BranchAndBound)
            .cutoff_secs(0.0)
            .unwrap()
            .build()
            .unwrap();
        let report = Solver::new(config).solve(&instance);
        assert!(report.termination().is_aborted());
        assert!(!report.is_exhaustive());
        assert!(report.cover().unwrap().covers(&instance));
    }

    #[test]
    fn test_solve_file_reports_accuracy() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("small.in");
        std::fs::write(&path, "5 4\n3 1 2 3\n2 2 4\n3 3 4 5\n2 4 5\n").unwrap();
        std::fs::write(tmp.path().join("small.out"), "2\n").unwrap();

        let report = Solver::new(config(Algorithm::Greedy))
            .solve_file(&path)
            .unwrap();
        let accuracy = report.accuracy().expect("reference exists");
        assert!(accuracy.is_optimal());
    }

    #[test]
    fn test_solve_file_missing_instance() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Solver::new(config(Algorithm::Greedy))
            .solve_file(tmp.path().join("absent.in"))
            .unwrap_err();
        assert!(matches!(err, SolverError::Load(_)));
    }
}
