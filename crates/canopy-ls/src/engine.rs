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

//! The local search loop.
//!
//! Each iteration polls the monitor, checks the stagnation counter, draws a
//! swap-2-out/1-in move, applies it, and asks the metaheuristic whether to
//! keep it. Rejected moves are undone in place. The best complete cover is
//! tracked independently of the current one, every strict improvement is
//! recorded in the trace, and every `snapshot_interval` iterations the best
//! size is recorded again so the trace has an even time resolution.
//!
//! If the run ends without ever holding a complete cover, the greedy cover
//! is returned instead and the outcome is flagged `fallback_substituted`.

use crate::{
    eval::Evaluation,
    meta::metaheuristic::{Metaheuristic, Verdict},
    monitor::local_search_monitor::LocalSearchMonitor,
    neighborhood::SwapTwoOutOneIn,
    result::{LocalSearchOutcome, LocalSearchTerminationReason},
    state::CoverState,
    stats::LocalSearchStatistics,
};
use canopy_model::{instance::Instance, solution::Cover};
use canopy_search::{
    greedy::GreedyConstructor, monitor::search_monitor::SearchCommand, trace::TraceRecorder,
};
use log::{debug, info, warn};
use rand::Rng;
use std::time::Instant;

/// Loop limits of a `LocalSearchEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalSearchParams {
    /// Consecutive iterations without progress before the run stops.
    pub stagnation_limit: u64,
    /// Iterations between periodic trace snapshots. Zero disables them.
    pub snapshot_interval: u64,
}

impl Default for LocalSearchParams {
    fn default() -> Self {
        Self {
            stagnation_limit: 10_000,
            snapshot_interval: 100,
        }
    }
}

/// Local search engine for minimum set cover.
///
/// The engine owns the neighborhood and the loop limits; the metaheuristic,
/// the monitor and the random number generator are passed to every run, so
/// one engine can serve any number of independent runs.
#[derive(Debug, Clone, Default)]
pub struct LocalSearchEngine {
    /// Move generator, stateless.
    neighborhood: SwapTwoOutOneIn,
    /// Stagnation limit and snapshot interval.
    params: LocalSearchParams,
}

impl LocalSearchEngine {
    /// Creates an engine with the default `LocalSearchParams`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given loop limits.
    #[inline]
    pub fn with_params(params: LocalSearchParams) -> Self {
        Self {
            neighborhood: SwapTwoOutOneIn::new(),
            params,
        }
    }

    #[inline]
    pub fn params(&self) -> &LocalSearchParams {
        &self.params
    }

    /// Runs from the greedy cover. Returns an infeasible outcome without
    /// searching if the instance has no cover.
    ///
    /// `monitor.on_start` is called before the greedy cover is built, so a
    /// monitor-enforced cutoff and the reported total time both include it.
    ///
    /// # Parameters:
    /// - `instance`: The instance to cover.
    /// - `metaheuristic`: Decides whether a candidate replaces the current cover.
    /// - `monitor`: Observes the run and may stop it.
    /// - `rng`: Source of all random choices. A seeded generator makes the run
    ///   reproducible.
    pub fn solve<H, M, R>(
        &self,
        instance: &Instance,
        metaheuristic: &mut H,
        monitor: &mut M,
        rng: &mut R,
    ) -> LocalSearchOutcome
    where
        H: Metaheuristic + ?Sized,
        M: LocalSearchMonitor + ?Sized,
        R: Rng,
    {
        monitor.on_start(instance);
        let start_time = Instant::now();

        match GreedyConstructor::new().construct(instance) {
            Ok(initial) => self.search(instance, &initial, metaheuristic, monitor, rng, start_time),
            Err(err) => {
                info!("local search skipped: {}", err);
                let mut statistics = LocalSearchStatistics::default();
                statistics.set_total_time(start_time.elapsed());
                monitor.on_end(None, &statistics);
                LocalSearchOutcome::infeasible(statistics)
            }
        }
    }

    /// Runs from an arbitrary starting cover, which need not be complete.
    ///
    /// If the run never holds a complete cover, the greedy cover is
    /// substituted and the outcome reports `fallback_substituted`.
    /// Indices in `initial` that are not subsets of `instance` are skipped.
    pub fn run<H, M, R>(
        &self,
        instance: &Instance,
        initial: &Cover,
        metaheuristic: &mut H,
        monitor: &mut M,
        rng: &mut R,
    ) -> LocalSearchOutcome
    where
        H: Metaheuristic + ?Sized,
        M: LocalSearchMonitor + ?Sized,
        R: Rng,
    {
        monitor.on_start(instance);
        let start_time = Instant::now();
        self.search(instance, initial, metaheuristic, monitor, rng, start_time)
    }

    /// The search loop shared by `solve` and `run`. `start_time` is the
    /// instant the monitor was started.
    fn search<H, M, R>(
        &self,
        instance: &Instance,
        initial: &Cover,
        metaheuristic: &mut H,
        monitor: &mut M,
        rng: &mut R,
        start_time: Instant,
    ) -> LocalSearchOutcome
    where
        H: Metaheuristic + ?Sized,
        M: LocalSearchMonitor + ?Sized,
        R: Rng,
    {
        let mut statistics = LocalSearchStatistics::default();
        let mut state = CoverState::from_cover(instance, initial);

        let mut best = state.is_complete().then(|| state.to_cover());
        let mut trace = match &best {
            Some(cover) => TraceRecorder::with_initial(cover.size()),
            None => TraceRecorder::new(),
        };
        let mut stagnation: u64 = 0;

        info!(
            "{} starting from {}",
            metaheuristic.name(),
            state.evaluation()
        );
        metaheuristic.on_start(&state.evaluation());
        if let Some(cover) = &best {
            monitor.on_new_best(cover, &statistics);
        }

        let termination_reason = loop {
            if let SearchCommand::Terminate(reason) = monitor.search_command(&statistics) {
                break LocalSearchTerminationReason::Aborted(reason);
            }
            if stagnation >= self.params.stagnation_limit {
                break LocalSearchTerminationReason::Stagnation;
            }

            let Some(mv) = self
                .neighborhood
                .propose(&state, instance.num_subsets(), rng)
            else {
                break LocalSearchTerminationReason::NeighborhoodExhausted;
            };
            statistics.on_iteration();

            let current = state.evaluation();
            mv.apply(instance, &mut state);
            let candidate = state.evaluation();

            match metaheuristic.evaluate(&current, &candidate, rng) {
                Verdict::Accept { progress } => {
                    stagnation = if progress { 0 } else { stagnation + 1 };
                    statistics.on_accepted_move();
                    metaheuristic.on_accept(&candidate);
                    monitor.on_move_accepted(&candidate, &statistics);
                }
                Verdict::Reject => {
                    mv.undo(instance, &mut state);
                    stagnation += 1;
                    statistics.on_rejected_move();
                    metaheuristic.on_reject(&candidate);
                    monitor.on_move_rejected(&candidate, &statistics);
                }
            }

            if state.is_complete() && best.as_ref().is_none_or(|b| state.len() < b.size()) {
                let cover = state.to_cover();
                debug!("new best cover of size {}", cover.size());
                trace.record_improvement(start_time.elapsed().as_secs_f64(), cover.size());
                statistics.on_improvement();
                stagnation = 0;
                metaheuristic.on_new_best(&cover);
                monitor.on_new_best(&cover, &statistics);
                best = Some(cover);
            }

            if self.params.snapshot_interval > 0
                && statistics.iterations % self.params.snapshot_interval == 0
                && let Some(cover) = &best
            {
                trace.record_snapshot(start_time.elapsed().as_secs_f64(), cover.size());
            }

            metaheuristic.on_iteration_end();
            monitor.on_iteration(&state.evaluation(), &statistics);
        };

        let (best, fallback_substituted) = match best {
            Some(cover) => (cover, false),
            None => match GreedyConstructor::new().construct(instance) {
                Ok(cover) => {
                    warn!(
                        "{} never held a complete cover; substituting the greedy cover of size {}",
                        metaheuristic.name(),
                        cover.size()
                    );
                    trace.record_improvement(start_time.elapsed().as_secs_f64(), cover.size());
                    (cover, true)
                }
                Err(err) => {
                    info!("local search found no cover: {}", err);
                    statistics.set_total_time(start_time.elapsed());
                    monitor.on_end(None, &statistics);
                    return LocalSearchOutcome::infeasible(statistics);
                }
            },
        };

        statistics.set_total_time(start_time.elapsed());
        debug_assert!(best.covers(instance));
        info!(
            "{} finished ({}) with a cover of size {}",
            metaheuristic.name(),
            termination_reason,
            best.size()
        );
        monitor.on_end(Some(&best), &statistics);

        LocalSearchOutcome::feasible(
            best,
            termination_reason,
            statistics,
            trace.finish(),
            fallback_substituted,
        )
    }
}

/// The evaluation the engine would start from for `cover`.
pub fn evaluate_cover(instance: &Instance, cover: &Cover) -> Evaluation {
    CoverState::from_cover(instance, cover).evaluation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        meta::{
            hill_climbing::HillClimbing,
            simulated_annealing::{SimulatedAnnealing, SimulatedAnnealingParams},
        },
        monitor::{no_op::NoOperationLocalSearchMonitor, time::TimeLimitLocalSearchMonitor},
    };
    use canopy_model::{index::SubsetIndex, instance::InstanceBuilder};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

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

    fn small_params() -> LocalSearchParams {
        LocalSearchParams {
            stagnation_limit: 500,
            snapshot_interval: 10,
        }
    }

    fn one_based(outcome: &LocalSearchOutcome) -> Vec<usize> {
        outcome
            .cover()
            .expect("outcome has a cover")
            .one_based()
            .collect()
    }

    #[test]
    fn test_hill_climbing_five_element() {
        init_logger();
        let instance = five_element();
        let engine = LocalSearchEngine::with_params(small_params());
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outcome = engine.solve(
            &instance,
            &mut HillClimbing::new(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );

        assert!(outcome.result().is_feasible());
        assert_eq!(one_based(&outcome), vec![1, 3]);
        assert!(!outcome.fallback_substituted());
        assert!(outcome.trace().is_well_formed());
        assert_eq!(outcome.trace().final_size(), Some(2));
    }

    #[test]
    fn test_simulated_annealing_five_element() {
        init_logger();
        let instance = five_element();
        let engine = LocalSearchEngine::with_params(small_params());
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outcome = engine.solve(
            &instance,
            &mut SimulatedAnnealing::default(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );

        let cover = outcome.cover().expect("coverable instance");
        assert!(cover.covers(&instance));
        assert_eq!(cover.size(), 2);
        assert!(outcome.trace().is_well_formed());
    }

    #[test]
    fn test_hill_climbing_improves_redundant_start() {
        let instance = five_element();
        let all = Cover::new(instance.subset_indices());
        let engine = LocalSearchEngine::with_params(small_params());
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let outcome = engine.run(
            &instance,
            &all,
            &mut HillClimbing::new(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );

        let trace = outcome.trace();
        assert_eq!(trace.events()[0].best_size(), 4);
        assert_eq!(trace.final_size(), Some(2));
        assert!(outcome.statistics().improvements >= 1);
        assert!(outcome.cover().unwrap().covers(&instance));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let instance = InstanceBuilder::new(8)
            .with_subset([1, 2, 3])
            .with_subset([3, 4, 5])
            .with_subset([5, 6, 7])
            .with_subset([7, 8, 1])
            .with_subset([2, 4, 6, 8])
            .with_subset([1, 5])
            .build();
        let all = Cover::new(instance.subset_indices());
        let engine = LocalSearchEngine::with_params(small_params());
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcome = engine.run(
                &instance,
                &all,
                &mut SimulatedAnnealing::default(),
                &mut NoOperationLocalSearchMonitor::new(),
                &mut rng,
            );
            (
                outcome.cover().cloned(),
                outcome.statistics().iterations,
                outcome.statistics().accepted_moves,
            )
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_infeasible_instance() {
        let instance = InstanceBuilder::new(3).build();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcome = LocalSearchEngine::new().solve(
            &instance,
            &mut HillClimbing::new(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );
        assert!(outcome.result().is_infeasible());
        assert_eq!(
            outcome.termination_reason(),
            &LocalSearchTerminationReason::Infeasible
        );
        assert!(outcome.trace().is_empty());
    }

    #[test]
    fn test_single_subset_cover_has_no_neighborhood() {
        let instance = InstanceBuilder::new(2).with_subset([1, 2]).build();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcome = LocalSearchEngine::new().solve(
            &instance,
            &mut HillClimbing::new(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );
        assert_eq!(
            outcome.termination_reason(),
            &LocalSearchTerminationReason::NeighborhoodExhausted
        );
        assert_eq!(one_based(&outcome), vec![1]);
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_incomplete_start_falls_back_to_greedy() {
        let instance = five_element();
        // {2, 4} misses elements 1 and 3; every move drops to one subset.
        let start = Cover::new([SubsetIndex::new(1), SubsetIndex::new(3)]);
        assert!(!evaluate_cover(&instance, &start).is_complete());

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = LocalSearchEngine::with_params(small_params()).run(
            &instance,
            &start,
            &mut HillClimbing::new(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );

        assert!(outcome.fallback_substituted());
        assert!(outcome.cover().unwrap().covers(&instance));
        assert_eq!(outcome.trace().len(), 1);
    }

    #[test]
    fn test_zero_cutoff_aborts_before_first_move() {
        let instance = five_element();
        let all = Cover::new(instance.subset_indices());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let params = SimulatedAnnealingParams::default();
        let outcome = LocalSearchEngine::new().run(
            &instance,
            &all,
            &mut SimulatedAnnealing::from_params(&params),
            &mut TimeLimitLocalSearchMonitor::new(Duration::ZERO),
            &mut rng,
        );

        assert!(matches!(
            outcome.termination_reason(),
            LocalSearchTerminationReason::Aborted(_)
        ));
        assert_eq!(outcome.statistics().iterations, 0);
        assert_eq!(outcome.cover().unwrap().size(), 4);
    }

    #[test]
    fn test_hill_climbing_stops_on_stagnation() {
        let instance = five_element();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = LocalSearchEngine::with_params(LocalSearchParams {
            stagnation_limit: 200,
            snapshot_interval: 0,
        })
        .run(
            &instance,
            &Cover::new([SubsetIndex::new(0), SubsetIndex::new(2), SubsetIndex::new(3)]),
            &mut HillClimbing::new(),
            &mut NoOperationLocalSearchMonitor::new(),
            &mut rng,
        );
        // Once at size two every move leaves a single subset and is rejected.
        assert_eq!(
            outcome.termination_reason(),
            &LocalSearchTerminationReason::Stagnation
        );
        let cover = outcome.cover().unwrap();
        assert_eq!(cover.size(), 2);
        assert!(cover.covers(&instance));
        assert!(outcome.trace().events().iter().all(|e| e.best_size() <= 3));
    }

    /// Records the order of monitor events.
    #[derive(Default)]
    struct EventRecorder {
        started_at: Option<Instant>,
        events: Vec<String>,
    }

    impl LocalSearchMonitor for EventRecorder {
        fn name(&self) -> &str {
            "EventRecorder"
        }

        fn on_start(&mut self, _instance: &Instance) {
            self.started_at = Some(Instant::now());
            self.events.push("start".to_string());
        }

        fn on_end(&mut self, _best: Option<&Cover>, _statistics: &LocalSearchStatistics) {
            self.events.push("end".to_string());
        }

        fn on_iteration(&mut self, _current: &Evaluation, _statistics: &LocalSearchStatistics) {
            self.events.push("iteration".to_string());
        }

        fn on_move_accepted(&mut self, _: &Evaluation, _: &LocalSearchStatistics) {}

        fn on_move_rejected(&mut self, _: &Evaluation, _: &LocalSearchStatistics) {}

        fn on_new_best(&mut self, best: &Cover, _statistics: &LocalSearchStatistics) {
            self.events.push(format!("best {}", best.size()));
        }
    }

    /// Many overlapping subsets over a large universe, so the greedy warm
    /// start takes measurable time.
    fn large_instance() -> Instance {
        let n = 20_000;
        let mut builder = InstanceBuilder::new(n);
        for i in 0..4_000 {
            let block = (5 * i + 1)..=(5 * i + 5);
            let scattered = [(i * 7_919) % n + 1, (i * 104_729) % n + 1];
            builder.add_subset(block.chain(scattered));
        }
        builder.build()
    }

    #[test]
    fn test_monitor_started_before_warm_start() {
        init_logger();
        let instance = five_element();
        let mut recorder = EventRecorder::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let engine = LocalSearchEngine::with_params(small_params());
        let outcome = engine.solve(
            &instance,
            &mut HillClimbing::new(),
            &mut recorder,
            &mut rng,
        );
        let since_start = recorder.started_at.expect("monitor was started").elapsed();

        assert_eq!(recorder.events[0], "start");
        assert_eq!(recorder.events[1], "best 2");
        assert_eq!(recorder.events.last().map(String::as_str), Some("end"));
        assert_eq!(outcome.statistics().improvements, 0);
        assert!(since_start >= outcome.statistics().time_total);
    }

    #[test]
    fn test_infeasible_instance_still_starts_and_ends_monitor() {
        let instance = InstanceBuilder::new(2).with_subset([1]).build();
        let mut recorder = EventRecorder::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcome = LocalSearchEngine::new().solve(
            &instance,
            &mut HillClimbing::new(),
            &mut recorder,
            &mut rng,
        );

        assert!(outcome.result().is_infeasible());
        assert_eq!(recorder.events, vec!["start", "end"]);
    }

    #[test]
    fn test_cutoff_clock_covers_warm_start() {
        init_logger();
        let instance = large_instance();
        let cutoff = Duration::from_millis(50);
        let mut monitor = TimeLimitLocalSearchMonitor::new(cutoff);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let outcome = LocalSearchEngine::new().solve(
            &instance,
            &mut SimulatedAnnealing::default(),
            &mut monitor,
            &mut rng,
        );

        assert!(monitor.elapsed() >= outcome.statistics().time_total);
        assert!(outcome.cover().unwrap().covers(&instance));
        let slack = cutoff + Duration::from_secs(30);
        assert!(outcome.statistics().time_total < slack);
    }
}
