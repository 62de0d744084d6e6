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

use canopy_ls::{
    engine::{LocalSearchEngine, LocalSearchParams},
    meta::{
        hill_climbing::HillClimbing, metaheuristic::Metaheuristic,
        simulated_annealing::SimulatedAnnealing,
    },
    monitor::no_op::NoOperationLocalSearchMonitor,
    result::LocalSearchOutcome,
};
use canopy_model::instance::{Instance, InstanceBuilder};
use canopy_search::greedy::GreedyConstructor;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn build(n: usize, subsets: &[Vec<usize>]) -> Instance {
    let mut builder = InstanceBuilder::new(n);
    for s in subsets {
        builder.add_subset(s.iter().copied());
    }
    builder.build()
}

fn random_instance() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
    (1usize..=20, 0usize..=15).prop_flat_map(|(n, m)| {
        (
            Just(n),
            prop::collection::vec(prop::collection::vec(1..=n, 0..=n), m),
        )
    })
}

fn run(
    instance: &Instance,
    metaheuristic: &mut dyn Metaheuristic,
    seed: u64,
) -> LocalSearchOutcome {
    let engine = LocalSearchEngine::with_params(LocalSearchParams {
        stagnation_limit: 300,
        snapshot_interval: 25,
    });
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    engine.solve(
        instance,
        metaheuristic,
        &mut NoOperationLocalSearchMonitor::new(),
        &mut rng,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_hill_climbing_never_worse_than_greedy(
        (n, subsets) in random_instance(),
        seed in any::<u64>(),
    ) {
        let instance = build(n, &subsets);
        let outcome = run(&instance, &mut HillClimbing::new(), seed);

        match GreedyConstructor::new().construct(&instance) {
            Ok(greedy) => {
                let cover = outcome.cover().expect("coverable instance yields a cover");
                prop_assert!(cover.covers(&instance));
                prop_assert!(cover.size() <= greedy.size());
                prop_assert!(!outcome.fallback_substituted());
            }
            Err(_) => prop_assert!(outcome.result().is_infeasible()),
        }
        prop_assert!(outcome.trace().is_well_formed());
    }

    #[test]
    fn test_simulated_annealing_returns_valid_cover(
        (n, subsets) in random_instance(),
        seed in any::<u64>(),
    ) {
        let instance = build(n, &subsets);
        let outcome = run(&instance, &mut SimulatedAnnealing::default(), seed);

        if instance.is_coverable() {
            let cover = outcome.cover().expect("coverable instance yields a cover");
            prop_assert!(cover.covers(&instance));
            prop_assert_eq!(outcome.trace().final_size(), Some(cover.size()));
        } else {
            prop_assert!(outcome.result().is_infeasible());
            prop_assert!(outcome.trace().is_empty());
        }
        prop_assert!(outcome.trace().is_well_formed());
    }

    #[test]
    fn test_same_seed_same_trajectory(
        (n, subsets) in random_instance(),
        seed in any::<u64>(),
    ) {
        let instance = build(n, &subsets);
        let first = run(&instance, &mut SimulatedAnnealing::default(), seed);
        let second = run(&instance, &mut SimulatedAnnealing::default(), seed);

        prop_assert_eq!(first.cover(), second.cover());
        prop_assert_eq!(first.statistics().iterations, second.statistics().iterations);
        prop_assert_eq!(
            first.statistics().accepted_moves,
            second.statistics().accepted_moves
        );
        prop_assert_eq!(first.termination_reason(), second.termination_reason());
    }
}
