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

use canopy_bnb::{
    bnb::{BnbSolver, PruneRule},
    monitor::no_op::NoOperationMonitor,
};
use canopy_model::{
    index::SubsetIndex,
    instance::{Instance, InstanceBuilder},
    solution::Cover,
};
use canopy_search::{greedy::GreedyConstructor, result::SolverResult};
use proptest::prelude::*;

fn build(n: usize, subsets: &[Vec<usize>]) -> Instance {
    let mut builder = InstanceBuilder::new(n);
    for s in subsets {
        builder.add_subset(s.iter().copied());
    }
    builder.build()
}

/// Enumerates every subset selection and returns the smallest cover, ties
/// broken by the sorted index tuple.
fn brute_force(instance: &Instance) -> Option<Cover> {
    let m = instance.num_subsets();
    (0u32..(1u32 << m))
        .map(|bits| {
            (0..m)
                .filter(|i| bits & (1 << i) != 0)
                .map(SubsetIndex::new)
                .collect::<Cover>()
        })
        .filter(|cover| cover.covers(instance))
        .min_by(|a, b| a.size().cmp(&b.size()).then_with(|| a.cmp(b)))
}

fn solve(instance: &Instance, solver: BnbSolver) -> SolverResult {
    solver
        .solve(instance, &mut NoOperationMonitor::new())
        .result()
        .clone()
}

fn small_instance() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
    (1usize..=12, 0usize..=9).prop_flat_map(|(n, m)| {
        (
            Just(n),
            prop::collection::vec(prop::collection::vec(1..=n, 0..=n), m),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_matches_brute_force_optimum((n, subsets) in small_instance()) {
        let instance = build(n, &subsets);
        let expected = brute_force(&instance);
        let result = solve(&instance, BnbSolver::new());

        match expected {
            None => prop_assert_eq!(result, SolverResult::Infeasible),
            Some(best) => {
                prop_assert_eq!(result, SolverResult::Optimal(best));
            }
        }
    }

    #[test]
    fn test_bound_pruning_is_sound((n, subsets) in small_instance()) {
        let instance = build(n, &subsets);
        let with_bound = solve(&instance, BnbSolver::new());
        let without_bound = solve(&instance, BnbSolver::new().with_bound_pruning(false));
        let non_improving = solve(
            &instance,
            BnbSolver::new().with_prune_rule(PruneRule::NonImproving),
        );

        let size = |r: &SolverResult| r.cover().map(Cover::size);
        prop_assert_eq!(size(&with_bound), size(&without_bound));
        prop_assert_eq!(size(&with_bound), size(&non_improving));
        prop_assert_eq!(with_bound.is_infeasible(), non_improving.is_infeasible());
    }

    #[test]
    fn test_optimum_never_exceeds_greedy((n, subsets) in small_instance()) {
        let instance = build(n, &subsets);
        let greedy = GreedyConstructor::new().construct(&instance);
        let outcome = BnbSolver::new().solve(&instance, &mut NoOperationMonitor::new());

        prop_assert!(outcome.trace().is_well_formed());
        match (greedy, outcome.result().cover()) {
            (Ok(greedy), Some(optimal)) => {
                prop_assert!(optimal.covers(&instance));
                prop_assert!(optimal.size() <= greedy.size());
                prop_assert!(greedy.size() <= instance.num_subsets());
                prop_assert_eq!(outcome.trace().final_size(), Some(optimal.size()));
            }
            (Err(_), None) => prop_assert!(outcome.result().is_infeasible()),
            (greedy, cover) => {
                prop_assert!(false, "greedy {:?} disagrees with {:?}", greedy, cover)
            }
        }
    }
}
