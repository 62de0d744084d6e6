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

use canopy_bnb::{bnb::BnbSolver, monitor::no_op::NoOperationMonitor};
use canopy_model::instance::{Instance, InstanceBuilder};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Random instance in which every element is guaranteed to be coverable.
fn random_instance(n: usize, m: usize, density: f64, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut subsets: Vec<Vec<usize>> = (0..m)
        .map(|_| (1..=n).filter(|_| rng.random_bool(density)).collect())
        .collect();
    for e in 1..=n {
        if !subsets.iter().any(|s| s.contains(&e)) {
            let k = rng.random_range(0..m);
            subsets[k].push(e);
        }
    }

    let mut builder = InstanceBuilder::with_capacity(n, m);
    for s in subsets {
        builder.add_subset(s);
    }
    builder.build()
}

fn bench_bnb(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb");
    for &(n, m) in &[(20, 15), (40, 25), (80, 30)] {
        let instance = random_instance(n, m, 0.2, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n{}_m{}", n, m)),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let outcome = BnbSolver::new()
                        .solve(black_box(instance), &mut NoOperationMonitor::new());
                    black_box(outcome);
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_bnb);
criterion_main!(benches);
