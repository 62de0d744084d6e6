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

//! Output file naming and writing.
//!
//! A run on `<dir>/<instance>.in` produces `<instance>_<Alg>_<cutoff>.sol`
//! and `.trace`, where `<Alg>` is the short selector and `<cutoff>` is the
//! cutoff in seconds (`inf` when unlimited). Randomized algorithms append
//! `_<seed>`. The solution file is only written for a verified cover, so an
//! infeasible run leaves no `.sol` behind; the trace is always written.

use crate::{config::Algorithm, error::SolverError, solver::RunReport};
use canopy_model::instance::Instance;
use log::{debug, info};
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    time::Duration,
};

/// Formats a cutoff for file names: whole seconds without a fraction,
/// otherwise the shortest decimal representation.
pub fn format_cutoff(cutoff: Option<Duration>) -> String {
    match cutoff {
        None => "inf".to_string(),
        Some(cutoff) if cutoff.subsec_nanos() == 0 => cutoff.as_secs().to_string(),
        Some(cutoff) => cutoff.as_secs_f64().to_string(),
    }
}

/// `<instance>_<Alg>_<cutoff>[_<seed>]`.
pub fn output_stem<P: AsRef<Path>>(
    instance_path: P,
    algorithm: Algorithm,
    cutoff: Option<Duration>,
    seed: Option<u64>,
) -> String {
    let instance = instance_path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instance".to_string());
    let mut stem = format!(
        "{}_{}_{}",
        instance,
        algorithm.short_name(),
        format_cutoff(cutoff)
    );
    if algorithm.is_randomized()
        && let Some(seed) = seed
    {
        stem.push_str(&format!("_{}", seed));
    }
    stem
}

/// Where a run's files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub solution: PathBuf,
    pub trace: PathBuf,
}

impl OutputPaths {
    pub fn new<D: AsRef<Path>, P: AsRef<Path>>(
        output_dir: D,
        instance_path: P,
        report: &RunReport,
    ) -> Self {
        let stem = output_stem(
            instance_path,
            report.algorithm(),
            report.cutoff(),
            report.seed(),
        );
        let dir = output_dir.as_ref();
        Self {
            solution: dir.join(format!("{}.sol", stem)),
            trace: dir.join(format!("{}.trace", stem)),
        }
    }
}

/// What `write_outputs` actually created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    /// `None` when the run has no cover.
    pub solution: Option<PathBuf>,
    pub trace: PathBuf,
}

/// Writes the solution and trace files of `report` into `output_dir`.
pub fn write_outputs<D: AsRef<Path>, P: AsRef<Path>>(
    output_dir: D,
    instance_path: P,
    instance: &Instance,
    report: &RunReport,
    trace_precision: usize,
) -> Result<WrittenOutputs, SolverError> {
    let paths = OutputPaths::new(output_dir, instance_path, report);

    let solution = match report.cover() {
        Some(cover) => {
            cover.write_to_path(instance, &paths.solution)?;
            info!("wrote solution to {:?}", paths.solution);
            Some(paths.solution)
        }
        None => {
            info!("no cover to write for {}", report.algorithm());
            None
        }
    };

    let file = File::create(&paths.trace)?;
    report
        .trace()
        .write_to(BufWriter::new(file), trace_precision)?;
    debug!(
        "wrote {} trace event(s) to {:?}",
        report.trace().len(),
        paths.trace
    );

    Ok(WrittenOutputs {
        solution,
        trace: paths.trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SolverConfig, solver::Solver};
    use canopy_model::instance::InstanceBuilder;
    use std::fs;

    #[test]
    fn test_cutoff_formatting() {
        assert_eq!(format_cutoff(None), "inf");
        assert_eq!(format_cutoff(Some(Duration::from_secs(600))), "600");
        assert_eq!(format_cutoff(Some(Duration::from_millis(2500))), "2.5");
    }

    #[test]
    fn test_stem_includes_seed_only_for_local_search() {
        let cutoff = Some(Duration::from_secs(10));
        assert_eq!(
            output_stem("data/large3.in", Algorithm::BranchAndBound, cutoff, None),
            "large3_BnB_10"
        );
        assert_eq!(
            output_stem("large3.in", Algorithm::Greedy, cutoff, Some(4)),
            "large3_Approx_10"
        );
        assert_eq!(
            output_stem("large3.in", Algorithm::SimulatedAnnealing, cutoff, Some(4)),
            "large3_LS2_10_4"
        );
    }

    #[test]
    fn test_writes_solution_and_trace() {
        let tmp = tempfile::tempdir().unwrap();
        let instance = InstanceBuilder::new(5)
            .with_subset([1, 2, 3])
            .with_subset([2, 4])
            .with_subset([3, 4, 5])
            .with_subset([4, 5])
            .build();
        let config = SolverConfig::builder()
            .algorithm(Algorithm::BranchAndBound)
            .cutoff(Duration::from_secs(5))
            .build()
            .unwrap();
        let report = Solver::new(config).solve(&instance);

        let written =
            write_outputs(tmp.path(), "small1.in", &instance, &report, 4).unwrap();
        let solution = written.solution.expect("optimal cover is written");
        assert_eq!(solution, tmp.path().join("small1_BnB_5.sol"));
        assert_eq!(fs::read_to_string(solution).unwrap(), "2\n1 3\n");

        assert_eq!(written.trace, tmp.path().join("small1_BnB_5.trace"));
        // The greedy warm start is already optimal, so the trace is its bound at time zero.
        assert_eq!(fs::read_to_string(&written.trace).unwrap(), "0.0000 2\n");
    }

    #[test]
    fn test_infeasible_run_writes_no_solution() {
        let tmp = tempfile::tempdir().unwrap();
        let instance = InstanceBuilder::new(3).build();
        for algorithm in Algorithm::ALL {
            let config = SolverConfig::builder()
                .algorithm(algorithm)
                .seed(1)
                .cutoff(Duration::from_secs(1))
                .build()
                .unwrap();
            let report = Solver::new(config).solve(&instance);
            let written = write_outputs(tmp.path(), "none.in", &instance, &report, 4).unwrap();

            assert!(written.solution.is_none());
            assert!(written.trace.exists());
        }
        assert!(
            fs::read_dir(tmp.path())
                .unwrap()
                .all(|entry| entry.unwrap().path().extension().unwrap() == "trace")
        );
    }
}
