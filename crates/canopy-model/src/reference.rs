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

//! Reference optima and accuracy metrics.
//!
//! Benchmark instances often ship with a sibling file holding the known
//! optimal cover size: `<base>.out`, or `<base>.sol` when no `.out` exists.
//! Only the first non-empty line is read. A missing reference is not an
//! error; it merely disables accuracy reporting.

use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("I/O error while reading reference optimum: {0}")]
    Io(#[from] std::io::Error),
    #[error("reference file {path:?} does not start with a cover size (found {content:?})")]
    Malformed { path: PathBuf, content: String },
}

/// Returns the reference file belonging to `instance_path`, if one exists.
pub fn locate_reference<P: AsRef<Path>>(instance_path: P) -> Option<PathBuf> {
    let instance_path = instance_path.as_ref();
    ["out", "sol"]
        .iter()
        .map(|ext| instance_path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// Reads the optimum cover size stored in `path`.
pub fn read_reference_optimum<P: AsRef<Path>>(path: P) -> Result<usize, ReferenceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let first = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    first
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| ReferenceError::Malformed {
            path: path.to_path_buf(),
            content: first.to_string(),
        })
}

/// Looks up and reads the reference optimum for `instance_path`.
/// Returns `Ok(None)` if no reference file exists.
pub fn load_reference_optimum<P: AsRef<Path>>(
    instance_path: P,
) -> Result<Option<usize>, ReferenceError> {
    match locate_reference(instance_path) {
        Some(path) => read_reference_optimum(path).map(Some),
        None => Ok(None),
    }
}

/// How far a found cover is from the known optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    found: usize,
    optimum: usize,
}

impl Accuracy {
    #[inline]
    pub fn new(found: usize, optimum: usize) -> Self {
        Self { found, optimum }
    }

    #[inline]
    pub fn found(&self) -> usize {
        self.found
    }

    #[inline]
    pub fn optimum(&self) -> usize {
        self.optimum
    }

    /// `(found - optimum) / optimum`. Zero when both are zero, infinite when
    /// only the optimum is zero.
    pub fn relative_error(&self) -> f64 {
        if self.optimum == 0 {
            return if self.found == 0 { 0.0 } else { f64::INFINITY };
        }
        (self.found as f64 - self.optimum as f64) / self.optimum as f64
    }

    /// `found / optimum`, with the same conventions as `relative_error`.
    pub fn approximation_ratio(&self) -> f64 {
        if self.optimum == 0 {
            return if self.found == 0 { 1.0 } else { f64::INFINITY };
        }
        self.found as f64 / self.optimum as f64
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.found == self.optimum
    }
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "found {} vs. optimum {} (relative error {:.4}, ratio {:.4})",
            self.found,
            self.optimum,
            self.relative_error(),
            self.approximation_ratio()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_accuracy_metrics() {
        let a = Accuracy::new(12, 10);
        assert!((a.relative_error() - 0.2).abs() < 1e-12);
        assert!((a.approximation_ratio() - 1.2).abs() < 1e-12);
        assert!(!a.is_optimal());
        assert!(Accuracy::new(7, 7).is_optimal());
    }

    #[test]
    fn test_accuracy_zero_optimum() {
        assert_eq!(Accuracy::new(0, 0).relative_error(), 0.0);
        assert_eq!(Accuracy::new(0, 0).approximation_ratio(), 1.0);
        assert!(Accuracy::new(2, 0).relative_error().is_infinite());
        assert!(Accuracy::new(2, 0).approximation_ratio().is_infinite());
    }

    #[test]
    fn test_prefers_out_over_sol() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let instance = dir.join("small1.in");
        fs::write(&instance, "1 1\n1 1\n").unwrap();
        fs::write(dir.join("small1.sol"), "9\n").unwrap();
        fs::write(dir.join("small1.out"), "4\n").unwrap();

        assert_eq!(locate_reference(&instance), Some(dir.join("small1.out")));
        assert_eq!(load_reference_optimum(&instance).unwrap(), Some(4));
    }

    #[test]
    fn test_falls_back_to_sol_and_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let with_sol = dir.join("a.in");
        let without = dir.join("b.in");
        let mut f = fs::File::create(dir.join("a.sol")).unwrap();
        writeln!(f, "\n  3  ").unwrap();

        assert_eq!(load_reference_optimum(&with_sol).unwrap(), Some(3));
        assert_eq!(load_reference_optimum(&without).unwrap(), None);
    }

    #[test]
    fn test_malformed_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let path = dir.join("c.out");
        fs::write(&path, "optimum\n").unwrap();

        let err = read_reference_optimum(&path).unwrap_err();
        assert!(matches!(err, ReferenceError::Malformed { .. }));
    }
}
