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

//! Instance loader for the set cover text format.
//!
//! The format is line oriented. The header line holds exactly two integers,
//! `n m`: the universe `{1..n}` and the number of subsets. Each of the next
//! `m` lines describes one subset in index order as
//! `<count> <e1> <e2> ... <e_count>`. The count is advisory; the elements
//! actually listed are authoritative and a mismatch is only logged.
//!
//! The loader is forgiving where the data is still meaningful and strict
//! where it is not:
//!
//! - Blank lines and lines starting with `#` before the header are skipped,
//!   and `#` comment lines are skipped between subset lines.
//! - A blank subset line is an empty subset.
//! - A file that ends before `m` subset lines is padded with empty subsets,
//!   keeping indices `1..m` stable; lines after the `m`-th subset are
//!   ignored. Both are logged.
//! - Elements outside `{1..n}` (including zero and negatives) are dropped
//!   by the `InstanceBuilder`.
//! - A header without exactly two tokens, or any token that is not an
//!   integer, is fatal.
//!
//! The loader accepts any `BufRead`, a file path, a raw reader, or a string
//! slice.

use crate::instance::{Instance, InstanceBuilder};
use log::{debug, warn};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};
use thiserror::Error;

/// The error type for the instance loading process.
#[derive(Debug, Error)]
pub enum InstanceLoadError {
    /// The input could not be read (including a missing file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input holds no header line.
    #[error("input contains no header line")]
    EmptyInput,
    /// The header line does not hold exactly two tokens.
    #[error("line {line}: expected header `n m`, found {found} token(s)")]
    MalformedHeader { line: usize, found: usize },
    /// A token could not be parsed as an integer.
    #[error("line {line}: could not parse token {token:?} as an integer")]
    InvalidToken { line: usize, token: String },
    /// The instance has elements no subset contains and the loader was
    /// configured to reject such instances.
    #[error("{count} universe element(s) appear in no subset (first: {first})")]
    Uncoverable { count: usize, first: usize },
    /// The input ended so far short of the declared subset count that
    /// padding with empty subsets is refused.
    #[error("header declares {declared} subsets but the input holds only {found}")]
    MissingSubsets { declared: usize, found: usize },
}

/// Most empty subsets the loader appends when the input ends early.
pub const MAX_PADDED_SUBSETS: usize = 1 << 16;

/// Parses set cover instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader {
    fail_on_uncoverable: bool,
}

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject instances in which some universe element appears in no
    /// subset, instead of loading them with a warning.
    #[inline]
    pub fn fail_on_uncoverable(mut self, yes: bool) -> Self {
        self.fail_on_uncoverable = yes;
        self
    }

    /// Loads an instance from a buffered reader.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, InstanceLoadError> {
        let mut lines = rdr.lines().enumerate().map(|(i, line)| (i + 1, line));

        let (header_line, header) = loop {
            match lines.next() {
                None => return Err(InstanceLoadError::EmptyInput),
                Some((number, line)) => {
                    let line = line?;
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    break (number, trimmed.to_string());
                }
            }
        };

        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(InstanceLoadError::MalformedHeader {
                line: header_line,
                found: tokens.len(),
            });
        }
        let universe_size: usize = parse_token(tokens[0], header_line)?;
        let num_subsets: usize = parse_token(tokens[1], header_line)?;

        let mut builder = InstanceBuilder::with_capacity(universe_size, num_subsets);

        while builder.num_subsets() < num_subsets {
            let Some((number, line)) = lines.next() else {
                let missing = num_subsets - builder.num_subsets();
                if missing > MAX_PADDED_SUBSETS {
                    return Err(InstanceLoadError::MissingSubsets {
                        declared: num_subsets,
                        found: builder.num_subsets(),
                    });
                }
                warn!(
                    "input ended after {} of {} subset lines; padding {} empty subset(s)",
                    builder.num_subsets(),
                    num_subsets,
                    missing
                );
                for _ in 0..missing {
                    builder.add_subset(std::iter::empty::<usize>());
                }
                break;
            };

            let line = line?;
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if trimmed.is_empty() {
                warn!(
                    "line {}: empty line read as empty subset {}",
                    number,
                    builder.num_subsets() + 1
                );
                builder.add_subset(std::iter::empty::<usize>());
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let declared: usize = match tokens.next() {
                Some(token) => parse_token(token, number)?,
                None => 0,
            };
            let elements = tokens
                .map(|token| parse_token::<i64>(token, number))
                .collect::<Result<Vec<_>, _>>()?;

            if declared != elements.len() {
                debug!(
                    "line {}: subset declares {} element(s) but lists {}; using the listed elements",
                    number,
                    declared,
                    elements.len()
                );
            }

            // Non-positive values map to 0, which the builder drops as out of universe.
            builder.add_subset(
                elements
                    .into_iter()
                    .map(|e| usize::try_from(e).unwrap_or(0)),
            );
        }

        let mut trailing = 0usize;
        for (_, line) in lines {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                trailing += 1;
            }
        }
        if trailing > 0 {
            warn!(
                "ignoring {} line(s) after the {} declared subsets",
                trailing, num_subsets
            );
        }

        let instance = builder.build();

        if self.fail_on_uncoverable {
            let uncoverable = instance.uncoverable_elements();
            if let Some(&first) = uncoverable.first() {
                return Err(InstanceLoadError::Uncoverable {
                    count: uncoverable.len(),
                    first,
                });
            }
        }

        Ok(instance)
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, InstanceLoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from any reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, InstanceLoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<Instance, InstanceLoadError> {
        self.from_bufread(s.as_bytes())
    }
}

fn parse_token<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, InstanceLoadError> {
    token.parse::<T>().map_err(|_| InstanceLoadError::InvalidToken {
        line,
        token: token.to_string(),
    })
}
