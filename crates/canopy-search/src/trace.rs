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

//! Convergence traces.
//!
//! A trace is the chronological record of the best-known cover size during
//! a run: a sequence of `(elapsed_seconds, best_size)` events with strictly
//! increasing times and non-increasing sizes. Solvers feed a
//! `TraceRecorder` with two kinds of events:
//!
//! - improvements, recorded whenever the incumbent changes, and
//! - snapshots, recorded periodically by the local search to give analysis
//!   tools a uniform time resolution.
//!
//! The recorder enforces the ordering invariant itself. An improvement whose
//! timestamp does not advance past the previous event is merged into it (the
//! later, smaller size wins); a snapshot that does not advance time carries
//! no information and is dropped. Sizes that would increase are ignored.
//!
//! Times are passed in by the caller so that the recorder stays independent
//! of the clock; solvers use the seconds elapsed since their own start.

use log::debug;
use std::io::Write;

/// One point of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEvent {
    elapsed_seconds: f64,
    best_size: usize,
}

impl TraceEvent {
    #[inline]
    pub fn new(elapsed_seconds: f64, best_size: usize) -> Self {
        Self {
            elapsed_seconds,
            best_size,
        }
    }

    #[inline]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    #[inline]
    pub fn best_size(&self) -> usize {
        self.best_size
    }
}

/// An immutable, well-ordered trace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    #[inline]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The best size at the end of the run.
    #[inline]
    pub fn final_size(&self) -> Option<usize> {
        self.events.last().map(TraceEvent::best_size)
    }

    /// Checks the ordering invariant: strictly increasing times and
    /// non-increasing sizes.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        well_formed(&self.events)
    }

    /// Earliest time at which the best size was `target` or better.
    pub fn time_to_quality(&self, target: usize) -> Option<f64> {
        self.events
            .iter()
            .find(|e| e.best_size <= target)
            .map(TraceEvent::elapsed_seconds)
    }

    /// Best size known at time `seconds`, or `None` before the first event.
    pub fn quality_at(&self, seconds: f64) -> Option<usize> {
        let known = self
            .events
            .partition_point(|e| e.elapsed_seconds <= seconds);
        known.checked_sub(1).map(|i| self.events[i].best_size)
    }

    /// Writes one `"<elapsed> <best_size>"` line per event with `precision`
    /// decimal places. Events whose formatted times coincide collapse into
    /// the last of them, so the written file stays strictly time-ordered.
    ///
    /// The first line always keeps the first event's size. Later events that
    /// format to the first line's time are written one tick (`10^-precision`
    /// seconds) after it instead.
    pub fn write_to<W: Write>(&self, mut writer: W, precision: usize) -> std::io::Result<()> {
        let mut lines: Vec<(String, usize)> = Vec::with_capacity(self.events.len());
        let mut events = self.events.iter();
        if let Some(first) = events.next() {
            let first_time = format!("{:.*}", precision, first.elapsed_seconds);
            let after_first = next_tick(&first_time, precision);
            lines.push((first_time.clone(), first.best_size));

            for event in events {
                let mut time = format!("{:.*}", precision, event.elapsed_seconds);
                if time == first_time {
                    time.clone_from(&after_first);
                }
                match lines.last_mut() {
                    Some((last_time, last_size)) if *last_time == time => {
                        *last_size = event.best_size
                    }
                    _ => lines.push((time, event.best_size)),
                }
            }
        }

        for (time, size) in lines {
            writeln!(writer, "{} {}", time, size)?;
        }
        writer.flush()
    }
}

/// Accumulates trace events during a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    /// Creates a recorder without events. Used when there is no warm start.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder whose first event is the initial upper bound at
    /// time zero.
    #[inline]
    pub fn with_initial(best_size: usize) -> Self {
        Self {
            events: vec![TraceEvent::new(0.0, best_size)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&TraceEvent> {
        self.events.last()
    }

    /// Records a change of the incumbent.
    pub fn record_improvement(&mut self, elapsed_seconds: f64, best_size: usize) {
        let elapsed_seconds = sanitize(elapsed_seconds);
        if let Some(last) = self.events.last_mut() {
            if best_size > last.best_size {
                debug!(
                    "ignoring trace event with size {} after size {}",
                    best_size, last.best_size
                );
                return;
            }
            if elapsed_seconds <= last.elapsed_seconds {
                last.best_size = best_size;
                return;
            }
        }
        self.events
            .push(TraceEvent::new(elapsed_seconds, best_size));
    }

    /// Records a periodic snapshot of the best size.
    pub fn record_snapshot(&mut self, elapsed_seconds: f64, best_size: usize) {
        let elapsed_seconds = sanitize(elapsed_seconds);
        match self.events.last() {
            Some(last) if elapsed_seconds <= last.elapsed_seconds => {}
            Some(last) => {
                let size = best_size.min(last.best_size);
                self.events.push(TraceEvent::new(elapsed_seconds, size));
            }
            None => self
                .events
                .push(TraceEvent::new(elapsed_seconds, best_size)),
        }
    }

    #[inline]
    pub fn finish(self) -> Trace {
        debug_assert!(
            well_formed(&self.events),
            "called `TraceRecorder::finish` on an ill-formed trace"
        );
        Trace {
            events: self.events,
        }
    }
}

fn well_formed(events: &[TraceEvent]) -> bool {
    events.windows(2).all(|w| {
        w[0].elapsed_seconds < w[1].elapsed_seconds && w[0].best_size >= w[1].best_size
    })
}

/// The formatted time one `10^-precision` step after `time`.
fn next_tick(time: &str, precision: usize) -> String {
    let seconds: f64 = time.parse().unwrap_or(0.0);
    let step = 10f64.powi(-(precision.min(i32::MAX as usize) as i32));
    format!("{:.*}", precision, seconds + step)
}

#[inline]
fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(trace: &Trace) -> Vec<usize> {
        trace.events().iter().map(|e| e.best_size()).collect()
    }

    #[test]
    fn test_initial_event_at_zero() {
        let trace = TraceRecorder::with_initial(7).finish();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.events()[0], TraceEvent::new(0.0, 7));
        assert_eq!(trace.final_size(), Some(7));
    }

    #[test]
    fn test_improvements_at_same_time_merge() {
        let mut recorder = TraceRecorder::with_initial(5);
        recorder.record_improvement(0.0, 4);
        recorder.record_improvement(0.5, 3);
        recorder.record_improvement(0.5, 2);

        let trace = recorder.finish();
        assert!(trace.is_well_formed());
        assert_eq!(sizes(&trace), vec![4, 2]);
        assert_eq!(trace.events()[1].elapsed_seconds(), 0.5);
    }

    #[test]
    fn test_increasing_size_is_ignored() {
        let mut recorder = TraceRecorder::with_initial(3);
        recorder.record_improvement(1.0, 4);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_snapshots_require_time_to_advance() {
        let mut recorder = TraceRecorder::with_initial(5);
        recorder.record_snapshot(0.0, 5);
        recorder.record_snapshot(0.25, 5);
        recorder.record_snapshot(0.25, 5);
        recorder.record_improvement(0.3, 4);
        recorder.record_snapshot(0.4, 4);

        let trace = recorder.finish();
        assert!(trace.is_well_formed());
        assert_eq!(sizes(&trace), vec![5, 5, 4, 4]);
    }

    #[test]
    fn test_non_finite_time_is_clamped() {
        let mut recorder = TraceRecorder::new();
        recorder.record_improvement(f64::NAN, 9);
        recorder.record_improvement(-1.0, 8);
        let trace = recorder.finish();
        assert_eq!(trace.events(), &[TraceEvent::new(0.0, 8)]);
    }

    #[test]
    fn test_time_to_quality_and_quality_at() {
        let mut recorder = TraceRecorder::with_initial(10);
        recorder.record_improvement(1.0, 8);
        recorder.record_improvement(2.5, 6);
        let trace = recorder.finish();

        assert_eq!(trace.time_to_quality(10), Some(0.0));
        assert_eq!(trace.time_to_quality(7), Some(2.5));
        assert_eq!(trace.time_to_quality(5), None);

        assert_eq!(trace.quality_at(0.0), Some(10));
        assert_eq!(trace.quality_at(1.7), Some(8));
        assert_eq!(trace.quality_at(99.0), Some(6));
        assert_eq!(TraceRecorder::new().finish().quality_at(1.0), None);
    }

    #[test]
    fn test_writer_uses_fixed_precision() {
        let mut recorder = TraceRecorder::with_initial(4);
        recorder.record_improvement(0.123456, 3);
        let mut out = Vec::new();
        recorder.finish().write_to(&mut out, 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.0000 4\n0.1235 3\n");
    }

    #[test]
    fn test_writer_collapses_equal_formatted_times() {
        let mut recorder = TraceRecorder::with_initial(4);
        recorder.record_improvement(0.001, 3);
        recorder.record_improvement(0.004, 2);
        recorder.record_improvement(0.5, 1);
        let mut out = Vec::new();
        recorder.finish().write_to(&mut out, 2).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.00 4\n0.01 2\n0.50 1\n");
    }

    #[test]
    fn test_writer_keeps_initial_bound_on_first_line() {
        let mut recorder = TraceRecorder::with_initial(5);
        recorder.record_improvement(0.00001, 3);
        let mut out = Vec::new();
        recorder.finish().write_to(&mut out, 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.0000 5\n0.0001 3\n");
    }

    #[test]
    fn test_writer_merges_into_shifted_line() {
        let mut recorder = TraceRecorder::with_initial(6);
        recorder.record_improvement(0.00001, 5);
        recorder.record_improvement(0.00002, 4);
        recorder.record_improvement(0.00012, 3);
        recorder.record_improvement(0.25, 2);
        let mut out = Vec::new();
        recorder.finish().write_to(&mut out, 4).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0.0000 6\n0.0001 3\n0.2500 2\n"
        );
    }
}
