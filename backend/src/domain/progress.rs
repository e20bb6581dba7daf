//! Progress reporting for the long-running capture stages.
//!
//! Extraction and synthesis report percentages through a [`ProgressSink`].
//! The [`ProgressTracker`] sits between an engine and the sink and enforces
//! the stage contract: values are clamped to 0..=100, never regress, and
//! 100 is emitted exactly once, at completion.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Receiver for stage progress updates.
///
/// Implementations must be cheap; engines call this from the middle of
/// their work loops.
pub trait ProgressSink: Send + Sync {
    /// Observe a progress value in 0..=100.
    fn report(&self, percent: u8);
}

/// No-op sink for callers that do not observe progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardProgress;

impl ProgressSink for DiscardProgress {
    fn report(&self, _percent: u8) {}
}

/// Enforces monotonic non-decreasing progress with a single completion emit.
pub struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    last: AtomicU8,
    completed: AtomicBool,
}

impl<'a> ProgressTracker<'a> {
    /// Wrap a sink in a tracker starting at zero.
    #[must_use]
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            last: AtomicU8::new(0),
            completed: AtomicBool::new(false),
        }
    }

    /// Observe an engine-reported value.
    ///
    /// Values above 100 are clamped; values at or below the last observed
    /// value are dropped so downstream observers only ever see a
    /// non-decreasing sequence. 100 is reserved for [`Self::complete`].
    pub fn update(&self, percent: u8) {
        let clamped = percent.min(99);
        let previous = self.last.fetch_max(clamped, Ordering::AcqRel);
        if clamped > previous && !self.completed.load(Ordering::Acquire) {
            self.sink.report(clamped);
        }
    }

    /// Mark the stage complete, emitting exactly one 100.
    pub fn complete(&self) {
        if !self.completed.swap(true, Ordering::AcqRel) {
            self.last.store(100, Ordering::Release);
            self.sink.report(100);
        }
    }

    /// The last value handed to the sink.
    #[must_use]
    pub fn last(&self) -> u8 {
        self.last.load(Ordering::Acquire)
    }
}

/// Engines receive the tracker as a plain sink; reports route through
/// [`ProgressTracker::update`], keeping the monotonic contract out of
/// engine code.
impl ProgressSink for ProgressTracker<'_> {
    fn report(&self, percent: u8) {
        self.update(percent);
    }
}
