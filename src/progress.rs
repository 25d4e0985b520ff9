//! Progress shared between interrupt context and the main context.
//!
//! The sampler is the single writer. Everything else only loads. Only plain
//! atomic loads and stores are used, so this works on cores without
//! compare-and-swap (e.g. Cortex-M0+).

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Point-in-time copy of [`SamplerProgress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressSnapshot {
    /// Accepted events, equal to the last report index
    pub event_count: u32,
    /// Edge delivery enabled
    pub armed: bool,
    /// Disarming failed; the application must stop edge delivery itself
    pub faulted: bool,
    /// Reports the sink could not take
    pub dropped_reports: u32,
}

/// Atomic progress block, typically a `static`.
#[derive(Debug)]
pub struct SamplerProgress {
    event_count: AtomicU32,
    armed: AtomicBool,
    faulted: AtomicBool,
    dropped_reports: AtomicU32,
}

impl SamplerProgress {
    /// Creates a zeroed progress block, usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            event_count: AtomicU32::new(0),
            armed: AtomicBool::new(false),
            faulted: AtomicBool::new(false),
            dropped_reports: AtomicU32::new(0),
        }
    }

    /// Number of accepted events so far.
    pub fn event_count(&self) -> u32 {
        self.event_count.load(Ordering::Acquire)
    }

    /// True while edge events are being delivered to the sampler.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// True once disarming the trigger has failed.
    pub fn is_faulted(&self) -> bool {
        self.faulted.load(Ordering::Acquire)
    }

    /// Reports rejected by a full sink.
    pub fn dropped_reports(&self) -> u32 {
        self.dropped_reports.load(Ordering::Acquire)
    }

    /// Loads all fields.
    ///
    /// Each field is read atomically on its own, but a snapshot taken while an
    /// edge is being handled may mix values from before and after that edge.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            event_count: self.event_count(),
            armed: self.is_armed(),
            faulted: self.is_faulted(),
            dropped_reports: self.dropped_reports(),
        }
    }

    pub(crate) fn reset(&self) {
        self.event_count.store(0, Ordering::Release);
        self.armed.store(false, Ordering::Release);
        self.faulted.store(false, Ordering::Release);
        self.dropped_reports.store(0, Ordering::Release);
    }

    pub(crate) fn publish_count(&self, count: u32) {
        self.event_count.store(count, Ordering::Release);
    }

    pub(crate) fn publish_armed(&self, armed: bool) {
        self.armed.store(armed, Ordering::Release);
    }

    pub(crate) fn publish_fault(&self) {
        self.armed.store(false, Ordering::Release);
        self.faulted.store(true, Ordering::Release);
    }

    // Single writer, so load-then-store cannot lose an increment.
    pub(crate) fn note_dropped_report(&self) {
        let dropped = self.dropped_reports.load(Ordering::Relaxed);
        self.dropped_reports
            .store(dropped.saturating_add(1), Ordering::Release);
    }
}

impl Default for SamplerProgress {
    fn default() -> Self {
        Self::new()
    }
}
