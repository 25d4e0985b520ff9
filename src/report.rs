//! Non-blocking hand-off of sample reports out of interrupt context.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::types::SampleReport;

/// Destination for sample reports produced inside the edge callback.
///
/// Implementations must never block. A sink that cannot take the report
/// hands it back in `Err`; the sampler then counts it as dropped.
pub trait ReportSink {
    /// Takes the report, or returns it unchanged if there is no room.
    fn try_report(&mut self, report: SampleReport) -> Result<(), SampleReport>;
}

/// Fixed-capacity report queue shared between an interrupt and the main loop.
///
/// Both ends may live in a `static`. Each operation takes a short critical
/// section around the underlying deque.
///
/// # Type Parameters
/// * `N` - Maximum number of reports held before new ones are rejected
pub struct ReportQueue<const N: usize> {
    inner: Mutex<RefCell<Deque<SampleReport, N>>>,
}

impl<const N: usize> ReportQueue<N> {
    /// Creates an empty queue, usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Appends a report, or returns it if the queue is full.
    pub fn enqueue(&self, report: SampleReport) -> Result<(), SampleReport> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push_back(report))
    }

    /// Removes the oldest report.
    pub fn dequeue(&self) -> Option<SampleReport> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop_front())
    }

    /// Number of reports waiting to be dequeued.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    /// Returns true if no reports are waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of reports held at once.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for ReportQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ReportSink for &ReportQueue<N> {
    fn try_report(&mut self, report: SampleReport) -> Result<(), SampleReport> {
        self.enqueue(report)
    }
}
