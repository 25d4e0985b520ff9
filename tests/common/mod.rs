//! Shared test infrastructure for sync-sampler integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use sync_sampler::{
    EdgeOutcome, EdgeTrigger, ReportSink, SampleReport, SampleSource, SamplerConfig,
    SamplerError, SamplerProgress, SyncSampler,
};

// ============================================================================
// Journal
// ============================================================================

/// Everything the mock collaborators observed, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    High,
    Low,
    PinFault,
    Sample(u16),
    SampleFault,
    Report(SampleReport),
    Arm,
    ArmFault,
    Disarm,
    DisarmFault,
    Ack,
}

/// Shared log written by all mocks, plus the simulated interrupt enable bit
pub struct Journal {
    events: RefCell<Vec<Event>>,
    trigger_enabled: Cell<bool>,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            trigger_enabled: Cell::new(false),
        }
    }

    pub fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn count(&self, event: Event) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn count_samples(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Sample(_) | Event::SampleFault))
            .count()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled.get()
    }
}

// ============================================================================
// Mock Indicator Pin
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Mock output pin that records level changes and can fail a chosen `set_high` or `set_low`
pub struct MockPin<'j> {
    journal: &'j Journal,
    high: bool,
    high_calls: usize,
    low_calls: usize,
    fail_high_on: Option<usize>,
    fail_low_on: Option<usize>,
}

impl<'j> MockPin<'j> {
    pub fn new(journal: &'j Journal) -> Self {
        Self {
            journal,
            high: true,
            high_calls: 0,
            low_calls: 0,
            fail_high_on: None,
            fail_low_on: None,
        }
    }

    /// Fail the n-th call to `set_high` (1-based)
    pub fn failing_high_on(mut self, call: usize) -> Self {
        self.fail_high_on = Some(call);
        self
    }

    /// Fail the n-th call to `set_low` (1-based, counting the one made by `SyncSampler::new`)
    pub fn failing_low_on(mut self, call: usize) -> Self {
        self.fail_low_on = Some(call);
        self
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for MockPin<'_> {
    type Error = PinFault;
}

impl OutputPin for MockPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.low_calls += 1;
        if self.fail_low_on == Some(self.low_calls) {
            self.journal.record(Event::PinFault);
            return Err(PinFault);
        }
        self.high = false;
        self.journal.record(Event::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high_calls += 1;
        if self.fail_high_on == Some(self.high_calls) {
            self.journal.record(Event::PinFault);
            return Err(PinFault);
        }
        self.high = true;
        self.journal.record(Event::High);
        Ok(())
    }
}

// ============================================================================
// Mock Sample Source
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionFault;

/// Mock ADC returning `base + n` on the n-th read (0-based), optionally failing one read
pub struct MockSource<'j> {
    journal: &'j Journal,
    base: u16,
    reads: usize,
    fail_on: Option<usize>,
}

impl<'j> MockSource<'j> {
    pub fn new(journal: &'j Journal, base: u16) -> Self {
        Self {
            journal,
            base,
            reads: 0,
            fail_on: None,
        }
    }

    /// Fail the n-th read (1-based)
    pub fn failing_on(mut self, read: usize) -> Self {
        self.fail_on = Some(read);
        self
    }
}

impl SampleSource for MockSource<'_> {
    type Error = ConversionFault;

    fn read_sample(&mut self) -> Result<u16, Self::Error> {
        self.reads += 1;
        if self.fail_on == Some(self.reads) {
            self.journal.record(Event::SampleFault);
            return Err(ConversionFault);
        }
        let value = self.base.wrapping_add((self.reads - 1) as u16);
        self.journal.record(Event::Sample(value));
        Ok(value)
    }
}

// ============================================================================
// Mock Edge Trigger
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerFault;

/// Mock interrupt line; mirrors its enable bit into the journal
pub struct MockTrigger<'j> {
    journal: &'j Journal,
    fail_arm: bool,
    fail_disarm: bool,
}

impl<'j> MockTrigger<'j> {
    pub fn new(journal: &'j Journal) -> Self {
        Self {
            journal,
            fail_arm: false,
            fail_disarm: false,
        }
    }

    pub fn failing_arm(mut self) -> Self {
        self.fail_arm = true;
        self
    }

    pub fn failing_disarm(mut self) -> Self {
        self.fail_disarm = true;
        self
    }
}

impl EdgeTrigger for MockTrigger<'_> {
    type Error = TriggerFault;

    fn arm(&mut self) -> Result<(), Self::Error> {
        if self.fail_arm {
            self.journal.record(Event::ArmFault);
            return Err(TriggerFault);
        }
        self.journal.trigger_enabled.set(true);
        self.journal.record(Event::Arm);
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        if self.fail_disarm {
            self.journal.record(Event::DisarmFault);
            return Err(TriggerFault);
        }
        self.journal.trigger_enabled.set(false);
        self.journal.record(Event::Disarm);
        Ok(())
    }

    fn acknowledge(&mut self) {
        self.journal.record(Event::Ack);
    }
}

// ============================================================================
// Mock Report Sink
// ============================================================================

/// Sink that writes reports into the journal
pub struct JournalSink<'j> {
    journal: &'j Journal,
}

impl<'j> JournalSink<'j> {
    pub fn new(journal: &'j Journal) -> Self {
        Self { journal }
    }
}

impl ReportSink for JournalSink<'_> {
    fn try_report(&mut self, report: SampleReport) -> Result<(), SampleReport> {
        self.journal.record(Event::Report(report));
        Ok(())
    }
}

/// Sink that never accepts anything
pub struct FullSink;

impl ReportSink for FullSink {
    fn try_report(&mut self, report: SampleReport) -> Result<(), SampleReport> {
        Err(report)
    }
}

/// Sink for samplers whose reports a test does not care about
pub struct NullSink;

impl ReportSink for NullSink {
    fn try_report(&mut self, _report: SampleReport) -> Result<(), SampleReport> {
        Ok(())
    }
}

/// Infallible source for tests that do not inspect readings
pub struct ConstSource(pub u16);

impl SampleSource for ConstSource {
    type Error = Infallible;

    fn read_sample(&mut self) -> Result<u16, Self::Error> {
        Ok(self.0)
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub type JournalSampler<'a> =
    SyncSampler<'a, MockPin<'a>, MockSource<'a>, MockTrigger<'a>, JournalSink<'a>>;

/// Build an armed sampler wired entirely to `journal`, with the journal cleared afterwards
pub fn armed_sampler<'a>(
    limit: u32,
    journal: &'a Journal,
    progress: &'a SamplerProgress,
) -> JournalSampler<'a> {
    let mut sampler = SyncSampler::new(
        SamplerConfig::new(limit),
        MockPin::new(journal),
        MockSource::new(journal, 100),
        MockTrigger::new(journal),
        JournalSink::new(journal),
        progress,
    );
    sampler.arm().unwrap();
    journal.clear();
    sampler
}

/// Simulate the interrupt controller: the callback only runs while the line is enabled
pub fn deliver_edge<P, S, T, K>(
    journal: &Journal,
    sampler: &mut SyncSampler<'_, P, S, T, K>,
) -> Option<Result<EdgeOutcome, SamplerError>>
where
    P: OutputPin,
    S: SampleSource,
    T: EdgeTrigger,
    K: ReportSink,
{
    if journal.trigger_enabled() {
        Some(sampler.on_edge())
    } else {
        None
    }
}
