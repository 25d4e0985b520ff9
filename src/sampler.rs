//! Edge-synchronized sampler with a bounded event count.
//!
//! Provides [`SyncSampler`], which owns the indicator output, the sample
//! source, the edge trigger and the report sink. Each falling edge delivered
//! to [`SyncSampler::on_edge`] is either accepted (pulse, count, sample,
//! report) or, once the limit has been reached, used to disarm the trigger.

use embedded_hal::digital::OutputPin;

use crate::hardware::{EdgeTrigger, SampleSource};
use crate::progress::SamplerProgress;
use crate::report::ReportSink;
use crate::types::{EdgeOutcome, PulseStatus, Reading, SampleReport, SamplerConfig};

/// The current state of a sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerState {
    /// Constructed, trigger not yet armed. Indicator is low.
    Idle,
    /// Trigger armed; edges are counted and sampled.
    Armed,
    /// Trigger disarmed. Terminal.
    Disarmed,
    /// Disarming the trigger failed. Terminal; sampling is abandoned.
    Faulted,
}

/// Errors that can occur during sampler operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of expected state(s)
        expected: &'static str,
        /// The actual current state
        actual: SamplerState,
    },
    /// The edge trigger could not be armed.
    Trigger,
    /// The edge trigger could not be disarmed. The sampler is now `Faulted`
    /// and the caller must stop the interrupt source some other way.
    DisarmFailed,
}

impl core::fmt::Display for SamplerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SamplerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but sampler is in {:?}",
                    expected, actual
                )
            }
            SamplerError::Trigger => write!(f, "edge trigger could not be armed"),
            SamplerError::DisarmFailed => {
                write!(f, "edge trigger could not be disarmed; sampling aborted")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SamplerError {}

/// Samples an analog source on each falling edge of a sync line, up to a fixed limit.
///
/// Exactly `event_limit` edges are accepted. The edge after that disarms the
/// trigger and takes no sample. The limit check runs at the start of each
/// callback against the count before that edge, so disarming costs one extra
/// edge.
///
/// # Type Parameters
/// * `'p` - Lifetime of the shared progress block
/// * `P` - Indicator output pin
/// * `S` - Sample source
/// * `T` - Edge trigger
/// * `K` - Report sink
pub struct SyncSampler<'p, P, S, T, K>
where
    P: OutputPin,
    S: SampleSource,
    T: EdgeTrigger,
    K: ReportSink,
{
    indicator: P,
    source: S,
    trigger: T,
    sink: K,
    progress: &'p SamplerProgress,
    event_limit: u32,
    event_count: u32,
    state: SamplerState,
}

impl<'p, P, S, T, K> SyncSampler<'p, P, S, T, K>
where
    P: OutputPin,
    S: SampleSource,
    T: EdgeTrigger,
    K: ReportSink,
{
    /// Creates an idle sampler and drives the indicator low.
    ///
    /// Every field of the progress block is reset, so a block reused from an
    /// earlier sampler does not carry over its count, fault or dropped reports.
    pub fn new(
        config: SamplerConfig,
        mut indicator: P,
        source: S,
        trigger: T,
        sink: K,
        progress: &'p SamplerProgress,
    ) -> Self {
        if let Err(_e) = indicator.set_low() {
            #[cfg(feature = "defmt")]
            defmt::warn!("indicator could not be driven low at init");
        }

        progress.reset();

        Self {
            indicator,
            source,
            trigger,
            sink,
            progress,
            event_limit: config.event_limit,
            event_count: 0,
            state: SamplerState::Idle,
        }
    }

    /// Arms the edge trigger.
    ///
    /// Must be called from `Idle` state. A disarmed sampler cannot be re-armed.
    pub fn arm(&mut self) -> Result<(), SamplerError> {
        if self.state != SamplerState::Idle {
            return Err(SamplerError::InvalidState {
                expected: "Idle",
                actual: self.state,
            });
        }

        if let Err(_e) = self.trigger.arm() {
            #[cfg(feature = "defmt")]
            defmt::error!("edge trigger arm failed: {}", defmt::Debug2Format(&_e));
            return Err(SamplerError::Trigger);
        }

        self.state = SamplerState::Armed;
        self.progress.publish_armed(true);
        Ok(())
    }

    /// Disarms the edge trigger permanently.
    ///
    /// This is the same primitive the limit path uses, so it also serves as an
    /// external stop. Calling it on a sampler that is already `Disarmed` does
    /// nothing.
    pub fn disarm(&mut self) -> Result<(), SamplerError> {
        match self.state {
            SamplerState::Disarmed => Ok(()),
            SamplerState::Faulted => Err(SamplerError::DisarmFailed),
            SamplerState::Idle | SamplerState::Armed => {
                if let Err(_e) = self.trigger.disarm() {
                    #[cfg(feature = "defmt")]
                    defmt::error!("edge trigger disarm failed: {}", defmt::Debug2Format(&_e));
                    self.state = SamplerState::Faulted;
                    self.progress.publish_fault();
                    return Err(SamplerError::DisarmFailed);
                }

                self.state = SamplerState::Disarmed;
                self.progress.publish_armed(false);
                Ok(())
            }
        }
    }

    /// Handles one falling edge. Call this from the edge interrupt.
    ///
    /// # Returns
    /// * `Ok(EdgeOutcome::Accepted(report))` - Pulsed, counted and sampled
    /// * `Ok(EdgeOutcome::Disarmed)` - Limit already reached; trigger now disarmed
    /// * `Ok(EdgeOutcome::Ignored)` - Not armed; no effect
    /// * `Err(SamplerError::DisarmFailed)` - Disarm at the limit failed; now `Faulted`
    pub fn on_edge(&mut self) -> Result<EdgeOutcome, SamplerError> {
        self.trigger.acknowledge();

        if self.state != SamplerState::Armed {
            return Ok(EdgeOutcome::Ignored);
        }

        if self.event_count >= self.event_limit {
            self.disarm()?;
            return Ok(EdgeOutcome::Disarmed);
        }

        Ok(EdgeOutcome::Accepted(self.accept()))
    }

    // Pulse start, count, pulse end, sample, report. The order is fixed.
    fn accept(&mut self) -> SampleReport {
        let rose = self.indicator.set_high().is_ok();

        self.event_count += 1;
        self.progress.publish_count(self.event_count);

        // Always attempt to leave the line low.
        let fell = self.indicator.set_low().is_ok();

        let pulse = if rose && fell {
            PulseStatus::Complete
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("indicator pulse faulted on event {}", self.event_count);
            PulseStatus::Faulted
        };

        let reading = match self.source.read_sample() {
            Ok(value) => Reading::Value(value),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "sample read failed on event {}: {}",
                    self.event_count,
                    defmt::Debug2Format(&_e)
                );
                Reading::Failed
            }
        };

        let report = SampleReport {
            index: self.event_count,
            reading,
            pulse,
        };

        if self.sink.try_report(report).is_err() {
            self.progress.note_dropped_report();
        }

        report
    }

    /// Returns the current state of the sampler.
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Returns the number of accepted events.
    pub fn event_count(&self) -> u32 {
        self.event_count
    }

    /// Returns the configured event limit.
    pub fn event_limit(&self) -> u32 {
        self.event_limit
    }

    /// Returns true if the trigger is currently armed.
    pub fn is_armed(&self) -> bool {
        self.state == SamplerState::Armed
    }

    /// Returns how many more events will be accepted.
    pub fn remaining(&self) -> u32 {
        self.event_limit.saturating_sub(self.event_count)
    }

    /// Returns a reference to the indicator output.
    pub fn indicator(&self) -> &P {
        &self.indicator
    }
}
