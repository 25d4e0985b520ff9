//! Core types shared by the sampler, its reports and its callers.

use crate::DEFAULT_EVENT_LIMIT;

/// Sampler configuration, fixed for the lifetime of a [`SyncSampler`](crate::SyncSampler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Number of edge events accepted before the trigger disarms.
    pub event_limit: u32,
}

impl SamplerConfig {
    /// Creates a configuration with the given event limit.
    #[inline]
    pub const fn new(event_limit: u32) -> Self {
        Self { event_limit }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_LIMIT)
    }
}

/// Result of the sample read for one accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Sample value in `0..=65535`.
    Value(u16),

    /// The sample source could not produce a reading.
    Failed,
}

impl Reading {
    /// Returns the sample value, if the read succeeded.
    #[inline]
    pub fn value(&self) -> Option<u16> {
        match self {
            Reading::Value(v) => Some(*v),
            Reading::Failed => None,
        }
    }
}

/// Whether the indicator pulse for an event was driven correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseStatus {
    /// High then low, both writes succeeded.
    Complete,

    /// At least one indicator write failed during this event.
    Faulted,
}

/// One accepted edge event, handed out of interrupt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    /// Event count after this event was accepted (first event is 1).
    pub index: u32,

    /// Sample taken after the pulse.
    pub reading: Reading,

    /// Indicator pulse outcome.
    pub pulse: PulseStatus,
}

impl SampleReport {
    /// Returns true if both the pulse and the read succeeded.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.pulse == PulseStatus::Complete && matches!(self.reading, Reading::Value(_))
    }
}

/// What a single edge callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The event was counted, pulsed and sampled.
    Accepted(SampleReport),

    /// The limit had been reached; this edge disarmed the trigger and took no sample.
    Disarmed,

    /// The sampler was not armed; nothing happened.
    Ignored,
}
