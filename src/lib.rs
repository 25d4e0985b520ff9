#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SyncSampler`**: Interrupt-driven controller that pulses an indicator and takes one sample per falling edge
//! - **`SamplerConfig`**: Fixed event limit, set once at construction
//! - **`SampleSource`**: Trait to implement for your ADC (single-shot, 16-bit range)
//! - **`EdgeTrigger`**: Trait to implement for your edge interrupt (arm, disarm, acknowledge)
//! - **`ReportSink`** / **`ReportQueue`**: Non-blocking hand-off of sample reports out of interrupt context
//! - **`SamplerProgress`**: Atomic progress block readable from the main context
//! - **`SampleReport`**: One accepted event: index, reading and pulse status
//!
//! The indicator output is any `embedded_hal::digital::OutputPin`.

pub mod hardware;
pub mod types;
pub mod progress;
pub mod report;
pub mod sampler;

pub use hardware::{EdgeTrigger, SampleSource, widen_12bit};
pub use types::{EdgeOutcome, PulseStatus, Reading, SampleReport, SamplerConfig};
pub use progress::{ProgressSnapshot, SamplerProgress};
pub use report::{ReportQueue, ReportSink};
pub use sampler::{SamplerError, SamplerState, SyncSampler};

/// Number of edge events accepted before the trigger disarms itself, unless configured otherwise.
pub const DEFAULT_EVENT_LIMIT: u32 = 1000;
