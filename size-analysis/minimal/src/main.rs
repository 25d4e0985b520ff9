#![no_std]
#![no_main]

use core::convert::Infallible;

use cortex_m_rt::entry;
use embedded_hal::digital::{ErrorType, OutputPin};
use panic_halt as _;
use sync_sampler::{
    EdgeTrigger, ReportQueue, SampleSource, SamplerConfig, SamplerProgress, SyncSampler,
};

// ============================================================================
// Minimal Hardware
// ============================================================================

/// Zero-size pin for measuring library overhead
pub struct MinimalPin;

impl ErrorType for MinimalPin {
    type Error = Infallible;
}

impl OutputPin for MinimalPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        core::hint::black_box(());
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        core::hint::black_box(());
        Ok(())
    }
}

pub struct MinimalSource;

impl SampleSource for MinimalSource {
    type Error = Infallible;

    fn read_sample(&mut self) -> Result<u16, Self::Error> {
        Ok(core::hint::black_box(0x8000))
    }
}

pub struct MinimalTrigger;

impl EdgeTrigger for MinimalTrigger {
    type Error = Infallible;

    fn arm(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

static PROGRESS: SamplerProgress = SamplerProgress::new();
static REPORTS: ReportQueue<16> = ReportQueue::new();

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_sampler() {
    let mut sampler = SyncSampler::new(
        SamplerConfig::new(4),
        MinimalPin,
        MinimalSource,
        MinimalTrigger,
        &REPORTS,
        &PROGRESS,
    );

    let _ = sampler.arm();
    for _ in 0..5 {
        let _ = core::hint::black_box(sampler.on_edge());
    }
    while let Some(report) = REPORTS.dequeue() {
        core::hint::black_box(report);
    }
    core::hint::black_box(PROGRESS.snapshot());
}

#[entry]
fn main() -> ! {
    exercise_sampler();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
