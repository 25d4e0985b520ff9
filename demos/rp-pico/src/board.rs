//! Pin assignment and carrier settings for the zero-detect board.
//!
//! - GPIO21: PWM carrier out (slice 2, channel B)
//! - GPIO26: analog input (ADC0)
//! - GPIO12: sync input, falling edge
//! - GPIO4: indicator pulse out

use rp_pico::hal::gpio::{
    FunctionSioInput, FunctionSioOutput, Pin, PullNone,
    bank0::{Gpio4, Gpio12, Gpio26},
};

pub type IndicatorPin = Pin<Gpio4, FunctionSioOutput, PullNone>;
pub type SyncPin = Pin<Gpio12, FunctionSioInput, PullNone>;
pub type AnalogPin = Pin<Gpio26, FunctionSioInput, PullNone>;

/// 125 MHz / 125 = 1 MHz PWM counter clock
pub const CARRIER_DIV_INT: u8 = 125;

/// 1 MHz / (999 + 1) = 1 kHz carrier
pub const CARRIER_TOP: u16 = 999;

/// Edge events sampled before the sync interrupt disarms itself.
pub const EVENT_LIMIT: u32 = 1000;

/// Reports buffered between the interrupt and the RTT printer.
pub const REPORT_CAPACITY: usize = 64;
