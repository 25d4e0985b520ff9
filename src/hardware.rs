//! Hardware abstraction traits for the sampler's collaborators.
//!
//! The indicator line is driven through `embedded_hal::digital::OutputPin`
//! directly. The sample source and the edge trigger have no portable
//! embedded-hal 1.0 equivalent, so they are defined here.

use core::fmt::Debug;

/// Trait for abstracting a single-shot analog sample source.
///
/// Implement this for your ADC channel. Readings are unsigned and cover the
/// full 16-bit range; narrower converters should widen their result (see
/// [`widen_12bit`]).
///
/// `read_sample` is called from interrupt context and must not block for an
/// unbounded time.
pub trait SampleSource {
    /// Error reported when a conversion cannot be produced.
    type Error: Debug;

    /// Takes one reading in `0..=65535`.
    fn read_sample(&mut self) -> Result<u16, Self::Error>;
}

/// Trait for abstracting an edge-triggered interrupt source.
///
/// Implement this for the input line whose falling edges drive the sampler.
/// The sampler owns the trigger and is the only code that arms or disarms it.
pub trait EdgeTrigger {
    /// Error reported when the interrupt configuration cannot be changed.
    type Error: Debug;

    /// Enables delivery of falling-edge events.
    fn arm(&mut self) -> Result<(), Self::Error>;

    /// Disables delivery of edge events. Must be effective before returning.
    fn disarm(&mut self) -> Result<(), Self::Error>;

    /// Clears a latched edge so the same event is not delivered twice.
    ///
    /// Called at the start of every edge callback. Hardware that clears the
    /// latch on its own can keep the default no-op.
    fn acknowledge(&mut self) {}
}

/// Widens a 12-bit conversion result to the 16-bit sample range.
///
/// The top bits are replicated into the low nibble so that full scale maps
/// to `0xFFFF` and zero stays zero. Bits above the 12th are ignored.
#[inline]
pub const fn widen_12bit(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}
