#![no_std]

pub mod adc_source;
pub mod board;
pub mod sync_trigger;
