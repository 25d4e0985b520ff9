#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::pwm::SetDutyCycle;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, Sio,
    adc::{Adc, AdcPin},
    clocks::init_clocks_and_plls,
    pac::{self, interrupt},
    pwm::Slices,
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};

use rp_pico_demo::adc_source::AdcSampleSource;
use rp_pico_demo::board::{
    AnalogPin, CARRIER_DIV_INT, CARRIER_TOP, EVENT_LIMIT, IndicatorPin, REPORT_CAPACITY, SyncPin,
};
use rp_pico_demo::sync_trigger::SyncTrigger;

use sync_sampler::{
    PulseStatus, Reading, ReportQueue, SamplerConfig, SamplerError, SamplerProgress, SyncSampler,
};

type Sampler = SyncSampler<
    'static,
    IndicatorPin,
    AdcSampleSource,
    SyncTrigger,
    &'static ReportQueue<REPORT_CAPACITY>,
>;

static PROGRESS: SamplerProgress = SamplerProgress::new();
static REPORTS: ReportQueue<REPORT_CAPACITY> = ReportQueue::new();
static SAMPLER: Mutex<RefCell<Option<Sampler>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Zero-Detect Sampler ===");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    rprintln!(
        "System clock configured: {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    let sio = Sio::new(pac.SIO);
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Carrier: 1 kHz, 50% duty on GPIO21 (PWM2 B)
    let mut pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let carrier = &mut pwm_slices.pwm2;
    carrier.set_div_int(CARRIER_DIV_INT);
    carrier.set_top(CARRIER_TOP);
    carrier.enable();
    let carrier_out = &mut carrier.channel_b;
    carrier_out.output_to(pins.gpio21);
    carrier_out.set_duty_cycle_fraction(1, 2).unwrap();
    rprintln!("Carrier running on GPIO21");

    // Analog input on GPIO26
    let adc = Adc::new(pac.ADC, &mut pac.RESETS);
    let analog: AnalogPin = pins.gpio26.reconfigure();
    let source = AdcSampleSource::new(adc, AdcPin::new(analog).unwrap());

    // Indicator on GPIO4, sync on GPIO12
    let indicator: IndicatorPin = pins.gpio4.reconfigure();
    let sync: SyncPin = pins.gpio12.reconfigure();

    let mut sampler = SyncSampler::new(
        SamplerConfig::new(EVENT_LIMIT),
        indicator,
        source,
        SyncTrigger::new(sync),
        &REPORTS,
        &PROGRESS,
    );

    if let Err(e) = sampler.arm() {
        rprintln!("Could not arm sync trigger: {}", e);
        loop {
            cortex_m::asm::wfi();
        }
    }

    critical_section::with(|cs| {
        SAMPLER.borrow(cs).replace(Some(sampler));
    });

    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    rprintln!("Sampling {} falling edges on GPIO12", EVENT_LIMIT);

    let mut finished = false;
    loop {
        while let Some(report) = REPORTS.dequeue() {
            match report.reading {
                Reading::Value(value) => rprintln!("PWM reached zero! ADC Reading: {}", value),
                Reading::Failed => rprintln!("Event {}: ADC read failed", report.index),
            }
            if report.pulse == PulseStatus::Faulted {
                rprintln!("Event {}: indicator pulse faulted", report.index);
            }
        }

        let snapshot = PROGRESS.snapshot();
        if !finished && !snapshot.armed && REPORTS.is_empty() {
            finished = true;
            if snapshot.faulted {
                rprintln!("Sync trigger could not be disarmed; sampling aborted");
            } else {
                rprintln!("Sampling complete, interrupt disabled");
            }
            rprintln!(
                "Events: {}, dropped reports: {}",
                snapshot.event_count,
                snapshot.dropped_reports
            );
        }

        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        let mut maybe_sampler = SAMPLER.borrow_ref_mut(cs);
        if let Some(sampler) = maybe_sampler.as_mut() {
            if let Err(SamplerError::DisarmFailed) = sampler.on_edge() {
                // Stop the whole bank rather than take this interrupt on every edge
                pac::NVIC::mask(pac::Interrupt::IO_IRQ_BANK0);
            }
        }
    });
}
