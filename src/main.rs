//! Radio Interface Main Application
//!
//! Entry point for the STM32G474-based radio interface firmware.
//! Brings up the PTT hardware, hands it to the interrupt handlers and
//! spawns the heartbeat task.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::interrupt::{self, InterruptExt};
use embassy_stm32::peripherals::{TIM3, TIM4};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::Timer as CounterTimer;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use radio_interface::hal::gpio::{PttButton, PttOutput, StatusLed};
use radio_interface::hal::pwm::SidetonePwm;
use radio_interface::hal::timer::{SharedCounter, TimerChannel};
use radio_interface::prelude::*;

type Board = RadioInterface<
    PttButton<'static>,
    TimerChannel,
    PttOutput<Output<'static>>,
    SidetonePwm<'static, TIM4>,
    TimerChannel,
>;

/// Interface plus the channel handles the shared vector polls
struct Radio {
    board: Board,
    delay_irq: TimerChannel,
    debounce_irq: TimerChannel,
}

/// Shared with the interrupt handlers; locking masks interrupts only for
/// the length of one state machine update.
static RADIO: Mutex<CriticalSectionRawMutex, RefCell<Option<Radio>>> =
    Mutex::new(RefCell::new(None));

static COUNTER: StaticCell<CounterTimer<'static, TIM3>> = StaticCell::new();

/// GPIOA
const BUTTON_PORT: u8 = 0;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Radio Interface Firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    let led = StatusLed::new(Output::new(p.PA5, Level::Low, Speed::Low));

    // Transmit-enable starts low before anything can assert it
    let ptt_out = PttOutput::new(Output::new(p.PB0, Level::Low, Speed::Low));

    let tone_pin = PwmPin::new_ch1(p.PB6, OutputType::PushPull);
    let tone_pwm = SimplePwm::new(
        p.TIM4,
        Some(tone_pin),
        None,
        None,
        None,
        Hertz(SIDETONE_HZ),
        Default::default(),
    );
    let sidetone = SidetonePwm::new(tone_pwm, Channel::Ch1);

    let counter = SharedCounter::start(COUNTER.init(CounterTimer::new(p.TIM3)));
    let delay_channel = counter.channel(timers::DELAY_CHANNEL);
    let debounce_channel = counter.channel(timers::DEBOUNCE_CHANNEL);

    info!("TIM3 counting at {} Hz", TIMER_TICK_HZ);

    let button = PttButton::new(Input::new(p.PA2, Pull::Up), BUTTON_PORT, BUTTON_EXTI_LINE);

    let board = RadioInterface::new(
        Debouncer::new(button, debounce_channel),
        PttEngine::new(ptt_out, sidetone, delay_channel),
    );

    RADIO.lock(|cell| {
        *cell.borrow_mut() = Some(Radio {
            board,
            delay_irq: delay_channel,
            debounce_irq: debounce_channel,
        });
    });

    interrupt::TIM3.unpend();
    interrupt::EXTI2.unpend();
    // SAFETY: both handlers only touch state through RADIO
    unsafe {
        interrupt::TIM3.enable();
        interrupt::EXTI2.enable();
    }

    info!("PTT core armed, debounce window {} ms", DEBOUNCE_WINDOW_MS);

    spawner.spawn(heartbeat_task(led)).unwrap();

    loop {
        Timer::after(Duration::from_secs(10)).await;
        RADIO.lock(|cell| {
            if let Some(radio) = cell.borrow().as_ref() {
                info!("{}", radio.board);
            }
        });
    }
}

/// Shared counter vector: dispatch each flagged channel to its owner
#[interrupt]
fn TIM3() {
    RADIO.lock(|cell| {
        if let Some(radio) = cell.borrow_mut().as_mut() {
            if radio.delay_irq.take_event() {
                radio.board.on_delay_timer();
            }
            if radio.debounce_irq.take_event() {
                if let Some(edge) = radio.board.on_debounce_timer() {
                    trace!("button {}", edge);
                }
            }
        }
    });
}

/// PTT push-button edge
#[interrupt]
fn EXTI2() {
    RADIO.lock(|cell| {
        if let Some(radio) = cell.borrow_mut().as_mut() {
            radio.board.on_button_edge();
        }
    });
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: StatusLed<'static>) {
    loop {
        led.on();
        Timer::after(Duration::from_millis(100)).await;
        led.off();
        Timer::after(Duration::from_millis(900)).await;
    }
}
