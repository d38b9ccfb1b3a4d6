//! Radio Interface Firmware Library
//!
//! This library provides the push-to-talk core of an STM32G474-based radio
//! interface board: a debounced PTT push-button, immediate and delayed
//! transmit-enable, and a side-tone while transmitting.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Radio Interface (composition)  │  PTT command protocol      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    STATE MACHINES                            │
//! │  Debounce Engine  │  PTT Timing Engine  │  Side-tone         │
//! ├─────────────────────────────────────────────────────────────┤
//! │              CAPTURE/COMPARE SEQUENCING                      │
//! │  One-shot capture-then-compare on a shared 16-bit counter    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / SIMULATION                           │
//! │  TIM3 CC channels │ EXTI button │ GPIO │ TIM4 PWM  (target)  │
//! │  SimTimer │ SimButton │ SimLine │ SimTone          (host)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both state machines run from interrupt handlers. Nothing blocks: a
//! pending delay or an open debounce window is armed hardware state, and
//! every update first disables the interrupt source it could race with.
//!
//! # Design Principles
//!
//! - **Type-driven design**: Custom types enforce invariants at compile time
//! - **No unsafe in application code**: All unsafe isolated in the binary
//! - **Functional core, imperative shell**: State machines are generic over
//!   small hardware traits and run unchanged in host simulation

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_sync;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Binds the state machine traits to STM32G474 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Capture/compare channel sequencing on the shared counter
pub mod capture;

/// Radio Control Logic
///
/// Debounce, PTT timing and side-tone state machines.
pub mod radio;

/// PTT command requests, validation and replies
pub mod protocol;

/// Host simulation of the board hardware
#[cfg(all(feature = "std", not(feature = "embedded")))]
pub mod sim;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::capture::CaptureCompare;
    pub use crate::radio::debounce::{Debouncer, EdgeInput};
    pub use crate::radio::interface::RadioInterface;
    pub use crate::radio::ptt::{PttEngine, PttState, TxLine};
    pub use crate::radio::sidetone::TonePwm;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
