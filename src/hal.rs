//! Hardware Abstraction Layer
//!
//! Binds the state machine traits to STM32G474 peripherals: the shared
//! TIM3 capture/compare counter, the EXTI push-button, the PTT output pin
//! and the TIM4 side-tone PWM.

pub mod gpio;
pub mod pwm;
pub mod timer;
