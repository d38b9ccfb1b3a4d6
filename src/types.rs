//! Shared types used across the radio interface firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::TIMER_TICK_HZ;

/// Duration measured in ticks of the shared capture/compare counter
///
/// Always within `[1, u16::MAX]`: a zero-length schedule cannot be armed on
/// a compare channel, and the counter is 16 bits wide.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(u16);

impl Ticks {
    /// Shortest representable duration
    pub const MIN: Self = Self(1);

    /// Longest representable duration (one full counter period minus one)
    pub const MAX: Self = Self(u16::MAX);

    /// Create from a raw tick count, returns None for zero
    #[must_use]
    pub const fn new(raw: u16) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Create from a raw tick count, clamping into range
    #[must_use]
    pub const fn saturating(raw: u32) -> Self {
        if raw == 0 {
            Self::MIN
        } else if raw > u16::MAX as u32 {
            Self::MAX
        } else {
            Self(raw as u16)
        }
    }

    /// Create from milliseconds (rounded to the nearest tick, clamped)
    #[must_use]
    pub const fn from_millis(ms: u32) -> Self {
        let ticks = (ms as u64 * TIMER_TICK_HZ as u64 + 500) / 1000;
        if ticks > u32::MAX as u64 {
            Self::MAX
        } else {
            Self::saturating(ticks as u32)
        }
    }

    /// Create from seconds (rounded to the nearest tick, clamped)
    ///
    /// Values below one tick, including zero, negative and NaN, become
    /// [`Ticks::MIN`]; values beyond the counter range become [`Ticks::MAX`].
    #[must_use]
    pub fn from_seconds(seconds: f32) -> Self {
        let raw = seconds * TIMER_TICK_HZ as f32;
        if raw.is_nan() || raw < 1.0 {
            Self::MIN
        } else if raw >= f32::from(u16::MAX) {
            Self::MAX
        } else {
            Self((raw + 0.5) as u16)
        }
    }

    /// Get the raw tick count
    #[must_use]
    pub const fn as_raw(self) -> u16 {
        self.0
    }

    /// Get the duration in seconds
    #[must_use]
    pub fn as_seconds(self) -> f32 {
        f32::from(self.0) / TIMER_TICK_HZ as f32
    }

    /// Get the duration in milliseconds (truncated)
    #[must_use]
    pub const fn as_millis(self) -> u32 {
        self.0 as u32 * 1000 / TIMER_TICK_HZ
    }
}

impl fmt::Debug for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticks({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Ticks {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ticks", self.0);
    }
}

/// Button line transition
///
/// The button is wired active low with a pull-up, so a press is a falling
/// edge and a release a rising edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Idle to active (falling edge)
    Press,
    /// Active to idle (rising edge)
    Release,
}

impl Transition {
    /// The transition that follows this one
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Press => Self::Release,
            Self::Release => Self::Press,
        }
    }

    /// The next transition to expect given the sampled line level
    #[must_use]
    pub const fn expected_from_level(active: bool) -> Self {
        if active {
            Self::Release
        } else {
            Self::Press
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Transition {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Press => defmt::write!(f, "Press"),
            Self::Release => defmt::write!(f, "Release"),
        }
    }
}

/// Immediate PTT request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PttAction {
    /// Assert transmit
    On,
    /// Deassert transmit
    Off,
    /// Flip the asserted state
    Toggle,
}

impl From<bool> for PttAction {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PttAction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::On => defmt::write!(f, "On"),
            Self::Off => defmt::write!(f, "Off"),
            Self::Toggle => defmt::write!(f, "Toggle"),
        }
    }
}
