//! PTT Command Protocol
//!
//! The terminal's `ptt` command as seen by the core: typed requests,
//! argument validation the command layer must do before calling
//! [`PttEngine::on_delay`], and the human-readable replies sent back to
//! the host. Tokenising terminal input is the terminal's job.

use core::fmt;

use heapless::String;

use crate::capture::CaptureCompare;
use crate::config::REPLY_BUFFER_SIZE;
use crate::radio::ptt::{PttEngine, TxLine};
use crate::radio::sidetone::TonePwm;

/// Validated PTT request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PttRequest {
    /// Report whether transmit is asserted
    Status,
    /// Assert transmit now
    On,
    /// Deassert transmit now
    Off,
    /// Assert transmit after a delay in seconds
    Delay(f32),
}

impl PttRequest {
    /// Build a delayed-on request
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NegativeDelay`] for delays at or below zero
    /// and [`CommandError::InvalidDelay`] for NaN or infinite values.
    pub fn delay(seconds: f32) -> Result<Self, CommandError> {
        if !seconds.is_finite() {
            Err(CommandError::InvalidDelay)
        } else if seconds <= 0.0 {
            Err(CommandError::NegativeDelay(seconds))
        } else {
            Ok(Self::Delay(seconds))
        }
    }

    /// Run the request against the PTT engine
    pub fn execute<L, P, C>(self, ptt: &mut PttEngine<L, P, C>) -> PttReply
    where
        L: TxLine,
        P: TonePwm,
        C: CaptureCompare,
    {
        match self {
            Self::Status => PttReply::Status(ptt.get()),
            Self::On => {
                ptt.set(true);
                PttReply::Done
            }
            Self::Off => {
                ptt.set(false);
                PttReply::Done
            }
            Self::Delay(seconds) => PttReply::Scheduled(ptt.on_delay(seconds)),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PttRequest {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Status => defmt::write!(f, "Status"),
            Self::On => defmt::write!(f, "On"),
            Self::Off => defmt::write!(f, "Off"),
            Self::Delay(s) => defmt::write!(f, "Delay({}s)", s),
        }
    }
}

/// Outcome of a PTT request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PttReply {
    /// Current transmit state
    Status(bool),
    /// Immediate request applied
    Done,
    /// Delayed-on armed; carries the delay actually scheduled
    Scheduled(f32),
}

impl fmt::Display for PttReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(on) => write!(f, "PTT status : {}", if *on { "on" } else { "off" }),
            Self::Done => Ok(()),
            Self::Scheduled(seconds) => write!(f, "PTT in {seconds:.6} sec"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PttReply {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Status(on) => defmt::write!(f, "Status({})", on),
            Self::Done => defmt::write!(f, "Done"),
            Self::Scheduled(s) => defmt::write!(f, "Scheduled({}s)", s),
        }
    }
}

/// Rejected PTT request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandError {
    /// Delay at or below zero
    NegativeDelay(f32),
    /// Delay is NaN or infinite
    InvalidDelay,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDelay(seconds) => write!(
                f,
                "Error : delay of {seconds:.6} is not valid. Valid delays must be greater than zero"
            ),
            Self::InvalidDelay => write!(f, "Error : delay value is not a finite number"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NegativeDelay(s) => defmt::write!(f, "NegativeDelay({})", s),
            Self::InvalidDelay => defmt::write!(f, "InvalidDelay"),
        }
    }
}

/// PTT response formatter
///
/// Renders replies and errors as terminal lines (`\r\n` terminated) into a
/// fixed buffer. Text that does not fit is truncated.
pub struct PttResponse {
    buffer: String<REPLY_BUFFER_SIZE>,
}

impl PttResponse {
    /// Create a new response formatter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Format a reply; immediate on/off replies produce no text
    pub fn reply(&mut self, reply: &PttReply) {
        self.buffer.clear();
        if *reply != PttReply::Done {
            let _ = core::fmt::write(&mut self.buffer, format_args!("{reply}\r\n"));
        }
    }

    /// Format an error
    pub fn error(&mut self, error: &CommandError) {
        self.buffer.clear();
        let _ = core::fmt::write(&mut self.buffer, format_args!("{error}\r\n"));
    }

    /// Format the result of running a request
    pub fn result(&mut self, result: &Result<PttReply, CommandError>) {
        match result {
            Ok(reply) => self.reply(reply),
            Err(error) => self.error(error),
        }
    }

    /// Get the response string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the response bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PttResponse {
    fn default() -> Self {
        Self::new()
    }
}
