//! Radio Control Logic
//!
//! State machines for push-to-talk control: button debounce, delayed and
//! immediate PTT, and the side-tone that accompanies transmit.

pub mod debounce;
pub mod interface;
pub mod ptt;
pub mod sidetone;
