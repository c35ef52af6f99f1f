//! # OpenRTX Radio
//!
//! A loopback demo: encodes PCM audio into an M17 transmission (LSF plus
//! stream frames) and RRC-shapes it to a baseband WAV, then runs the
//! receive chain (matched filter, syncword correlator, frame disassembler)
//! back over that same baseband WAV to recover the original frames.

pub mod config;
pub mod rx;
pub mod tx;

pub use config::RadioConfig;
pub use rx::{decode_baseband, RxReport};
pub use tx::encode_to_baseband;
