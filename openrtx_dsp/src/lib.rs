//! # OpenRTX DSP
//!
//! The M17 baseband and forward-error-correction pipeline: RRC pulse
//! shaping, the correlator/synchroniser/slicer receive chain, Golay(24,12),
//! the rate-1/2 convolutional code and its Viterbi decoder, interleaving,
//! scrambling, and the LSF/stream frame assembler and disassembler. A
//! CTCSS Goertzel bank, sharing the same audio-stream substrate, lives here
//! too.

pub mod assembler;
pub mod callsign;
pub mod constants;
pub mod conv;
pub mod correlator;
pub mod crc;
pub mod ctcss;
pub mod disassembler;
pub mod error;
pub mod frame;
pub mod golay;
pub mod interleave;
pub mod lsf;
pub mod puncture;
pub mod rrc;
pub mod scramble;
pub mod slicer;
pub mod symbol;
pub mod synchronizer;

pub use error::{DspError, Result};
