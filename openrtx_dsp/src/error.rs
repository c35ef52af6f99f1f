//! Error taxonomy for the baseband/FEC pipeline.

pub type Result<T> = std::result::Result<T, DspError>;

/// Errors raised by the M17 baseband and FEC pipeline.
///
/// Protocol-level outcomes that are part of normal receive operation (a bad
/// CRC, an uncorrectable Golay word, a lost lock) are *not* represented here:
/// those are [`crate::disassembler::FrameOutcome`] values, returned, not
/// raised, because losing sync on a noisy channel is expected traffic, not
/// a failure of the decoder itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DspError {
    #[error("buffer length {got} does not match the expected {expected}")]
    WrongLength { expected: usize, got: usize },

    #[error("callsign is longer than 9 characters or uses a character outside the M17 alphabet")]
    InvalidCallsign,

    #[error("symbol value is outside the 4-FSK alphabet {{-3,-1,+1,+3}}")]
    InvalidSymbol,

    #[error("frame type field carries an unrecognised value")]
    InvalidFrameType,
}
