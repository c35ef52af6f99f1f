//! Fixed M17 baseband constants.
//!
//! These are not configuration: they are properties of the M17 waveform
//! itself and appear throughout the correlator, synchroniser, slicer and
//! frame assembler/disassembler.

/// Symbol rate of the M17 baseband, in baud.
pub const SYMBOL_RATE: u32 = 4_800;

/// Sample rate of the transmit-side shaped baseband.
pub const TX_SAMPLE_RATE: u32 = 48_000;

/// Sample rate of the receive-side matched-filter input.
pub const RX_SAMPLE_RATE: u32 = 24_000;

/// Samples per symbol used by the correlator, synchroniser and slicer.
///
/// Matches the reference `Correlator`/`Synchronizer` template parameter
/// (`SAMPLES_PER_SYM = 10`) regardless of which side of the link is
/// sampling; the sub-sample scoreboard always has ten phases.
pub const SAMPLES_PER_SYMBOL: usize = 10;

/// Number of 4-FSK symbols in an M17 syncword.
pub const SYNCWORD_SYMBOLS: usize = 8;

/// Correlator ring buffer length: `SYNCWORD_SYMBOLS * SAMPLES_PER_SYMBOL`.
pub const CORRELATOR_MEMORY: usize = SYNCWORD_SYMBOLS * SAMPLES_PER_SYMBOL;

/// Total 4-FSK symbols in one M17 frame, syncword included.
pub const FRAME_SYMBOLS: usize = 192;

/// Payload symbols in one M17 frame (frame symbols minus the syncword).
pub const PAYLOAD_SYMBOLS: usize = FRAME_SYMBOLS - SYNCWORD_SYMBOLS;

/// Payload bits in one M17 frame after FEC, interleaving and scrambling:
/// two bits per payload symbol.
pub const PAYLOAD_BITS: usize = PAYLOAD_SYMBOLS * 2;

/// LSF syncword, 0x55F7.
pub const LSF_SYNCWORD: u16 = 0x55F7;

/// Stream frame syncword, 0xFF5D — the bitwise inverse of [`LSF_SYNCWORD`].
pub const STREAM_SYNCWORD: u16 = 0xFF5D;

/// Pre-FEC LSF payload size in bits: dst(48) + src(48) + type(16) + meta(112) + crc(16).
pub const LSF_PAYLOAD_BITS: usize = 240;

/// Pre-FEC stream payload size in bits: fn(16) + voice(128) + meta(96) + crc(16).
pub const STREAM_PAYLOAD_BITS: usize = 288;

/// Rate-1/2 convolutional code constraint length (shift-register width,
/// current bit included).
pub const CONV_CONSTRAINT_LEN: u32 = 6;

/// Generator polynomial 1 for the rate-1/2 convolutional code.
pub const CONV_POLY_1: u32 = 0x31;

/// Generator polynomial 2 for the rate-1/2 convolutional code.
pub const CONV_POLY_2: u32 = 0x27;

/// CTCSS analysis window length in samples, at [`CTCSS_SAMPLE_RATE`].
pub const CTCSS_WINDOW: usize = 400;

/// Sample rate at which the CTCSS Goertzel bank operates.
pub const CTCSS_SAMPLE_RATE: u32 = 2_000;
