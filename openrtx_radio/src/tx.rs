//! TX path: packs PCM audio into LSF + stream frames and RRC-shapes the
//! result into a baseband sample stream.

use openrtx_dsp::assembler::{assemble_lsf, assemble_stream};
use openrtx_dsp::callsign;
use openrtx_dsp::constants::FRAME_SYMBOLS;
use openrtx_dsp::frame::{StreamFrame, LAST_FRAME_BIT};
use openrtx_dsp::lsf::{FrameType, Lsf};
use openrtx_dsp::rrc::{LookupFir, TX_GAIN};
use openrtx_dsp::symbol::Symbol;
use openrtx_dsp::DspError;

use crate::config::RadioConfig;

/// Bytes of PCM packed into a single stream frame's voice field (not a real
/// vocoder: the raw samples ride in the payload unencoded, as a stand-in for
/// the Codec2/AMBE frame a real M17 transmitter would place there).
const VOICE_BYTES: usize = 16;
const SAMPLES_PER_VOICE_FRAME: usize = VOICE_BYTES / 2;

fn frame_to_symbols(frame: [i8; FRAME_SYMBOLS], out: &mut Vec<Symbol>) {
    out.extend(frame.iter().map(|&level| {
        Symbol::from_level(level).expect("assembler only emits valid symbol levels")
    }));
}

/// Encodes `pcm` (mono samples at any rate; the demo does not resample) as
/// one LSF followed by as many stream frames as needed, then RRC-shapes the
/// whole transmission into a baseband sample stream at
/// [`openrtx_dsp::constants::TX_SAMPLE_RATE`].
pub fn encode_to_baseband(config: &RadioConfig, pcm: &[i16]) -> Result<Vec<i16>, DspError> {
    let lsf = Lsf {
        src: callsign::encode(&config.src_callsign)?,
        dst: callsign::encode(&config.dst_callsign)?,
        frame_type: FrameType(0x0001),
        meta: [0; 14],
    };

    let chunk_count = pcm.len().div_ceil(SAMPLES_PER_VOICE_FRAME).max(1);
    let mut symbols = Vec::with_capacity((1 + chunk_count) * FRAME_SYMBOLS);
    frame_to_symbols(assemble_lsf(&lsf), &mut symbols);

    for (index, chunk) in pcm.chunks(SAMPLES_PER_VOICE_FRAME).enumerate() {
        let mut voice = [0u8; VOICE_BYTES];
        for (sample_index, &sample) in chunk.iter().enumerate() {
            let bytes = sample.to_be_bytes();
            voice[sample_index * 2] = bytes[0];
            voice[sample_index * 2 + 1] = bytes[1];
        }

        let mut frame_number = index as u16;
        if index + 1 == chunk_count {
            frame_number |= LAST_FRAME_BIT;
        }

        let frame = StreamFrame { frame_number, voice, meta: [0; 12] };
        frame_to_symbols(assemble_stream(&frame), &mut symbols);
    }

    // An empty input still needs at least one (empty) stream frame so the
    // receiver sees a well-formed last-frame marker.
    if pcm.is_empty() {
        let frame = StreamFrame { frame_number: LAST_FRAME_BIT, voice: [0; 16], meta: [0; 12] };
        frame_to_symbols(assemble_stream(&frame), &mut symbols);
    }

    let shaped = LookupFir::new(TX_GAIN).process(&symbols);
    Ok(shaped.iter().map(|&s| s.clamp(i16::MIN as i32, i16::MAX as i32) as i16).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_at_least_one_lsf_and_stream_frame() {
        let config = RadioConfig::default();
        let baseband = encode_to_baseband(&config, &[]).unwrap();
        assert_eq!(baseband.len() % (FRAME_SYMBOLS * 10), 0);
        assert!(baseband.len() >= 2 * FRAME_SYMBOLS * 10);
    }

    #[test]
    fn encodes_one_stream_frame_per_sixteen_bytes_of_pcm() {
        let config = RadioConfig::default();
        let pcm = vec![100i16; SAMPLES_PER_VOICE_FRAME * 3];
        let baseband = encode_to_baseband(&config, &pcm).unwrap();
        let frame_count = baseband.len() / (FRAME_SYMBOLS * 10);
        assert_eq!(frame_count, 1 + 3);
    }
}
