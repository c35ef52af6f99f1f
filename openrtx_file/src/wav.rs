//! Mono 16-bit PCM WAV I/O via `hound`.
//!
//! The M17 pipeline in `openrtx_dsp` runs on mono `i16` sample vectors at a
//! handful of fixed rates (8 kHz input audio, 24 kHz RX baseband, 48 kHz TX
//! baseband); this module loads and saves exactly that shape, for test
//! vectors and for `openrtx_radio`'s loopback demo.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{FileError, Result};

/// Reads a mono 16-bit PCM WAV file, returning its samples and sample rate.
pub fn read_mono_i16(path: impl AsRef<Path>) -> Result<(Vec<i16>, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(FileError::NotMono(spec.channels));
    }

    let samples = match spec.sample_format {
        SampleFormat::Int => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as i16))
            .collect::<std::result::Result<Vec<i16>, hound::Error>>()?,
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v * i16::MAX as f32) as i16))
            .collect::<std::result::Result<Vec<i16>, hound::Error>>()?,
    };

    Ok((samples, spec.sample_rate))
}

/// Writes a mono 16-bit PCM WAV file.
pub fn write_mono_i16(path: impl AsRef<Path>, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn round_trips_mono_pcm() {
        let samples: Vec<i16> = (0..1000).map(|i| ((i * 37) % 2000 - 1000) as i16).collect();
        let temp = NamedTempFile::new().unwrap();

        write_mono_i16(temp.path(), &samples, 24_000).unwrap();
        let (read_back, rate) = read_mono_i16(temp.path()).unwrap();

        assert_eq!(rate, 24_000);
        assert_eq!(read_back, samples);
    }

    #[test]
    fn rejects_stereo_input() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let temp = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(temp.path(), spec).unwrap();
        for _ in 0..10 {
            writer.write_sample(0i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let err = read_mono_i16(temp.path()).unwrap_err();
        assert!(matches!(err, FileError::NotMono(2)));
    }
}
