//! CLI front end for the TX/RX loopback demo. See [`openrtx_radio`] for the
//! pipeline itself.

use std::process::ExitCode;

use openrtx_dsp::constants::TX_SAMPLE_RATE;
use openrtx_dsp::disassembler::FrameOutcome;
use openrtx_file::{read_mono_i16, write_mono_i16};
use openrtx_radio::{decode_baseband, encode_to_baseband, RadioConfig};

fn usage() -> String {
    "usage:\n  \
     openrtx_radio tx <input.wav> <baseband.wav> [config.json]\n  \
     openrtx_radio rx <baseband.wav> [config.json]"
        .to_string()
}

fn load_config(path: Option<&String>) -> RadioConfig {
    match path {
        Some(path) => RadioConfig::load(path).unwrap_or_else(|err| {
            log::warn!("failed to load {path}: {err}, falling back to defaults");
            RadioConfig::default()
        }),
        None => RadioConfig::default(),
    }
}

fn run_tx(input: &str, output: &str, config: &RadioConfig) -> Result<(), String> {
    let (pcm, _rate) = read_mono_i16(input).map_err(|err| format!("reading {input}: {err}"))?;
    let baseband =
        encode_to_baseband(config, &pcm).map_err(|err| format!("encoding {input}: {err}"))?;
    write_mono_i16(output, &baseband, TX_SAMPLE_RATE)
        .map_err(|err| format!("writing {output}: {err}"))?;
    log::info!("wrote {} baseband samples to {output}", baseband.len());
    Ok(())
}

fn run_rx(input: &str, config: &RadioConfig) -> Result<(), String> {
    let (baseband, _rate) = read_mono_i16(input).map_err(|err| format!("reading {input}: {err}"))?;
    let report = decode_baseband(config, &baseband);

    for outcome in &report.frames {
        match outcome {
            FrameOutcome::Lsf(lsf) => log::info!("LSF: {lsf:?}"),
            FrameOutcome::BadLsf => log::warn!("LSF failed CRC"),
            FrameOutcome::Stream(frame) => {
                log::info!("stream frame #{}{}", frame.frame_number, if frame.is_last() { " (last)" } else { "" })
            }
            FrameOutcome::BadCrc => log::warn!("stream frame failed CRC"),
            FrameOutcome::Uncorrectable => log::warn!("stream frame number uncorrectable"),
        }
    }
    log::info!("decoded {} frames, final lock state {:?}", report.frames.len(), report.final_state);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("tx") => match (args.get(2), args.get(3)) {
            (Some(input), Some(output)) => {
                let config = load_config(args.get(4));
                run_tx(input, output, &config)
            }
            _ => Err(usage()),
        },
        Some("rx") => match args.get(2) {
            Some(input) => {
                let config = load_config(args.get(3));
                run_rx(input, &config)
            }
            None => Err(usage()),
        },
        _ => Err(usage()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
