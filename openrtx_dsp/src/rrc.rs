//! Root-raised-cosine pulse shaping.
//!
//! Two equivalent implementations of the same 79-tap filter: [`DirectFir`],
//! a textbook sample-by-sample convolution, and [`LookupFir`], which
//! precomputes the filter's impulse response for each of the four symbol
//! levels (plus the silent/zero level) and reconstructs the shaped waveform
//! by superposing those responses. `LookupFir` trades a one-time table build
//! for avoiding 79 multiplies per output sample when nine out of every ten
//! input samples are zero-stuffed silence between symbols — the common case
//! on the transmit path. Both forms must agree to within rounding noise.

use crate::constants::SAMPLES_PER_SYMBOL;
use crate::symbol::Symbol;

/// Root-raised-cosine coefficients, beta = 0.5, 79 taps, as used on the
/// transmit shaping filter.
pub const RRC_TAPS: [f64; 79] = [
    -0.009265784007800534,
    -0.006136551625729697,
    -0.001125978562075172,
    0.004891777252042491,
    0.01071805138282269,
    0.01505751553351295,
    0.01679337935001369,
    0.015256245142156299,
    0.01042830577908502,
    0.003031522725559901,
    -0.0055333532968188165,
    -0.013403099825723372,
    -0.018598682349642525,
    -0.01944761739590459,
    -0.015005271935951746,
    -0.0053887880354343935,
    0.008056525910253532,
    0.022816244158307273,
    0.035513467692208076,
    0.04244131815783876,
    0.04025481153629372,
    0.02671818654865632,
    0.0013810216516704976,
    -0.03394615682795165,
    -0.07502635967975885,
    -0.11540977897637611,
    -0.14703962203941534,
    -0.16119995609538576,
    -0.14969512896336504,
    -0.10610329539459686,
    -0.026921412469634916,
    0.08757875030779196,
    0.23293327870303457,
    0.4006012210123992,
    0.5786324696325503,
    0.7528286479934068,
    0.908262741447522,
    1.0309661131633199,
    1.1095611856548013,
    1.1366197723675815,
    1.1095611856548013,
    1.0309661131633199,
    0.908262741447522,
    0.7528286479934068,
    0.5786324696325503,
    0.4006012210123992,
    0.23293327870303457,
    0.08757875030779196,
    -0.026921412469634916,
    -0.10610329539459686,
    -0.14969512896336504,
    -0.16119995609538576,
    -0.14703962203941534,
    -0.11540977897637611,
    -0.07502635967975885,
    -0.03394615682795165,
    0.0013810216516704976,
    0.02671818654865632,
    0.04025481153629372,
    0.04244131815783876,
    0.035513467692208076,
    0.022816244158307273,
    0.008056525910253532,
    -0.0053887880354343935,
    -0.015005271935951746,
    -0.01944761739590459,
    -0.018598682349642525,
    -0.013403099825723372,
    -0.0055333532968188165,
    0.003031522725559901,
    0.01042830577908502,
    0.015256245142156299,
    0.01679337935001369,
    0.01505751553351295,
    0.01071805138282269,
    0.004891777252042491,
    -0.001125978562075172,
    -0.006136551625729697,
    -0.009265784007800534,
];

const NTAPS: usize = RRC_TAPS.len();

/// Transmit-side scaling applied after the filter: `round(rrc(x) * 7168.0)`.
pub const TX_GAIN: f64 = 7168.0;

/// Receive-side scaling applied after the matched filter: `round(rrc(x) * 0.10)`.
pub const RX_GAIN: f64 = 0.10;

/// A direct-form FIR implementation of the RRC filter with a rolling history.
///
/// Each call to [`DirectFir::push`] shifts one new sample in and returns one
/// filtered output, scaled by `gain`.
#[derive(Debug, Clone)]
pub struct DirectFir {
    history: [f64; NTAPS],
    gain: f64,
}

impl DirectFir {
    pub fn new(gain: f64) -> Self {
        DirectFir { history: [0.0; NTAPS], gain }
    }

    /// Shifts `sample` into the filter history and returns the filtered,
    /// gain-scaled, rounded output.
    pub fn push(&mut self, sample: f64) -> i32 {
        self.history.copy_within(0..NTAPS - 1, 1);
        self.history[0] = sample;
        let mut acc = 0.0f64;
        for (tap, hist) in RRC_TAPS.iter().zip(self.history.iter()) {
            acc += tap * hist;
        }
        (acc * self.gain).round() as i32
    }

    /// Convenience: shapes a whole frame of pre-upsampled (zero-stuffed)
    /// samples in one call.
    pub fn process(&mut self, samples: &[f64]) -> Vec<i32> {
        samples.iter().map(|&s| self.push(s)).collect()
    }
}

/// Precomputed per-symbol impulse responses for overlap-add reconstruction.
///
/// For each of the four symbol levels, `responses[level]` holds the 79-tap
/// RRC response scaled by that level's deviation and the configured gain.
/// A symbol placed at sample offset `k * SAMPLES_PER_SYMBOL` contributes its
/// whole response, centred on that offset, to the output buffer; the total
/// shaped waveform is the pointwise sum of every symbol's contribution.
#[derive(Debug, Clone)]
pub struct LookupFir {
    responses: [[f64; NTAPS]; 4],
    gain: f64,
}

fn level_index(level: i8) -> usize {
    match level {
        -3 => 0,
        -1 => 1,
        1 => 2,
        3 => 3,
        _ => unreachable!("symbol levels are always in {{-3,-1,1,3}}"),
    }
}

impl LookupFir {
    pub fn new(gain: f64) -> Self {
        let levels = [-3.0f64, -1.0, 1.0, 3.0];
        let mut responses = [[0.0; NTAPS]; 4];
        for (i, level) in levels.iter().enumerate() {
            for (tap, out) in RRC_TAPS.iter().zip(responses[i].iter_mut()) {
                *out = tap * level;
            }
        }
        LookupFir { responses, gain }
    }

    /// Shapes an entire symbol sequence by superposing each symbol's
    /// precomputed response at its upsampled offset.
    ///
    /// Returns `symbols.len() * SAMPLES_PER_SYMBOL` shaped samples.
    pub fn process(&self, symbols: &[Symbol]) -> Vec<i32> {
        let out_len = symbols.len() * SAMPLES_PER_SYMBOL;
        // Room either side for the filter tails that extend beyond the
        // first/last symbol's centre before truncating to `out_len`.
        let pad = NTAPS / 2;
        let mut acc = vec![0.0f64; out_len + 2 * pad];

        for (k, symbol) in symbols.iter().enumerate() {
            let centre = k * SAMPLES_PER_SYMBOL + pad;
            let response = &self.responses[level_index(*symbol as i8)];
            let start = centre - pad;
            for (i, tap) in response.iter().enumerate() {
                acc[start + i] += tap;
            }
        }

        acc[pad..pad + out_len]
            .iter()
            .map(|&s| (s * self.gain).round() as i32)
            .collect()
    }
}

/// Zero-stuffs a symbol sequence to [`SAMPLES_PER_SYMBOL`]-spaced impulses,
/// suitable as input to [`DirectFir::process`].
pub fn upsample(symbols: &[Symbol]) -> Vec<f64> {
    let mut out = vec![0.0f64; symbols.len() * SAMPLES_PER_SYMBOL];
    for (k, symbol) in symbols.iter().enumerate() {
        out[k * SAMPLES_PER_SYMBOL] = *symbol as i8 as f64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_and_lookup_agree() {
        let symbols = [
            Symbol::Pos3,
            Symbol::Neg1,
            Symbol::Pos1,
            Symbol::Neg3,
            Symbol::Pos1,
            Symbol::Pos1,
        ];

        let mut direct = DirectFir::new(TX_GAIN);
        let stuffed = upsample(&symbols);
        let direct_out = direct.process(&stuffed);

        let lookup = LookupFir::new(TX_GAIN);
        let lookup_out = lookup.process(&symbols);

        assert_eq!(direct_out.len(), lookup_out.len());
        for (d, l) in direct_out.iter().zip(lookup_out.iter()) {
            assert!((d - l).abs() <= 1, "direct={d} lookup={l}");
        }
    }

    #[test]
    fn tx_gain_matches_unit_impulse_peak() {
        let mut direct = DirectFir::new(TX_GAIN);
        // Centre tap of a +1 symbol should saturate near, but not exceed,
        // TX_GAIN in magnitude once the filter has filled with the impulse.
        let mut out = 0;
        let stuffed = upsample(&[Symbol::Pos1; 20]);
        for s in stuffed {
            out = direct.push(s);
        }
        assert!(out.abs() as f64 <= TX_GAIN.round());
    }
}
