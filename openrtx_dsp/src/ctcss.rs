//! CTCSS sub-audible tone detection: a bank of modified Goertzel filters,
//! one per standard CTCSS tone, run over a 400-sample analysis window at
//! 2 kHz.

use crate::constants::{CTCSS_SAMPLE_RATE, CTCSS_WINDOW};
use std::f32::consts::PI;

/// The 50 standard EIA CTCSS tones, in Hz.
pub const TONES: [f32; 50] = [
    67.0, 69.3, 71.9, 74.4, 77.0, 79.7, 82.5, 85.4, 88.5, 91.5, 94.8, 97.4, 100.0, 103.5, 107.2,
    110.9, 114.8, 118.8, 123.0, 127.3, 131.8, 136.5, 141.3, 146.2, 151.4, 156.7, 159.8, 162.2,
    165.5, 167.9, 171.3, 173.8, 177.3, 179.9, 183.5, 186.2, 189.9, 192.8, 196.6, 199.5, 203.5,
    206.5, 210.7, 218.1, 225.7, 229.1, 233.6, 241.8, 250.3, 254.1,
];

const N: usize = TONES.len();

/// A bank of `N` modified Goertzel filters, one per [`TONES`] entry.
#[derive(Debug, Clone)]
pub struct GoertzelBank {
    k: [f32; N],
    u0: [f32; N],
    u1: [f32; N],
    samples_seen: usize,
}

impl GoertzelBank {
    pub fn new() -> Self {
        let mut k = [0.0f32; N];
        for (i, &freq) in TONES.iter().enumerate() {
            k[i] = 2.0 * (2.0 * PI * freq / CTCSS_SAMPLE_RATE as f32).cos();
        }
        GoertzelBank { k, u0: [0.0; N], u1: [0.0; N], samples_seen: 0 }
    }

    /// Feeds one sample (at [`CTCSS_SAMPLE_RATE`]) into every filter in
    /// the bank.
    pub fn push(&mut self, value: i16) {
        for i in 0..N {
            let u = value as f32 + self.k[i] * self.u0[i] - self.u1[i];
            self.u1[i] = self.u0[i];
            self.u0[i] = u;
        }
        self.samples_seen += 1;
    }

    /// Signal power at tone index `freq`.
    pub fn power(&self, freq: usize) -> f32 {
        if freq >= N {
            return 0.0;
        }
        self.u0[freq] * self.u0[freq] + self.u1[freq] * self.u1[freq]
            - self.u0[freq] * self.u1[freq] * self.k[freq]
    }

    pub fn reset(&mut self) {
        self.u0 = [0.0; N];
        self.u1 = [0.0; N];
        self.samples_seen = 0;
    }

    /// Whether a full [`CTCSS_WINDOW`]-sample analysis window has been
    /// accumulated since the last reset.
    pub fn window_complete(&self) -> bool {
        self.samples_seen >= CTCSS_WINDOW
    }

    /// Returns the tone index with the highest power in the bank, and its
    /// power, if the window is complete.
    pub fn detect(&self) -> Option<(usize, f32)> {
        if !self.window_complete() {
            return None;
        }
        (0..N)
            .map(|i| (i, self.power(i)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
    }
}

impl Default for GoertzelBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_samples(freq: f32, n: usize) -> Vec<i16> {
        (0..n)
            .map(|i| {
                let t = i as f32 / CTCSS_SAMPLE_RATE as f32;
                (8000.0 * (2.0 * PI * freq * t).sin()) as i16
            })
            .collect()
    }

    #[test]
    fn detects_a_pure_tone() {
        let mut bank = GoertzelBank::new();
        let target_idx = 12; // 100.0 Hz
        for s in tone_samples(TONES[target_idx], CTCSS_WINDOW) {
            bank.push(s);
        }
        let (idx, _) = bank.detect().unwrap();
        assert_eq!(idx, target_idx);
    }

    #[test]
    fn silence_has_negligible_power_everywhere() {
        let mut bank = GoertzelBank::new();
        for _ in 0..CTCSS_WINDOW {
            bank.push(0);
        }
        for i in 0..N {
            assert_eq!(bank.power(i), 0.0);
        }
    }
}
