//! Fixed puncture patterns reducing the rate-1/2 convolutional output down
//! to [`crate::constants::PAYLOAD_BITS`] per frame.
//!
//! LSF frames encode 240 pre-FEC bits (480 coded bits, drop 112); stream
//! frames encode 288 pre-FEC bits (576 coded bits, drop 208) — see
//! `DESIGN.md` for why the stream frame's frame-number field is
//! Golay-protected and therefore 48 bits rather than the raw 16. Both share
//! the same target length because `368` payload bits is fixed by the frame
//! format regardless of how much redundancy preceded it.
//!
//! Each pattern is a fixed period over which a fixed number of positions are
//! dropped, evenly spaced so no two drops are adjacent. `period` must evenly
//! divide the coded length.

use crate::constants::PAYLOAD_BITS;

/// A puncture pattern: period and how many of every period's bits are
/// dropped.
#[derive(Debug, Clone, Copy)]
pub struct PuncturePattern {
    period: usize,
    drop_count: usize,
}

/// Pattern for LSF frames: 480 coded bits -> 368.
pub const LSF_PATTERN: PuncturePattern = PuncturePattern { period: 30, drop_count: 7 };

/// Pattern for stream frames: 576 coded bits -> 368.
pub const STREAM_PATTERN: PuncturePattern = PuncturePattern { period: 36, drop_count: 13 };

impl PuncturePattern {
    /// Returns, for one period, which positions are dropped (evenly spaced).
    fn drop_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.period];
        for k in 0..self.drop_count {
            let pos = (k * self.period) / self.drop_count;
            mask[pos] = true;
        }
        mask
    }

    /// Drops this pattern's positions from `coded`, returning exactly
    /// [`PAYLOAD_BITS`] bits.
    pub fn puncture(&self, coded: &[bool]) -> Vec<bool> {
        assert_eq!(coded.len() % self.period, 0);
        let mask = self.drop_mask();
        let out: Vec<bool> = coded
            .iter()
            .enumerate()
            .filter(|(i, _)| !mask[i % self.period])
            .map(|(_, &b)| b)
            .collect();
        assert_eq!(out.len(), PAYLOAD_BITS);
        out
    }

    /// Reinserts dummy `false` bits at the punctured positions, restoring
    /// the original coded length so the Viterbi decoder sees a complete
    /// (if slightly noisier at the re-inserted positions) trellis.
    pub fn depuncture(&self, punctured: &[bool], coded_len: usize) -> Vec<bool> {
        assert_eq!(coded_len % self.period, 0);
        let mask = self.drop_mask();
        let mut out = vec![false; coded_len];
        let mut src = punctured.iter();
        for (i, slot) in out.iter_mut().enumerate() {
            if !mask[i % self.period] {
                *slot = *src.next().expect("punctured buffer too short");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsf_pattern_sizes_match() {
        let coded = vec![true; 480];
        let punctured = LSF_PATTERN.puncture(&coded);
        assert_eq!(punctured.len(), PAYLOAD_BITS);
        let restored = LSF_PATTERN.depuncture(&punctured, 480);
        assert_eq!(restored.len(), 480);
    }

    #[test]
    fn stream_pattern_sizes_match() {
        let coded = vec![true; 576];
        let punctured = STREAM_PATTERN.puncture(&coded);
        assert_eq!(punctured.len(), PAYLOAD_BITS);
        let restored = STREAM_PATTERN.depuncture(&punctured, 576);
        assert_eq!(restored.len(), 576);
    }

    #[test]
    fn non_dropped_positions_round_trip() {
        let coded: Vec<bool> = (0..480).map(|i| i % 2 == 0).collect();
        let punctured = LSF_PATTERN.puncture(&coded);
        let restored = LSF_PATTERN.depuncture(&punctured, 480);
        let mask = LSF_PATTERN.drop_mask();
        for i in 0..480 {
            if !mask[i % LSF_PATTERN.period] {
                assert_eq!(restored[i], coded[i]);
            }
        }
    }
}
