//! Runtime configuration for the TX/RX loopback demo.

use serde::{Deserialize, Serialize};

/// Tunables for one run of the demo: callsigns to encode, and the receive
/// chain's detection/lock parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioConfig {
    /// Source callsign encoded into the outgoing LSF.
    pub src_callsign: String,
    /// Destination callsign encoded into the outgoing LSF.
    pub dst_callsign: String,
    /// Correlator detection threshold, expressed as a multiple of the
    /// running correlation standard deviation (`k` in `mean +/- k * stddev`).
    pub correlator_threshold_k: f32,
    /// Consecutive bad-CRC stream frames before the receiver drops lock.
    pub max_crc_failures: u32,
}

impl Default for RadioConfig {
    fn default() -> Self {
        RadioConfig {
            src_callsign: "N0CALL".to_string(),
            dst_callsign: "ALL".to_string(),
            correlator_threshold_k: 4.0,
            max_crc_failures: 5,
        }
    }
}

impl RadioConfig {
    /// Loads a config from a JSON file. The file must set every field;
    /// callers that want partial overrides should start from a saved
    /// [`RadioConfig::default`] and edit that.
    pub fn load(path: &str) -> std::io::Result<RadioConfig> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(std::io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = RadioConfig::default();
        assert_eq!(config.correlator_threshold_k, 4.0);
        assert_eq!(config.max_crc_failures, 5);
    }

    #[test]
    fn round_trips_through_json() {
        let config = RadioConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RadioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.src_callsign, config.src_callsign);
    }
}
