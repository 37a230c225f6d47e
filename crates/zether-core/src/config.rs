//! Parameter configuration

use crate::{is_power_of_two, ZetherError, ZetherResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Values under a transfer's aggregated range proof: amount and remaining balance
pub const TRANSFER_VALUES: usize = 2;

/// Sizes of the generator vectors derived at start-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Bit width of a single-value range proof
    pub range_bits: usize,
    /// Bit width of each value in an aggregated range proof
    pub agg_range_bits: usize,
    /// Number of values aggregated in a transfer range proof
    pub agg_values: usize,
    /// Largest ring a transfer proof may use
    pub max_ring_size: usize,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            range_bits: 32,
            agg_range_bits: 16,
            agg_values: 2,
            max_ring_size: 1024,
        }
    }
}

impl ParamsConfig {
    /// Loads configuration from file or returns default
    pub fn load_or_default(path: Option<&Path>) -> ZetherResult<Self> {
        if let Some(path) = path {
            if path.exists() {
                debug!(path = %path.display(), "loading parameter configuration");
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ZetherError::Config(format!("{}: {}", path.display(), e)))?;
                let config: Self = serde_json::from_str(&text)
                    .map_err(|e| ZetherError::Config(format!("{}: {}", path.display(), e)))?;
                config.validate()?;
                return Ok(config);
            }
        }

        debug!("using default parameter configuration");
        Ok(Self::default())
    }

    /// Saves configuration to file as pretty JSON
    pub fn save(&self, path: &Path) -> ZetherResult<()> {
        let text = serde_json::to_string_pretty(self).map_err(|e| ZetherError::Config(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| ZetherError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> ZetherResult<()> {
        for (name, bits) in [
            ("range_bits", self.range_bits),
            ("agg_range_bits", self.agg_range_bits),
        ] {
            if !is_power_of_two(bits) || bits > 64 {
                return Err(ZetherError::InvalidParameters(format!(
                    "{} must be a power of two in [1, 64], got {}",
                    name, bits
                )));
            }
        }

        if self.agg_values != TRANSFER_VALUES {
            return Err(ZetherError::InvalidParameters(format!(
                "agg_values must be {} (amount and remaining balance), got {}",
                TRANSFER_VALUES, self.agg_values
            )));
        }

        if self.max_ring_size < 4 || !is_power_of_two(self.max_ring_size) {
            return Err(ZetherError::InvalidParameters(format!(
                "max_ring_size must be a power of two >= 4, got {}",
                self.max_ring_size
            )));
        }

        Ok(())
    }

    /// Length of the vector generators needed to serve every proof size
    pub fn generator_count(&self) -> usize {
        let ring_bits = self.max_ring_size.trailing_zeros() as usize;
        self.range_bits
            .max(self.agg_range_bits * self.agg_values)
            .max(4 * ring_bits + 2)
    }
}
