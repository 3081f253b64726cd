//! Engine settings with TOML and environment loading
//!
//! Supports loading from a TOML file with `OMNIROUTE_`-prefixed environment
//! overrides (`OMNIROUTE_GAS_NORMALIZER=2e9` overrides `gas_normalizer`).
//! All values are validated before use; the cost-model constants here are
//! conventions pinned by the test suite, not physical quantities.

use std::path::Path;

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// AMM kernel parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmSettings {
    /// Fraction of reserves treated as active for concentrated-liquidity
    /// pools.
    pub active_range_fraction: f64,
    /// Amplification coefficient applied to stable-swap pools.
    pub stable_amplification: f64,
    /// Largest input accepted, as a fraction of the base reserve.
    pub max_trade_fraction: f64,
}

impl Default for AmmSettings {
    fn default() -> Self {
        Self {
            active_range_fraction: 0.30,
            stable_amplification: 100.0,
            max_trade_fraction: 0.90,
        }
    }
}

/// Settings consumed by the cost model and the solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Divisor placing gas (gwei) in log-rate magnitude.
    pub gas_normalizer: f64,
    /// Log-space penalty per second of bridge settlement delay.
    pub bridge_time_coefficient: f64,
    /// Hop budget applied when the caller does not pass one.
    pub default_max_hops: usize,
    /// Below this vertex count the auto-selecting entry point runs the
    /// Classic solver instead of BMSSP.
    pub classic_solver_threshold: usize,
    pub amm: AmmSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gas_normalizer: 1e9,
            bridge_time_coefficient: 1e-5,
            default_max_hops: 4,
            classic_solver_threshold: 50,
            amm: AmmSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Load from a TOML file, then apply `OMNIROUTE_`-prefixed environment
    /// overrides. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let defaults = Self::default();
        let config = Config::builder()
            .add_source(Config::try_from(&defaults).context("failed to seed default settings")?)
            .add_source(File::from(path).required(true))
            .add_source(
                Environment::with_prefix("OMNIROUTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read settings from {}", path.display()))?;

        let settings: Self = config
            .try_deserialize()
            .context("failed to deserialize engine settings")?;
        settings.validate()?;
        debug!(?settings, "loaded engine settings");
        Ok(settings)
    }

    /// Range checks for every knob.
    pub fn validate(&self) -> Result<()> {
        if self.gas_normalizer <= 0.0 {
            anyhow::bail!("gas_normalizer must be positive");
        }
        if self.bridge_time_coefficient < 0.0 {
            anyhow::bail!("bridge_time_coefficient must be non-negative");
        }
        if self.default_max_hops == 0 {
            anyhow::bail!("default_max_hops must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.amm.active_range_fraction)
            || self.amm.active_range_fraction == 0.0
        {
            anyhow::bail!("active_range_fraction must be in (0, 1]");
        }
        if self.amm.stable_amplification <= 0.0 {
            anyhow::bail!("stable_amplification must be positive");
        }
        if !(0.0..1.0).contains(&self.amm.max_trade_fraction) || self.amm.max_trade_fraction == 0.0
        {
            anyhow::bail!("max_trade_fraction must be in (0, 1)");
        }
        Ok(())
    }
}
