use crate::core::board::{DEFAULT_MAX_FLUCTUATION_PCT, PairSeed, PriceBoard, default_seeds};
use crate::core::currency::Currency;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

fn default_refresh_interval_ms() -> u64 {
    1000
}

fn default_max_fluctuation_pct() -> f64 {
    DEFAULT_MAX_FLUCTUATION_PCT
}

fn default_source() -> Currency {
    Currency::Usd
}

fn default_target() -> Currency {
    Currency::Inr
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_max_fluctuation_pct")]
    pub max_fluctuation_pct: f64,
    /// Fixed RNG seed for reproducible price movement.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_source")]
    pub source: Currency,
    #[serde(default = "default_target")]
    pub target: Currency,
    #[serde(default = "default_seeds")]
    pub pairs: Vec<PairSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            max_fluctuation_pct: default_max_fluctuation_pct(),
            seed: None,
            source: default_source(),
            target: default_target(),
            pairs: default_seeds(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// none has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_ms == 0 {
            bail!("refresh_interval_ms must be greater than zero");
        }
        if !(0.0..100.0).contains(&self.max_fluctuation_pct) {
            bail!(
                "max_fluctuation_pct must be in [0, 100), got {}",
                self.max_fluctuation_pct
            );
        }
        PriceBoard::from_seeds(&self.pairs)?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn board(&self) -> Result<PriceBoard> {
        PriceBoard::from_seeds(&self.pairs)
    }

    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn price_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
