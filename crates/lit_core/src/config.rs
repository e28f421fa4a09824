use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// FundingRules
// ---------------------------------------------------------------------------

/// Domain limits applied when opening a new trading account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingRules {
    /// Smallest amount (sats) the auctioneer accepts for a new account.
    pub account_minimum_sats: u64,
    /// Expected number of blocks mined per day.
    pub blocks_per_day: u32,
    /// Longest allowed account lifetime, in days.
    pub max_expiry_days: u32,
}

impl Default for FundingRules {
    fn default() -> Self {
        Self {
            account_minimum_sats: 100_000,
            blocks_per_day: 144,
            max_expiry_days: 365,
        }
    }
}

impl FundingRules {
    /// Shortest allowed expiration window: one day of blocks.
    pub fn min_expire_blocks(&self) -> u32 {
        self.blocks_per_day
    }

    pub fn max_expire_blocks(&self) -> u32 {
        self.blocks_per_day.saturating_mul(self.max_expiry_days)
    }

    /// Replaces zero limits with the defaults. A zero would disable the
    /// amount rule or reject every expiration.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut rules = self;
        if rules.account_minimum_sats == 0 {
            warn!("funding.account_minimum_sats is 0, using {}", defaults.account_minimum_sats);
            rules.account_minimum_sats = defaults.account_minimum_sats;
        }
        if rules.blocks_per_day == 0 {
            warn!("funding.blocks_per_day is 0, using {}", defaults.blocks_per_day);
            rules.blocks_per_day = defaults.blocks_per_day;
        }
        if rules.max_expiry_days == 0 {
            warn!("funding.max_expiry_days is 0, using {}", defaults.max_expiry_days);
            rules.max_expiry_days = defaults.max_expiry_days;
        }
        rules
    }
}

// ---------------------------------------------------------------------------
// LitConfig
// ---------------------------------------------------------------------------

/// Application configuration stored at `~/.lit/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LitConfig {
    pub log_level: String,
    pub language: String,
    pub funding: FundingRules,
}

impl Default for LitConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            language: "en-US".into(),
            funding: FundingRules::default(),
        }
    }
}

impl LitConfig {
    /// Returns the base config directory: `~/.lit/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".lit"))
    }

    /// Returns the config file path: `~/.lit/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.lit/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        for dir in [Self::base_dir()?, Self::logs_dir()?] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from disk, or creates default if missing.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load config from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let mut config: Self =
                serde_json::from_str(&content).with_context(|| "Failed to parse config.json")?;
            config.funding = config.funding.sanitized();
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Saves config to `~/.lit/config.json`.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
