//! Configuration loading for the royalty core
//!
//! Resolution priority order:
//! 1. Explicit path argument (highest priority)
//! 2. `ROYALTY_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/royalty-core/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is not an error: the core starts on compiled
//! defaults, logging which source it resolved.

use crate::split::NegativeSharePolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "ROYALTY_CONFIG";

/// Tunable business rules for the core.
///
/// Every field has a compiled default matching the observed behavior of the
/// back office, so a partial TOML file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Artist share applied when an artist has no contract at all.
    pub default_artist_share_pct: u8,

    /// Window (in days before `end_date`) in which a contract counts as
    /// "expiring soon".
    pub expiring_soon_days: i64,

    /// Whether a fixed fee larger than an artist's revenue leaves the artist
    /// share negative (a debt) or clamps it to zero.
    pub negative_share_policy: NegativeSharePolicy,

    /// Whether the contract book rejects a second contract of the same
    /// service type with an overlapping validity window for one artist,
    /// or merely warns.
    pub enforce_service_type_uniqueness: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            default_artist_share_pct: crate::split::DEFAULT_ARTIST_SHARE_PCT,
            expiring_soon_days: 30,
            negative_share_policy: NegativeSharePolicy::Allow,
            enforce_service_type_uniqueness: true,
        }
    }
}

impl CoreConfig {
    /// Resolve and load configuration following the priority order above.
    ///
    /// An explicit path or env-var path must exist and parse; the default
    /// location is optional and falls through to compiled defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // Priority 1: explicit path argument
        if let Some(path) = explicit_path {
            info!("Loading config from explicit path: {}", path.display());
            return Self::from_file(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path);
            return Self::from_file(Path::new(&path));
        }

        // Priority 3: platform config directory
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                info!("Loading config from default location: {}", path.display());
                return Self::from_file(&path);
            }
        }

        // Priority 4: compiled defaults
        info!("No config file found, using compiled defaults");
        Ok(CoreConfig::default())
    }

    /// Parse a TOML config file, then sanity-check the loaded values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: CoreConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.sanitize();
        Ok(config)
    }

    /// `<config_dir>/royalty-core/config.toml` for the current platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("royalty-core").join("config.toml"))
    }

    /// Clamp out-of-range values back into their documented domains.
    fn sanitize(&mut self) {
        if self.default_artist_share_pct > 100 {
            warn!(
                "default_artist_share_pct {} out of range, clamping to 100",
                self.default_artist_share_pct
            );
            self.default_artist_share_pct = 100;
        }
        if self.expiring_soon_days < 0 {
            warn!(
                "expiring_soon_days {} is negative, resetting to 0",
                self.expiring_soon_days
            );
            self.expiring_soon_days = 0;
        }
    }
}
