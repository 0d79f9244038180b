use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use stepfree_core::bench::BenchmarkConfig;
use stepfree_core::model::{MobilityProfile, ProfileCatalog};
use tracing::info;

/// Optional TOML configuration file.
///
/// ```toml
/// [benchmark]
/// pairs = 50
/// seed = 42
///
/// [[profiles]]
/// name = "cane_user"
/// no_ramp_penalty = 2.0
/// stairs_penalty = 3.0
/// incline_penalty = 1.5
/// no_crossing_penalty = 1.2
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub benchmark: BenchmarkConfig,
    /// Added to the built-in catalogue, replacing built-ins with the same name
    pub profiles: Vec<MobilityProfile>,
}

impl AppConfig {
    /// Defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!(
            "Loaded config {} ({} extra profiles)",
            path.display(),
            config.profiles.len()
        );
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn catalog(&self) -> Result<ProfileCatalog> {
        let mut catalog = ProfileCatalog::builtin();
        for profile in &self.profiles {
            catalog
                .insert(profile.clone())
                .with_context(|| format!("Invalid profile '{}'", profile.name))?;
        }
        Ok(catalog)
    }
}
