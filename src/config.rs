use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::domain::BatchLimits;
use crate::error::SeqFetchError;
use crate::filter::DEFAULT_EXCLUDE_PATTERN;
use crate::proteins::DEFAULT_BASE_URL;

pub const DEFAULT_CONFIG_FILE: &str = "kira-seqfetch.json";
pub const DEFAULT_OUTPUT: &str = "uniprot_seqs.fasta";

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub species: Option<Utf8PathBuf>,
    #[serde(default)]
    pub genes: Option<Utf8PathBuf>,
    #[serde(default)]
    pub accessions: Option<Utf8PathBuf>,
    #[serde(default)]
    pub max_species: Option<usize>,
    #[serde(default)]
    pub max_genes: Option<usize>,
    #[serde(default)]
    pub max_accessions: Option<usize>,
    #[serde(default)]
    pub output: Option<Utf8PathBuf>,
    #[serde(default)]
    pub exclude_pattern: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Command-line values; any `Some` wins over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub species: Option<Utf8PathBuf>,
    pub genes: Option<Utf8PathBuf>,
    pub accessions: Option<Utf8PathBuf>,
    pub max_species: Option<usize>,
    pub max_genes: Option<usize>,
    pub max_accessions: Option<usize>,
    pub output: Option<Utf8PathBuf>,
    pub exclude_pattern: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub species: Option<Utf8PathBuf>,
    pub genes: Option<Utf8PathBuf>,
    pub accessions: Option<Utf8PathBuf>,
    pub limits: BatchLimits,
    pub output: Utf8PathBuf,
    pub exclude_pattern: String,
    pub base_url: String,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the config file. Without an explicit path a missing
    /// `kira-seqfetch.json` yields an empty config.
    pub fn load(path: Option<&str>) -> Result<Config, SeqFetchError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| SeqFetchError::ConfigRead(config_path.clone()))?;
        serde_json::from_str(&content).map_err(|err| SeqFetchError::ConfigParse(err.to_string()))
    }

    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, SeqFetchError> {
        let config = Self::load(path)?;
        Self::resolve_config(config, overrides)
    }

    pub fn resolve_config(
        config: Config,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, SeqFetchError> {
        let defaults = BatchLimits::default();
        let limits = BatchLimits {
            max_species: overrides
                .max_species
                .or(config.max_species)
                .unwrap_or(defaults.max_species),
            max_genes: overrides
                .max_genes
                .or(config.max_genes)
                .unwrap_or(defaults.max_genes),
            max_accessions: overrides
                .max_accessions
                .or(config.max_accessions)
                .unwrap_or(defaults.max_accessions),
        };
        if limits.max_species == 0 || limits.max_genes == 0 || limits.max_accessions == 0 {
            return Err(SeqFetchError::InvalidBatchSize);
        }

        Ok(ResolvedConfig {
            species: overrides.species.or(config.species),
            genes: overrides.genes.or(config.genes),
            accessions: overrides.accessions.or(config.accessions),
            limits,
            output: overrides
                .output
                .or(config.output)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            exclude_pattern: overrides
                .exclude_pattern
                .or(config.exclude_pattern)
                .unwrap_or_else(|| DEFAULT_EXCLUDE_PATTERN.to_string()),
            base_url: overrides
                .base_url
                .or(config.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let resolved =
            ConfigLoader::resolve_config(Config::default(), ConfigOverrides::default()).unwrap();
        assert_eq!(resolved.limits, BatchLimits::default());
        assert_eq!(resolved.output, Utf8PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(resolved.exclude_pattern, DEFAULT_EXCLUDE_PATTERN);
        assert!(resolved.species.is_none());
    }
}
