use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeqFetchError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyId(String);

impl TaxonomyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxonomyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaxonomyId {
    type Err = SeqFetchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid = !normalized.is_empty() && normalized.chars().all(|ch| ch.is_ascii_digit());
        if !is_valid {
            return Err(SeqFetchError::InvalidTaxonomyId(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrideAccession(String);

impl PrideAccession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrideAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PrideAccession {
    type Err = SeqFetchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        let digits = normalized.strip_prefix("PXD").unwrap_or("");
        let is_valid = !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit());
        if !is_valid {
            return Err(SeqFetchError::InvalidPrideAccession(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// Per-request caps on how many identifiers go into one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchLimits {
    pub max_species: usize,
    pub max_genes: usize,
    pub max_accessions: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_species: 20,
            max_genes: 20,
            max_accessions: 100,
        }
    }
}

/// One identifier per line; trailing whitespace is stripped and blank lines are skipped.
pub fn parse_identifier_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

pub fn read_identifier_list(path: &Path) -> Result<Vec<String>, SeqFetchError> {
    let content =
        fs::read_to_string(path).map_err(|_| SeqFetchError::InputRead(path.to_path_buf()))?;
    Ok(parse_identifier_list(&content))
}
