use regex::{Regex, RegexBuilder};

use crate::error::SeqFetchError;
use crate::fasta::SequenceRecord;

/// Matches "fragment" or "isoform" anywhere in a description.
pub const DEFAULT_EXCLUDE_PATTERN: &str = "(fragment)|(isoform)";

#[derive(Debug, Clone)]
pub struct DescriptionFilter {
    pattern: Regex,
}

impl DescriptionFilter {
    pub fn new(pattern: &str) -> Result<Self, SeqFetchError> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| SeqFetchError::InvalidPattern(err.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_excluded(&self, record: &SequenceRecord) -> bool {
        self.pattern.is_match(&record.description)
    }

    pub fn apply(&self, records: Vec<SequenceRecord>) -> Vec<SequenceRecord> {
        records
            .into_iter()
            .filter(|record| !self.is_excluded(record))
            .collect()
    }
}

impl Default for DescriptionFilter {
    fn default() -> Self {
        Self {
            pattern: RegexBuilder::new(DEFAULT_EXCLUDE_PATTERN)
                .case_insensitive(true)
                .build()
                .unwrap(),
        }
    }
}
