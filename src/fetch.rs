use crate::error::SeqFetchError;
use crate::fasta::{SequenceRecord, parse_fasta};
use crate::proteins::{ProteinQuery, ProteinsClient};

/// Issues one query and parses its body. No paging beyond the query's own
/// `size` parameter.
pub struct BatchFetcher<'a, C: ProteinsClient> {
    client: &'a C,
}

impl<'a, C: ProteinsClient> BatchFetcher<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn fetch(&self, query: &ProteinQuery) -> Result<Vec<SequenceRecord>, SeqFetchError> {
        let body = self.client.proteins_fasta(query)?;
        let records = parse_fasta(&body)?;
        tracing::debug!(records = records.len(), "parsed batch");
        Ok(records)
    }
}
