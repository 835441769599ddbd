use std::time::Instant;

use crate::app::{ProgressEvent, ProgressSink};
use crate::chunk::{batch_count, chunk};
use crate::domain::TaxonomyId;
use crate::error::SeqFetchError;
use crate::fasta::SequenceRecord;
use crate::fetch::BatchFetcher;
use crate::filter::DescriptionFilter;
use crate::proteins::{ProteinQuery, ProteinsClient};

/// Every taxonomy batch is paired with every gene batch, taxonomy batches
/// outermost, so `T * G` queries are issued. Results are filtered before return.
pub fn fetch_by_species_and_genes<C: ProteinsClient>(
    client: &C,
    taxids: &[TaxonomyId],
    genes: &[String],
    max_species: usize,
    max_genes: usize,
    filter: &DescriptionFilter,
    sink: &dyn ProgressSink,
) -> Result<Vec<SequenceRecord>, SeqFetchError> {
    let fetcher = BatchFetcher::new(client);
    let total = batch_count(taxids.len(), max_species) * batch_count(genes.len(), max_genes);
    let mut records = Vec::new();
    let mut issued = 0usize;

    for tax_batch in chunk(taxids, max_species)? {
        for gene_batch in chunk(genes, max_genes)? {
            issued += 1;
            let started = Instant::now();
            let batch = fetcher.fetch(&ProteinQuery::gene_taxon(gene_batch, tax_batch))?;
            tracing::info!(
                batch = issued,
                total,
                records = batch.len(),
                "species/gene batch fetched"
            );
            sink.event(ProgressEvent {
                message: format!(
                    "phase=Fetch; species/gene batch {issued}/{total}: {} records",
                    batch.len()
                ),
                elapsed: Some(started.elapsed()),
            });
            records.extend(batch);
        }
    }

    let fetched = records.len();
    let kept = filter.apply(records);
    tracing::info!(fetched, kept = kept.len(), "filtered species/gene records");
    Ok(kept)
}

/// Accession batches in order; results are not filtered.
pub fn fetch_by_accessions<C: ProteinsClient>(
    client: &C,
    accessions: &[String],
    max_accessions: usize,
    sink: &dyn ProgressSink,
) -> Result<Vec<SequenceRecord>, SeqFetchError> {
    let fetcher = BatchFetcher::new(client);
    let total = batch_count(accessions.len(), max_accessions);
    let mut records = Vec::new();

    for (index, acc_batch) in chunk(accessions, max_accessions)?.enumerate() {
        let started = Instant::now();
        let batch = fetcher.fetch(&ProteinQuery::accessions(acc_batch))?;
        tracing::info!(
            batch = index + 1,
            total,
            records = batch.len(),
            "accession batch fetched"
        );
        sink.event(ProgressEvent {
            message: format!(
                "phase=Fetch; accession batch {}/{total}: {} records",
                index + 1,
                batch.len()
            ),
            elapsed: Some(started.elapsed()),
        });
        records.extend(batch);
    }

    Ok(records)
}

/// Species/gene records first, then accession records. No deduplication.
pub fn merge(
    mut species_records: Vec<SequenceRecord>,
    accession_records: Vec<SequenceRecord>,
) -> Vec<SequenceRecord> {
    species_records.extend(accession_records);
    species_records
}
