use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::chunk::batch_count;
use crate::config::ResolvedConfig;
use crate::domain::{BatchLimits, PrideAccession, TaxonomyId, read_identifier_list};
use crate::error::SeqFetchError;
use crate::fasta::SequenceRecord;
use crate::filter::DescriptionFilter;
use crate::output::write_fasta_file;
use crate::pride::{PrideClient, PrideFile, extract_raw_files, partition_blank_runs};
use crate::proteins::ProteinsClient;
use crate::retrieve::{fetch_by_accessions, fetch_by_species_and_genes, merge};
use crate::taxonomy::TaxonomyResolver;

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Identifier lists for one retrieval run. The species/gene path runs only
/// when both lists are present and non-empty.
#[derive(Debug, Clone, Default)]
pub struct RetrievalInputs {
    pub species: Option<Vec<String>>,
    pub genes: Option<Vec<String>>,
    pub accessions: Option<Vec<String>>,
}

impl RetrievalInputs {
    pub fn read(config: &ResolvedConfig) -> Result<Self, SeqFetchError> {
        let read = |path: &Option<Utf8PathBuf>| {
            path.as_ref()
                .map(|path| read_identifier_list(path.as_std_path()))
                .transpose()
        };
        Ok(Self {
            species: read(&config.species)?,
            genes: read(&config.genes)?,
            accessions: read(&config.accessions)?,
        })
    }

    fn species_and_genes(&self) -> Option<(&[String], &[String])> {
        match (&self.species, &self.genes) {
            (Some(species), Some(genes)) if !species.is_empty() && !genes.is_empty() => {
                Some((species.as_slice(), genes.as_slice()))
            }
            _ => None,
        }
    }

    fn accession_list(&self) -> Option<&[String]> {
        self.accessions
            .as_deref()
            .filter(|accessions| !accessions.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Retrieval {
    pub taxids: Vec<TaxonomyId>,
    pub species_records: usize,
    pub accession_records: usize,
    pub requests: usize,
    pub records: Vec<SequenceRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchSummary {
    pub output: String,
    pub taxids: Vec<String>,
    pub species_records: usize,
    pub accession_records: usize,
    pub total_records: usize,
    pub requests: usize,
    pub finished_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrideSummary {
    pub accession: String,
    pub samples: Vec<PrideFile>,
    pub blanks: Vec<PrideFile>,
    pub downloaded: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PrideOptions {
    pub output_dir: Utf8PathBuf,
    pub include_blanks: bool,
    pub list_only: bool,
}

#[derive(Clone)]
pub struct App<C: ProteinsClient, P: PrideClient> {
    proteins: C,
    pride: P,
}

impl<C: ProteinsClient, P: PrideClient> App<C, P> {
    pub fn new(proteins: C, pride: P) -> Self {
        Self { proteins, pride }
    }

    /// Resolves species, runs both retrieval paths and merges them. The first
    /// failed request aborts the run and nothing accumulated so far is kept.
    pub fn retrieve(
        &self,
        inputs: &RetrievalInputs,
        limits: BatchLimits,
        filter: &DescriptionFilter,
        sink: &dyn ProgressSink,
    ) -> Result<Retrieval, SeqFetchError> {
        let species_and_genes = inputs.species_and_genes();
        let accessions = inputs.accession_list();
        if species_and_genes.is_none() && accessions.is_none() {
            return Err(SeqFetchError::MissingInput);
        }

        let mut taxids = Vec::new();
        let mut requests = 0usize;
        let mut species_records = Vec::new();
        if let Some((species, genes)) = species_and_genes {
            sink.event(ProgressEvent {
                message: format!("phase=Resolve; {} species", species.len()),
                elapsed: None,
            });
            taxids = TaxonomyResolver::new(&self.proteins).resolve_all(species, sink)?;
            requests += taxids.len();
            species_records = fetch_by_species_and_genes(
                &self.proteins,
                &taxids,
                genes,
                limits.max_species,
                limits.max_genes,
                filter,
                sink,
            )?;
            requests += batch_count(taxids.len(), limits.max_species)
                * batch_count(genes.len(), limits.max_genes);
        }

        let mut accession_records = Vec::new();
        if let Some(accessions) = accessions {
            accession_records =
                fetch_by_accessions(&self.proteins, accessions, limits.max_accessions, sink)?;
            requests += batch_count(accessions.len(), limits.max_accessions);
        }

        let species_count = species_records.len();
        let accession_count = accession_records.len();
        Ok(Retrieval {
            taxids,
            species_records: species_count,
            accession_records: accession_count,
            requests,
            records: merge(species_records, accession_records),
        })
    }

    /// Reads the identifier lists, retrieves and writes the FASTA output.
    pub fn fetch(
        &self,
        config: &ResolvedConfig,
        sink: &dyn ProgressSink,
    ) -> Result<FetchSummary, SeqFetchError> {
        let started = Instant::now();
        let inputs = RetrievalInputs::read(config)?;
        let filter = DescriptionFilter::new(&config.exclude_pattern)?;
        let retrieval = self.retrieve(&inputs, config.limits, &filter, sink)?;

        sink.event(ProgressEvent {
            message: format!("phase=Write; writing FASTA file in {}", config.output),
            elapsed: None,
        });
        write_fasta_file(config.output.as_std_path(), &retrieval.records)?;
        sink.event(ProgressEvent {
            message: format!("phase=Done; {} sequences", retrieval.records.len()),
            elapsed: Some(started.elapsed()),
        });

        Ok(FetchSummary {
            output: config.output.to_string(),
            taxids: retrieval.taxids.iter().map(|id| id.to_string()).collect(),
            species_records: retrieval.species_records,
            accession_records: retrieval.accession_records,
            total_records: retrieval.records.len(),
            requests: retrieval.requests,
            finished_at: iso_timestamp(),
        })
    }

    /// Lists raw files of a PRIDE project and downloads the sample runs (and
    /// blank/wash runs when asked) one after another. A file without a download
    /// location or with a non-bare name fails the run before any download.
    pub fn pride(
        &self,
        accession: &PrideAccession,
        options: &PrideOptions,
        sink: &dyn ProgressSink,
    ) -> Result<PrideSummary, SeqFetchError> {
        sink.event(ProgressEvent {
            message: format!("phase=Resolve; listing raw files of {accession}"),
            elapsed: None,
        });
        let raw = self.pride.project_files(accession)?;
        let (samples, blanks) = partition_blank_runs(extract_raw_files(&raw));

        let mut downloaded = Vec::new();
        if !options.list_only {
            let targets = samples
                .iter()
                .chain(blanks.iter().filter(|_| options.include_blanks))
                .map(|file| download_target(file, &options.output_dir))
                .collect::<Result<Vec<_>, _>>()?;
            for (file, url, destination) in targets {
                let started = Instant::now();
                sink.event(ProgressEvent {
                    message: format!("phase=Download; {}", file.file_name),
                    elapsed: None,
                });
                self.pride.download_url(url, destination.as_std_path())?;
                sink.event(ProgressEvent {
                    message: format!("phase=Download; {} complete", file.file_name),
                    elapsed: Some(started.elapsed()),
                });
                downloaded.push(destination.to_string());
            }
        }

        Ok(PrideSummary {
            accession: accession.to_string(),
            samples,
            blanks,
            downloaded,
        })
    }
}

/// Every requested file needs a location and a bare file name before anything
/// is fetched.
fn download_target<'f>(
    file: &'f PrideFile,
    output_dir: &Utf8Path,
) -> Result<(&'f PrideFile, &'f str, Utf8PathBuf), SeqFetchError> {
    let url = file
        .download_url
        .as_deref()
        .ok_or_else(|| SeqFetchError::MissingDownloadLocation(file.file_name.clone()))?;
    let name = file.file_name.as_str();
    if name.contains(['/', '\\']) || Utf8Path::new(name).file_name() != Some(name) {
        return Err(SeqFetchError::UnsafeFileName(file.file_name.clone()));
    }
    Ok((file, url, output_dir.join(name)))
}

fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
