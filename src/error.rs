use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SeqFetchError {
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("no input supplied: provide a species and genes file pair, or an accessions file")]
    #[diagnostic(help("try `kira-seqfetch proteins --species sp.txt --genes genes.txt`"))]
    MissingInput,

    #[error("failed to read identifier list at {0}")]
    InputRead(PathBuf),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid taxonomy id: {0}")]
    InvalidTaxonomyId(String),

    #[error("invalid PRIDE project accession: {0}")]
    InvalidPrideAccession(String),

    #[error("species not found in taxonomy service: {0}")]
    SpeciesNotFound(String),

    #[error("Proteins API request failed: {0}")]
    ProteinsHttp(String),

    #[error("Proteins API returned status {status}: {message}")]
    ProteinsStatus { status: u16, message: String },

    #[error("PRIDE request failed: {0}")]
    PrideHttp(String),

    #[error("PRIDE returned status {status}: {message}")]
    PrideStatus { status: u16, message: String },

    #[error("PRIDE lists no download location for {0}")]
    MissingDownloadLocation(String),

    #[error("refusing to write remote file name outside the output directory: {0}")]
    UnsafeFileName(String),

    #[error("malformed FASTA payload: {0}")]
    FastaParse(String),

    #[error("invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
