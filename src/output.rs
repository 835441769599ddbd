use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::app::{FetchSummary, PrideSummary, ProgressEvent, ProgressSink};
use crate::error::SeqFetchError;
use crate::fasta::{SequenceRecord, write_fasta};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_fetch(result: &FetchSummary) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_pride(result: &PrideSummary) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Progress lines on stderr for interactive runs.
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn print_fetch(result: &FetchSummary) {
        eprintln!(
            "Wrote {} sequences ({} species/gene, {} accession) to {} in {} requests",
            result.total_records,
            result.species_records,
            result.accession_records,
            result.output,
            result.requests
        );
    }

    pub fn print_pride(result: &PrideSummary) {
        eprintln!(
            "{}: {} sample files, {} blank/wash files, {} downloaded",
            result.accession,
            result.samples.len(),
            result.blanks.len(),
            result.downloaded.len()
        );
    }
}

impl ProgressSink for ConsoleOutput {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => eprintln!("{} ({:.1}s)", event.message, elapsed.as_secs_f64()),
            None => eprintln!("{}", event.message),
        }
    }
}

/// Writes through a temp file in the destination directory and renames it into
/// place, so nothing appears at `destination` unless `write` succeeds.
pub fn persist_atomic<F>(destination: &Path, write: F) -> Result<(), SeqFetchError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| SeqFetchError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix("kira-seqfetch")
        .tempfile_in(parent)
        .map_err(|err| SeqFetchError::Filesystem(err.to_string()))?;
    write(temp.as_file_mut()).map_err(|err| SeqFetchError::Filesystem(err.to_string()))?;
    temp.persist(destination)
        .map_err(|err| SeqFetchError::Filesystem(err.to_string()))?;
    Ok(())
}

pub fn write_fasta_file(destination: &Path, records: &[SequenceRecord]) -> Result<(), SeqFetchError> {
    persist_atomic(destination, |file| write_fasta(BufWriter::new(file), records))
}
