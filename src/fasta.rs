use std::io::{self, Write};

use serde::Serialize;

use crate::error::SeqFetchError;

const LINE_WIDTH: usize = 60;

/// One parsed FASTA entry. `description` is the whole header line without the
/// leading `>` and trailing whitespace; `id` is its first token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(description: impl Into<String>, sequence: impl Into<String>) -> Self {
        let description = description.into();
        let id = description
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            id,
            description,
            sequence: sequence.into(),
        }
    }
}

pub fn parse_fasta(text: &str) -> Result<Vec<SequenceRecord>, SeqFetchError> {
    let mut records = Vec::new();
    let mut header: Option<String> = None;
    let mut sequence = String::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(done) = header.take() {
                records.push(SequenceRecord::new(done, std::mem::take(&mut sequence)));
            }
            header = Some(rest.to_string());
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if header.is_none() {
            return Err(SeqFetchError::FastaParse(format!(
                "line {}: sequence data before first header",
                lineno + 1
            )));
        }
        sequence.extend(line.chars().filter(|ch| !ch.is_whitespace()));
    }

    if let Some(done) = header {
        records.push(SequenceRecord::new(done, sequence));
    }
    Ok(records)
}

pub fn write_fasta<W: Write>(mut writer: W, records: &[SequenceRecord]) -> io::Result<()> {
    for record in records {
        writeln!(writer, ">{}", record.description)?;
        let bytes = record.sequence.as_bytes();
        for line in bytes.chunks(LINE_WIDTH) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}
