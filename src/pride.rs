use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value;

use crate::domain::PrideAccession;
use crate::error::SeqFetchError;
use crate::output::persist_atomic;

pub const DEFAULT_PRIDE_BASE_URL: &str = "https://www.ebi.ac.uk/pride/ws/archive/v2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrideFile {
    pub file_name: String,
    pub category: String,
    pub download_url: Option<String>,
    pub size: Option<u64>,
}

impl PrideFile {
    /// Blank and wash runs are instrument controls, not samples.
    pub fn is_blank_run(&self) -> bool {
        self.file_name.contains("blank") || self.file_name.contains("wash")
    }
}

pub trait PrideClient: Send + Sync {
    fn project_files(&self, accession: &PrideAccession) -> Result<Value, SeqFetchError>;
    fn download_url(&self, url: &str, destination: &Path) -> Result<(), SeqFetchError>;
}

impl<T: PrideClient + ?Sized> PrideClient for &T {
    fn project_files(&self, accession: &PrideAccession) -> Result<Value, SeqFetchError> {
        (**self).project_files(accession)
    }

    fn download_url(&self, url: &str, destination: &Path) -> Result<(), SeqFetchError> {
        (**self).download_url(url, destination)
    }
}

#[derive(Clone)]
pub struct PrideHttpClient {
    client: Client,
    base_url: String,
}

impl PrideHttpClient {
    pub fn new() -> Result<Self, SeqFetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("kira-seqfetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SeqFetchError::PrideHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| SeqFetchError::PrideHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: DEFAULT_PRIDE_BASE_URL.to_string(),
        })
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, SeqFetchError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "PRIDE request failed".to_string());
        Err(SeqFetchError::PrideStatus { status, message })
    }
}

impl PrideClient for PrideHttpClient {
    fn project_files(&self, accession: &PrideAccession) -> Result<Value, SeqFetchError> {
        let url = format!("{}/files/byProject", self.base_url);
        tracing::debug!(%url, accession = %accession, "listing project files");
        let response = self
            .client
            .get(&url)
            .query(&[("accession", accession.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| SeqFetchError::PrideHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response
            .json()
            .map_err(|err| SeqFetchError::PrideHttp(err.to_string()))
    }

    fn download_url(&self, url: &str, destination: &Path) -> Result<(), SeqFetchError> {
        let url = normalize_url(url);
        tracing::debug!(%url, "downloading raw file");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| SeqFetchError::PrideHttp(err.to_string()))?;
        let mut response = Self::handle_status(response)?;
        persist_atomic(destination, |file| {
            std::io::copy(&mut response, file).map(|_| ())
        })
    }
}

/// The archive advertises FTP locations; the same tree is served over HTTPS.
pub fn normalize_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("ftp://") {
        return format!("https://{rest}");
    }
    url.to_string()
}

pub fn extract_raw_files(raw: &Value) -> Vec<PrideFile> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let file_name = entry.get("fileName").and_then(|v| v.as_str())?;
            let category = entry
                .get("fileCategory")
                .and_then(|v| v.get("value"))
                .and_then(|v| v.as_str())
                .unwrap_or("");
            if category != "RAW" {
                return None;
            }
            let download_url = entry
                .get("publicFileLocations")
                .and_then(|v| v.as_array())
                .and_then(|locations| {
                    locations.iter().find(|loc| {
                        loc.get("name").and_then(|v| v.as_str()) == Some("FTP Protocol")
                    })
                })
                .and_then(|loc| loc.get("value"))
                .and_then(|v| v.as_str())
                .map(normalize_url);
            Some(PrideFile {
                file_name: file_name.to_string(),
                category: category.to_string(),
                download_url,
                size: entry.get("fileSizeBytes").and_then(|v| v.as_u64()),
            })
        })
        .collect()
}

/// Splits into (samples, blank/wash runs), each keeping input order.
pub fn partition_blank_runs(files: Vec<PrideFile>) -> (Vec<PrideFile>, Vec<PrideFile>) {
    let (blanks, samples): (Vec<_>, Vec<_>) =
        files.into_iter().partition(PrideFile::is_blank_run);
    (samples, blanks)
}
