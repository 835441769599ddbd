use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::domain::TaxonomyId;
use crate::error::SeqFetchError;

pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/proteins/api";

/// Results requested per query. The API is not paged further.
pub const PAGE_SIZE: u32 = 100;

/// `isoform=2` asks for canonical and isoform sequences together.
pub const ISOFORM_MODE: &str = "2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProteinQuery {
    GeneTaxon {
        genes: Vec<String>,
        taxids: Vec<TaxonomyId>,
    },
    Accessions(Vec<String>),
}

impl ProteinQuery {
    pub fn gene_taxon(genes: &[String], taxids: &[TaxonomyId]) -> Self {
        Self::GeneTaxon {
            genes: genes.to_vec(),
            taxids: taxids.to_vec(),
        }
    }

    pub fn accessions(accessions: &[String]) -> Self {
        Self::Accessions(accessions.to_vec())
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("offset", "0".to_string()), ("size", PAGE_SIZE.to_string())];
        match self {
            ProteinQuery::GeneTaxon { genes, taxids } => {
                params.push(("isoform", ISOFORM_MODE.to_string()));
                params.push(("exact_gene", genes.join(",")));
                params.push((
                    "taxid",
                    taxids
                        .iter()
                        .map(TaxonomyId::as_str)
                        .collect::<Vec<_>>()
                        .join(","),
                ));
            }
            ProteinQuery::Accessions(accessions) => {
                params.push(("accession", accessions.join(",")));
            }
        }
        params
    }
}

pub trait ProteinsClient: Send + Sync {
    /// Raw taxonomy node lookup by exact scientific name. `None` when the
    /// service reports the name as unknown.
    fn taxonomy_by_name(&self, name: &str) -> Result<Option<Value>, SeqFetchError>;

    /// Raw FASTA body for one protein query.
    fn proteins_fasta(&self, query: &ProteinQuery) -> Result<String, SeqFetchError>;
}

impl<T: ProteinsClient + ?Sized> ProteinsClient for &T {
    fn taxonomy_by_name(&self, name: &str) -> Result<Option<Value>, SeqFetchError> {
        (**self).taxonomy_by_name(name)
    }

    fn proteins_fasta(&self, query: &ProteinQuery) -> Result<String, SeqFetchError> {
        (**self).proteins_fasta(query)
    }
}

#[derive(Clone)]
pub struct ProteinsHttpClient {
    client: Client,
    base_url: String,
}

impl ProteinsHttpClient {
    pub fn new() -> Result<Self, SeqFetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, SeqFetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("kira-seqfetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SeqFetchError::ProteinsHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| SeqFetchError::ProteinsHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn taxonomy_url(&self, name: &str) -> Result<Url, SeqFetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| SeqFetchError::ProteinsHttp(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| SeqFetchError::ProteinsHttp(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["taxonomy", "name", name, "node"]);
        Ok(url)
    }

    fn proteins_url(&self) -> String {
        format!("{}/proteins", self.base_url)
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
            .unwrap_or_else(|_| "Proteins API request failed".to_string());
        Err(SeqFetchError::ProteinsStatus { status, message })
    }
}

impl ProteinsClient for ProteinsHttpClient {
    fn taxonomy_by_name(&self, name: &str) -> Result<Option<Value>, SeqFetchError> {
        let url = self.taxonomy_url(name)?;
        tracing::debug!(%url, "taxonomy lookup");
        let response = self
            .client
            .get(url)
            .query(&[
                ("pageNumber", "1"),
                ("pageSize", "1"),
                ("searchType", "EQUALSTO"),
                ("fieldName", "SCIENTIFICNAME"),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| SeqFetchError::ProteinsHttp(err.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::handle_status(response)?;
        let body: Value = response
            .json()
            .map_err(|err| SeqFetchError::ProteinsHttp(err.to_string()))?;
        Ok(Some(body))
    }

    fn proteins_fasta(&self, query: &ProteinQuery) -> Result<String, SeqFetchError> {
        let url = self.proteins_url();
        let params = query.params();
        tracing::debug!(url = %url, ?params, "protein query");
        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(ACCEPT, "text/x-fasta")
            .send()
            .map_err(|err| SeqFetchError::ProteinsHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response
            .text()
            .map_err(|err| SeqFetchError::ProteinsHttp(err.to_string()))
    }
}
