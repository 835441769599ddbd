use serde_json::Value;

use crate::app::{ProgressEvent, ProgressSink};
use crate::domain::TaxonomyId;
use crate::error::SeqFetchError;
use crate::proteins::ProteinsClient;

/// First `taxonomies[].taxonomyId` in a taxonomy node response. The service
/// returns the id as a number; strings are accepted too.
pub fn extract_first_taxonomy_id(raw: &Value) -> Result<Option<TaxonomyId>, SeqFetchError> {
    let first = raw
        .get("taxonomies")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.get("taxonomyId"));
    let value = match first {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => return Ok(None),
    };
    value.parse().map(Some)
}

pub struct TaxonomyResolver<'a, C: ProteinsClient> {
    client: &'a C,
}

impl<'a, C: ProteinsClient> TaxonomyResolver<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn lookup(&self, name: &str) -> Result<Option<TaxonomyId>, SeqFetchError> {
        match self.client.taxonomy_by_name(name)? {
            Some(raw) => extract_first_taxonomy_id(&raw),
            None => Ok(None),
        }
    }

    /// Resolves every name in order. Any failure, including a name with no
    /// match, aborts the whole resolution.
    pub fn resolve_all(
        &self,
        species: &[String],
        sink: &dyn ProgressSink,
    ) -> Result<Vec<TaxonomyId>, SeqFetchError> {
        let mut ids = Vec::with_capacity(species.len());
        for name in species {
            let id = self
                .lookup(name)?
                .ok_or_else(|| SeqFetchError::SpeciesNotFound(name.clone()))?;
            tracing::info!(species = %name, taxid = %id, "resolved species");
            sink.event(ProgressEvent {
                message: format!("{name}: {id}"),
                elapsed: None,
            });
            ids.push(id);
        }
        Ok(ids)
    }
}
