use std::sync::Mutex;

use assert_matches::assert_matches;
use serde_json::{Value, json};

use kira_seqfetch::app::{ProgressEvent, ProgressSink};
use kira_seqfetch::error::SeqFetchError;
use kira_seqfetch::proteins::{ProteinQuery, ProteinsClient};
use kira_seqfetch::taxonomy::{TaxonomyResolver, extract_first_taxonomy_id};

struct NoopSink;

impl ProgressSink for NoopSink {
    fn event(&self, _event: ProgressEvent) {}
}

/// Replies with a fixed body per species; `None` stands for a 404.
struct ScriptedTaxonomy {
    replies: Vec<(&'static str, Result<Option<Value>, u16>)>,
    calls: Mutex<Vec<String>>,
}

impl ProteinsClient for ScriptedTaxonomy {
    fn taxonomy_by_name(&self, name: &str) -> Result<Option<Value>, SeqFetchError> {
        self.calls.lock().unwrap().push(name.to_string());
        let reply = self
            .replies
            .iter()
            .find(|(species, _)| *species == name)
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Ok(None));
        reply.map_err(|status| SeqFetchError::ProteinsStatus {
            status,
            message: "error".to_string(),
        })
    }

    fn proteins_fasta(&self, _query: &ProteinQuery) -> Result<String, SeqFetchError> {
        Err(SeqFetchError::ProteinsHttp("not used".to_string()))
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn string_taxonomy_id_is_accepted() {
    let raw = json!({"taxonomies": [{"taxonomyId": "10090"}]});
    assert_eq!(extract_first_taxonomy_id(&raw).unwrap().unwrap().as_str(), "10090");
}

#[test]
fn first_match_is_authoritative() {
    let raw = json!({"taxonomies": [{"taxonomyId": 9606}, {"taxonomyId": 63221}]});
    assert_eq!(extract_first_taxonomy_id(&raw).unwrap().unwrap().as_str(), "9606");
}

#[test]
fn resolves_in_input_order() {
    let client = ScriptedTaxonomy {
        replies: vec![
            ("Mus musculus", Ok(Some(json!({"taxonomies": [{"taxonomyId": 10090}]})))),
            ("Homo sapiens", Ok(Some(json!({"taxonomies": [{"taxonomyId": 9606}]})))),
        ],
        calls: Mutex::new(Vec::new()),
    };

    let ids = TaxonomyResolver::new(&client)
        .resolve_all(&names(&["Homo sapiens", "Mus musculus", "Homo sapiens"]), &NoopSink)
        .unwrap();

    let ids = ids.iter().map(|id| id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["9606", "10090", "9606"]);
    assert_eq!(client.calls.lock().unwrap().len(), 3);
}

#[test]
fn not_found_reply_names_the_species() {
    let client = ScriptedTaxonomy {
        replies: vec![("Homo sapiens", Ok(Some(json!({"taxonomies": [{"taxonomyId": 9606}]}))))],
        calls: Mutex::new(Vec::new()),
    };

    let err = TaxonomyResolver::new(&client)
        .resolve_all(&names(&["Homo sapiens", "Draco volans", "Mus musculus"]), &NoopSink)
        .unwrap_err();

    assert_matches!(err, SeqFetchError::SpeciesNotFound(name) if name == "Draco volans");
    assert_eq!(client.calls.lock().unwrap().len(), 2);
}

#[test]
fn empty_match_list_names_the_species() {
    let client = ScriptedTaxonomy {
        replies: vec![("Homo sapienz", Ok(Some(json!({"taxonomies": []}))))],
        calls: Mutex::new(Vec::new()),
    };

    let err = TaxonomyResolver::new(&client)
        .resolve_all(&names(&["Homo sapienz"]), &NoopSink)
        .unwrap_err();

    assert_matches!(err, SeqFetchError::SpeciesNotFound(_));
}

#[test]
fn service_error_aborts_resolution() {
    let client = ScriptedTaxonomy {
        replies: vec![("Homo sapiens", Err(500))],
        calls: Mutex::new(Vec::new()),
    };

    let err = TaxonomyResolver::new(&client)
        .resolve_all(&names(&["Homo sapiens", "Mus musculus"]), &NoopSink)
        .unwrap_err();

    assert_matches!(err, SeqFetchError::ProteinsStatus { status: 500, .. });
    assert_eq!(client.calls.lock().unwrap().len(), 1);
}
