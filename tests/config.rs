use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use kira_seqfetch::config::{Config, ConfigLoader, ConfigOverrides, DEFAULT_OUTPUT};
use kira_seqfetch::domain::BatchLimits;
use kira_seqfetch::error::SeqFetchError;
use kira_seqfetch::proteins::DEFAULT_BASE_URL;

#[test]
fn parse_config_file_fields() {
    let config: Config = serde_json::from_str(
        r#"{
            "species": "lists/species.txt",
            "genes": "lists/genes.txt",
            "max_genes": 5,
            "exclude_pattern": "fragment"
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve_config(config, ConfigOverrides::default()).unwrap();
    assert_eq!(resolved.species, Some(Utf8PathBuf::from("lists/species.txt")));
    assert_eq!(resolved.genes, Some(Utf8PathBuf::from("lists/genes.txt")));
    assert!(resolved.accessions.is_none());
    assert_eq!(
        resolved.limits,
        BatchLimits {
            max_species: 20,
            max_genes: 5,
            max_accessions: 100,
        }
    );
    assert_eq!(resolved.exclude_pattern, "fragment");
    assert_eq!(resolved.output, Utf8PathBuf::from(DEFAULT_OUTPUT));
    assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
}

#[test]
fn command_line_overrides_config() {
    let config = Config {
        max_species: Some(10),
        output: Some(Utf8PathBuf::from("from-config.fasta")),
        ..Default::default()
    };
    let overrides = ConfigOverrides {
        max_species: Some(3),
        output: Some(Utf8PathBuf::from("from-cli.fasta")),
        ..Default::default()
    };

    let resolved = ConfigLoader::resolve_config(config, overrides).unwrap();
    assert_eq!(resolved.limits.max_species, 3);
    assert_eq!(resolved.output, Utf8PathBuf::from("from-cli.fasta"));
}

#[test]
fn zero_batch_size_is_rejected() {
    let overrides = ConfigOverrides {
        max_accessions: Some(0),
        ..Default::default()
    };
    let err = ConfigLoader::resolve_config(Config::default(), overrides).unwrap_err();
    assert_matches!(err, SeqFetchError::InvalidBatchSize);
}

#[test]
fn explicit_config_path_must_exist() {
    let err = ConfigLoader::load(Some("/nonexistent/kira-seqfetch.json")).unwrap_err();
    assert_matches!(err, SeqFetchError::ConfigRead(_));
}

#[test]
fn malformed_config_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kira-seqfetch.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = ConfigLoader::load(path.to_str()).unwrap_err();
    assert_matches!(err, SeqFetchError::ConfigParse(_));
}
