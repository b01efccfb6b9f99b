//! Integration tests for the complete validation pipeline
//!
//! Covers the path a CLI run takes:
//! - Config loading with relative ontology paths
//! - Ontology loading from Turtle files
//! - Model snapshot parsing
//! - Validation report and JSON output

use pbka_core::{
    ErrorCode, Level, ModelSnapshot, OntologyKind, OntologyResolver, PbkError, Stage, ValidationOptions, Validator,
    ValidatorConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("core-rs/tests/fixtures")
}

/// Workspace with ontologies/ copied from the fixtures and a pbka.yaml
fn setup_workspace() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let ontologies = temp_dir.path().join("ontologies");
    fs::create_dir_all(&ontologies).unwrap();

    for name in ["pbpko_mini.ttl", "chebi_mini.ttl", "ncbitaxon_mini.ttl"] {
        fs::copy(fixtures_dir().join(name), ontologies.join(name)).unwrap();
    }

    let config_path = temp_dir.path().join("pbka.yaml");
    fs::write(
        &config_path,
        r#"
ontologies:
  domain:
    source: ontologies/pbpko_mini.ttl
  chemical:
    source: ontologies/chebi_mini.ttl
  taxonomy:
    source: ontologies/ncbitaxon_mini.ttl
options:
  log_records: false
"#,
    )
    .unwrap();

    (temp_dir, config_path)
}

const CAFFEINE_MODEL: &str = r#"
model:
  id: caffeine_pbpk
  name: Caffeine PBPK model
  cv_terms:
    - { qualifier: BQB_HAS_TAXON, resources: ["https://identifiers.org/taxonomy/9606"] }
    - { qualifier: "bqbiol:hasProperty", resources: ["urn:miriam:chebi:CHEBI:27732"] }
compartments:
  - id: Vgu
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00469] }]
  - id: Vli
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00477] }]
  - id: Vki
    cv_terms: [{ qualifier: BQM_IS, resources: ["http://purl.obolibrary.org/obo/PBPKO_00478"] }]
species:
  - id: Aveca
    cv_terms:
      - { qualifier: BQM_IS, resources: [obo:PBPKO_00564] }
      - { qualifier: BQB_IS, resources: [obo:CHEBI_27732] }
parameters:
  - id: BW
    constant: true
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00073] }]
  - id: Km_caf
    constant: true
    cv_terms:
      - { qualifier: BQM_IS, resources: [obo:PBPKO_00053] }
      - { qualifier: BQB_IS, resources: [obo:CHEBI_27732] }
  - id: Km_apap
    constant: true
    cv_terms:
      - { qualifier: BQM_IS, resources: [obo:PBPKO_00053] }
      - { qualifier: BQB_IS, resources: [obo:CHEBI_46195] }
  - id: QC
    constant: false
"#;

#[test]
fn test_complete_validation_run() {
    let (temp_dir, config_path) = setup_workspace();

    // 1. Load config and ontologies
    let config = ValidatorConfig::load(&config_path).unwrap();
    assert!(!config.options.log_records);
    let resolver = OntologyResolver::from_config(&config).unwrap();

    // 2. Parse the model
    let model_path = temp_dir.path().join("caffeine.yaml");
    fs::write(&model_path, CAFFEINE_MODEL).unwrap();
    let document = ModelSnapshot::from_path(&model_path).unwrap();

    // 3. Validate
    let report = Validator::new(&resolver)
        .with_options(config.options.clone())
        .validate(&document);

    assert_eq!(report.stage, Stage::Completed);
    assert!(report.valid, "{:#?}", report.records);

    // Only the internal QC parameter lacks a term, as a warning
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].level, Level::Warning);
    assert_eq!(report.records[0].code, Some(ErrorCode::ParameterMissingBqmTerm));
    assert_eq!(report.records[0].element.as_deref(), Some("QC"));
    assert_eq!(report.counts.warning, 1);
}

#[test]
fn test_invalid_model_collects_every_finding() {
    let (_temp_dir, config_path) = setup_workspace();
    let config = ValidatorConfig::load(&config_path).unwrap();
    let resolver = OntologyResolver::from_config(&config).unwrap();

    let document = ModelSnapshot::from_yaml_str(
        r#"
model:
  id: broken
  cv_terms:
    - { qualifier: BQB_HAS_TAXON, resources: [obo:NCBITaxon_9031] }
compartments:
  - id: Vli
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00477] }]
  - id: Vli2
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00477] }]
  - id: Vx
    cv_terms: [{ qualifier: BQX_IS, resources: [obo:PBPKO_00478] }]
species:
  - id: Caf
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00477, obo:PBPKO_00564] }]
parameters:
  - id: Vmax
    constant: true
    cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00052] }]
"#,
    )
    .unwrap();

    let report = Validator::new(&resolver)
        .with_options(config.options.clone())
        .validate(&document);

    assert!(!report.valid);
    assert_eq!(report.stage, Stage::Completed);

    let codes: Vec<ErrorCode> = report.records.iter().filter_map(|r| r.code).collect();
    assert!(codes.contains(&ErrorCode::ModelMissingNcbitaxonTerm));
    assert!(codes.contains(&ErrorCode::ModelMissingBqbHasPropertyTerm));
    assert!(codes.contains(&ErrorCode::AnnotationUnsupportedQualifier));
    assert!(codes.contains(&ErrorCode::CompartmentMissingBqmTerm));
    assert!(codes.contains(&ErrorCode::CompartmentMultipleAnnotationUse));
    assert!(codes.contains(&ErrorCode::ParameterMissingBqbIsTerm));

    // Species resolves one of two terms into the species category
    assert!(report.records_for("Caf").next().is_none());

    // Parent codes group the refined model findings
    assert!(report.has_code(ErrorCode::ModelMissingTaxonSpecification));
    assert!(report.has_code(ErrorCode::ModelMissingChemicalSpecification));
}

#[test]
fn test_report_json_output() {
    let (temp_dir, config_path) = setup_workspace();
    let config = ValidatorConfig::load(&config_path).unwrap();
    let resolver = OntologyResolver::from_config(&config).unwrap();

    let model_path = temp_dir.path().join("caffeine.json");
    fs::write(
        &model_path,
        r#"{"model": {"id": "m"}, "structural_issues": [{"severity": "error", "code": 20102, "message": "bad level"}]}"#,
    )
    .unwrap();

    let document = ModelSnapshot::from_path(&model_path).unwrap();
    let report = Validator::new(&resolver)
        .with_options(ValidationOptions {
            log_records: false,
            ..ValidationOptions::default()
        })
        .validate(&document);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["model"], "m");
    assert_eq!(json["valid"], false);
    assert_eq!(json["stage"], "structural_gate");
    assert_eq!(json["records"][0]["level"], "ERROR");
    assert_eq!(json["records"][0]["code"], "DOCUMENT_STRUCTURE");
    assert_eq!(json["counts"]["error"], 1);
    assert!(json["timestamp"].is_string());
}

#[test]
fn test_unparseable_model_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let model_path = temp_dir.path().join("model.json");
    fs::write(&model_path, "{ not json").unwrap();

    let err = ModelSnapshot::from_path(&model_path).unwrap_err();
    assert!(matches!(err, PbkError::DocumentParse(_)));
}

#[test]
fn test_shared_resolver_loads_once() {
    let (_temp_dir, config_path) = setup_workspace();
    let config = ValidatorConfig::load(&config_path).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || OntologyResolver::shared(&config).unwrap() as *const OntologyResolver as usize)
        })
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));

    let resolver = OntologyResolver::shared(&config).unwrap();
    assert!(resolver.resolve("obo:PBPKO_00477", OntologyKind::Domain).is_some());
}

#[test]
fn test_config_with_missing_ontology_fails() {
    let (temp_dir, config_path) = setup_workspace();
    fs::remove_file(temp_dir.path().join("ontologies/chebi_mini.ttl")).unwrap();

    let err = ValidatorConfig::load(&config_path).unwrap_err();
    assert!(matches!(err, PbkError::Config(_)));
}
