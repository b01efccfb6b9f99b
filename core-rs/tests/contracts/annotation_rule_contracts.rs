// Annotation Rule Contract Tests
//
// These tests pin the behaviour that model authors and downstream tools rely on:
// how IRIs resolve, how subsumption behaves, and which records each rule emits.
//
// **Problem**: a "harmless" refactor of resolution or rule ordering silently changes verdicts
// **Solution**: one contract per guaranteed behaviour, against small fixture ontologies

use pbka_core::{
    validate, DocumentIssue, ElementKind, ErrorCode, IssueSeverity, Level, ModelElement, ModelSnapshot, OntologyKind,
    OntologyResolver, Qualifier, RdfOntology, Stage, Validator,
};

const PBPKO: &str = include_str!("../fixtures/pbpko_mini.ttl");
const CHEBI: &str = include_str!("../fixtures/chebi_mini.ttl");
const NCBITAXON: &str = include_str!("../fixtures/ncbitaxon_mini.ttl");

const OBO: &str = "http://purl.obolibrary.org/obo/";

fn resolver() -> OntologyResolver {
    OntologyResolver::from_hierarchies(
        RdfOntology::from_turtle_str("pbpko", PBPKO).unwrap(),
        RdfOntology::from_turtle_str("chebi", CHEBI).unwrap(),
        RdfOntology::from_turtle_str("ncbitaxon", NCBITAXON).unwrap(),
    )
    .unwrap()
}

fn compartment(id: &str) -> ModelElement {
    ModelElement::new(ElementKind::Compartment, id)
}

fn parameter(id: &str, external: bool) -> ModelElement {
    ModelElement::new(ElementKind::Parameter, id).with_constant(external)
}

/// WHY: Shorthand notations must name the same class as the canonical IRI
/// REASON: Models in the wild use obo:, identifiers.org and https variants interchangeably
/// BREAKS: Valid models get MISSING_PBPKO findings for notation alone
#[test]
fn rewritten_and_scheme_varied_iris_resolve_to_canonical_class() {
    let resolver = resolver();
    let canonical = format!("{}PBPKO_00477", OBO);

    let direct = resolver.resolve(&canonical, OntologyKind::Domain).unwrap();
    let shorthand = resolver.resolve("obo:PBPKO_00477", OntologyKind::Domain).unwrap();
    let https = resolver
        .resolve(&canonical.replace("http://", "https://"), OntologyKind::Domain)
        .unwrap();

    assert_eq!(direct.iri, canonical);
    assert_eq!(shorthand, direct);
    assert_eq!(https, direct);
}

/// WHY: A class is a member of its own category
/// REASON: Annotating with the category root itself (e.g. "compartment") is legal
/// BREAKS: Root-level annotations are reported as invalid
#[test]
fn membership_is_reflexive() {
    let resolver = resolver();
    for local in ["PBPKO_00446", "PBPKO_00026"] {
        let category = format!("{}{}", OBO, local);
        assert!(resolver.is_member_of(&category, OntologyKind::Domain, &category), "{}", local);
    }

    let mammal = format!("{}NCBITaxon_40674", OBO);
    assert!(resolver.is_member_of("obo:NCBITaxon_40674", OntologyKind::Taxonomy, &mammal));
}

/// WHY: Every class enumerated under a category is a member of it
/// REASON: Pick-lists offered to users must only contain terms the rules accept
/// BREAKS: A user picks a suggested term and the validator rejects it
#[test]
fn membership_is_monotonic_under_descent() {
    let resolver = resolver();
    let cases = [
        (OntologyKind::Domain, format!("{}PBPKO_00446", OBO)),
        (OntologyKind::Domain, format!("{}PBPKO_00026", OBO)),
        (OntologyKind::Chemical, format!("{}CHEBI_24431", OBO)),
        (OntologyKind::Taxonomy, format!("{}NCBITaxon_40674", OBO)),
    ];

    for (kind, category) in cases {
        let members = resolver.classes_under(kind, &category);
        assert!(!members.is_empty(), "{}", category);
        for class in members {
            assert!(resolver.is_member_of(&class.iri, kind, &category), "{} under {}", class.iri, category);
        }
    }
}

/// WHY: A category written in shorthand or https names the same category
/// REASON: Anchor overrides and pick-list queries come from hand-written config
/// BREAKS: Every member of an `obo:` category is reported as outside it
#[test]
fn membership_accepts_any_notation_of_the_category() {
    let resolver = resolver();
    for category in ["obo:PBPKO_00446", "https://purl.obolibrary.org/obo/PBPKO_00446"] {
        let members = resolver.classes_under(OntologyKind::Domain, category);
        assert!(!members.is_empty(), "{}", category);
        for class in members {
            assert!(resolver.is_member_of(&class.iri, OntologyKind::Domain, category), "{} under {}", class.iri, category);
        }
    }
}

/// WHY: An unannotated compartment is exactly one error
/// REASON: Compartment classification is mandatory; one finding per cause keeps reports readable
/// BREAKS: Missing annotations pass silently or flood the report
#[test]
fn unannotated_compartment_yields_single_missing_bqm_error() {
    let resolver = resolver();
    let result = Validator::new(&resolver)
        .check_element_annotation(&compartment("Vli"))
        .unwrap();

    assert!(!result.valid);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].level, Level::Error);
    assert_eq!(result.records[0].code, Some(ErrorCode::CompartmentMissingBqmTerm));
}

/// WHY: A correctly classified compartment produces no records
/// REASON: OK outcomes are not reported
/// BREAKS: Clean models show noise
#[test]
fn classified_compartment_is_valid_without_records() {
    let resolver = resolver();
    let element = compartment("Vli").with_resource(Qualifier::BQM_IS, "obo:PBPKO_00477");
    let result = Validator::new(&resolver).check_element_annotation(&element).unwrap();

    assert!(result.valid);
    assert!(result.records.is_empty());
}

/// WHY: BQB_IS does not stand in for the classifying BQM_IS term
/// REASON: Qualifier families are disjoint even when the value is the same
/// BREAKS: External parameters pass with the wrong qualifier family
#[test]
fn external_parameter_with_only_biological_is_misses_bqm_term() {
    let resolver = resolver();
    let element = parameter("BW", true).with_resource(Qualifier::BQB_IS, "obo:PBPKO_00073");
    let result = Validator::new(&resolver).check_element_annotation(&element).unwrap();

    assert!(!result.valid);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].level, Level::Error);
    assert_eq!(result.records[0].code, Some(ErrorCode::ParameterMissingBqmTerm));
}

/// WHY: Missing annotation on an internal parameter is a warning
/// REASON: Derived parameters are optional to annotate; severity follows context, not code
/// BREAKS: Models with unannotated helper parameters are rejected
#[test]
fn internal_parameter_with_same_condition_is_warning() {
    let resolver = resolver();
    let element = parameter("BW", false).with_resource(Qualifier::BQB_IS, "obo:PBPKO_00073");
    let result = Validator::new(&resolver).check_element_annotation(&element).unwrap();

    assert!(result.valid);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].level, Level::Warning);
    assert_eq!(result.records[0].code, Some(ErrorCode::ParameterMissingBqmTerm));
}

/// WHY: Two compartments cannot share one classifying term
/// REASON: A compartment class identifies one physical compartment of the model
/// BREAKS: Ambiguous models (two "liver" compartments) pass
#[test]
fn shared_compartment_term_is_rejected_naming_both_owners() {
    let resolver = resolver();
    let document = ModelSnapshot::new("m")
        .with_element(compartment("Vli").with_resource(Qualifier::BQM_IS, "obo:PBPKO_00477"))
        .with_element(compartment("Vli_b").with_resource(Qualifier::BQM_IS, "http://purl.obolibrary.org/obo/PBPKO_00477"));

    let result = Validator::new(&resolver).check_duplicate_use(&document);
    assert!(!result.valid);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].code, Some(ErrorCode::CompartmentMultipleAnnotationUse));
    assert!(result.records[0].message.contains("Vli"));
    assert!(result.records[0].message.contains("Vli_b"));
}

/// WHY: Chemical-specific parameter classes may be shared
/// REASON: Km of caffeine and Km of paracetamol share a class and differ by chemical
/// BREAKS: Multi-substance models are rejected
#[test]
fn shared_chemical_specific_parameter_term_is_allowed() {
    let resolver = resolver();
    let document = ModelSnapshot::new("m")
        .with_element(
            parameter("Km_caf", true)
                .with_resource(Qualifier::BQM_IS, "obo:PBPKO_00053")
                .with_resource(Qualifier::BQB_IS, "obo:CHEBI_27732"),
        )
        .with_element(
            parameter("Km_apap", true)
                .with_resource(Qualifier::BQM_IS, "obo:PBPKO_00053")
                .with_resource(Qualifier::BQB_IS, "obo:CHEBI_46195"),
        );

    let result = Validator::new(&resolver).check_duplicate_use(&document);
    assert!(result.valid);
    assert!(result.records.is_empty());
}

/// WHY: A fatal structural error stops validation at the gate
/// REASON: A structurally broken document cannot be meaningfully annotation-checked
/// BREAKS: Reports mix parser failures with spurious annotation findings
#[test]
fn fatal_structural_error_stops_before_element_rules() {
    let resolver = resolver();
    let document = ModelSnapshot::new("m")
        .with_element(compartment("Vli"))
        .with_element(parameter("BW", true))
        .with_structural_issue(DocumentIssue::new(IssueSeverity::Fatal, 10102, "XML content is not well-formed"));

    let report = validate(&document, &resolver);

    assert!(!report.valid);
    assert_eq!(report.stage, Stage::StructuralGate);
    assert!(report.records.iter().all(|r| r.code == Some(ErrorCode::DocumentStructure)));
    assert!(report.records_for("Vli").next().is_none());
    assert!(report.records_for("BW").next().is_none());
}
