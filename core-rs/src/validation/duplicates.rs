//! Duplicate use of a classifying term across one element collection
//!
//! A PBPKO class used as the `BQM_IS` term of a compartment or parameter
//! may classify only one element. Chemical-specific parameter classes are
//! exempt without comparing the chemical identities of the owners.

use std::collections::BTreeMap;

use super::diagnostic::{Diagnostic, ErrorCode, ValidationResult};
use crate::annotation::ElementAnnotations;
use crate::document::{ElementKind, ModelElement};
use crate::ontology::namespace::canonical_scheme;
use crate::ontology::{Category, OntologyKind, OntologyResolver};
use crate::qualifier::Qualifier;

type UseKey = (Qualifier, String);

/// (qualifier, resolved IRI) -> distinct owning element ids
pub fn annotation_index<'a>(
    elements: &'a [ModelElement],
    resolver: &OntologyResolver,
) -> BTreeMap<UseKey, Vec<&'a str>> {
    let mut index: BTreeMap<UseKey, Vec<&'a str>> = BTreeMap::new();

    for element in elements {
        let annotations = ElementAnnotations::of(element);
        for (qualifier, resource) in annotations.pairs() {
            let iri = match resolver.resolve(resource, OntologyKind::Domain) {
                Some(class) => class.iri,
                None => canonical_scheme(resource).into_owned(),
            };

            let owners = index.entry((qualifier, iri)).or_default();
            if !owners.contains(&element.id.as_str()) {
                owners.push(element.id.as_str());
            }
        }
    }

    index
}

/// Runs over the compartments or the parameters of a document
///
/// Other collections are not policed and yield an empty result.
pub fn check_duplicate_use(elements: &[ModelElement], kind: ElementKind, resolver: &OntologyResolver) -> ValidationResult {
    let (category, code) = match kind {
        ElementKind::Compartment => (Category::Compartment, ErrorCode::CompartmentMultipleAnnotationUse),
        ElementKind::Parameter => (Category::Parameter, ErrorCode::ParameterMultipleAnnotationUse),
        _ => return ValidationResult::new(),
    };

    let mut result = ValidationResult::new();

    for ((qualifier, iri), owners) in annotation_index(elements, resolver) {
        if owners.len() < 2 {
            continue;
        }
        if !qualifier.is_model_is() {
            continue;
        }
        let Some(class) = resolver.resolve_in_category(&iri, category) else {
            continue;
        };
        if kind == ElementKind::Parameter && resolver.is_chemical_specific(&class.iri) {
            continue;
        }

        result.add(Diagnostic::error(
            code,
            format!(
                "{} {} is the {} term of more than one {}: {}",
                category.label(),
                class.display_name(),
                Qualifier::BQM_IS,
                kind,
                owners.join(", ")
            ),
        ));
    }

    result
}
