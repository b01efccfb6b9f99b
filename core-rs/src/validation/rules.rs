/**
 * rules.rs
 * Per-element annotation rules
 *
 * Every rule returns exactly one Diagnostic (possibly OK) and never fails.
 * Unresolvable IRIs count as absent annotations.
 */

use std::collections::BTreeSet;

use super::diagnostic::{Diagnostic, ErrorCode, Level};
use crate::annotation::ElementAnnotations;
use crate::document::ModelElement;
use crate::ontology::{Category, ClassRef, OntologyKind, OntologyResolver};
use crate::qualifier::Qualifier;

/// Codes of the classifying rule shared by compartments and species
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClassifyingCodes {
    pub missing_term: ErrorCode,
    pub missing_class: ErrorCode,
    pub multiple_classes: ErrorCode,
    pub invalid_class: ErrorCode,
}

pub(crate) const COMPARTMENT_CODES: ClassifyingCodes = ClassifyingCodes {
    missing_term: ErrorCode::CompartmentMissingBqmTerm,
    missing_class: ErrorCode::CompartmentMissingPbpkoBqmTerm,
    multiple_classes: ErrorCode::CompartmentMultiplePbpkoBqmTerms,
    invalid_class: ErrorCode::CompartmentInvalidPbpkoBqmTerm,
};

pub(crate) const SPECIES_CODES: ClassifyingCodes = ClassifyingCodes {
    missing_term: ErrorCode::SpeciesMissingBqmTerm,
    missing_class: ErrorCode::SpeciesMissingPbpkoBqmTerm,
    multiple_classes: ErrorCode::SpeciesMultiplePbpkoBqmTerms,
    invalid_class: ErrorCode::SpeciesInvalidPbpkoBqmTerm,
};

/// Distinct classes of `category` among the resources
fn resolve_all(resolver: &OntologyResolver, resources: &[String], category: Category) -> BTreeSet<ClassRef> {
    resources
        .iter()
        .filter_map(|iri| resolver.resolve_in_category(iri, category))
        .collect()
}

fn names(classes: &BTreeSet<ClassRef>) -> String {
    classes
        .iter()
        .map(ClassRef::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unresolved resources are displayed as written
fn raw_list(resources: &[String]) -> String {
    resources.join(", ")
}

pub fn compartment_rule(
    element: &ModelElement,
    annotations: &ElementAnnotations,
    resolver: &OntologyResolver,
) -> Diagnostic {
    classifying_rule(element, annotations, resolver, Category::Compartment, COMPARTMENT_CODES)
}

pub fn species_rule(element: &ModelElement, annotations: &ElementAnnotations, resolver: &OntologyResolver) -> Diagnostic {
    classifying_rule(element, annotations, resolver, Category::Species, SPECIES_CODES)
}

pub(crate) fn classifying_rule(
    element: &ModelElement,
    annotations: &ElementAnnotations,
    resolver: &OntologyResolver,
    category: Category,
    codes: ClassifyingCodes,
) -> Diagnostic {
    let kind = element.kind;
    let terms = annotations.resources(Qualifier::BQM_IS);

    if terms.is_empty() {
        return Diagnostic::error(
            codes.missing_term,
            format!("{} '{}' has no {} annotation", kind, element.id, Qualifier::BQM_IS),
        )
        .with_element(&element.id);
    }

    let classes = resolve_all(resolver, terms, category);

    let Some(class) = classes.first() else {
        return Diagnostic::error(
            codes.missing_class,
            format!(
                "{} '{}' has no {} term under PBPKO '{}': {}",
                kind,
                element.id,
                Qualifier::BQM_IS,
                category.label(),
                raw_list(terms)
            ),
        )
        .with_element(&element.id);
    };

    if classes.len() > 1 {
        return Diagnostic::error(
            codes.multiple_classes,
            format!(
                "{} '{}' has {} PBPKO {} terms, expected one: {}",
                kind,
                element.id,
                classes.len(),
                category.label(),
                names(&classes)
            ),
        )
        .with_element(&element.id);
    }

    // independent re-check of the single resolved class
    if !resolver.in_category(&class.iri, category) {
        return Diagnostic::error(
            codes.invalid_class,
            format!(
                "{} '{}' term {} is not a PBPKO {}",
                kind,
                element.id,
                class.iri,
                category.label()
            ),
        )
        .with_element(&element.id);
    }

    Diagnostic::ok()
}

/// Parameter rule; missing annotations are errors only for external parameters
pub fn parameter_rule(element: &ModelElement, annotations: &ElementAnnotations, resolver: &OntologyResolver) -> Diagnostic {
    let missing_level = if element.is_external() {
        Level::Error
    } else {
        Level::Warning
    };
    let scope = if element.is_external() { "external" } else { "internal" };

    let terms = annotations.resources(Qualifier::BQM_IS);
    let classes = resolve_all(resolver, terms, Category::Parameter);

    let Some(class) = classes.first() else {
        return Diagnostic::new(
            missing_level,
            ErrorCode::ParameterMissingBqmTerm,
            format!(
                "{} parameter '{}' has no {} term under PBPKO '{}'",
                scope,
                element.id,
                Qualifier::BQM_IS,
                Category::Parameter.label()
            ),
        )
        .with_element(&element.id);
    };

    if classes.len() > 1 {
        return Diagnostic::error(
            ErrorCode::ParameterMultiplePbpkoBqmTerms,
            format!(
                "parameter '{}' has {} PBPKO parameter terms, expected one: {}",
                element.id,
                classes.len(),
                names(&classes)
            ),
        )
        .with_element(&element.id);
    }

    if !resolver.in_category(&class.iri, Category::Parameter) {
        return Diagnostic::error(
            ErrorCode::ParameterInvalidPbpkoBqmTerm,
            format!("parameter '{}' term {} is not a PBPKO parameter", element.id, class.iri),
        )
        .with_element(&element.id);
    }

    if resolver.is_chemical_specific(&class.iri) {
        let chemicals: BTreeSet<ClassRef> = annotations
            .resources(Qualifier::BQB_IS)
            .iter()
            .filter_map(|iri| resolver.resolve(iri, OntologyKind::Chemical))
            .collect();

        if chemicals.is_empty() {
            return Diagnostic::new(
                missing_level,
                ErrorCode::ParameterMissingBqbIsTerm,
                format!(
                    "{} parameter '{}' is {} ({:?}) but has no {} ChEBI term",
                    scope,
                    element.id,
                    class.display_name(),
                    resolver.parameter_category(&class.iri),
                    Qualifier::BQB_IS
                ),
            )
            .with_element(&element.id);
        }

        if chemicals.len() > 1 {
            return Diagnostic::error(
                ErrorCode::ParameterMultipleChebiBqbIsTerms,
                format!(
                    "parameter '{}' has {} ChEBI {} terms, expected one: {}",
                    element.id,
                    chemicals.len(),
                    Qualifier::BQB_IS,
                    names(&chemicals)
                ),
            )
            .with_element(&element.id);
        }
    }

    Diagnostic::ok()
}

/// At least one BQB_HAS_TAXON term in the mammal category
pub fn model_taxon_rule(model: &ModelElement, annotations: &ElementAnnotations, resolver: &OntologyResolver) -> Diagnostic {
    let terms = annotations.resources(Qualifier::BQB_HAS_TAXON);

    if terms.is_empty() {
        return Diagnostic::error(
            ErrorCode::ModelMissingBqbHasTaxonTerm,
            format!("model '{}' has no {} annotation", model.id, Qualifier::BQB_HAS_TAXON),
        )
        .with_element(&model.id);
    }

    if !terms.iter().any(|iri| resolver.in_category(iri, Category::Mammal)) {
        return Diagnostic::error(
            ErrorCode::ModelMissingNcbitaxonTerm,
            format!(
                "model '{}' has no {} term under NCBITaxon '{}': {}",
                model.id,
                Qualifier::BQB_HAS_TAXON,
                Category::Mammal.label(),
                raw_list(terms)
            ),
        )
        .with_element(&model.id);
    }

    Diagnostic::ok()
}

/// At least one BQB_HAS_PROPERTY term in the chemical-entity category
pub fn model_chemical_rule(
    model: &ModelElement,
    annotations: &ElementAnnotations,
    resolver: &OntologyResolver,
) -> Diagnostic {
    let terms = annotations.resources(Qualifier::BQB_HAS_PROPERTY);

    if terms.is_empty() {
        return Diagnostic::error(
            ErrorCode::ModelMissingBqbHasPropertyTerm,
            format!("model '{}' has no {} annotation", model.id, Qualifier::BQB_HAS_PROPERTY),
        )
        .with_element(&model.id);
    }

    if !terms.iter().any(|iri| resolver.in_category(iri, Category::ChemicalEntity)) {
        return Diagnostic::error(
            ErrorCode::ModelMissingChebiTerm,
            format!(
                "model '{}' has no {} term under ChEBI '{}': {}",
                model.id,
                Qualifier::BQB_HAS_PROPERTY,
                Category::ChemicalEntity.label(),
                raw_list(terms)
            ),
        )
        .with_element(&model.id);
    }

    Diagnostic::ok()
}

pub fn unsupported_qualifier_rule(element: &ModelElement, annotations: &ElementAnnotations) -> Diagnostic {
    if annotations.unsupported().is_empty() {
        return Diagnostic::ok();
    }

    Diagnostic::warning(
        ErrorCode::AnnotationUnsupportedQualifier,
        format!(
            "{} '{}' uses unsupported qualifiers: {}",
            element.kind,
            element.id,
            annotations.unsupported().join(", ")
        ),
    )
    .with_element(&element.id)
}
