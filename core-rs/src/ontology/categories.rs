//! Category anchors - the ontology classes the annotation rules test against
//!
//! Each category lives in one of the three graphs and has a compiled-in
//! default IRI that configuration may override.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The three independently loaded graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OntologyKind {
    /// PBK ontology (PBPKO)
    Domain,
    /// ChEBI
    Chemical,
    /// NCBI taxonomy
    Taxonomy,
}

impl OntologyKind {
    pub const ALL: [OntologyKind; 3] = [Self::Domain, Self::Chemical, Self::Taxonomy];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Domain => "PBPKO",
            Self::Chemical => "ChEBI",
            Self::Taxonomy => "NCBITaxon",
        }
    }
}

impl fmt::Display for OntologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category anchors used by the rules
///
/// # Examples
///
/// ```
/// use pbka_core::ontology::{Category, OntologyKind};
///
/// assert_eq!(Category::Mammal.kind(), OntologyKind::Taxonomy);
/// assert_eq!(
///     Category::ChemicalEntity.default_iri(),
///     "http://purl.obolibrary.org/obo/CHEBI_24431"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Compartment,
    Species,
    Parameter,
    BiochemicalParameter,
    PhysicochemicalParameter,
    PhysiologicalParameter,
    /// Oral uptake via the gut
    OralRoute,
    /// Dermal uptake via the skin
    DermalRoute,
    /// Inhalation via the lung
    InhalationRoute,
    ChemicalEntity,
    Mammal,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Self::Compartment,
        Self::Species,
        Self::Parameter,
        Self::BiochemicalParameter,
        Self::PhysicochemicalParameter,
        Self::PhysiologicalParameter,
        Self::OralRoute,
        Self::DermalRoute,
        Self::InhalationRoute,
        Self::ChemicalEntity,
        Self::Mammal,
    ];

    /// Graph the category belongs to
    #[must_use]
    pub const fn kind(&self) -> OntologyKind {
        match self {
            Self::ChemicalEntity => OntologyKind::Chemical,
            Self::Mammal => OntologyKind::Taxonomy,
            _ => OntologyKind::Domain,
        }
    }

    #[must_use]
    pub const fn default_iri(&self) -> &'static str {
        match self {
            Self::Compartment => "http://purl.obolibrary.org/obo/PBPKO_00446",
            Self::Species => "http://purl.obolibrary.org/obo/PBPKO_00563",
            Self::Parameter => "http://purl.obolibrary.org/obo/PBPKO_00026",
            Self::BiochemicalParameter => "http://purl.obolibrary.org/obo/PBPKO_00050",
            Self::PhysicochemicalParameter => "http://purl.obolibrary.org/obo/PBPKO_00060",
            Self::PhysiologicalParameter => "http://purl.obolibrary.org/obo/PBPKO_00070",
            Self::OralRoute => "http://purl.obolibrary.org/obo/PBPKO_00469",
            Self::DermalRoute => "http://purl.obolibrary.org/obo/PBPKO_00490",
            Self::InhalationRoute => "http://purl.obolibrary.org/obo/PBPKO_00476",
            Self::ChemicalEntity => "http://purl.obolibrary.org/obo/CHEBI_24431",
            Self::Mammal => "http://purl.obolibrary.org/obo/NCBITaxon_40674",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compartment => "compartment",
            Self::Species => "species",
            Self::Parameter => "parameter",
            Self::BiochemicalParameter => "biochemical parameter",
            Self::PhysicochemicalParameter => "physicochemical parameter",
            Self::PhysiologicalParameter => "physiological parameter",
            Self::OralRoute => "gut",
            Self::DermalRoute => "skin",
            Self::InhalationRoute => "lung",
            Self::ChemicalEntity => "chemical entity",
            Self::Mammal => "Mammalia",
        }
    }
}

/// Anchor IRIs in effect, defaults plus overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAnchors {
    overrides: BTreeMap<Category, String>,
}

impl CategoryAnchors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, category: Category, iri: impl Into<String>) -> Self {
        self.overrides.insert(category, iri.into());
        self
    }

    pub fn iri(&self, category: Category) -> &str {
        self.overrides
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_iri())
    }
}

/// Sub-category of a resolved parameter class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterCategory {
    Biochemical,
    Physicochemical,
    Physiological,
    Other,
}

impl ParameterCategory {
    /// Values depend on the modelled substance
    #[must_use]
    pub const fn is_chemical_specific(&self) -> bool {
        matches!(self, Self::Biochemical | Self::Physicochemical)
    }
}

/// Uptake route of an input compartment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputRoute {
    Oral,
    Dermal,
    Inhalation,
}

impl InputRoute {
    pub const ALL: [InputRoute; 3] = [Self::Oral, Self::Dermal, Self::Inhalation];

    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Oral => Category::OralRoute,
            Self::Dermal => Category::DermalRoute,
            Self::Inhalation => Category::InhalationRoute,
        }
    }
}
