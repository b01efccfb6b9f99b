//! Qualifier model - the two disjoint qualifier families of CV terms
//!
//! A qualifier always carries its family: `BQM_IS` and `BQB_IS` share the
//! value `IS` but are different qualifiers. Textual forms accepted at the
//! boundary are the flat `BQM_*` / `BQB_*` names and the RDF forms
//! `bqmodel:isDescribedBy` / `bqbiol:hasTaxon`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Qualifier string that belongs to neither family
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported qualifier: {0}")]
pub struct UnsupportedQualifier(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualifierFamily {
    /// Model qualifiers (`BQM_*`, `bqmodel:`)
    Model,
    /// Biological qualifiers (`BQB_*`, `bqbiol:`)
    Biological,
}

impl QualifierFamily {
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Model => "BQM",
            Self::Biological => "BQB",
        }
    }

    #[must_use]
    pub const fn rdf_prefix(&self) -> &'static str {
        match self {
            Self::Model => "bqmodel",
            Self::Biological => "bqbiol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelQualifier {
    Is,
    IsDescribedBy,
    IsDerivedFrom,
    IsInstanceOf,
    HasInstance,
    Unknown,
}

impl ModelQualifier {
    pub const ALL: [ModelQualifier; 6] = [
        Self::Is,
        Self::IsDescribedBy,
        Self::IsDerivedFrom,
        Self::IsInstanceOf,
        Self::HasInstance,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Is => "IS",
            Self::IsDescribedBy => "IS_DESCRIBED_BY",
            Self::IsDerivedFrom => "IS_DERIVED_FROM",
            Self::IsInstanceOf => "IS_INSTANCE_OF",
            Self::HasInstance => "HAS_INSTANCE",
            Self::Unknown => "UNKNOWN",
        }
    }

    #[must_use]
    pub const fn rdf_name(&self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::IsDescribedBy => "isDescribedBy",
            Self::IsDerivedFrom => "isDerivedFrom",
            Self::IsInstanceOf => "isInstanceOf",
            Self::HasInstance => "hasInstance",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiologicalQualifier {
    Is,
    HasPart,
    IsPartOf,
    IsVersionOf,
    HasVersion,
    IsHomologTo,
    IsDescribedBy,
    IsEncodedBy,
    Encodes,
    OccursIn,
    HasProperty,
    IsPropertyOf,
    HasTaxon,
    Unknown,
}

impl BiologicalQualifier {
    pub const ALL: [BiologicalQualifier; 14] = [
        Self::Is,
        Self::HasPart,
        Self::IsPartOf,
        Self::IsVersionOf,
        Self::HasVersion,
        Self::IsHomologTo,
        Self::IsDescribedBy,
        Self::IsEncodedBy,
        Self::Encodes,
        Self::OccursIn,
        Self::HasProperty,
        Self::IsPropertyOf,
        Self::HasTaxon,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Is => "IS",
            Self::HasPart => "HAS_PART",
            Self::IsPartOf => "IS_PART_OF",
            Self::IsVersionOf => "IS_VERSION_OF",
            Self::HasVersion => "HAS_VERSION",
            Self::IsHomologTo => "IS_HOMOLOG_TO",
            Self::IsDescribedBy => "IS_DESCRIBED_BY",
            Self::IsEncodedBy => "IS_ENCODED_BY",
            Self::Encodes => "ENCODES",
            Self::OccursIn => "OCCURS_IN",
            Self::HasProperty => "HAS_PROPERTY",
            Self::IsPropertyOf => "IS_PROPERTY_OF",
            Self::HasTaxon => "HAS_TAXON",
            Self::Unknown => "UNKNOWN",
        }
    }

    #[must_use]
    pub const fn rdf_name(&self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::HasPart => "hasPart",
            Self::IsPartOf => "isPartOf",
            Self::IsVersionOf => "isVersionOf",
            Self::HasVersion => "hasVersion",
            Self::IsHomologTo => "isHomologTo",
            Self::IsDescribedBy => "isDescribedBy",
            Self::IsEncodedBy => "isEncodedBy",
            Self::Encodes => "encodes",
            Self::OccursIn => "occursIn",
            Self::HasProperty => "hasProperty",
            Self::IsPropertyOf => "isPropertyOf",
            Self::HasTaxon => "hasTaxon",
            Self::Unknown => "unknown",
        }
    }
}

/// A qualifier tagged with its family
///
/// # Examples
///
/// ```
/// use pbka_core::qualifier::{Qualifier, QualifierFamily};
///
/// let q: Qualifier = "BQM_IS".parse().unwrap();
/// assert_eq!(q, Qualifier::BQM_IS);
/// assert_eq!(q.family(), QualifierFamily::Model);
/// assert_ne!(q, Qualifier::BQB_IS);
///
/// let taxon: Qualifier = "bqbiol:hasTaxon".parse().unwrap();
/// assert_eq!(taxon.to_string(), "BQB_HAS_TAXON");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Qualifier {
    Model(ModelQualifier),
    Biological(BiologicalQualifier),
}

impl Qualifier {
    pub const BQM_IS: Qualifier = Qualifier::Model(ModelQualifier::Is);
    pub const BQB_IS: Qualifier = Qualifier::Biological(BiologicalQualifier::Is);
    pub const BQB_HAS_TAXON: Qualifier = Qualifier::Biological(BiologicalQualifier::HasTaxon);
    pub const BQB_HAS_PROPERTY: Qualifier = Qualifier::Biological(BiologicalQualifier::HasProperty);

    #[must_use]
    pub const fn family(&self) -> QualifierFamily {
        match self {
            Self::Model(_) => QualifierFamily::Model,
            Self::Biological(_) => QualifierFamily::Biological,
        }
    }

    /// Value name within the family (`IS`, `HAS_TAXON`, ...)
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Model(q) => q.as_str(),
            Self::Biological(q) => q.as_str(),
        }
    }

    /// RDF form, e.g. `bqbiol:hasTaxon`
    #[must_use]
    pub fn rdf_term(&self) -> String {
        let name = match self {
            Self::Model(q) => q.rdf_name(),
            Self::Biological(q) => q.rdf_name(),
        };
        format!("{}:{}", self.family().rdf_prefix(), name)
    }

    /// True for `BQM_IS`, the primary classifying annotation
    #[must_use]
    pub fn is_model_is(&self) -> bool {
        *self == Self::BQM_IS
    }

    fn parse_flat(value: &str) -> Option<Self> {
        let (prefix, name) = value.split_once('_')?;
        match prefix {
            "BQM" => ModelQualifier::ALL.iter().find(|q| q.as_str() == name).map(|q| Self::Model(*q)),
            "BQB" => BiologicalQualifier::ALL
                .iter()
                .find(|q| q.as_str() == name)
                .map(|q| Self::Biological(*q)),
            _ => None,
        }
    }

    fn parse_rdf(value: &str) -> Option<Self> {
        let (prefix, name) = value.split_once(':')?;
        match prefix {
            "bqmodel" => ModelQualifier::ALL.iter().find(|q| q.rdf_name() == name).map(|q| Self::Model(*q)),
            "bqbiol" => BiologicalQualifier::ALL
                .iter()
                .find(|q| q.rdf_name() == name)
                .map(|q| Self::Biological(*q)),
            _ => None,
        }
    }
}

impl FromStr for Qualifier {
    type Err = UnsupportedQualifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::parse_flat(value)
            .or_else(|| Self::parse_rdf(value))
            .ok_or_else(|| UnsupportedQualifier(s.to_string()))
    }
}

impl TryFrom<String> for Qualifier {
    type Error = UnsupportedQualifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Qualifier> for String {
    fn from(q: Qualifier) -> Self {
        q.to_string()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.family().prefix(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_value_differs_by_family() {
        assert_eq!(Qualifier::BQM_IS.value(), Qualifier::BQB_IS.value());
        assert_ne!(Qualifier::BQM_IS, Qualifier::BQB_IS);
        assert_eq!(Qualifier::BQM_IS.family(), QualifierFamily::Model);
        assert_eq!(Qualifier::BQB_IS.family(), QualifierFamily::Biological);
    }

    #[test]
    fn test_parse_flat_and_rdf_forms() {
        assert_eq!("BQB_HAS_TAXON".parse::<Qualifier>().unwrap(), Qualifier::BQB_HAS_TAXON);
        assert_eq!("bqbiol:hasProperty".parse::<Qualifier>().unwrap(), Qualifier::BQB_HAS_PROPERTY);
        assert_eq!(
            "bqmodel:isDescribedBy".parse::<Qualifier>().unwrap(),
            Qualifier::Model(ModelQualifier::IsDescribedBy)
        );
        assert_eq!(" BQM_IS ".parse::<Qualifier>().unwrap(), Qualifier::BQM_IS);
    }

    #[test]
    fn test_every_qualifier_parses_from_its_display() {
        for q in ModelQualifier::ALL {
            let qualifier = Qualifier::Model(q);
            assert_eq!(qualifier.to_string().parse::<Qualifier>().unwrap(), qualifier);
            assert_eq!(qualifier.rdf_term().parse::<Qualifier>().unwrap(), qualifier);
        }
        for q in BiologicalQualifier::ALL {
            let qualifier = Qualifier::Biological(q);
            assert_eq!(qualifier.to_string().parse::<Qualifier>().unwrap(), qualifier);
            assert_eq!(qualifier.rdf_term().parse::<Qualifier>().unwrap(), qualifier);
        }
    }

    #[test]
    fn test_unsupported_qualifier() {
        let err = "BQX_IS".parse::<Qualifier>().unwrap_err();
        assert_eq!(err, UnsupportedQualifier("BQX_IS".to_string()));
        assert!("BQB_HAS_COLOR".parse::<Qualifier>().is_err());
        assert!("bqmodel:hasTaxon".parse::<Qualifier>().is_err());
        assert!("".parse::<Qualifier>().is_err());
    }

    #[test]
    fn test_serde_uses_flat_names() {
        let json = serde_json::to_string(&Qualifier::BQB_HAS_TAXON).unwrap();
        assert_eq!(json, "\"BQB_HAS_TAXON\"");
        let back: Qualifier = serde_json::from_str("\"BQM_IS\"").unwrap();
        assert_eq!(back, Qualifier::BQM_IS);
        assert!(serde_json::from_str::<Qualifier>("\"BQM_NOPE\"").is_err());
    }
}
