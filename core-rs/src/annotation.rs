//! Element annotation accessor
//!
//! Flattens the CV terms of one element into qualifier -> resources. Terms
//! sharing a qualifier are merged in document order, so one multi-resource
//! term and several single-resource terms read the same.

use std::collections::BTreeMap;

use crate::document::{CvTerm, ModelElement};
use crate::qualifier::{Qualifier, QualifierFamily};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAnnotations {
    terms: BTreeMap<Qualifier, Vec<String>>,
    unsupported: Vec<String>,
}

impl ElementAnnotations {
    pub fn of(element: &ModelElement) -> Self {
        Self::from_terms(&element.cv_terms)
    }

    pub fn from_terms(terms: &[CvTerm]) -> Self {
        let mut annotations = Self::default();

        for term in terms {
            match term.qualifier.parse::<Qualifier>() {
                Ok(qualifier) => annotations
                    .terms
                    .entry(qualifier)
                    .or_default()
                    .extend(term.resources.iter().map(|r| r.trim().to_string())),
                Err(unsupported) => {
                    if !annotations.unsupported.contains(&unsupported.0) {
                        annotations.unsupported.push(unsupported.0);
                    }
                }
            }
        }

        annotations
    }

    /// Resources under one qualifier, empty if absent
    pub fn resources(&self, qualifier: Qualifier) -> &[String] {
        self.terms.get(&qualifier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, qualifier: Qualifier) -> bool {
        !self.resources(qualifier).is_empty()
    }

    /// Value-keyed view restricted to one family (`IS` -> [...])
    pub fn family(&self, family: QualifierFamily) -> BTreeMap<&'static str, &[String]> {
        self.terms
            .iter()
            .filter(|(q, _)| q.family() == family)
            .map(|(q, resources)| (q.value(), resources.as_slice()))
            .collect()
    }

    /// Flattened `(qualifier, resource)` multiset
    pub fn pairs(&self) -> impl Iterator<Item = (Qualifier, &str)> + '_ {
        self.terms
            .iter()
            .flat_map(|(q, resources)| resources.iter().map(move |r| (*q, r.as_str())))
    }

    /// Raw qualifier strings that matched neither family
    pub fn unsupported(&self) -> &[String] {
        &self.unsupported
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
