//! Model-document interface
//!
//! The validator reads models through [`ModelDocument`]. Parsing, the
//! structural checker and the unit checker belong to the document toolkit
//! behind the trait; [`ModelSnapshot`] is a serde-backed implementation for
//! JSON/YAML exports.

pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::qualifier::Qualifier;

pub use snapshot::ModelSnapshot;

/// libSBML "undeclared units" finding; never escalated to an error
pub const UNDECLARED_UNITS_CODE: u32 = 99505;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Model,
    Compartment,
    Species,
    Parameter,
    Reaction,
    Other,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Model => "model",
            Self::Compartment => "compartment",
            Self::Species => "species",
            Self::Parameter => "parameter",
            Self::Reaction => "reaction",
            Self::Other => "element",
        };
        f.write_str(name)
    }
}

/// A CV term as stored in the document: raw qualifier plus resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvTerm {
    pub qualifier: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl CvTerm {
    pub fn new<I, S>(qualifier: impl Into<String>, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            qualifier: qualifier.into(),
            resources: resources.into_iter().map(Into::into).collect(),
        }
    }

    pub fn qualified<I, S>(qualifier: Qualifier, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(qualifier.to_string(), resources)
    }
}

/// A model, compartment, species or parameter with its annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelElement {
    pub kind: ElementKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Constant parameters are external (user supplied)
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub cv_terms: Vec<CvTerm>,
}

impl ModelElement {
    pub fn new(kind: ElementKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: None,
            constant: false,
            cv_terms: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_term(mut self, term: CvTerm) -> Self {
        self.cv_terms.push(term);
        self
    }

    /// Shorthand for a single-resource term
    pub fn with_resource(self, qualifier: Qualifier, resource: impl Into<String>) -> Self {
        self.with_term(CvTerm::qualified(qualifier, [resource.into()]))
    }

    /// External parameter: constant, user supplied
    pub fn is_external(&self) -> bool {
        self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
    Fatal,
}

/// Finding reported by the document toolkit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIssue {
    pub severity: IssueSeverity,
    #[serde(default)]
    pub code: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl DocumentIssue {
    pub fn new(severity: IssueSeverity, code: u32, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            element: None,
        }
    }

    /// Error or fatal
    pub fn is_critical(&self) -> bool {
        self.severity >= IssueSeverity::Error
    }
}

/// What the validator needs from a parsed model document
pub trait ModelDocument {
    /// Document-level element carrying taxon and chemical annotations
    fn model(&self) -> &ModelElement;

    fn compartments(&self) -> &[ModelElement];

    fn species(&self) -> &[ModelElement];

    fn parameters(&self) -> &[ModelElement];

    /// Read/structural errors found while parsing
    fn structural_issues(&self) -> Vec<DocumentIssue>;

    /// Strict unit-consistency check
    fn check_unit_consistency(&self) -> Vec<DocumentIssue>;
}
