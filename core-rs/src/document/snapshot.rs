//! JSON/YAML model snapshots
//!
//! ```yaml
//! model:
//!   id: caffeine_pbpk
//!   cv_terms:
//!     - { qualifier: BQB_HAS_TAXON, resources: [obo:NCBITaxon_9606] }
//! compartments:
//!   - id: Vli
//!     cv_terms: [{ qualifier: BQM_IS, resources: [obo:PBPKO_00477] }]
//! parameters:
//!   - { id: BW, constant: true, cv_terms: [] }
//! structural_issues:
//!   - { severity: fatal, code: 10102, message: "..." }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{CvTerm, DocumentIssue, ElementKind, ModelDocument, ModelElement};
use crate::errors::{PbkError, Result};

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    model: SnapshotElement,
    #[serde(default)]
    compartments: Vec<SnapshotElement>,
    #[serde(default)]
    species: Vec<SnapshotElement>,
    #[serde(default)]
    parameters: Vec<SnapshotElement>,
    #[serde(default)]
    structural_issues: Vec<DocumentIssue>,
    #[serde(default)]
    unit_issues: Vec<DocumentIssue>,
}

#[derive(Debug, Deserialize)]
struct SnapshotElement {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    cv_terms: Vec<CvTerm>,
}

impl SnapshotElement {
    fn into_element(self, kind: ElementKind) -> ModelElement {
        ModelElement {
            kind,
            id: self.id,
            name: self.name,
            constant: self.constant,
            cv_terms: self.cv_terms,
        }
    }
}

/// In-memory model document
///
/// Unit findings are recorded ahead of time by whatever produced the
/// snapshot and returned as-is by `check_unit_consistency`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    pub model: ModelElement,
    pub compartments: Vec<ModelElement>,
    pub species: Vec<ModelElement>,
    pub parameters: Vec<ModelElement>,
    pub structural_issues: Vec<DocumentIssue>,
    pub unit_issues: Vec<DocumentIssue>,
}

impl ModelSnapshot {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model: ModelElement::new(ElementKind::Model, model_id),
            compartments: Vec::new(),
            species: Vec::new(),
            parameters: Vec::new(),
            structural_issues: Vec::new(),
            unit_issues: Vec::new(),
        }
    }

    /// Parse a `.json`, `.yaml` or `.yml` snapshot
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PbkError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Err(PbkError::UnsupportedFormat(format!(
                "{} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(content)
            .map_err(|e| PbkError::DocumentParse(e.to_string()))?;
        Ok(file.into())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_yaml::from_str(content)
            .map_err(|e| PbkError::DocumentParse(e.to_string()))?;
        Ok(file.into())
    }

    /// Replace the model-level element, keeping the document kind
    pub fn with_model(mut self, model: ModelElement) -> Self {
        self.model = ModelElement {
            kind: ElementKind::Model,
            ..model
        };
        self
    }

    /// Add an element to the collection matching its kind
    pub fn with_element(mut self, element: ModelElement) -> Self {
        match element.kind {
            ElementKind::Compartment => self.compartments.push(element),
            ElementKind::Species => self.species.push(element),
            ElementKind::Parameter => self.parameters.push(element),
            ElementKind::Model => return self.with_model(element),
            ElementKind::Reaction | ElementKind::Other => {}
        }
        self
    }

    pub fn with_structural_issue(mut self, issue: DocumentIssue) -> Self {
        self.structural_issues.push(issue);
        self
    }

    pub fn with_unit_issue(mut self, issue: DocumentIssue) -> Self {
        self.unit_issues.push(issue);
        self
    }
}

impl From<SnapshotFile> for ModelSnapshot {
    fn from(file: SnapshotFile) -> Self {
        let collect = |elements: Vec<SnapshotElement>, kind: ElementKind| -> Vec<ModelElement> {
            elements.into_iter().map(|e| e.into_element(kind)).collect()
        };

        Self {
            model: file.model.into_element(ElementKind::Model),
            compartments: collect(file.compartments, ElementKind::Compartment),
            species: collect(file.species, ElementKind::Species),
            parameters: collect(file.parameters, ElementKind::Parameter),
            structural_issues: file.structural_issues,
            unit_issues: file.unit_issues,
        }
    }
}

impl ModelDocument for ModelSnapshot {
    fn model(&self) -> &ModelElement {
        &self.model
    }

    fn compartments(&self) -> &[ModelElement] {
        &self.compartments
    }

    fn species(&self) -> &[ModelElement] {
        &self.species
    }

    fn parameters(&self) -> &[ModelElement] {
        &self.parameters
    }

    fn structural_issues(&self) -> Vec<DocumentIssue> {
        self.structural_issues.clone()
    }

    fn check_unit_consistency(&self) -> Vec<DocumentIssue> {
        self.unit_issues.clone()
    }
}
