//! # PBKA Core - PBK model annotation validator
//!
//! Checks that physiologically-based kinetic (PBK) models are annotated with
//! terms from the PBK ontology (PBPKO), ChEBI and the NCBI taxonomy.
//!
//! ## Core Principle
//!
//! **Ontologies decide, rules collect**: every check is a subsumption query
//! against a loaded ontology graph, and every finding becomes a diagnostic
//! record. Only unreadable or structurally broken documents stop a run.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────────────────┐
//! │  ModelDocument       │     │  OntologyResolver        │
//! │  (snapshot, parser)  │     │  PBPKO / ChEBI / NCBITax │
//! └──────────┬───────────┘     └────────────┬─────────────┘
//!            │                              │
//!            ▼                              ▼
//!      ┌──────────────────────────────────────────┐
//!      │  Validator                               │
//!      │  gate → units → rules → duplicate use    │
//!      └──────────────────────────────────────────┘
//!                        │
//!                        ▼
//!                ValidationReport
//! ```

pub mod annotation;
pub mod config;
pub mod document;
pub mod errors;
pub mod ontology;
pub mod qualifier;
pub mod validation;

pub use annotation::ElementAnnotations;
pub use config::{OntologiesConfig, OntologySource, ValidatorConfig};
pub use document::{CvTerm, DocumentIssue, ElementKind, IssueSeverity, ModelDocument, ModelElement, ModelSnapshot};
pub use errors::{PbkError, Result};
pub use ontology::{
    Category, CategoryAnchors, ClassHierarchy, ClassRef, InputRoute, Ontology, OntologyError, OntologyKind,
    OntologyResolver, ParameterCategory, RdfOntology, RdfSyntax,
};
pub use qualifier::{BiologicalQualifier, ModelQualifier, Qualifier, QualifierFamily, UnsupportedQualifier};
pub use validation::{
    validate, Diagnostic, ErrorCode, Level, Stage, ValidationOptions, ValidationReport, ValidationResult, Validator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file looked up by the CLI when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pbka.yaml";
