/**
 * pipeline.rs
 * Validation pipeline over a model document
 *
 * Stages, in order:
 *   1. structural gate   - error/fatal parser findings stop the run
 *   2. unit consistency  - findings become ERROR or WARNING, never abort
 *   3. model rules       - taxon and chemical applicability
 *   4. element rules     - compartments, species, parameters
 *   5. duplicate use     - compartments, then parameters
 *
 * Stages 3-5 always run to completion and collect every finding.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::diagnostic::{Diagnostic, ErrorCode, Level, ValidationResult};
use super::duplicates::check_duplicate_use;
use super::rules;
use crate::annotation::ElementAnnotations;
use crate::document::{DocumentIssue, ElementKind, ModelDocument, ModelElement, UNDECLARED_UNITS_CODE};
use crate::errors::Result;
use crate::ontology::OntologyResolver;

/// Pipeline switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Run the strict unit-consistency check
    pub units_consistency: bool,
    /// Run model, element and duplicate-use rules
    pub annotations: bool,
    /// Emit each record through tracing
    pub log_records: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            units_consistency: true,
            annotations: true,
            log_records: true,
        }
    }
}

/// Where the pipeline stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Completed,
    StructuralGate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub critical: usize,
}

impl LevelCounts {
    fn of(records: &[Diagnostic]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.level {
                Level::Ok => {}
                Level::Info => counts.info += 1,
                Level::Warning => counts.warning += 1,
                Level::Error => counts.error += 1,
                Level::Critical => counts.critical += 1,
            }
        }
        counts
    }
}

/// Outcome of one `validate` run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub model: String,
    pub valid: bool,
    pub stage: Stage,
    pub timestamp: DateTime<Utc>,
    pub counts: LevelCounts,
    pub records: Vec<Diagnostic>,
}

impl ValidationReport {
    fn new(model: &str, stage: Stage, result: ValidationResult) -> Self {
        Self {
            model: model.to_string(),
            valid: result.valid,
            stage,
            timestamp: Utc::now(),
            counts: LevelCounts::of(&result.records),
            records: result.records,
        }
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.records.iter().any(|r| r.code.is_some_and(|c| c.belongs_to(code)))
    }

    pub fn records_for<'a>(&'a self, element: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.records.iter().filter(move |r| r.element.as_deref() == Some(element))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Annotation validator bound to a loaded resolver
///
/// Holds no state of its own; one resolver serves any number of runs.
pub struct Validator<'r> {
    resolver: &'r OntologyResolver,
    options: ValidationOptions,
}

impl<'r> Validator<'r> {
    pub fn new(resolver: &'r OntologyResolver) -> Self {
        Self {
            resolver,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Full pipeline
    pub fn validate(&self, document: &dyn ModelDocument) -> ValidationReport {
        let model_id = document.model().id.as_str();
        info!(model = model_id, "validating model");

        let (mut result, critical) = self.check_structure(document);
        if critical {
            warn!(model = model_id, "structural errors, skipping remaining checks");
            return self.finish(model_id, Stage::StructuralGate, result);
        }

        if self.options.units_consistency {
            result.merge(self.check_units(document));
        }

        if self.options.annotations {
            result.merge(self.check_model_annotations(document));
            result.merge(self.check_compartment_annotations(document));
            result.merge(self.check_species_annotations(document));
            result.merge(self.check_parameter_annotations(document));
            result.merge(self.check_duplicate_use(document));
        }

        self.finish(model_id, Stage::Completed, result)
    }

    fn finish(&self, model_id: &str, stage: Stage, result: ValidationResult) -> ValidationReport {
        let report = ValidationReport::new(model_id, stage, result);

        if self.options.log_records {
            for record in &report.records {
                record.log();
            }
        }

        info!(
            model = model_id,
            valid = report.valid,
            errors = report.counts.error + report.counts.critical,
            warnings = report.counts.warning,
            "validation finished"
        );
        report
    }

    /// Structural findings at native level; the flag is set by error/fatal
    pub fn check_structure(&self, document: &dyn ModelDocument) -> (ValidationResult, bool) {
        let issues = document.structural_issues();
        let critical = issues.iter().any(DocumentIssue::is_critical);

        let result = issues
            .into_iter()
            .map(|issue| {
                let level = Level::from(issue.severity);
                issue_record(issue, level, ErrorCode::DocumentStructure)
            })
            .collect();

        (result, critical)
    }

    /// Unit findings: ERROR if error/fatal and not undeclared units, else WARNING
    pub fn check_units(&self, document: &dyn ModelDocument) -> ValidationResult {
        let issues = document.check_unit_consistency();
        debug!(count = issues.len(), "unit consistency findings");

        issues
            .into_iter()
            .map(|issue| {
                let level = if issue.is_critical() && issue.code != UNDECLARED_UNITS_CODE {
                    Level::Error
                } else {
                    Level::Warning
                };
                issue_record(issue, level, ErrorCode::UnitConsistency)
            })
            .collect()
    }

    pub fn check_model_annotations(&self, document: &dyn ModelDocument) -> ValidationResult {
        self.check_model_element(document.model())
    }

    pub fn check_compartment_annotations(&self, document: &dyn ModelDocument) -> ValidationResult {
        self.check_collection(document.compartments())
    }

    pub fn check_species_annotations(&self, document: &dyn ModelDocument) -> ValidationResult {
        self.check_collection(document.species())
    }

    pub fn check_parameter_annotations(&self, document: &dyn ModelDocument) -> ValidationResult {
        self.check_collection(document.parameters())
    }

    /// Duplicate-use checks over compartments and parameters
    pub fn check_duplicate_use(&self, document: &dyn ModelDocument) -> ValidationResult {
        let mut result = check_duplicate_use(document.compartments(), ElementKind::Compartment, self.resolver);
        result.merge(check_duplicate_use(document.parameters(), ElementKind::Parameter, self.resolver));
        result
    }

    /// Rules for one element; None for element kinds without rules
    pub fn check_element_annotation(&self, element: &ModelElement) -> Option<ValidationResult> {
        let rule: fn(&ModelElement, &ElementAnnotations, &OntologyResolver) -> Diagnostic = match element.kind {
            ElementKind::Model => return Some(self.check_model_element(element)),
            ElementKind::Compartment => rules::compartment_rule,
            ElementKind::Species => rules::species_rule,
            ElementKind::Parameter => rules::parameter_rule,
            ElementKind::Reaction | ElementKind::Other => return None,
        };

        let annotations = ElementAnnotations::of(element);
        let mut result = ValidationResult::with_record(rules::unsupported_qualifier_rule(element, &annotations));
        result.add(rule(element, &annotations, self.resolver));
        Some(result)
    }

    fn check_model_element(&self, model: &ModelElement) -> ValidationResult {
        let annotations = ElementAnnotations::of(model);
        [
            rules::unsupported_qualifier_rule(model, &annotations),
            rules::model_taxon_rule(model, &annotations, self.resolver),
            rules::model_chemical_rule(model, &annotations, self.resolver),
        ]
        .into_iter()
        .collect()
    }

    fn check_collection(&self, elements: &[ModelElement]) -> ValidationResult {
        let mut result = ValidationResult::new();
        for element in elements {
            if let Some(outcome) = self.check_element_annotation(element) {
                result.merge(outcome);
            }
        }
        result
    }
}

fn issue_record(issue: DocumentIssue, level: Level, code: ErrorCode) -> Diagnostic {
    let message = if issue.code == 0 {
        issue.message
    } else {
        format!("[{}] {}", issue.code, issue.message)
    };

    let record = Diagnostic::new(level, code, message);
    match issue.element {
        Some(element) => record.with_element(element),
        None => record,
    }
}

/// Validate with default options
pub fn validate(document: &dyn ModelDocument, resolver: &OntologyResolver) -> ValidationReport {
    Validator::new(resolver).validate(document)
}
