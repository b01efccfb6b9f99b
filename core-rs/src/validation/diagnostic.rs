//! Diagnostic records, levels and error codes

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

use crate::document::IssueSeverity;

/// Severity of a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Ok,
    Info,
    Warning,
    Error,
    /// Fatal structural finding
    Critical,
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Error and Critical make the target invalid
    pub const fn invalidates(&self) -> bool {
        matches!(self, Level::Error | Level::Critical)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<IssueSeverity> for Level {
    fn from(severity: IssueSeverity) -> Self {
        match severity {
            IssueSeverity::Info => Level::Info,
            IssueSeverity::Warning => Level::Warning,
            IssueSeverity::Error => Level::Error,
            IssueSeverity::Fatal => Level::Critical,
        }
    }
}

/// Closed set of error codes, one per rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ModelMissingTaxonSpecification,
    ModelMissingBqbHasTaxonTerm,
    ModelMissingNcbitaxonTerm,
    ModelMissingChemicalSpecification,
    ModelMissingBqbHasPropertyTerm,
    ModelMissingChebiTerm,

    CompartmentMissingBqmTerm,
    CompartmentMissingPbpkoBqmTerm,
    CompartmentMultiplePbpkoBqmTerms,
    CompartmentInvalidPbpkoBqmTerm,
    CompartmentMultipleAnnotationUse,

    SpeciesMissingBqmTerm,
    SpeciesMissingPbpkoBqmTerm,
    SpeciesMultiplePbpkoBqmTerms,
    SpeciesInvalidPbpkoBqmTerm,

    ParameterMissingBqmTerm,
    ParameterMultiplePbpkoBqmTerms,
    ParameterInvalidPbpkoBqmTerm,
    ParameterMissingBqbIsTerm,
    ParameterMultipleChebiBqbIsTerms,
    ParameterMultipleAnnotationUse,

    AnnotationUnsupportedQualifier,

    /// Finding of the external structural checker
    DocumentStructure,
    /// Finding of the external unit checker
    UnitConsistency,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ModelMissingTaxonSpecification => "MODEL_MISSING_TAXON_SPECIFICATION",
            Self::ModelMissingBqbHasTaxonTerm => "MODEL_MISSING_BQB_HAS_TAXON_TERM",
            Self::ModelMissingNcbitaxonTerm => "MODEL_MISSING_NCBITAXON_TERM",
            Self::ModelMissingChemicalSpecification => "MODEL_MISSING_CHEMICAL_SPECIFICATION",
            Self::ModelMissingBqbHasPropertyTerm => "MODEL_MISSING_BQB_HAS_PROPERTY_TERM",
            Self::ModelMissingChebiTerm => "MODEL_MISSING_CHEBI_TERM",
            Self::CompartmentMissingBqmTerm => "COMPARTMENT_MISSING_BQM_TERM",
            Self::CompartmentMissingPbpkoBqmTerm => "COMPARTMENT_MISSING_PBPKO_BQM_TERM",
            Self::CompartmentMultiplePbpkoBqmTerms => "COMPARTMENT_MULTIPLE_PBPKO_BQM_TERMS",
            Self::CompartmentInvalidPbpkoBqmTerm => "COMPARTMENT_INVALID_PBPKO_BQM_TERM",
            Self::CompartmentMultipleAnnotationUse => "COMPARTMENT_MULTIPLE_ANNOTATION_USE",
            Self::SpeciesMissingBqmTerm => "SPECIES_MISSING_BQM_TERM",
            Self::SpeciesMissingPbpkoBqmTerm => "SPECIES_MISSING_PBPKO_BQM_TERM",
            Self::SpeciesMultiplePbpkoBqmTerms => "SPECIES_MULTIPLE_PBPKO_BQM_TERMS",
            Self::SpeciesInvalidPbpkoBqmTerm => "SPECIES_INVALID_PBPKO_BQM_TERM",
            Self::ParameterMissingBqmTerm => "PARAMETER_MISSING_BQM_TERM",
            Self::ParameterMultiplePbpkoBqmTerms => "PARAMETER_MULTIPLE_PBPKO_BQM_TERMS",
            Self::ParameterInvalidPbpkoBqmTerm => "PARAMETER_INVALID_PBPKO_BQM_TERM",
            Self::ParameterMissingBqbIsTerm => "PARAMETER_MISSING_BQB_IS_TERM",
            Self::ParameterMultipleChebiBqbIsTerms => "PARAMETER_MULTIPLE_CHEBI_BQB_IS_TERMS",
            Self::ParameterMultipleAnnotationUse => "PARAMETER_MULTIPLE_ANNOTATION_USE",
            Self::AnnotationUnsupportedQualifier => "ANNOTATION_UNSUPPORTED_QUALIFIER",
            Self::DocumentStructure => "DOCUMENT_STRUCTURE",
            Self::UnitConsistency => "UNIT_CONSISTENCY",
        }
    }

    /// Parent check of a refined model-level code
    pub const fn parent(&self) -> Option<ErrorCode> {
        match self {
            Self::ModelMissingBqbHasTaxonTerm | Self::ModelMissingNcbitaxonTerm => {
                Some(Self::ModelMissingTaxonSpecification)
            }
            Self::ModelMissingBqbHasPropertyTerm | Self::ModelMissingChebiTerm => {
                Some(Self::ModelMissingChemicalSpecification)
            }
            _ => None,
        }
    }

    /// Code itself or its parent equals `other`
    pub fn belongs_to(&self, other: ErrorCode) -> bool {
        *self == other || self.parent() == Some(other)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: Level,
    /// Absent only for OK outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl Diagnostic {
    pub fn new(level: Level, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            level,
            code: Some(code),
            message: message.into(),
            element: None,
        }
    }

    pub fn ok() -> Self {
        Self {
            level: Level::Ok,
            code: None,
            message: String::new(),
            element: None,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Level::Error, code, message)
    }

    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, code, message)
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.level == Level::Ok
    }

    pub fn invalidates(&self) -> bool {
        self.level.invalidates()
    }

    /// Emit at the record's native level
    pub fn log(&self) {
        let code = self.code.map(|c| c.as_str()).unwrap_or("OK");
        let element = self.element.as_deref().unwrap_or("-");
        match self.level {
            Level::Ok | Level::Info => info!(code, element, "{}", self.message),
            Level::Warning => warn!(code, element, "{}", self.message),
            Level::Error | Level::Critical => error!(code, element, "{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(code) = self.code {
            write!(f, " {}", code)?;
        }
        if let Some(element) = &self.element {
            write!(f, " <{}>", element)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Validity plus the non-OK records that decided it
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub records: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            records: Vec::new(),
        }
    }

    pub fn with_record(record: Diagnostic) -> Self {
        let mut result = Self::new();
        result.add(record);
        result
    }

    /// OK outcomes are dropped
    pub fn add(&mut self, record: Diagnostic) {
        if record.is_ok() {
            return;
        }
        if record.invalidates() {
            self.valid = false;
        }
        self.records.push(record);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.records.extend(other.records);
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.records.iter().any(|r| r.code.is_some_and(|c| c.belongs_to(code)))
    }

    pub fn count(&self, level: Level) -> usize {
        self.records.iter().filter(|r| r.level == level).count()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Diagnostic> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        let mut result = Self::new();
        for record in iter {
            result.add(record);
        }
        result
    }
}
