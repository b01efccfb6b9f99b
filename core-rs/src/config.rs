/**
 * config.rs
 * Parser for validator configuration files (YAML format)
 *
 * Format:
 * ```yaml
 * ontologies:
 *   domain:
 *     source: ./ontologies/pbpko.ttl
 *   chemical:
 *     source: ./ontologies/chebi.owl
 *     format: rdfxml
 *   taxonomy:
 *     source: ./ontologies/ncbitaxon.nt
 * categories:
 *   compartment: http://purl.obolibrary.org/obo/PBPKO_00446
 * options:
 *   units_consistency: true
 * ```
 *
 * Relative ontology paths resolve against the directory of the config file.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::PbkError;
use crate::ontology::{CategoryAnchors, OntologyKind, RdfSyntax};
use crate::validation::ValidationOptions;

/// Validator configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatorConfig {
    pub ontologies: OntologiesConfig,
    /// Category anchor overrides
    #[serde(default)]
    pub categories: CategoryAnchors,
    #[serde(default)]
    pub options: ValidationOptions,
}

/// One source per graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OntologiesConfig {
    pub domain: OntologySource,
    pub chemical: OntologySource,
    pub taxonomy: OntologySource,
}

impl OntologiesConfig {
    pub fn source(&self, kind: OntologyKind) -> &OntologySource {
        match kind {
            OntologyKind::Domain => &self.domain,
            OntologyKind::Chemical => &self.chemical,
            OntologyKind::Taxonomy => &self.taxonomy,
        }
    }

    fn sources_mut(&mut self) -> [&mut OntologySource; 3] {
        [&mut self.domain, &mut self.chemical, &mut self.taxonomy]
    }
}

/// Local ontology file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OntologySource {
    pub source: PathBuf,
    /// Inferred from the file extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RdfSyntax>,
}

impl OntologySource {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            format: None,
        }
    }

    /// Explicit format, else the one implied by the extension
    pub fn syntax(&self) -> Result<RdfSyntax, PbkError> {
        match self.format {
            Some(format) => Ok(format),
            None => Ok(RdfSyntax::from_path(&self.source)?),
        }
    }
}

impl ValidatorConfig {
    pub fn new(domain: OntologySource, chemical: OntologySource, taxonomy: OntologySource) -> Self {
        ValidatorConfig {
            ontologies: OntologiesConfig {
                domain,
                chemical,
                taxonomy,
            },
            categories: CategoryAnchors::default(),
            options: ValidationOptions::default(),
        }
    }

    /// Load a config file and resolve its ontology paths
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PbkError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PbkError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_yaml_str(&content, base_dir)
    }

    /// Parse YAML; relative sources are joined onto `base_dir`
    pub fn from_yaml_str(content: &str, base_dir: &Path) -> Result<Self, PbkError> {
        let mut config: ValidatorConfig = serde_yaml::from_str(content)
            .map_err(|e| PbkError::Config(format!("Invalid validator config YAML: {}", e)))?;

        for source in config.ontologies.sources_mut() {
            if source.source.is_relative() {
                source.source = base_dir.join(&source.source);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Ensures every ontology source exists and has a known syntax
    pub fn validate(&self) -> Result<(), PbkError> {
        for kind in OntologyKind::ALL {
            let source = self.ontologies.source(kind);

            if !source.source.is_file() {
                return Err(PbkError::Config(format!(
                    "{} ontology source not found: {}",
                    kind,
                    source.source.display()
                )));
            }

            source.syntax().map_err(|e| {
                PbkError::Config(format!("{} ontology source has no usable format: {}", kind, e))
            })?;
        }

        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PbkError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }
}
