//! Error types for PBK annotation validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PbkError {
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ontology error: {0}")]
    Ontology(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Regex error: {0}")]
    RegexError(String),
}

impl From<regex::Error> for PbkError {
    fn from(err: regex::Error) -> Self {
        PbkError::RegexError(err.to_string())
    }
}

impl From<crate::ontology::OntologyError> for PbkError {
    fn from(err: crate::ontology::OntologyError) -> Self {
        PbkError::Ontology(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PbkError>;
