/**
 * graph.rs
 * Class hierarchies backed by in-memory Oxigraph stores
 */

use oxigraph::io::RdfFormat;
use oxigraph::model::{NamedNode, Term};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::query::{QueryResult, SparqlQuery};

#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Failed to load ontology: {0}")]
    LoadError(String),

    #[error("Failed to parse RDF: {0}")]
    ParseError(String),

    #[error("Ontology not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Oxigraph error: {0}")]
    StoreError(String),

    #[error("Unsupported RDF syntax: {0}")]
    UnsupportedSyntax(String),
}

/// A class of one ontology graph
///
/// Equality and ordering consider the IRI only; the label is informational.
#[derive(Debug, Clone, Serialize)]
pub struct ClassRef {
    pub iri: String,
    pub label: Option<String>,
}

impl ClassRef {
    pub fn new(iri: impl Into<String>, label: Option<String>) -> Self {
        Self {
            iri: iri.into(),
            label,
        }
    }

    /// Last path segment of the IRI, e.g. `PBPKO_00477`
    pub fn local_name(&self) -> &str {
        self.iri
            .rsplit(|c| c == '/' || c == '#')
            .next()
            .unwrap_or(self.iri.as_str())
    }

    /// `PBPKO_00477 (liver)` or the bare local name
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{} ({})", self.local_name(), label),
            None => self.local_name().to_string(),
        }
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iri.hash(state);
    }
}

impl PartialOrd for ClassRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iri.cmp(&other.iri)
    }
}

/// Read-only view of a class hierarchy
///
/// IRIs passed in are exact; namespace rewriting happens in the resolver.
/// Implementations answer negatively instead of failing.
pub trait ClassHierarchy: Send + Sync {
    /// The class with exactly this IRI, if the graph knows it
    fn lookup(&self, iri: &str) -> Option<ClassRef>;

    /// Reflexive-transitive `rdfs:subClassOf`
    fn is_subclass_of(&self, class_iri: &str, ancestor_iri: &str) -> bool;

    fn ancestors(&self, class_iri: &str) -> BTreeSet<ClassRef>;

    fn descendants(&self, category_iri: &str) -> BTreeSet<ClassRef>;
}

/// RDF serialisation of an ontology file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfSyntax {
    Turtle,
    NTriples,
    RdfXml,
}

impl RdfSyntax {
    /// Guess the syntax from a file extension
    pub fn from_path(path: &Path) -> Result<Self, OntologyError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ttl" => Ok(Self::Turtle),
            "nt" => Ok(Self::NTriples),
            "owl" | "rdf" | "xml" => Ok(Self::RdfXml),
            _ => Err(OntologyError::UnsupportedSyntax(format!(
                "{} (expected .ttl, .nt, .owl, .rdf or .xml)",
                path.display()
            ))),
        }
    }

    pub fn format(&self) -> RdfFormat {
        match self {
            Self::Turtle => RdfFormat::Turtle,
            Self::NTriples => RdfFormat::NTriples,
            Self::RdfXml => RdfFormat::RdfXml,
        }
    }
}

/// One ontology graph held in its own Oxigraph store
pub struct RdfOntology {
    name: String,
    store: Store,
}

impl RdfOntology {
    /// Empty graph
    pub fn new(name: impl Into<String>) -> Result<Self, OntologyError> {
        let store = Store::new().map_err(|e| OntologyError::StoreError(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            store,
        })
    }

    /// Load a graph from a local RDF file
    pub fn from_path(
        name: impl Into<String>,
        path: &Path,
        syntax: Option<RdfSyntax>,
    ) -> Result<Self, OntologyError> {
        if !path.exists() {
            return Err(OntologyError::NotFound(format!("File not found: {:?}", path)));
        }

        if path.is_dir() {
            return Err(OntologyError::LoadError(format!("Path is a directory: {:?}", path)));
        }

        let syntax = match syntax {
            Some(syntax) => syntax,
            None => RdfSyntax::from_path(path)?,
        };

        let name = name.into();
        info!(ontology = %name, path = %path.display(), ?syntax, "loading ontology");

        let file = File::open(path)?;
        Self::from_reader(name, syntax, BufReader::new(file))
    }

    pub fn from_reader(
        name: impl Into<String>,
        syntax: RdfSyntax,
        reader: impl Read,
    ) -> Result<Self, OntologyError> {
        let ontology = Self::new(name)?;

        ontology
            .store
            .load_from_reader(syntax.format(), reader)
            .map_err(|e| OntologyError::ParseError(e.to_string()))?;

        debug!(ontology = %ontology.name, triples = ontology.len(), "ontology loaded");
        Ok(ontology)
    }

    pub fn from_turtle_str(name: impl Into<String>, turtle: &str) -> Result<Self, OntologyError> {
        Self::from_reader(name, RdfSyntax::Turtle, turtle.as_bytes())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of triples, 0 if the store cannot tell
    pub fn len(&self) -> usize {
        self.store.len().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Execute SPARQL query
    pub fn query_sparql(&self, query: &str) -> Result<Vec<QueryResult>, OntologyError> {
        let results = self
            .store
            .query(query)
            .map_err(|e| OntologyError::QueryError(e.to_string()))?;

        match results {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();

                for solution in solutions {
                    let solution = solution.map_err(|e| OntologyError::QueryError(e.to_string()))?;

                    let mut row = HashMap::new();
                    for (var, term) in solution.iter() {
                        row.insert(var.as_str().to_string(), term_value(term));
                    }

                    rows.push(row);
                }

                Ok(rows)
            }
            QueryResults::Boolean(result) => {
                let mut row = HashMap::new();
                row.insert("result".to_string(), result.to_string());
                Ok(vec![row])
            }
            QueryResults::Graph(_) => Err(OntologyError::QueryError(
                "Graph queries not supported".to_string(),
            )),
        }
    }

    fn ask(&self, query: &SparqlQuery) -> bool {
        match self.query_sparql(query.as_str()) {
            Ok(rows) => rows
                .first()
                .and_then(|row| row.get("result"))
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(false),
            Err(e) => {
                warn!(ontology = %self.name, error = %e, "ASK query failed");
                false
            }
        }
    }

    fn select_classes(&self, query: &SparqlQuery) -> BTreeSet<ClassRef> {
        match self.query_sparql(query.as_str()) {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|mut row| {
                    let iri = row.remove("class")?;
                    Some(ClassRef::new(iri, row.remove("label")))
                })
                .collect(),
            Err(e) => {
                warn!(ontology = %self.name, error = %e, "class query failed");
                BTreeSet::new()
            }
        }
    }

    fn label(&self, class_iri: &str) -> Option<String> {
        self.query_sparql(SparqlQuery::class_label(class_iri).as_str())
            .ok()?
            .into_iter()
            .next()
            .and_then(|mut row| row.remove("label"))
    }
}

impl ClassHierarchy for RdfOntology {
    fn lookup(&self, iri: &str) -> Option<ClassRef> {
        let node = NamedNode::new(iri).ok()?;

        if !self.ask(&SparqlQuery::class_exists(node.as_str())) {
            return None;
        }

        Some(ClassRef::new(node.as_str(), self.label(node.as_str())))
    }

    fn is_subclass_of(&self, class_iri: &str, ancestor_iri: &str) -> bool {
        let (Ok(class), Ok(ancestor)) = (NamedNode::new(class_iri), NamedNode::new(ancestor_iri)) else {
            return false;
        };

        if class == ancestor {
            return true;
        }

        self.ask(&SparqlQuery::is_subclass_of(class.as_str(), ancestor.as_str()))
    }

    fn ancestors(&self, class_iri: &str) -> BTreeSet<ClassRef> {
        match NamedNode::new(class_iri) {
            Ok(node) => self.select_classes(&SparqlQuery::ancestors(node.as_str())),
            Err(_) => BTreeSet::new(),
        }
    }

    fn descendants(&self, category_iri: &str) -> BTreeSet<ClassRef> {
        match NamedNode::new(category_iri) {
            Ok(node) => self.select_classes(&SparqlQuery::descendants(node.as_str())),
            Err(_) => BTreeSet::new(),
        }
    }
}

fn term_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}
