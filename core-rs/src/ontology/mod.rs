/**
 * ontology module
 *
 * - graph: class hierarchies backed by Oxigraph stores
 * - query: SPARQL query builders
 * - namespace: scheme canonicalisation and IRI rewrite rules
 * - categories: category anchors, parameter and route classification
 * - resolver: resolution across the domain, chemical and taxonomy graphs
 */

pub mod categories;
pub mod graph;
pub mod namespace;
pub mod query;
pub mod resolver;

pub use categories::{Category, CategoryAnchors, InputRoute, OntologyKind, ParameterCategory};
pub use graph::{ClassHierarchy, ClassRef, OntologyError, RdfOntology, RdfSyntax};
pub use namespace::{RewriteRule, RewriteRules};
pub use query::{QueryResult, SparqlQuery};
pub use resolver::{Ontology, OntologyResolver};
