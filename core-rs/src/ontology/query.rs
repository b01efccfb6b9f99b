/**
 * query.rs
 * SPARQL builders for class lookup and subsumption
 *
 * Every IRI passed in here must already be validated as a NamedNode;
 * builders only interpolate.
 */

use std::collections::HashMap;

pub type QueryResult = HashMap<String, String>;

const PREFIXES: &str = r#"
            PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
            PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
            PREFIX owl: <http://www.w3.org/2002/07/owl#>
"#;

pub struct SparqlQuery {
    query: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Is the IRI a class of this graph (declared, or part of the hierarchy)
    pub fn class_exists(class_iri: &str) -> Self {
        Self::new(format!(
            r#"{}
            ASK {{
                {{ <{iri}> rdf:type owl:Class }}
                UNION {{ <{iri}> rdf:type rdfs:Class }}
                UNION {{ <{iri}> rdfs:subClassOf ?parent }}
                UNION {{ ?child rdfs:subClassOf <{iri}> }}
            }}
            "#,
            PREFIXES,
            iri = class_iri
        ))
    }

    /// First rdfs:label of a class
    pub fn class_label(class_iri: &str) -> Self {
        Self::new(format!(
            r#"{}
            SELECT ?label
            WHERE {{
                <{}> rdfs:label ?label .
            }}
            LIMIT 1
            "#,
            PREFIXES, class_iri
        ))
    }

    /// Reflexive-transitive subsumption check
    pub fn is_subclass_of(class_iri: &str, ancestor_iri: &str) -> Self {
        Self::new(format!(
            r#"{}
            ASK {{
                <{}> rdfs:subClassOf* <{}> .
            }}
            "#,
            PREFIXES, class_iri, ancestor_iri
        ))
    }

    /// All named ancestors of a class, the class included
    pub fn ancestors(class_iri: &str) -> Self {
        Self::new(format!(
            r#"{}
            SELECT DISTINCT ?class ?label
            WHERE {{
                <{}> rdfs:subClassOf* ?class .
                FILTER(isIRI(?class))
                OPTIONAL {{ ?class rdfs:label ?label }}
            }}
            "#,
            PREFIXES, class_iri
        ))
    }

    /// All named descendants of a category, the category included
    pub fn descendants(category_iri: &str) -> Self {
        Self::new(format!(
            r#"{}
            SELECT DISTINCT ?class ?label
            WHERE {{
                ?class rdfs:subClassOf* <{}> .
                FILTER(isIRI(?class))
                OPTIONAL {{ ?class rdfs:label ?label }}
            }}
            "#,
            PREFIXES, category_iri
        ))
    }
}
