/**
 * resolver.rs
 * Ontology resolution across the domain, chemical and taxonomy graphs
 *
 * Resolution order for a candidate IRI:
 *   1. canonicalise the scheme (https -> http)
 *   2. direct lookup in the graph, retried under https for graphs that
 *      declare their classes that way
 *   3. rewrite rules of the graph, in order; first resolving rewrite wins
 *
 * Category IRIs resolve the same way before subsumption is asked.
 *
 * All queries are side-effect free; unresolvable input yields None / false.
 */

use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::categories::{Category, CategoryAnchors, InputRoute, OntologyKind, ParameterCategory};
use super::graph::{ClassHierarchy, ClassRef, RdfOntology};
use super::namespace::{canonical_scheme, secure_scheme, RewriteRules};
use crate::config::ValidatorConfig;
use crate::errors::Result;

static SHARED_RESOLVER: OnceCell<OntologyResolver> = OnceCell::new();

/// One graph together with its rewrite rules
pub struct Ontology {
    kind: OntologyKind,
    hierarchy: Box<dyn ClassHierarchy>,
    rules: RewriteRules,
}

impl Ontology {
    /// Graph with the default rewrite rules of its kind
    pub fn new(kind: OntologyKind, hierarchy: impl ClassHierarchy + 'static) -> Result<Self> {
        Ok(Self::with_rules(kind, hierarchy, RewriteRules::for_kind(kind)?))
    }

    pub fn with_rules(kind: OntologyKind, hierarchy: impl ClassHierarchy + 'static, rules: RewriteRules) -> Self {
        Self {
            kind,
            hierarchy: Box::new(hierarchy),
            rules,
        }
    }

    pub fn resolve(&self, iri: &str) -> Option<ClassRef> {
        let canonical = canonical_scheme(iri);
        if canonical.is_empty() {
            return None;
        }

        if let Some(class) = self.lookup(&canonical) {
            return Some(class);
        }

        let found = self.rules.candidates(&canonical).find_map(|rewritten| {
            let class = self.lookup(&rewritten)?;
            debug!(ontology = %self.kind, from = %iri, to = %class.iri, "resolved via rewrite rule");
            Some(class)
        });
        found
    }

    /// Canonical spelling first, then the https spelling for graphs that declare it
    fn lookup(&self, iri: &str) -> Option<ClassRef> {
        self.hierarchy
            .lookup(iri)
            .or_else(|| secure_scheme(iri).and_then(|secure| self.hierarchy.lookup(&secure)))
    }

    pub fn is_member_of(&self, iri: &str, category_iri: &str) -> bool {
        match self.resolve(iri) {
            Some(class) => self.class_is_member_of(&class, category_iri),
            None => false,
        }
    }

    /// Subsumption for an already resolved class
    ///
    /// The category goes through the same resolution as the class, so
    /// shorthand and https category IRIs name the same class.
    pub fn class_is_member_of(&self, class: &ClassRef, category_iri: &str) -> bool {
        let category = match self.resolve(category_iri) {
            Some(category) => category.iri,
            None => canonical_scheme(category_iri).into_owned(),
        };
        class.iri == category || self.hierarchy.is_subclass_of(&class.iri, &category)
    }

    pub fn classes_under(&self, category_iri: &str) -> BTreeSet<ClassRef> {
        match self.resolve(category_iri) {
            Some(category) => self.hierarchy.descendants(&category.iri),
            None => BTreeSet::new(),
        }
    }

    pub fn ancestors(&self, iri: &str) -> BTreeSet<ClassRef> {
        match self.resolve(iri) {
            Some(class) => self.hierarchy.ancestors(&class.iri),
            None => BTreeSet::new(),
        }
    }
}

/// Owns the three loaded graphs and the category anchors
///
/// Construct once and share; every query takes `&self`.
pub struct OntologyResolver {
    domain: Ontology,
    chemical: Ontology,
    taxonomy: Ontology,
    anchors: CategoryAnchors,
}

impl OntologyResolver {
    pub fn new(domain: Ontology, chemical: Ontology, taxonomy: Ontology) -> Self {
        Self {
            domain,
            chemical,
            taxonomy,
            anchors: CategoryAnchors::default(),
        }
    }

    /// Resolver over three hierarchies with default rewrite rules
    pub fn from_hierarchies(
        domain: impl ClassHierarchy + 'static,
        chemical: impl ClassHierarchy + 'static,
        taxonomy: impl ClassHierarchy + 'static,
    ) -> Result<Self> {
        Ok(Self::new(
            Ontology::new(OntologyKind::Domain, domain)?,
            Ontology::new(OntologyKind::Chemical, chemical)?,
            Ontology::new(OntologyKind::Taxonomy, taxonomy)?,
        ))
    }

    pub fn with_anchors(mut self, anchors: CategoryAnchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Load all three graphs from the configured files
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        let load = |kind: OntologyKind| -> Result<RdfOntology> {
            let source = config.ontologies.source(kind);
            Ok(RdfOntology::from_path(kind.label(), &source.source, Some(source.syntax()?))?)
        };

        let resolver = Self::from_hierarchies(
            load(OntologyKind::Domain)?,
            load(OntologyKind::Chemical)?,
            load(OntologyKind::Taxonomy)?,
        )?
        .with_anchors(config.categories.clone());

        info!("ontology resolver ready");
        Ok(resolver)
    }

    /// Process-wide resolver, loaded on first call
    ///
    /// Concurrent first calls load once; later calls return the cached
    /// resolver and ignore `config`. A failed load is not cached.
    pub fn shared(config: &ValidatorConfig) -> Result<&'static OntologyResolver> {
        SHARED_RESOLVER.get_or_try_init(|| Self::from_config(config))
    }

    pub fn graph(&self, kind: OntologyKind) -> &Ontology {
        match kind {
            OntologyKind::Domain => &self.domain,
            OntologyKind::Chemical => &self.chemical,
            OntologyKind::Taxonomy => &self.taxonomy,
        }
    }

    pub fn anchors(&self) -> &CategoryAnchors {
        &self.anchors
    }

    pub fn resolve(&self, iri: &str, kind: OntologyKind) -> Option<ClassRef> {
        self.graph(kind).resolve(iri)
    }

    pub fn is_member_of(&self, iri: &str, kind: OntologyKind, category_iri: &str) -> bool {
        self.graph(kind).is_member_of(iri, category_iri)
    }

    pub fn classes_under(&self, kind: OntologyKind, category_iri: &str) -> BTreeSet<ClassRef> {
        self.graph(kind).classes_under(category_iri)
    }

    pub fn ancestors(&self, iri: &str, kind: OntologyKind) -> BTreeSet<ClassRef> {
        self.graph(kind).ancestors(iri)
    }

    /// Membership in a configured category anchor
    pub fn in_category(&self, iri: &str, category: Category) -> bool {
        self.is_member_of(iri, category.kind(), self.anchors.iri(category))
    }

    /// Resolved class, if it belongs to the category
    pub fn resolve_in_category(&self, iri: &str, category: Category) -> Option<ClassRef> {
        let graph = self.graph(category.kind());
        let class = graph.resolve(iri)?;
        graph
            .class_is_member_of(&class, self.anchors.iri(category))
            .then_some(class)
    }

    /// Every class under a category anchor, for pick-lists
    pub fn category_members(&self, category: Category) -> BTreeSet<ClassRef> {
        self.classes_under(category.kind(), self.anchors.iri(category))
    }

    pub fn parameter_category(&self, iri: &str) -> ParameterCategory {
        if self.in_category(iri, Category::BiochemicalParameter) {
            ParameterCategory::Biochemical
        } else if self.in_category(iri, Category::PhysicochemicalParameter) {
            ParameterCategory::Physicochemical
        } else if self.in_category(iri, Category::PhysiologicalParameter) {
            ParameterCategory::Physiological
        } else {
            ParameterCategory::Other
        }
    }

    /// Descendant of the biochemical or physicochemical parameter category
    pub fn is_chemical_specific(&self, iri: &str) -> bool {
        self.parameter_category(iri).is_chemical_specific()
    }

    /// Uptake route of an input compartment class
    pub fn input_route(&self, iri: &str) -> Option<InputRoute> {
        InputRoute::ALL
            .into_iter()
            .find(|route| self.in_category(iri, route.category()))
    }
}
