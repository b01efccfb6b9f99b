//! IRI normalisation for ontology lookups
//!
//! A resolver first canonicalises the scheme (`https://` -> `http://`),
//! tries the IRI as is, then walks an ordered list of rewrite rules that
//! translate shorthand notations (`obo:`, `urn:miriam:`, identifiers.org)
//! into the OBO PURL namespace. The first rewrite that resolves wins.

use regex::Regex;
use std::borrow::Cow;

use super::categories::OntologyKind;

/// Canonical namespace shared by the three OBO ontologies
pub const OBO_NAMESPACE: &str = "http://purl.obolibrary.org/obo/";

/// Map `https://` to `http://`; other IRIs pass through untouched
///
/// # Examples
///
/// ```
/// use pbka_core::ontology::namespace::canonical_scheme;
///
/// assert_eq!(
///     canonical_scheme("https://purl.obolibrary.org/obo/CHEBI_27732"),
///     "http://purl.obolibrary.org/obo/CHEBI_27732"
/// );
/// assert_eq!(canonical_scheme("obo:CHEBI_27732"), "obo:CHEBI_27732");
/// ```
pub fn canonical_scheme(iri: &str) -> Cow<'_, str> {
    let trimmed = iri.trim();
    match trimmed.strip_prefix("https://") {
        Some(rest) => Cow::Owned(format!("http://{}", rest)),
        None => Cow::Borrowed(trimmed),
    }
}

/// `https://` spelling of a canonical `http://` IRI
///
/// Graphs may declare their classes under either scheme; lookups try the
/// canonical form first and this one second.
pub fn secure_scheme(iri: &str) -> Option<String> {
    iri.strip_prefix("http://").map(|rest| format!("https://{}", rest))
}

/// One (matcher, rewriter) pair
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// `replacement` may reference capture groups as `${1}` or `${name}`
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Rewritten IRI when the rule applies
    pub fn rewrite(&self, iri: &str) -> Option<String> {
        if !self.pattern.is_match(iri) {
            return None;
        }
        Some(self.pattern.replace(iri, self.replacement.as_str()).into_owned())
    }
}

/// Prioritised rewrite rules of one graph
#[derive(Debug, Clone, Default)]
pub struct RewriteRules {
    rules: Vec<RewriteRule>,
}

impl RewriteRules {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Default rules for one of the three graphs
    pub fn for_kind(kind: OntologyKind) -> Result<Self, regex::Error> {
        match kind {
            OntologyKind::Domain => Self::domain(),
            OntologyKind::Chemical => Self::chemical(),
            OntologyKind::Taxonomy => Self::taxonomy(),
        }
    }

    pub fn domain() -> Result<Self, regex::Error> {
        Ok(Self::new(vec![RewriteRule::new(
            r"^obo:([A-Za-z]+_\w+)$",
            format!("{}${{1}}", OBO_NAMESPACE),
        )?]))
    }

    pub fn chemical() -> Result<Self, regex::Error> {
        let target = format!("{}CHEBI_${{1}}", OBO_NAMESPACE);
        Ok(Self::new(vec![
            RewriteRule::new(r"^urn:miriam:chebi:(?:CHEBI(?::|%3A|_))?(\d+)$", target.clone())?,
            RewriteRule::new(r"^http://identifiers\.org/chebi/(?:CHEBI(?::|_))?(\d+)$", target.clone())?,
            RewriteRule::new(r"^http://identifiers\.org/CHEBI:(\d+)$", target.clone())?,
            RewriteRule::new(r"^obo:CHEBI[:_](\d+)$", target)?,
        ]))
    }

    pub fn taxonomy() -> Result<Self, regex::Error> {
        let target = format!("{}NCBITaxon_${{1}}", OBO_NAMESPACE);
        Ok(Self::new(vec![
            RewriteRule::new(r"^http://identifiers\.org/taxonomy/(?:NCBITaxon[:_])?(\d+)$", target.clone())?,
            RewriteRule::new(r"^urn:miriam:taxonomy:(\d+)$", target.clone())?,
            RewriteRule::new(r"^obo:NCBITaxon[:_](\d+)$", target)?,
        ]))
    }

    /// Append a rule with the lowest priority
    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrites of `iri` in rule order, lazily
    pub fn candidates<'a>(&'a self, iri: &'a str) -> impl Iterator<Item = String> + 'a {
        self.rules.iter().filter_map(move |rule| rule.rewrite(iri))
    }
}
