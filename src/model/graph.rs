//! In-memory RDF graph: an unordered set of statements.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Term, Triple};

/// A set of triples. Duplicate statements collapse on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfGraph {
    triples: HashSet<Triple>,
}

impl RdfGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a statement. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn add(&mut self, subject: Term, predicate: impl Into<String>, object: impl Into<Term>) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    /// Statement-set union. `other` is left untouched.
    pub fn union(&mut self, other: &RdfGraph) {
        self.triples.extend(other.triples.iter().cloned());
    }

    pub fn len(&self) -> usize { self.triples.len() }
    pub fn is_empty(&self) -> bool { self.triples.is_empty() }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn triples_for_subject<'a, 'b>(&'a self, subject: &'b Term) -> impl Iterator<Item = &'a Triple> + 'b
    where
        'a: 'b,
    {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    pub fn objects<'a, 'b>(&'a self, subject: &'b Term, predicate: &'b str) -> impl Iterator<Item = &'a Term> + 'b
    where
        'a: 'b,
    {
        self.triples_for_subject(subject)
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Copy of every statement about `subject`.
    pub fn describe(&self, subject: &Term) -> RdfGraph {
        self.triples_for_subject(subject).cloned().collect()
    }

    /// Statements in a deterministic order (for serialization and diffs).
    pub fn sorted(&self) -> Vec<&Triple> {
        let mut triples: Vec<&Triple> = self.triples.iter().collect();
        triples.sort();
        triples
    }

    /// View `iri` as a resource of this graph.
    pub fn resource<'g>(&'g self, iri: &str) -> Resource<'g> {
        Resource { graph: self, subject: Term::iri(iri) }
    }
}

impl FromIterator<Triple> for RdfGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self { triples: iter.into_iter().collect() }
    }
}

impl Extend<Triple> for RdfGraph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RdfGraph {
    type Item = &'a Triple;
    type IntoIter = hashbrown::hash_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

/// A URI resource viewed through a graph.
#[derive(Debug, Clone)]
pub struct Resource<'g> {
    graph: &'g RdfGraph,
    subject: Term,
}

impl<'g> Resource<'g> {
    pub fn uri(&self) -> Option<&str> {
        self.subject.as_iri()
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn has_property(&self, predicate: &str) -> bool {
        self.property(predicate).is_some()
    }

    /// First object of `predicate`, in deterministic order.
    pub fn property(&self, predicate: &str) -> Option<&'g Term> {
        let graph = self.graph;
        graph.objects(&self.subject, predicate).min()
    }

    /// First IRI-valued object of `predicate`.
    pub fn property_resource_value(&self, predicate: &str) -> Option<&'g str> {
        let graph = self.graph;
        graph
            .objects(&self.subject, predicate)
            .filter_map(Term::as_iri)
            .min()
    }

    pub fn has_type(&self, class: &str) -> bool {
        let graph = self.graph;
        graph
            .objects(&self.subject, crate::vocab::rdf::TYPE)
            .any(|o| o.as_iri() == Some(class))
    }

    /// The resource's own statements as a new graph.
    pub fn list_properties(&self) -> RdfGraph {
        self.graph.describe(&self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RdfGraph {
        let mut g = RdfGraph::new();
        g.add(Term::iri("http://ex/a"), "http://ex/p", "one");
        g.add(Term::iri("http://ex/a"), "http://ex/q", Term::iri("http://ex/b"));
        g.add(Term::iri("http://ex/b"), "http://ex/p", "two");
        g
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut g = sample();
        assert!(!g.add(Term::iri("http://ex/a"), "http://ex/p", "one"));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_union_leaves_other_untouched() {
        let mut a = sample();
        let mut b = RdfGraph::new();
        b.add(Term::iri("http://ex/c"), "http://ex/p", "three");
        b.add(Term::iri("http://ex/a"), "http://ex/p", "one");
        a.union(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_describe() {
        let g = sample();
        let d = g.describe(&Term::iri("http://ex/a"));
        assert_eq!(d.len(), 2);
        assert!(d.iter().all(|t| t.subject == Term::iri("http://ex/a")));
    }

    #[test]
    fn test_resource_view() {
        let g = sample();
        let a = g.resource("http://ex/a");
        assert_eq!(a.uri(), Some("http://ex/a"));
        assert!(a.has_property("http://ex/q"));
        assert_eq!(a.property_resource_value("http://ex/q"), Some("http://ex/b"));
        assert_eq!(a.property_resource_value("http://ex/p"), None);
        assert_eq!(a.property("http://ex/p"), Some(&Term::literal("one")));
        assert_eq!(a.list_properties().len(), 2);
    }
}
