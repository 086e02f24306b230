//! # Addressable Sources
//!
//! A graph serialized into a byte stream the template engine reads lazily,
//! optionally carrying a system identifier so the engine can answer
//! "document URI of this parameter" with the platform's canonical address.
//!
//! ```text
//! RdfGraph → serialize (RDF/XML | N-Triples) → AddressableSource { system_id, bytes }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Cursor, Read, Write};

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::model::{RdfGraph, Term, Triple};
use crate::vocab::{foaf, rdf};
use crate::{parse_uri, Result};

/// An entity with its own subject IRI and the graph describing it.
pub trait Identified {
    fn subject_uri(&self) -> &str;
    fn identity_graph(&self) -> &RdfGraph;

    /// Canonical document URI (`foaf:isPrimaryTopicOf`), when it is a URI resource.
    fn primary_topic_of(&self) -> Option<Url> {
        let resource = self.identity_graph().resource(self.subject_uri());
        let iri = resource.property(foaf::IS_PRIMARY_TOPIC_OF)?.as_iri()?;
        match parse_uri(iri) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(subject = self.subject_uri(), iri, "Ignoring unparsable foaf:isPrimaryTopicOf: {e}");
                None
            }
        }
    }
}

/// Serialization syntax of a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Syntax {
    #[default]
    RdfXml,
    NTriples,
}

impl Syntax {
    pub fn media_type(&self) -> &'static str {
        match self {
            Syntax::RdfXml => "application/rdf+xml",
            Syntax::NTriples => "application/n-triples",
        }
    }
}

/// A serialized graph, readable once from the start via `Read`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressableSource {
    system_id: Option<Url>,
    syntax: Syntax,
    stream: Cursor<Vec<u8>>,
}

impl AddressableSource {
    pub fn from_graph(graph: &RdfGraph, syntax: Syntax) -> Result<Self> {
        let mut bytes = Vec::with_capacity(graph.len() * 96);
        match syntax {
            Syntax::RdfXml => write_rdf_xml(graph, &mut bytes)?,
            Syntax::NTriples => write_ntriples(graph, &mut bytes)?,
        }
        Ok(Self { system_id: None, syntax, stream: Cursor::new(bytes) })
    }

    pub fn system_id(&self) -> Option<&Url> { self.system_id.as_ref() }
    pub fn set_system_id(&mut self, system_id: Url) { self.system_id = Some(system_id); }
    pub fn syntax(&self) -> Syntax { self.syntax }

    /// The whole document regardless of how much has been read.
    pub fn as_bytes(&self) -> &[u8] {
        self.stream.get_ref()
    }

    pub fn len(&self) -> usize { self.as_bytes().len() }
    pub fn is_empty(&self) -> bool { self.as_bytes().is_empty() }
}

impl Read for AddressableSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl fmt::Display for AddressableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.system_id {
            Some(id) => write!(f, "<{}> ({}, {} bytes)", id, self.syntax.media_type(), self.len()),
            None => write!(f, "({}, {} bytes)", self.syntax.media_type(), self.len()),
        }
    }
}

/// Serialize `graph`, taking the system identifier from `identity`.
pub fn build<I: Identified + ?Sized>(graph: &RdfGraph, identity: &I, syntax: Syntax) -> Result<AddressableSource> {
    let mut source = AddressableSource::from_graph(graph, syntax)?;
    if let Some(system_id) = identity.primary_topic_of() {
        source.set_system_id(system_id);
    }
    Ok(source)
}

// ============================================================================
// N-Triples
// ============================================================================

fn write_ntriples(graph: &RdfGraph, out: &mut dyn Write) -> Result<()> {
    for triple in graph.sorted() {
        writeln!(out, "{triple}")?;
    }
    Ok(())
}

// ============================================================================
// RDF/XML
// ============================================================================

const RDF_PREFIX: &str = "rdf";

/// Split a predicate IRI into namespace and an XML-name local part.
fn split_predicate(iri: &str) -> Option<(&str, &str)> {
    let mut split = iri.len();
    for (i, c) in iri.char_indices().rev() {
        if is_name_char(c) {
            split = i;
        } else {
            break;
        }
    }
    // Local part must start with a name-start character.
    while let Some(c) = iri[split..].chars().next() {
        if is_name_start_char(c) {
            break;
        }
        split += c.len_utf8();
    }
    if split == 0 || split >= iri.len() {
        return None;
    }
    Some((&iri[..split], &iri[split..]))
}

/// Namespace and element local name of `predicate`, or `InvalidData`.
fn element_name(predicate: &str) -> io::Result<(&str, &str)> {
    split_predicate(predicate).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Predicate <{predicate}> cannot be written as an RDF/XML element name"),
        )
    })
}

fn is_name_start_char(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c == '-' || c == '.' || c.is_numeric()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn write_rdf_xml(graph: &RdfGraph, out: &mut dyn Write) -> Result<()> {
    let triples = graph.sorted();

    // Namespace → prefix, numbered in order of first use.
    let mut prefixes: BTreeMap<&str, String> = BTreeMap::new();
    for triple in &triples {
        let (ns, _) = element_name(&triple.predicate)?;
        if ns != rdf::NS {
            let next = prefixes.len();
            prefixes.entry(ns).or_insert_with(|| format!("ns{next}"));
        }
    }

    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    write!(out, "<{RDF_PREFIX}:RDF xmlns:{RDF_PREFIX}=\"{}\"", rdf::NS)?;
    for (ns, prefix) in &prefixes {
        write!(out, "\n    xmlns:{prefix}=\"{}\"", escape_xml(ns))?;
    }
    writeln!(out, ">")?;

    let mut current: Option<&Term> = None;
    for triple in &triples {
        if current != Some(&triple.subject) {
            if current.is_some() {
                writeln!(out, "  </{RDF_PREFIX}:Description>")?;
            }
            match &triple.subject {
                Term::Iri(iri) => writeln!(out, "  <{RDF_PREFIX}:Description {RDF_PREFIX}:about=\"{}\">", escape_xml(iri))?,
                Term::Blank(id) => writeln!(out, "  <{RDF_PREFIX}:Description {RDF_PREFIX}:nodeID=\"{}\">", escape_xml(id))?,
                Term::Literal { .. } => {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, "Literal in subject position").into());
                }
            }
            current = Some(&triple.subject);
        }
        write_property(triple, &prefixes, out)?;
    }
    if current.is_some() {
        writeln!(out, "  </{RDF_PREFIX}:Description>")?;
    }

    writeln!(out, "</{RDF_PREFIX}:RDF>")?;
    Ok(())
}

fn write_property(triple: &Triple, prefixes: &BTreeMap<&str, String>, out: &mut dyn Write) -> Result<()> {
    let (ns, local) = element_name(&triple.predicate)?;
    let prefix = prefixes.get(ns).map_or(RDF_PREFIX, String::as_str);
    let element = format!("{prefix}:{local}");

    match &triple.object {
        Term::Iri(iri) => writeln!(out, "    <{element} {RDF_PREFIX}:resource=\"{}\"/>", escape_xml(iri))?,
        Term::Blank(id) => writeln!(out, "    <{element} {RDF_PREFIX}:nodeID=\"{}\"/>", escape_xml(id))?,
        Term::Literal { lexical, datatype, lang } => {
            let attr = match (lang, datatype) {
                (Some(lang), _) => format!(" xml:lang=\"{}\"", escape_xml(lang)),
                (None, Some(dt)) => format!(" {RDF_PREFIX}:datatype=\"{}\"", escape_xml(dt)),
                (None, None) => String::new(),
            };
            writeln!(out, "    <{element}{attr}>{}</{element}>", escape_xml(lexical))?;
        }
    }
    Ok(())
}
