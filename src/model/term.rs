//! RDF terms and statements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RDF term: IRI, blank node or literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal {
        lexical: String,
        /// Datatype IRI; `None` for plain / language-tagged strings.
        datatype: Option<String>,
        lang: Option<String>,
    },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Term::Blank(id.into())
    }

    /// Plain string literal.
    pub fn literal(lexical: impl Into<String>) -> Self {
        Term::Literal { lexical: lexical.into(), datatype: None, lang: None }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal { lexical: lexical.into(), datatype: Some(datatype.into()), lang: None }
    }

    pub fn lang(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Term::Literal { lexical: lexical.into(), datatype: None, lang: Some(lang.into()) }
    }

    /// True for a URI resource (not a blank node, not a literal).
    pub fn is_iri(&self) -> bool { matches!(self, Term::Iri(_)) }
    pub fn is_blank(&self) -> bool { matches!(self, Term::Blank(_)) }
    pub fn is_literal(&self) -> bool { matches!(self, Term::Literal { .. }) }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<&str> for Term { fn from(v: &str) -> Self { Term::literal(v) } }
impl From<String> for Term { fn from(v: String) -> Self { Term::literal(v) } }

/// N-Triples rendering of a single term.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(id) => write!(f, "_:{id}"),
            Term::Literal { lexical, datatype, lang } => {
                write!(f, "\"{}\"", escape_literal(lexical))?;
                if let Some(lang) = lang {
                    write!(f, "@{lang}")
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{dt}>")
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// A subject–predicate–object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    /// Always an IRI.
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: impl Into<String>, object: impl Into<Term>) -> Self {
        Self { subject, predicate: predicate.into(), object: object.into() }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_kinds() {
        assert!(Term::iri("http://ex/a").is_iri());
        assert!(Term::blank("b0").is_blank());
        assert!(Term::literal("X").is_literal());
        assert_eq!(Term::from("X"), Term::literal("X"));
    }

    #[test]
    fn test_ntriples_display() {
        let t = Triple::new(Term::iri("http://ex/App2"), "http://ex/hasTitle", "X");
        assert_eq!(t.to_string(), "<http://ex/App2> <http://ex/hasTitle> \"X\" .");

        let lit = Term::lang("say \"hi\"", "en");
        assert_eq!(lit.to_string(), "\"say \\\"hi\\\"\"@en");

        let int = Term::typed("42", "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(int.to_string(), "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>");
    }
}
