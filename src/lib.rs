//! # dataset-params — RDF dataset → template parameter binding
//!
//! Turns a fetched RDF dataset plus the state of the request that fetched it
//! into the named parameter set an XSLT-style template engine renders from.
//!
//! ## Design Principles
//!
//! 1. **Explicit request state**: `RequestContext` is built once per call and
//!    threaded through every stage by `&mut`; nothing is ambient
//! 2. **First writer wins**: link metadata only fills request attributes that
//!    an earlier stage left empty
//! 3. **Graphs are copied, never shared**: composing an application graph
//!    never mutates the counterpart's statements
//! 4. **All or nothing**: a failed binding pass returns an error, never a
//!    partial `ParameterSet`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dataset_params::{Dataset, HeaderMap, HeaderValue, ParameterAssembler, RequestContext, WriterConfig};
//!
//! # fn example() -> dataset_params::Result<()> {
//! let assembler = ParameterAssembler::new(Arc::new(WriterConfig::default()));
//!
//! let mut response_headers = HeaderMap::new();
//! response_headers.append(
//!     http::header::LINK,
//!     HeaderValue::from_static("<http://ex/onto>; rel=\"https://www.w3.org/ns/ldt#ontology\""),
//! );
//!
//! let mut ctx = RequestContext::builder("http://ex/things/1")?.build();
//! let params = assembler.assemble(&Dataset::default(), &response_headers, &mut ctx)?;
//!
//! for (name, value) in params.iter() {
//!     println!("{name} = {value}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Parameters
//!
//! | Parameter | Type | Bound when |
//! |-----------|------|------------|
//! | `{ac}uri` | URI | always |
//! | `{ldt}base` | URI | application active |
//! | `{lapp}Application` | source | application active |
//! | `{lacl}Agent` | source | agent principal present |
//! | `{apl}access-to` | URI | `access-to` query parameter present |
//! | `Referer` | URI | `Referer` request header present |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod vocab;
pub mod link;
pub mod context;
pub mod apps;
pub mod agent;
pub mod source;
pub mod params;
pub mod config;
pub mod writer;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Dataset, RdfGraph, Resource, Term, Triple};

// ============================================================================
// Re-exports: Request pipeline
// ============================================================================

pub use link::LinkHeader;
pub use context::{Attributes, QueryParams, RequestContext};
pub use http::{HeaderMap, HeaderName, HeaderValue};
pub use apps::{Application, ApplicationKind};
pub use agent::{Agent, Principal, SecurityContext};
pub use source::{AddressableSource, Identified, Syntax};
pub use params::{ParamName, ParamValue, ParameterSet};
pub use config::WriterConfig;
pub use writer::{BaselineBinder, DefaultBinder, ParameterAssembler};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed Link header at position {position}: {message} (in '{input}')")]
    MalformedLink {
        input: String,
        position: usize,
        message: String,
    },

    #[error("Malformed URI '{input}': {reason}")]
    MalformedUri {
        input: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transformation failed: {0}")]
    Transformation(#[source] Box<Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a binding failure. Already-wrapped errors are not wrapped twice.
    pub fn transformation(err: Error) -> Self {
        match err {
            Error::Transformation(_) => err,
            other => Error::Transformation(Box::new(other)),
        }
    }

    /// The innermost error, looking through `Transformation`.
    pub fn root(&self) -> &Error {
        match self {
            Error::Transformation(inner) => inner.root(),
            other => other,
        }
    }

    /// Unparsable link header, access scope or referrer.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self.root(), Error::MalformedLink { .. } | Error::MalformedUri { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.root(), Error::InvalidArgument(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self.root(), Error::Io(_))
    }

    pub(crate) fn malformed_uri(input: &str, reason: impl ToString) -> Self {
        Error::MalformedUri { input: input.to_owned(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Characters RFC 3986 never allows in a URI, in any component.
const URI_EXCLUDED: &[char] = &['<', '>', '"', '{', '}', '|', '\\', '^', '`'];

/// Parse an absolute URI, reporting the offending input on failure.
///
/// `Url::parse` percent-encodes characters a URI cannot contain; those are
/// rejected here instead, so a bound URI is always the one the client sent.
pub(crate) fn parse_uri(input: &str) -> Result<url::Url> {
    if let Some((pos, c)) = input
        .char_indices()
        .find(|&(_, c)| c.is_whitespace() || c.is_control() || URI_EXCLUDED.contains(&c))
    {
        return Err(Error::malformed_uri(input, format!("illegal character {c:?} at position {pos}")));
    }
    url::Url::parse(input).map_err(|e| Error::malformed_uri(input, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformation_wraps_once() {
        let err = Error::transformation(Error::transformation(Error::InvalidArgument("x".into())));
        match &err {
            Error::Transformation(inner) => assert!(matches!(**inner, Error::InvalidArgument(_))),
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_parse_uri_rejects_illegal_characters() {
        for bad in ["http://ex/not a uri", " http://ex/a", "http://ex/a\tb", "http://ex/<a>", "http://ex/a|b", "http://ex/a^b"] {
            let err = parse_uri(bad).unwrap_err();
            assert!(matches!(&err, Error::MalformedUri { input, .. } if input == bad), "{bad}: {err:?}");
        }
        assert_eq!(parse_uri("http://ex/a%20b?x=1#f").unwrap().as_str(), "http://ex/a%20b?x=1#f");
    }

    #[test]
    fn test_malformed_uri_classified() {
        let err = parse_uri("not a uri").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(Error::transformation(err).is_malformed_input());
    }
}
