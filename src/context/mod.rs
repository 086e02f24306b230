//! # Request Context
//!
//! Everything the binding pass knows about the request being answered,
//! assembled once per incoming call and passed by `&mut` through the
//! pipeline. Upstream stages (a proxy, a fetch layer) may have written
//! attributes already; see [`Attributes`] for the write discipline.

pub mod query;
pub mod attributes;
pub mod seed;

use std::sync::Arc;

use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::agent::SecurityContext;
use crate::apps::Application;
use crate::config::WriterConfig;
use crate::vocab::ac;
use crate::{parse_uri, Result};

pub use query::QueryParams;
pub use attributes::Attributes;
pub use seed::{seed, SEEDED_RELATIONS};

/// Per-request state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Absolute request URI without the query string.
    pub absolute_path: Url,
    pub query: QueryParams,
    /// Request (not response) headers.
    pub headers: HeaderMap,
    pub attributes: Attributes,
    pub application: Option<Arc<Application>>,
    pub security: SecurityContext,
}

impl RequestContext {
    /// Start from the absolute request URI. A query string on it is moved
    /// into the query parameters.
    pub fn builder(request_uri: &str) -> Result<RequestContextBuilder> {
        let mut absolute_path = parse_uri(request_uri)?;
        let query = absolute_path
            .query()
            .map(QueryParams::from_query_str)
            .unwrap_or_default();
        absolute_path.set_query(None);
        absolute_path.set_fragment(None);

        Ok(RequestContextBuilder {
            ctx: RequestContext {
                absolute_path,
                query,
                headers: HeaderMap::new(),
                attributes: Attributes::new(),
                application: None,
                security: SecurityContext::anonymous(),
            },
        })
    }

    /// Explicit target resource (`uri` query parameter), if any.
    pub fn target_uri(&self) -> Result<Option<Url>> {
        self.uri_param(ac::URI.local)
    }

    /// Explicit SPARQL endpoint (`endpoint` query parameter), if any.
    pub fn endpoint_uri(&self) -> Result<Option<Url>> {
        self.uri_param(ac::ENDPOINT.local)
    }

    /// Free-text `query` parameter.
    pub fn query_string(&self) -> Option<&str> {
        self.query.first(ac::QUERY.local)
    }

    /// `mode` parameters whose namespace the writer supports.
    pub fn modes(&self, config: &WriterConfig) -> Result<Vec<Url>> {
        let mut modes = Vec::new();
        for value in self.query.get_all(ac::MODE.local) {
            let mode = parse_uri(value)?;
            if config.supports_namespace_of(mode.as_str()) {
                modes.push(mode);
            }
        }
        Ok(modes)
    }

    fn uri_param(&self, key: &str) -> Result<Option<Url>> {
        self.query.first(key).map(parse_uri).transpose()
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug)]
pub struct RequestContextBuilder {
    ctx: RequestContext,
}

impl RequestContextBuilder {
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx.query.append(key, value);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.ctx.headers.append(name, value);
        self
    }

    /// Attribute set by a stage that ran before this one.
    pub fn attribute(mut self, key: impl Into<String>, value: Url) -> Self {
        self.ctx.attributes.set_if_absent(key, value);
        self
    }

    pub fn application(mut self, app: Arc<Application>) -> Self {
        self.ctx.application = Some(app);
        self
    }

    pub fn security(mut self, security: SecurityContext) -> Self {
        self.ctx.security = security;
        self
    }

    pub fn build(self) -> RequestContext {
        self.ctx
    }
}
