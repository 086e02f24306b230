//! Baseline parameters every dataset rendering gets.

use http::HeaderMap;
use tracing::debug;

use crate::config::WriterConfig;
use crate::context::RequestContext;
use crate::model::Dataset;
use crate::params::ParameterSet;
use crate::vocab::{ac, ldt};
use crate::Result;

/// Produces the parameter set the assembler extends.
///
/// Runs after request attributes have been seeded from the response's
/// `Link` headers.
pub trait BaselineBinder: Send + Sync {
    fn bind(
        &self,
        dataset: &Dataset,
        headers: &HeaderMap,
        ctx: &RequestContext,
        config: &WriterConfig,
    ) -> Result<ParameterSet>;
}

/// Binds the request's endpoint, query text and modes, plus the ontology,
/// base and template attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBinder;

impl BaselineBinder for DefaultBinder {
    fn bind(
        &self,
        _dataset: &Dataset,
        _headers: &HeaderMap,
        ctx: &RequestContext,
        config: &WriterConfig,
    ) -> Result<ParameterSet> {
        let mut params = ParameterSet::new();

        if let Some(endpoint) = ctx.endpoint_uri()? {
            params.insert(ac::ENDPOINT, endpoint);
        }
        if let Some(query) = ctx.query_string() {
            params.insert(ac::QUERY, query);
        }

        let modes = ctx.modes(config)?;
        if !modes.is_empty() {
            debug!(count = modes.len(), "Passing $ac:mode to template");
            params.insert(ac::MODE, modes);
        }

        for relation in [ldt::ONTOLOGY, ldt::BASE, ldt::TEMPLATE] {
            if let Some(value) = ctx.attributes.get(&relation.uri()) {
                params.insert(relation, value.clone());
            }
        }

        Ok(params)
    }
}
