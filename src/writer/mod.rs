//! # Parameter Assembly
//!
//! One pass per outgoing response:
//!
//! ```text
//! response Link headers ──seed──▶ request attributes
//!                                    │
//! baseline binder ──────────────────▶ ParameterSet
//!   + {ac}uri            target `uri` param, else the request path
//!   + {ldt}base          application base
//!   + {lapp}Application  application ∪ counterpart, as a source
//!   + {lacl}Agent        agent graph, as a source
//!   + {apl}access-to     `access-to` query param
//!   + Referer            `Referer` request header
//! ```
//!
//! Later bindings replace earlier ones of the same name.

pub mod baseline;

use std::sync::Arc;

use http::HeaderMap;
use tracing::{debug, error};

use crate::apps;
use crate::config::WriterConfig;
use crate::context::{self, RequestContext};
use crate::model::Dataset;
use crate::params::{ParamName, ParameterSet};
use crate::source;
use crate::vocab::{ac, apl, lacl, lapp, ldt};
use crate::{parse_uri, Error, Result};

pub use baseline::{BaselineBinder, DefaultBinder};

/// Name the referrer is bound under.
pub const REFERER_PARAM: &str = "Referer";

/// Builds the template parameters for a dataset response.
pub struct ParameterAssembler {
    config: Arc<WriterConfig>,
    baseline: Box<dyn BaselineBinder>,
}

impl ParameterAssembler {
    pub fn new(config: Arc<WriterConfig>) -> Self {
        Self { config, baseline: Box::new(DefaultBinder) }
    }

    /// Replace the baseline binder.
    pub fn with_baseline(mut self, baseline: impl BaselineBinder + 'static) -> Self {
        self.baseline = Box::new(baseline);
        self
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Assemble the parameter set for one response.
    ///
    /// `headers` are the response headers produced upstream; request headers
    /// live in `ctx`. Every failure is reported as `Error::Transformation`
    /// and no parameters are returned.
    pub fn assemble(
        &self,
        dataset: &Dataset,
        headers: &HeaderMap,
        ctx: &mut RequestContext,
    ) -> Result<ParameterSet> {
        self.bind(dataset, headers, ctx).map_err(|e| {
            error!("Could not assemble template parameters: {e}");
            Error::transformation(e)
        })
    }

    fn bind(&self, dataset: &Dataset, headers: &HeaderMap, ctx: &mut RequestContext) -> Result<ParameterSet> {
        // Fill attributes an upstream proxy may not have set.
        context::seed(headers, &self.config.link_header, &mut ctx.attributes)?;

        let mut params = self.baseline.bind(dataset, headers, ctx, &self.config)?;

        let ctx = &*ctx;
        let resource_uri = match ctx.target_uri()? {
            Some(uri) => uri,
            None => ctx.absolute_path.clone(),
        };
        params.insert(ac::URI, resource_uri);

        if let Some(app) = ctx.application.as_deref() {
            params.insert(ldt::BASE, app.base().clone());

            debug!(app = %app.uri(), kind = app.kind().name(), "Passing $lapp:Application to template");
            if let Some(graph) = apps::compose(Some(app)) {
                let source = source::build(&graph, app, self.config.source_syntax)?;
                params.insert(lapp::APPLICATION, source);
            }
        }

        if let Some(agent) = ctx.security.agent() {
            debug!(agent = %agent.uri(), "Passing $lacl:Agent to template");
            let source = source::build(agent.graph(), agent, self.config.source_syntax)?;
            params.insert(lacl::AGENT, source);
        }

        if let Some(access_to) = ctx.query.first(apl::ACCESS_TO.local) {
            params.insert(apl::ACCESS_TO, parse_uri(access_to)?);
        }

        if let Some(value) = ctx.headers.get(self.config.referer_header.as_str()) {
            let raw = value
                .to_str()
                .map_err(|e| Error::malformed_uri(&String::from_utf8_lossy(value.as_bytes()), e))?;
            let referer = parse_uri(raw)?;
            debug!(%referer, "Passing $Referer to template");
            params.insert(ParamName::plain(REFERER_PARAM), referer);
        }

        Ok(params)
    }
}

impl std::fmt::Debug for ParameterAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterAssembler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
