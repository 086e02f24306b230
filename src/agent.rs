//! Authenticated principals.

use crate::model::RdfGraph;
use crate::source::Identified;

/// An authenticated agent with its own description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    uri: String,
    graph: RdfGraph,
}

impl Agent {
    pub fn new(uri: impl Into<String>, graph: RdfGraph) -> Self {
        Self { uri: uri.into(), graph }
    }

    pub fn uri(&self) -> &str { &self.uri }

    /// Everything known about the agent, not just its own statements.
    pub fn graph(&self) -> &RdfGraph { &self.graph }
}

impl Identified for Agent {
    fn subject_uri(&self) -> &str { &self.uri }
    fn identity_graph(&self) -> &RdfGraph { &self.graph }
}

/// Whoever the transport layer authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Agent(Agent),
    /// Authenticated by some other means, with no RDF description.
    Named(String),
}

impl Principal {
    pub fn as_agent(&self) -> Option<&Agent> {
        match self {
            Principal::Agent(agent) => Some(agent),
            Principal::Named(_) => None,
        }
    }
}

/// Already-resolved authentication state of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    pub principal: Option<Principal>,
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self { principal: Some(principal) }
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.principal.as_ref()?.as_agent()
    }
}
