//! Dataset: a default graph plus named graphs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RdfGraph;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub default_graph: RdfGraph,
    pub named_graphs: BTreeMap<String, RdfGraph>,
}

impl Dataset {
    pub fn new(default_graph: RdfGraph) -> Self {
        Self { default_graph, named_graphs: BTreeMap::new() }
    }

    pub fn with_named_graph(mut self, name: impl Into<String>, graph: RdfGraph) -> Self {
        self.named_graphs.insert(name.into(), graph);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.default_graph.is_empty() && self.named_graphs.values().all(RdfGraph::is_empty)
    }
}
