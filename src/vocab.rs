//! Vocabulary constants.
//!
//! Every term is a `QName` so the same constant can serve as a relation IRI
//! (`uri()`), as a query parameter key (`local`) and as a template
//! parameter name (`clark()`).

use std::fmt;

/// Namespace + local name pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: &'static str,
    pub local: &'static str,
}

impl QName {
    pub const fn new(namespace: &'static str, local: &'static str) -> Self {
        Self { namespace, local }
    }

    /// Full IRI: namespace followed by local name.
    pub fn uri(&self) -> String {
        format!("{}{}", self.namespace, self.local)
    }

    /// Clark notation, `{namespace}local`.
    pub fn clark(&self) -> String {
        format!("{{{}}}{}", self.namespace, self.local)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.local)
    }
}

/// AtomGraph client vocabulary.
pub mod ac {
    use super::QName;

    pub const NS: &str = "https://w3id.org/atomgraph/client#";

    pub const URI: QName = QName::new(NS, "uri");
    pub const ENDPOINT: QName = QName::new(NS, "endpoint");
    pub const QUERY: QName = QName::new(NS, "query");
    pub const MODE: QName = QName::new(NS, "mode");
}

/// Linked Data Templates.
pub mod ldt {
    use super::QName;

    pub const NS: &str = "https://www.w3.org/ns/ldt#";

    pub const ONTOLOGY: QName = QName::new(NS, "ontology");
    pub const BASE: QName = QName::new(NS, "base");
    pub const TEMPLATE: QName = QName::new(NS, "template");
}

/// Application (tenant) vocabulary.
pub mod lapp {
    use super::QName;

    pub const NS: &str = "https://w3id.org/atomgraph/linkeddatahub/apps#";

    pub const APPLICATION: QName = QName::new(NS, "Application");
    pub const ADMIN_APPLICATION: QName = QName::new(NS, "AdminApplication");
    pub const END_USER_APPLICATION: QName = QName::new(NS, "EndUserApplication");
    pub const ADMIN_APPLICATION_PROP: QName = QName::new(NS, "adminApplication");
    pub const END_USER_APPLICATION_PROP: QName = QName::new(NS, "endUserApplication");
}

/// Access control vocabulary.
pub mod lacl {
    use super::QName;

    pub const NS: &str = "https://w3id.org/atomgraph/linkeddatahub/admin/acl#";

    pub const AGENT: QName = QName::new(NS, "Agent");
}

/// Platform domain vocabulary.
pub mod apl {
    use super::QName;

    pub const NS: &str = "https://w3id.org/atomgraph/linkeddatahub/domain#";

    pub const ACCESS_TO: QName = QName::new(NS, "access-to");
}

/// Platform template vocabulary (namespace only).
pub mod aplt {
    pub const NS: &str = "https://w3id.org/atomgraph/linkeddatahub/templates#";
}

pub mod foaf {
    pub const NS: &str = "http://xmlns.com/foaf/0.1/";

    pub const IS_PRIMARY_TOPIC_OF: &str = "http://xmlns.com/foaf/0.1/isPrimaryTopicOf";
}

pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}
