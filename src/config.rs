//! Writer configuration.
//!
//! Built once at startup, shared as `Arc<WriterConfig>` and never mutated.

use http::HeaderName;
use serde::{Deserialize, Serialize};

use crate::source::Syntax;
use crate::vocab::{ac, aplt};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Namespaces whose terms may be requested as `mode`s.
    pub supported_namespaces: Vec<String>,
    /// Syntax application and agent graphs are serialized in.
    pub source_syntax: Syntax,
    /// Response header carrying link metadata.
    pub link_header: String,
    /// Request header carrying the referrer.
    pub referer_header: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            supported_namespaces: vec![ac::NS.to_owned(), aplt::NS.to_owned()],
            source_syntax: Syntax::RdfXml,
            link_header: "Link".to_owned(),
            referer_header: "Referer".to_owned(),
        }
    }
}

impl WriterConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WriterConfig =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, name) in [("link_header", &self.link_header), ("referer_header", &self.referer_header)] {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("{field} '{name}' is not a header name: {e}")))?;
        }
        for ns in &self.supported_namespaces {
            if !(ns.ends_with('#') || ns.ends_with('/')) {
                return Err(Error::Config(format!("Namespace '{ns}' must end with '#' or '/'")));
            }
        }
        Ok(())
    }

    /// Whether the namespace of `iri` (everything up to the last `#` or `/`)
    /// is supported.
    pub fn supports_namespace_of(&self, iri: &str) -> bool {
        let Some(split) = iri.rfind(['#', '/']) else {
            return false;
        };
        let ns = &iri[..=split];
        self.supported_namespaces.iter().any(|supported| supported == ns)
    }
}
