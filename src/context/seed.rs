//! Seeds request attributes from response `Link` headers.

use http::HeaderMap;
use tracing::{debug, error};

use crate::link;
use crate::vocab::{ldt, QName};
use crate::Result;
use super::Attributes;

/// Relations copied from `Link` headers into request attributes.
pub const SEEDED_RELATIONS: [QName; 3] = [ldt::ONTOLOGY, ldt::BASE, ldt::TEMPLATE];

/// Fill the ontology, base and template attributes from `Link` headers
/// found under `header_name`.
///
/// Attributes an earlier stage already set are left alone, so running this
/// more than once is harmless. A malformed `Link` entry aborts seeding.
pub fn seed(headers: &HeaderMap, header_name: &str, attributes: &mut Attributes) -> Result<()> {
    for relation in SEEDED_RELATIONS {
        let rel = relation.uri();
        let found = link::resolve(headers, header_name, &rel).inspect_err(|e| {
            error!("Could not parse Link header: {e}");
        })?;

        if let Some(link) = found {
            if attributes.set_if_absent(rel.clone(), link.href) {
                debug!(relation = %rel, "Seeded request attribute from Link header");
            }
        }
    }

    Ok(())
}
