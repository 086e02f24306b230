//! # Applications
//!
//! The tenant/site descriptor active for a request, and composition of its
//! graph with its counterpart's. An administrative application manages an
//! end-user application and each can look the other up; neither owns the
//! other, so counterparts are held as `Weak` references that the process's
//! application registry keeps alive.

use std::sync::{Arc, OnceLock, Weak};

use tracing::{debug, warn};
use url::Url;

use crate::model::{RdfGraph, Resource, Term};
use crate::source::Identified;
use crate::vocab::{lapp, ldt, QName};
use crate::{parse_uri, Error, Result};

/// Lookup-only link to the complementary application.
///
/// The descriptor's own data may name the counterpart; a registry may also
/// link the live counterpart once with [`link_counterparts`].
#[derive(Debug, Default)]
pub struct Counterpart {
    named: Option<String>,
    linked: OnceLock<Weak<Application>>,
}

impl Counterpart {
    pub fn named(uri: impl Into<String>) -> Self {
        Self { named: Some(uri.into()), linked: OnceLock::new() }
    }

    /// URI the descriptor's data gives for the counterpart.
    pub fn uri(&self) -> Option<&str> {
        self.named.as_deref()
    }
}

/// Which side of an admin/end-user pair an application is.
#[derive(Debug, Default)]
pub enum ApplicationKind {
    Administrative { end_user: Counterpart },
    EndUser { admin: Counterpart },
    #[default]
    Plain,
}

impl ApplicationKind {
    pub fn name(&self) -> &'static str {
        match self {
            ApplicationKind::Administrative { .. } => "administrative",
            ApplicationKind::EndUser { .. } => "end-user",
            ApplicationKind::Plain => "plain",
        }
    }

    fn slot(&self) -> Option<&Counterpart> {
        match self {
            ApplicationKind::Administrative { end_user } => Some(end_user),
            ApplicationKind::EndUser { admin } => Some(admin),
            ApplicationKind::Plain => None,
        }
    }
}

/// An application descriptor.
#[derive(Debug)]
pub struct Application {
    uri: String,
    base: Url,
    /// Graph the descriptor was loaded from; may describe other resources too.
    graph: RdfGraph,
    kind: ApplicationKind,
}

impl Application {
    pub fn new(uri: impl Into<String>, base: Url, graph: RdfGraph, kind: ApplicationKind) -> Self {
        Self { uri: uri.into(), base, graph, kind }
    }

    /// Build the descriptor for `uri` from loaded data.
    ///
    /// The kind comes from its `rdf:type`s, the base from `ldt:base`, and the
    /// counterpart from `lapp:endUserApplication` (administrative) or
    /// `lapp:adminApplication` (end-user). Being typed both administrative
    /// and end-user is rejected.
    pub fn from_graph(uri: &str, graph: RdfGraph) -> Result<Self> {
        let resource = graph.resource(uri);
        let is_admin = resource.has_type(&lapp::ADMIN_APPLICATION.uri());
        let is_end_user = resource.has_type(&lapp::END_USER_APPLICATION.uri());

        let kind = match (is_admin, is_end_user) {
            (true, true) => {
                return Err(Error::InvalidArgument(format!(
                    "Application <{uri}> cannot be both administrative and end-user"
                )));
            }
            (true, false) => ApplicationKind::Administrative {
                end_user: Self::counterpart_from(&resource, lapp::END_USER_APPLICATION_PROP),
            },
            (false, true) => ApplicationKind::EndUser {
                admin: Self::counterpart_from(&resource, lapp::ADMIN_APPLICATION_PROP),
            },
            (false, false) => ApplicationKind::Plain,
        };

        let base = resource
            .property_resource_value(&ldt::BASE.uri())
            .ok_or_else(|| Error::InvalidArgument(format!("Application <{uri}> has no ldt:base")))
            .and_then(parse_uri)?;

        Ok(Self::new(uri, base, graph, kind))
    }

    fn counterpart_from(resource: &Resource<'_>, property: QName) -> Counterpart {
        match resource.property_resource_value(&property.uri()) {
            Some(uri) => Counterpart::named(uri),
            None => Counterpart::default(),
        }
    }

    pub fn uri(&self) -> &str { &self.uri }
    pub fn base(&self) -> &Url { &self.base }
    pub fn kind(&self) -> &ApplicationKind { &self.kind }
    pub fn graph(&self) -> &RdfGraph { &self.graph }

    /// The descriptor's own statements.
    pub fn statements(&self) -> RdfGraph {
        self.graph.describe(&Term::iri(self.uri.as_str()))
    }

    /// The live counterpart, if one was linked and is still registered.
    pub fn counterpart(&self) -> Option<Arc<Application>> {
        let weak = self.kind.slot()?.linked.get()?;
        let counterpart = weak.upgrade();
        if counterpart.is_none() {
            warn!(app = %self.uri, "Counterpart application is no longer registered");
        }
        counterpart
    }

    /// The counterpart's own statements.
    ///
    /// Taken from the linked counterpart while it is registered, otherwise
    /// from the description this descriptor's graph holds for the counterpart
    /// its data names. `None` for plain applications and when neither is
    /// available.
    pub fn counterpart_statements(&self) -> Option<RdfGraph> {
        if let Some(counterpart) = self.counterpart() {
            return Some(counterpart.statements());
        }

        let uri = self.kind.slot()?.uri()?;
        let statements = self.graph.describe(&Term::iri(uri));
        if statements.is_empty() {
            debug!(app = %self.uri, counterpart = uri, "Counterpart is not described in the application graph");
            return None;
        }
        Some(statements)
    }
}

impl Identified for Application {
    fn subject_uri(&self) -> &str { &self.uri }
    fn identity_graph(&self) -> &RdfGraph { &self.graph }
}

/// Wire an administrative application to its end-user application, both ways.
///
/// Each side can be linked once.
pub fn link_counterparts(admin: &Arc<Application>, end_user: &Arc<Application>) -> Result<()> {
    let (ApplicationKind::Administrative { end_user: admin_slot }, ApplicationKind::EndUser { admin: end_user_slot }) =
        (&admin.kind, &end_user.kind)
    else {
        return Err(Error::InvalidArgument(format!(
            "Cannot pair {} application <{}> with {} application <{}>",
            admin.kind.name(),
            admin.uri,
            end_user.kind.name(),
            end_user.uri,
        )));
    };

    for (app, slot, counterpart) in [(admin, admin_slot, end_user), (end_user, end_user_slot, admin)] {
        if slot.uri().is_some_and(|named| named != counterpart.uri) {
            return Err(Error::InvalidArgument(format!(
                "Application <{}> names <{}> as its counterpart, not <{}>",
                app.uri,
                slot.uri().unwrap_or_default(),
                counterpart.uri,
            )));
        }
    }

    if admin_slot.linked.get().is_some() || end_user_slot.linked.get().is_some() {
        return Err(Error::InvalidArgument(format!(
            "Application <{}> or <{}> is already paired",
            admin.uri, end_user.uri
        )));
    }

    admin_slot
        .linked
        .set(Arc::downgrade(end_user))
        .and_then(|_| end_user_slot.linked.set(Arc::downgrade(admin)))
        .map_err(|_| Error::InvalidArgument("Application pair was linked concurrently".into()))
}

/// Merge the application's own statements with its counterpart's.
///
/// Returns a fresh graph; neither descriptor's stored graph is touched.
/// `None` when no application is active.
pub fn compose(app: Option<&Application>) -> Option<RdfGraph> {
    let app = app?;
    let mut graph = app.statements();

    if let Some(counterpart) = app.counterpart_statements() {
        debug!(
            app = %app.uri(),
            kind = app.kind().name(),
            statements = counterpart.len(),
            "Merging counterpart application statements"
        );
        graph.union(&counterpart);
    }

    Some(graph)
}
