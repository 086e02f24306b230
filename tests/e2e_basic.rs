//! End-to-end tests for the full binding pass.
//!
//! Each test builds a request context, runs `ParameterAssembler::assemble()`
//! against upstream response headers, and inspects the resulting parameters.

use std::io::Read;
use std::sync::Arc;

use http::header::{LINK, REFERER};
use pretty_assertions::assert_eq;
use url::Url;

use dataset_params::apps::link_counterparts;
use dataset_params::vocab::{ac, apl, foaf, lacl, lapp, ldt, rdf};
use dataset_params::{
    Agent, Application, Dataset, HeaderMap, HeaderValue, ParamName, ParameterAssembler, Principal, RdfGraph,
    RequestContext, SecurityContext, Syntax, Term, WriterConfig,
};

const TITLE: &str = "http://purl.org/dc/terms/title";

// ============================================================================
// Helpers
// ============================================================================

fn assembler() -> ParameterAssembler {
    ParameterAssembler::new(Arc::new(WriterConfig::default()))
}

fn application(uri: &str, class: &str, title: &str, doc: Option<&str>) -> Application {
    let mut g = RdfGraph::new();
    g.add(Term::iri(uri), rdf::TYPE, Term::iri(class));
    g.add(Term::iri(uri), ldt::BASE.uri(), Term::iri(format!("{uri}/")));
    g.add(Term::iri(uri), TITLE, title);
    if let Some(doc) = doc {
        g.add(Term::iri(uri), foaf::IS_PRIMARY_TOPIC_OF, Term::iri(doc));
    }
    Application::from_graph(uri, g).unwrap()
}

fn link_headers(values: &[&'static str]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for value in values {
        headers.append(LINK, HeaderValue::from_static(value));
    }
    headers
}

fn read_all(params: &dataset_params::ParameterSet, name: impl Into<ParamName>) -> String {
    let mut source = params.get_source(name).expect("source parameter").clone();
    let mut text = String::new();
    source.read_to_string(&mut text).unwrap();
    text
}

// ============================================================================
// 1. Link headers seed request attributes, first writer wins
// ============================================================================

#[test]
fn test_ontology_link_seeds_attribute_once() {
    let headers = link_headers(&["<http://ex/onto>; rel=\"https://www.w3.org/ns/ldt#ontology\""]);
    let mut ctx = RequestContext::builder("http://ex/things/1").unwrap().build();

    assembler().assemble(&Dataset::default(), &headers, &mut ctx).unwrap();
    assert_eq!(ctx.attributes.get(&ldt::ONTOLOGY.uri()).map(Url::as_str), Some("http://ex/onto"));

    let other = link_headers(&["<http://ex/other>; rel=\"https://www.w3.org/ns/ldt#ontology\""]);
    let params = assembler().assemble(&Dataset::default(), &other, &mut ctx).unwrap();
    assert_eq!(ctx.attributes.get(&ldt::ONTOLOGY.uri()).map(Url::as_str), Some("http://ex/onto"));
    assert_eq!(params.get_uri(ldt::ONTOLOGY).map(Url::as_str), Some("http://ex/onto"));
}

#[test]
fn test_upstream_attribute_not_overwritten() {
    let headers = link_headers(&[
        "<http://ex/tpl>; rel=\"https://www.w3.org/ns/ldt#template\"",
        "<http://ex/onto>; rel=\"https://www.w3.org/ns/ldt#ontology\"",
    ]);
    let mut ctx = RequestContext::builder("http://ex/")
        .unwrap()
        .attribute(ldt::TEMPLATE.uri(), Url::parse("http://proxy/tpl").unwrap())
        .build();

    let params = assembler().assemble(&Dataset::default(), &headers, &mut ctx).unwrap();
    assert_eq!(params.get_uri(ldt::TEMPLATE).map(Url::as_str), Some("http://proxy/tpl"));
    assert_eq!(params.get_uri(ldt::ONTOLOGY).map(Url::as_str), Some("http://ex/onto"));
}

// ============================================================================
// 2. Resource identity
// ============================================================================

#[test]
fn test_resource_uri_binding() {
    let mut ctx = RequestContext::builder("http://ex/things/1?page=2").unwrap().build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();
    assert_eq!(params.get_uri(ac::URI).map(Url::as_str), Some("http://ex/things/1"));

    let mut ctx = RequestContext::builder("http://ex/things/1")
        .unwrap()
        .query_param("uri", "http://dbpedia.org/resource/Copenhagen")
        .build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();
    assert_eq!(params.get_uri(ac::URI).map(Url::as_str), Some("http://dbpedia.org/resource/Copenhagen"));
}

// ============================================================================
// 3. Application and counterpart
// ============================================================================

#[test]
fn test_admin_application_includes_end_user_statements() {
    let admin = Arc::new(application(
        "http://ex/admin",
        &lapp::ADMIN_APPLICATION.uri(),
        "Admin",
        Some("http://ex/admin/doc"),
    ));
    let end_user = Arc::new(application("http://ex/app", &lapp::END_USER_APPLICATION.uri(), "X", None));
    link_counterparts(&admin, &end_user).unwrap();

    let mut ctx = RequestContext::builder("http://ex/admin/things/")
        .unwrap()
        .application(admin.clone())
        .build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();

    assert_eq!(params.get_uri(ldt::BASE).map(Url::as_str), Some("http://ex/admin/"));

    let source = params.get_source(lapp::APPLICATION).unwrap();
    assert_eq!(source.syntax(), Syntax::RdfXml);
    assert_eq!(source.system_id().map(Url::as_str), Some("http://ex/admin/doc"));

    let xml = read_all(&params, lapp::APPLICATION);
    assert!(xml.contains("rdf:about=\"http://ex/admin\""));
    assert!(xml.contains("rdf:about=\"http://ex/app\""));
    assert!(xml.contains(">X</"));

    // The counterpart's own graph is unchanged.
    assert_eq!(end_user.graph().len(), 3);
}

#[test]
fn test_admin_application_from_data_includes_end_user_statements() {
    // One loaded graph describes both applications; nothing is linked by hand.
    let mut g = RdfGraph::new();
    g.add(Term::iri("http://ex/app1"), rdf::TYPE, Term::iri(lapp::ADMIN_APPLICATION.uri()));
    g.add(Term::iri("http://ex/app1"), ldt::BASE.uri(), Term::iri("http://ex/app1/"));
    g.add(Term::iri("http://ex/app1"), lapp::END_USER_APPLICATION_PROP.uri(), Term::iri("http://ex/app2"));
    g.add(Term::iri("http://ex/app2"), rdf::TYPE, Term::iri(lapp::END_USER_APPLICATION.uri()));
    g.add(Term::iri("http://ex/app2"), TITLE, "X");
    let admin = Arc::new(Application::from_graph("http://ex/app1", g).unwrap());

    let mut ctx = RequestContext::builder("http://ex/app1/").unwrap().application(admin).build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();

    let xml = read_all(&params, lapp::APPLICATION);
    assert!(xml.contains("rdf:about=\"http://ex/app1\""));
    assert!(xml.contains("rdf:about=\"http://ex/app2\""));
    assert!(xml.contains(">X</"));
}

#[test]
fn test_end_user_application_without_document_has_no_system_id() {
    let end_user = Arc::new(application("http://ex/app", &lapp::END_USER_APPLICATION.uri(), "X", None));
    let mut ctx = RequestContext::builder("http://ex/app/")
        .unwrap()
        .application(end_user)
        .build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();

    let source = params.get_source(lapp::APPLICATION).unwrap();
    assert!(source.system_id().is_none());
    assert!(!source.is_empty());
}

#[test]
fn test_application_base_overrides_seeded_base() {
    let app = Arc::new(application("http://ex/app", &lapp::APPLICATION.uri(), "P", None));
    let headers = link_headers(&["<http://upstream/>; rel=\"https://www.w3.org/ns/ldt#base\""]);
    let mut ctx = RequestContext::builder("http://ex/app/").unwrap().application(app).build();

    let params = assembler().assemble(&Dataset::default(), &headers, &mut ctx).unwrap();
    assert_eq!(params.get_uri(ldt::BASE).map(Url::as_str), Some("http://ex/app/"));
    assert_eq!(ctx.attributes.get(&ldt::BASE.uri()).map(Url::as_str), Some("http://upstream/"));
}

// ============================================================================
// 4. Agent principal
// ============================================================================

#[test]
fn test_agent_bound_as_source() {
    let me = "http://ex/acl/agents/alice/#this";
    let mut g = RdfGraph::new();
    g.add(Term::iri(me), rdf::TYPE, Term::iri(lacl::AGENT.uri()));
    g.add(Term::iri(me), foaf::IS_PRIMARY_TOPIC_OF, Term::iri("http://ex/acl/agents/alice/"));
    g.add(Term::iri("http://ex/acl/agents/alice/"), TITLE, "Alice");

    let security = SecurityContext::authenticated(Principal::Agent(Agent::new(me, g)));
    let mut ctx = RequestContext::builder("http://ex/").unwrap().security(security).build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();

    let source = params.get_source(lacl::AGENT).unwrap();
    assert_eq!(source.system_id().map(Url::as_str), Some("http://ex/acl/agents/alice/"));
    // The whole agent graph, not only the agent's own statements.
    assert!(read_all(&params, lacl::AGENT).contains(">Alice</"));
}

#[test]
fn test_non_agent_principal_not_bound() {
    let security = SecurityContext::authenticated(Principal::Named("service".into()));
    let mut ctx = RequestContext::builder("http://ex/").unwrap().security(security).build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();
    assert!(!params.contains(lacl::AGENT));
}

// ============================================================================
// 5. Access scope and referrer
// ============================================================================

#[test]
fn test_access_to_and_referer() {
    let mut ctx = RequestContext::builder("http://ex/admin/acl/authorizations/?access-to=http%3A%2F%2Fex%2Fdocs%2F")
        .unwrap()
        .header(REFERER, HeaderValue::from_static("http://ex/docs/"))
        .build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();

    assert_eq!(params.get_uri(apl::ACCESS_TO).map(Url::as_str), Some("http://ex/docs/"));
    assert_eq!(params.get_uri("Referer").map(Url::as_str), Some("http://ex/docs/"));
}

#[test]
fn test_full_parameter_order() {
    let app = Arc::new(application("http://ex/app", &lapp::APPLICATION.uri(), "P", None));
    let mut ctx = RequestContext::builder("http://ex/app/?access-to=http%3A%2F%2Fex%2Fapp%2F")
        .unwrap()
        .header(REFERER, HeaderValue::from_static("http://ex/app/prev"))
        .application(app)
        .build();
    let params = assembler().assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx).unwrap();

    let names: Vec<String> = params.names().map(ToString::to_string).collect();
    assert_eq!(names, vec![
        ac::URI.clark(),
        ldt::BASE.clark(),
        lapp::APPLICATION.clark(),
        apl::ACCESS_TO.clark(),
        "Referer".to_string(),
    ]);
}

#[test]
fn test_ntriples_config() {
    let config = WriterConfig::from_json(r#"{"source_syntax": "n-triples"}"#).unwrap();
    let app = Arc::new(application("http://ex/app", &lapp::APPLICATION.uri(), "P", None));
    let mut ctx = RequestContext::builder("http://ex/app/").unwrap().application(app).build();

    let params = ParameterAssembler::new(Arc::new(config))
        .assemble(&Dataset::default(), &HeaderMap::new(), &mut ctx)
        .unwrap();
    let text = read_all(&params, lapp::APPLICATION);
    assert!(text.contains("<http://ex/app> <http://purl.org/dc/terms/title> \"P\" ."));
}
