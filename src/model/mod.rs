//! # RDF Model
//!
//! Plain data that crosses every boundary of the writer: terms, statements,
//! graphs and datasets, plus the application and agent descriptors built
//! on top of them.
//!
//! Design rule: no I/O and no request state here.

pub mod term;
pub mod graph;
pub mod dataset;

pub use term::{Term, Triple};
pub use graph::{RdfGraph, Resource};
pub use dataset::Dataset;
