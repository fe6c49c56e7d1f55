// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! srs-graph: transition graphs of string rewriting systems.
//!
//! [`GraphBuilder`] materializes an engine's one-step relation, either over
//! every word up to a length bound or over the closure of a few start words.
//! [`SccDecomposition`] condenses the result with an iterative Tarjan pass,
//! and [`AttractorAnalyzer`] finds the terminal components, their basins and
//! a deterministic vertex classification.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod attractor;
mod builder;
mod graph;
mod scc;
mod summary;

/// Attractor and basin analysis.
pub use attractor::{AttractorAnalyzer, Classification};
/// Graph construction from an engine.
pub use builder::{GraphBuilder, GraphError, ENUMERATION_BLOCK};
/// Interned transition graph.
pub use graph::{Edge, GraphDigest, TransitionGraph, VertexId};
/// Strongly connected components.
pub use scc::{ComponentId, Scc, SccDecomposition};
/// Serializable topology counts.
pub use summary::TopologySummary;
