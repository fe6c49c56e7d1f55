// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! srs-core: nondeterministic string rewriting engine.
//!
//! A rewriting system is an [`Alphabet`] plus an ordered list of [`Rule`]s.
//! The [`Engine`] enumerates every one-step rewrite of a [`Word`], explores
//! reachable words breadth-first under depth and width bounds, reconstructs
//! shortest rewrite paths, and follows the deterministic first-application
//! trajectory to its omega-limit. Transition graphs and their topology live
//! in `srs-graph`.
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

mod bounds;
mod cancel;
mod config;
mod engine_impl;
mod expand;
mod reach;
mod rule;
mod symbol;
mod unary;
mod word;

/// Bound validation shared by searches, builders and configuration.
pub use bounds::{check_max_length, check_max_steps, check_width, check_workers, BoundsError};
/// Cooperative cancellation.
pub use cancel::CancelToken;
/// Serializable system description.
pub use config::{ConfigError, ExplorationConfig, RuleSpec, SystemConfig};
/// Rewrite engine and its result types.
pub use engine_impl::{Application, ApplyResult, Engine, EngineError, OmegaLimit, OMEGA_WINDOW};
/// Order-preserving fork-join expansion of a BFS layer.
pub use expand::{expand_layer, PARALLEL_THRESHOLD};
/// Search results.
pub use reach::{Frontier, Path, Step};
/// Rule primitives and canonical word hashing.
pub use rule::{short_digest, update_word, Rule, RuleDigest, RuleError, RuleId};
/// Alphabet and symbols.
pub use symbol::{Alphabet, AlphabetError, ParseError, Symbol};
/// Unary block encoding of natural-number tuples.
pub use unary::UnaryCodec;
/// Immutable words.
pub use word::Word;
