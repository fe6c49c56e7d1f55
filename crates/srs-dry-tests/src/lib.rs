// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared fixtures for srs crates.
#![forbid(unsafe_code)]
//!
//! Fixture data is literal and known-valid, so helpers panic on malformed
//! input instead of returning `Result`; they are for tests and benches only.
//!
//! # Modules
//!
//! - [`alphabets`] - the binary `{0, |}` alphabet and word helpers
//! - [`systems`] - canonical rule sets (collapse, unary addition, flip cycle, ...)
//! - [`builder`] - ad hoc rule sets via a builder
//! - [`config`] - JSON configuration samples

pub mod alphabets;
pub mod builder;
pub mod config;
pub mod systems;

pub use alphabets::{binary_alphabet, word, words, BINARY_SYMBOLS};
pub use builder::RuleSetBuilder;
pub use config::{sample_config, SAMPLE_CONFIG_JSON};
pub use systems::{
    collapse_engine, flip_cycle_engine, growth_engine, split_attractor_engine,
    unary_addition_engine,
};
