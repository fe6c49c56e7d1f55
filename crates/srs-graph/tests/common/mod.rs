// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};
use tracing_subscriber::EnvFilter;

use srs_core::{Engine, Rule, Word};
use srs_dry_tests::word;

pub const SEED_BYTES: [u8; 32] = [
    0x6a, 0x7c, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0,
];

/// Installs a test-writer subscriber honouring `RUST_LOG`; repeat calls are
/// no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pinned_runner(cases: u32) -> TestRunner {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    TestRunner::new_with_rng(
        PropConfig {
            cases,
            ..PropConfig::default()
        },
        rng,
    )
}

fn word_text(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('0'), Just('|')], min..=max)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Engine over `{0, |}` with one to three random rules.
pub fn engine() -> impl Strategy<Value = Engine> {
    prop::collection::vec((word_text(1, 2), word_text(0, 3)), 1..=3).prop_map(|pairs| {
        let rules = pairs
            .iter()
            .map(|(l, r)| Rule::new(word(l), word(r)).expect("non-empty pattern"))
            .collect();
        Engine::new(rules)
    })
}

pub fn start_word() -> impl Strategy<Value = Word> {
    word_text(0, 3).prop_map(|t| word(&t))
}
