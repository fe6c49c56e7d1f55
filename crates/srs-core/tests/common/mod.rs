// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use srs_core::{Engine, Rule, Word};
use srs_dry_tests::word;

// Pinned so failures reproduce across machines and CI. Override locally with
// PROPTEST_SEED or by editing the bytes.
pub const SEED_BYTES: [u8; 32] = [
    0x5e, 0x17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0,
];

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

pub fn word_text(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('0'), Just('|')], min..=max)
        .prop_map(|chars| chars.into_iter().collect())
}

pub fn rule_pair() -> impl Strategy<Value = (String, String)> {
    (word_text(1, 3), word_text(0, 3))
}

/// Engine over `{0, |}` with one to three random rules.
pub fn engine() -> impl Strategy<Value = Engine> {
    prop::collection::vec(rule_pair(), 1..=3).prop_map(|pairs| {
        let rules = pairs
            .iter()
            .map(|(l, r)| Rule::new(word(l), word(r)).expect("non-empty pattern"))
            .collect();
        Engine::new(rules)
    })
}

pub fn start_word() -> impl Strategy<Value = Word> {
    word_text(0, 5).prop_map(|t| word(&t))
}
