// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use srs_core::{EngineError, OmegaLimit, Rule, RuleError, RuleId, Step, Word};
use srs_dry_tests::{
    binary_alphabet, collapse_engine, flip_cycle_engine, growth_engine, unary_addition_engine,
    word, words, RuleSetBuilder,
};

#[test]
fn collapse_levels_match_rederivation() {
    let engine = collapse_engine();
    let frontier = engine
        .bounded_reach(&word("0000"), 2, 10)
        .expect("valid bounds");

    assert_eq!(frontier.level(0), Some(words(&["0000"]).as_slice()));
    assert_eq!(
        frontier.level(1),
        Some(words(&["|00", "0|0", "00|"]).as_slice())
    );
    // "|00" and "00|" both collapse to "||"; "0|0" has no adjacent pair.
    assert_eq!(frontier.level(2), Some(words(&["||"]).as_slice()));
    assert!(!frontier.is_truncated());

    // Every level-2 word must come from a level-1 word in one step.
    for w in frontier.level(2).unwrap_or_default() {
        let produced = frontier
            .level(1)
            .unwrap_or_default()
            .iter()
            .any(|p| engine.all_applications(p).iter().any(|a| &a.word == w));
        assert!(produced, "{w} has no predecessor at level 1");
    }
}

#[test]
fn unary_addition_path_has_one_step() {
    let engine = unary_addition_engine();
    let path = engine
        .reachable(&word("00|00"), &word("0000"), 10)
        .expect("search ran")
        .expect("target reachable");
    assert_eq!(path.len(), 1);
    assert_eq!(path.words(), words(&["00|00", "0000"]).as_slice());
    assert_eq!(
        path.steps(),
        &[Step {
            rule: RuleId(0),
            position: 1
        }]
    );
}

#[test]
fn empty_pattern_rule_is_rejected() {
    assert_eq!(
        Rule::new(Word::empty(), word("0")).unwrap_err(),
        RuleError::EmptyPattern
    );
    assert_eq!(
        Rule::parse(&binary_alphabet(), "", "").unwrap_err(),
        RuleError::EmptyPattern
    );
}

#[test]
fn reachable_breaks_ties_by_application_order() {
    // "00" reaches "||" through "|0" or "0|"; r1 at 0 fires first.
    let engine = RuleSetBuilder::binary()
        .rule("|", "0")
        .rule("0", "|")
        .build();
    let path = engine
        .reachable(&word("00"), &word("||"), 4)
        .expect("search ran")
        .expect("target reachable");
    assert_eq!(path.words(), words(&["00", "|0", "||"]).as_slice());
    assert_eq!(
        path.steps(),
        &[
            Step {
                rule: RuleId(1),
                position: 0
            },
            Step {
                rule: RuleId(1),
                position: 1
            }
        ]
    );
}

#[test]
fn start_equal_to_target_is_a_zero_length_path() {
    let path = collapse_engine()
        .reachable(&word("0|"), &word("0|"), 0)
        .expect("search ran")
        .expect("trivially reachable");
    assert!(path.is_empty());
    assert_eq!(path.start(), path.target());
}

#[test]
fn not_found_within_depth_is_none_not_error() {
    let engine = growth_engine();
    // "0" reaches "0000" in exactly three steps.
    assert!(engine
        .reachable(&word("0"), &word("0000"), 2)
        .expect("search ran")
        .is_none());
    let path = engine
        .reachable(&word("0"), &word("0000"), 3)
        .expect("search ran")
        .expect("found at depth 3");
    assert_eq!(path.len(), 3);
    // Symbols outside the image of the rules are simply never found.
    assert!(engine
        .reachable(&word("0"), &word("|"), 6)
        .expect("search ran")
        .is_none());
}

#[test]
fn width_truncation_keeps_first_words_in_discovery_order() {
    let engine = RuleSetBuilder::binary().rule("0", "|").build();
    let frontier = engine
        .bounded_reach(&word("000"), 1, 2)
        .expect("valid bounds");
    assert_eq!(frontier.level(1), Some(words(&["|00", "0|0"]).as_slice()));
    assert!(frontier.is_truncated());
}

#[test]
fn truncated_words_can_reappear_one_level_later() {
    let engine = RuleSetBuilder::binary()
        .rule("0", "|")
        .rule("|", "")
        .rule("0", "")
        .build();
    let frontier = engine
        .bounded_reach(&word("0"), 2, 1)
        .expect("valid bounds");
    // "" is cut from level 1 and found again from "|".
    assert_eq!(frontier.level(1), Some(words(&["|"]).as_slice()));
    assert_eq!(frontier.level(2), Some(words(&[""]).as_slice()));
    assert_eq!(frontier.depth_of(&word("")), Some(2));
    assert!(frontier.is_truncated());
}

#[test]
fn cyclic_systems_terminate_with_global_dedup() {
    let engine = flip_cycle_engine();
    let frontier = engine
        .bounded_reach(&word("0"), 50, 10)
        .expect("valid bounds");
    assert_eq!(frontier.len(), 2);
    assert_eq!(frontier.max_level(), 1);
    assert_eq!(frontier.depth_of(&word("|")), Some(1));
    assert!(engine.normal_forms(&frontier).is_empty());
}

#[test]
fn normal_forms_are_collected_in_frontier_order() {
    let engine = collapse_engine();
    let frontier = engine
        .bounded_reach(&word("00000"), 5, 50)
        .expect("valid bounds");
    for nf in engine.normal_forms(&frontier) {
        assert!(engine.all_applications(&nf).is_empty());
    }
    assert!(engine.normal_forms(&frontier).contains(&word("0||")));
}

#[test]
fn omega_limit_follows_first_applications() {
    let engine = collapse_engine();
    // 0000 → |00 → || (always the leftmost pair).
    assert_eq!(
        engine.omega_limit(&word("0000"), 10).expect("valid bound"),
        OmegaLimit::Terminal(word("||"))
    );
    assert_eq!(
        flip_cycle_engine()
            .omega_limit(&word("|"), 10)
            .expect("valid bound"),
        OmegaLimit::Cycle(words(&["|", "0"]))
    );
}

#[test]
fn unknown_rule_handles_are_reported() {
    let err = collapse_engine()
        .apply(&word("00"), RuleId(9), 0)
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownRule(RuleId(9)));
    assert_eq!(err.to_string(), "rule not registered: r9");
}
