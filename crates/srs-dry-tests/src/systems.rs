// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical rule sets over `{0, |}`.

use srs_core::Engine;

use crate::builder::RuleSetBuilder;

/// `00 → |`: strictly shrinking, so every trajectory terminates.
pub fn collapse_engine() -> Engine {
    RuleSetBuilder::binary().rule("00", "|").build()
}

/// `0|0 → 00`: unary addition, removing one separator between two blocks.
pub fn unary_addition_engine() -> Engine {
    RuleSetBuilder::binary().rule("0|0", "00").build()
}

/// `0 → |`, `| → 0`: every single-symbol word lies on a 2-cycle.
pub fn flip_cycle_engine() -> Engine {
    RuleSetBuilder::binary().rule("0", "|").rule("|", "0").build()
}

/// `0 → 00`: unbounded growth, no normal forms and no cycles.
pub fn growth_engine() -> Engine {
    RuleSetBuilder::binary().rule("0", "00").build()
}

/// `0| → 0`, `0| → |`: from `0|` the system may settle on the normal form
/// `0` or on the normal form `|`, so `0|` sits in two basins.
pub fn split_attractor_engine() -> Engine {
    RuleSetBuilder::binary()
        .rule("0|", "0")
        .rule("0|", "|")
        .build()
}
