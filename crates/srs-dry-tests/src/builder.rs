// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Builder for ad hoc rule sets.

use srs_core::{Alphabet, Engine, Rule};

use crate::alphabets::binary_alphabet;

/// Builder for test engines over a fixed alphabet.
///
/// # Example
///
/// ```
/// use srs_dry_tests::RuleSetBuilder;
///
/// let engine = RuleSetBuilder::binary()
///     .rule("00", "|")
///     .rule("|", "0")
///     .build();
/// assert_eq!(engine.rules().len(), 2);
/// ```
pub struct RuleSetBuilder {
    alphabet: Alphabet,
    pairs: Vec<(String, String)>,
    workers: usize,
}

impl RuleSetBuilder {
    /// Starts a builder over `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            pairs: Vec::new(),
            workers: 1,
        }
    }

    /// Starts a builder over the `{0, |}` alphabet.
    pub fn binary() -> Self {
        Self::new(binary_alphabet())
    }

    /// Appends a rule in external notation.
    pub fn rule(mut self, left: &str, right: &str) -> Self {
        self.pairs.push((left.to_owned(), right.to_owned()));
        self
    }

    /// Sets the fork-join worker count.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// The alphabet rules are parsed against.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Builds the engine.
    ///
    /// # Panics
    /// Panics on an invalid rule or a zero worker count.
    #[allow(clippy::expect_used)]
    pub fn build(self) -> Engine {
        let rules = self
            .pairs
            .iter()
            .map(|(l, r)| Rule::parse(&self.alphabet, l, r).expect("fixture rule must be valid"))
            .collect();
        Engine::new(rules)
            .with_workers(self.workers)
            .expect("fixture worker count must be positive")
    }
}
