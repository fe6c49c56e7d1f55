// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Search results: BFS frontiers and reconstructed rewrite paths.
use crate::rule::RuleId;
use crate::word::Word;

/// Words reached at each BFS depth.
///
/// Level `k` holds the words first reached after exactly `k` rewrites, in
/// discovery order. A word appears in at most one level. Level 0 always holds
/// the start word; empty levels are never stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Frontier {
    levels: Vec<Vec<Word>>,
    truncated: bool,
}

impl Frontier {
    pub(crate) fn new(start: Word) -> Self {
        Self {
            levels: vec![vec![start]],
            truncated: false,
        }
    }

    pub(crate) fn push_level(&mut self, level: Vec<Word>) {
        debug_assert!(!level.is_empty(), "empty levels are not stored");
        self.levels.push(level);
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// The start word (sole member of level 0).
    pub fn start(&self) -> &Word {
        &self.levels[0][0]
    }

    /// Words first reached at `depth`, or `None` past the last stored level.
    pub fn level(&self, depth: usize) -> Option<&[Word]> {
        self.levels.get(depth).map(Vec::as_slice)
    }

    /// Iterates `(depth, words)` pairs in ascending depth.
    pub fn levels(&self) -> impl Iterator<Item = (usize, &[Word])> {
        self.levels.iter().map(Vec::as_slice).enumerate()
    }

    /// Deepest stored level.
    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Total number of distinct words across all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Always `false`: level 0 holds the start word.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates every word in level order, then discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.levels.iter().flatten()
    }

    /// Depth at which `word` was first reached.
    pub fn depth_of(&self, word: &Word) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|w| w == word))
    }

    /// Returns `true` when `word` was reached at any depth.
    pub fn contains(&self, word: &Word) -> bool {
        self.depth_of(word).is_some()
    }

    /// Returns `true` when at least one layer dropped words because it
    /// exceeded the width bound; the frontier is then not exhaustive.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// One applied rewrite: which rule fired and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Step {
    /// Rule that fired.
    pub rule: RuleId,
    /// Start offset of the replaced occurrence.
    pub position: usize,
}

/// Rewrite path from a start word to a target word.
///
/// `words()[i + 1]` is obtained from `words()[i]` by `steps()[i]`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Path {
    words: Vec<Word>,
    steps: Vec<Step>,
}

impl Path {
    pub(crate) fn new(words: Vec<Word>, steps: Vec<Step>) -> Self {
        debug_assert_eq!(words.len(), steps.len() + 1);
        Self { words, steps }
    }

    /// Words visited, start first and target last.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Applied rewrites, one per edge.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of rewrites (edges), not words.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` for the zero-length path (start equals target).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First word.
    pub fn start(&self) -> &Word {
        &self.words[0]
    }

    /// Last word.
    pub fn target(&self) -> &Word {
        &self.words[self.words.len() - 1]
    }
}
