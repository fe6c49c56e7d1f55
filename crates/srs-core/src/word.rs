// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Immutable words (finite symbol sequences).
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::symbol::Symbol;

/// Immutable finite sequence of [`Symbol`]s.
///
/// Equality, hashing and ordering are by content. Cloning is cheap (shared
/// buffer), which matters because search frontiers and graphs key maps by
/// whole words. The empty word is a valid value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(Arc<[Symbol]>);

impl Word {
    /// The empty word.
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(Vec::<Symbol>::new()))
    }

    /// Builds a word from raw characters without alphabet validation.
    ///
    /// Prefer [`crate::Alphabet::parse`] for external input.
    pub fn from_chars(text: &str) -> Self {
        text.chars().map(Symbol).collect()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty word.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the symbols.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Returns the symbol at `index` when in range.
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.0.get(index).copied()
    }

    /// Returns the sub-word covering `range`, or `None` when out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        self.0.get(range).map(|s| Self(Arc::from(s)))
    }

    /// Returns `true` when `pattern` occurs starting at `position`.
    ///
    /// Positions where the pattern would run past the end never match.
    pub fn matches_at(&self, pattern: &Word, position: usize) -> bool {
        position
            .checked_add(pattern.len())
            .and_then(|end| self.0.get(position..end))
            .is_some_and(|window| window == pattern.symbols())
    }

    /// Replaces `range` with `replacement`, returning a new word.
    ///
    /// Returns `None` when `range` is out of bounds.
    pub fn splice(&self, range: Range<usize>, replacement: &Word) -> Option<Self> {
        if range.start > range.end || range.end > self.len() {
            return None;
        }
        let mut out = Vec::with_capacity(self.len() - range.len() + replacement.len());
        out.extend_from_slice(&self.0[..range.start]);
        out.extend_from_slice(replacement.symbols());
        out.extend_from_slice(&self.0[range.end..]);
        Some(Self::from(out))
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Symbol>> for Word {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(Arc::from(symbols))
    }
}

impl FromIterator<Symbol> for Word {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.0.iter() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.to_string())
    }
}

impl serde::Serialize for Word {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
