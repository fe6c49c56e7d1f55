// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rewrite rule definitions.
use std::fmt;

use blake3::Hasher;
use thiserror::Error;

use crate::symbol::{Alphabet, ParseError};
use crate::word::Word;

/// Canonical 256-bit digest identifying a rule by content.
pub type RuleDigest = [u8; 32];

/// Compact, engine-local rule handle.
///
/// The engine assigns handles in declaration order at construction time, so
/// `RuleId(0)` is always the first declared rule. Handles are only meaningful
/// for the engine that issued them; use [`Rule::digest`] for identity that
/// survives across engines.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(serde::Serialize)]
pub struct RuleId(pub u32);

impl RuleId {
    /// Returns the declaration index this handle stands for.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Errors raised while constructing a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// An empty pattern matches at every position of every word.
    #[error("rule pattern must not be empty")]
    EmptyPattern,
    /// One side of the rule used a symbol outside the alphabet.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Ordered `(left, right)` pair: one occurrence of `left` may be replaced by
/// `right`.
///
/// Invariant: `left` is non-empty. `right` may be empty and the two sides may
/// differ in length in either direction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    left: Word,
    right: Word,
}

impl Rule {
    /// Constructs a rule.
    ///
    /// # Errors
    /// Returns [`RuleError::EmptyPattern`] when `left` is empty.
    pub fn new(left: Word, right: Word) -> Result<Self, RuleError> {
        if left.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        Ok(Self { left, right })
    }

    /// Parses both sides from external notation over `alphabet`.
    ///
    /// # Errors
    /// Returns [`RuleError::Parse`] for foreign symbols and
    /// [`RuleError::EmptyPattern`] for an empty left side.
    pub fn parse(alphabet: &Alphabet, left: &str, right: &str) -> Result<Self, RuleError> {
        Self::new(alphabet.parse(left)?, alphabet.parse(right)?)
    }

    /// Pattern side.
    pub fn left(&self) -> &Word {
        &self.left
    }

    /// Replacement side.
    pub fn right(&self) -> &Word {
        &self.right
    }

    /// Returns the reversed rule `right → left`.
    ///
    /// # Errors
    /// Returns [`RuleError::EmptyPattern`] when `right` is empty, since the
    /// inverse would have an empty pattern.
    pub fn inverse(&self) -> Result<Self, RuleError> {
        Self::new(self.right.clone(), self.left.clone())
    }

    /// Returns `true` when both sides have the same length.
    pub fn is_length_preserving(&self) -> bool {
        self.left.len() == self.right.len()
    }

    /// Signed change in word length caused by one application.
    #[allow(clippy::cast_possible_wrap)]
    pub fn length_delta(&self) -> isize {
        self.right.len() as isize - self.left.len() as isize
    }

    /// Domain-separated content digest (prefix `b"rule:"`) using BLAKE3.
    ///
    /// Encoding: `"rule:" ‖ u64le(len(left)) ‖ left ‖ u64le(len(right)) ‖
    /// right`, with each symbol as its UTF-8 scalar value in 4 LE bytes.
    pub fn digest(&self) -> RuleDigest {
        let mut hasher = Hasher::new();
        hasher.update(b"rule:");
        update_word(&mut hasher, &self.left);
        update_word(&mut hasher, &self.right);
        hasher.finalize().into()
    }
}

/// Feeds a length-prefixed word into `hasher`.
///
/// Shared by every canonical digest in the workspace so word encodings agree.
pub fn update_word(hasher: &mut Hasher, word: &Word) {
    hasher.update(&(word.len() as u64).to_le_bytes());
    for symbol in word.symbols() {
        hasher.update(&u32::from(symbol.as_char()).to_le_bytes());
    }
}

/// Short hex form of a digest for logs.
pub fn short_digest(digest: &RuleDigest) -> String {
    hex::encode(&digest[..8])
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.left, self.right)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Alphabet {
        Alphabet::from_chars("0|").unwrap()
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = Rule::new(Word::empty(), Word::from_chars("0")).unwrap_err();
        assert_eq!(err, RuleError::EmptyPattern);
        assert_eq!(
            Rule::parse(&alphabet(), "", "|").unwrap_err(),
            RuleError::EmptyPattern
        );
    }

    #[test]
    fn empty_replacement_is_allowed_but_has_no_inverse() {
        let rule = Rule::parse(&alphabet(), "0|", "").unwrap();
        assert_eq!(rule.length_delta(), -2);
        assert_eq!(rule.inverse().unwrap_err(), RuleError::EmptyPattern);
    }

    #[test]
    fn foreign_symbols_surface_as_parse_errors() {
        let err = Rule::parse(&alphabet(), "0a", "0").unwrap_err();
        assert!(matches!(
            err,
            RuleError::Parse(ParseError::UnknownSymbol { symbol: 'a', .. })
        ));
    }

    #[test]
    fn digest_is_stable_and_side_sensitive() {
        let a = Rule::parse(&alphabet(), "00", "0").unwrap();
        let b = Rule::parse(&alphabet(), "00", "0").unwrap();
        let inv = a.inverse().unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), inv.digest());
        // Length prefixes keep "0|" → "0" apart from "0" → "|0".
        let c = Rule::parse(&alphabet(), "0|", "0").unwrap();
        let d = Rule::parse(&alphabet(), "0", "|0").unwrap();
        assert_ne!(c.digest(), d.digest());
        assert_eq!(short_digest(&a.digest()).len(), 16);
    }

    #[test]
    fn display_uses_arrow_notation() {
        let rule = Rule::parse(&alphabet(), "0|0", "00").unwrap();
        assert_eq!(rule.to_string(), "0|0 → 00");
    }
}
