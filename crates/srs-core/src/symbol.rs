// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Alphabet tokens and the declared alphabet they are drawn from.
use std::fmt;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::word::Word;

/// Opaque alphabet token.
///
/// Symbols compare by value. The derived ordering exists only so canonical
/// digests and sorted reports are stable; it carries no rewriting meaning.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Symbol(pub char);

impl Symbol {
    /// Returns the character used for this symbol in external notation.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while declaring an alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// An alphabet must declare at least one symbol.
    #[error("alphabet is empty")]
    Empty,
    /// The same symbol was declared twice.
    #[error("duplicate symbol {0:?} in alphabet")]
    Duplicate(char),
}

/// Error raised when external notation uses a symbol outside the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `symbol` at character offset `position` is not declared.
    #[error("symbol {symbol:?} at position {position} is not in the alphabet")]
    UnknownSymbol {
        /// Offending character.
        symbol: char,
        /// Character offset within the input.
        position: usize,
    },
}

/// Fixed, finite set of symbols declared up front.
///
/// Declaration order is preserved and used as the enumeration order for
/// exhaustive word generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    members: FxHashSet<Symbol>,
}

impl Alphabet {
    /// Declares an alphabet from the given symbols, in order.
    ///
    /// # Errors
    /// Returns [`AlphabetError::Empty`] for an empty declaration and
    /// [`AlphabetError::Duplicate`] when a symbol repeats.
    pub fn new<I>(symbols: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut ordered = Vec::new();
        let mut members = FxHashSet::default();
        for c in symbols {
            let symbol = Symbol(c);
            if !members.insert(symbol) {
                return Err(AlphabetError::Duplicate(c));
            }
            ordered.push(symbol);
        }
        if ordered.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Ok(Self {
            symbols: ordered,
            members,
        })
    }

    /// Declares an alphabet whose symbols are the characters of `declaration`.
    ///
    /// # Errors
    /// See [`Alphabet::new`].
    pub fn from_chars(declaration: &str) -> Result<Self, AlphabetError> {
        Self::new(declaration.chars())
    }

    /// Returns `true` when `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.members.contains(&symbol)
    }

    /// Number of declared symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`: construction rejects empty alphabets.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Declared symbols in declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterates the declared symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }

    /// Parses external notation (one character per symbol) into a [`Word`].
    ///
    /// # Errors
    /// Returns [`ParseError::UnknownSymbol`] for the first character that is
    /// not declared; nothing is coerced.
    pub fn parse(&self, text: &str) -> Result<Word, ParseError> {
        let mut out = Vec::with_capacity(text.len());
        for (position, c) in text.chars().enumerate() {
            let symbol = Symbol(c);
            if !self.contains(symbol) {
                return Err(ParseError::UnknownSymbol {
                    symbol: c,
                    position,
                });
            }
            out.push(symbol);
        }
        Ok(Word::from(out))
    }

    /// Enumerates every word of length `0..=max_length` in shortlex order.
    ///
    /// Within one length, words are ordered lexicographically by declaration
    /// order of their symbols. The count is `sum(|A|^L)`, so this is only
    /// meant for small bounds; see [`Alphabet::extend_layer`] for a form
    /// that can be driven one block at a time.
    pub fn words_up_to(&self, max_length: usize) -> Vec<Word> {
        let mut out = vec![Word::empty()];
        let mut layer = out.clone();
        for _ in 0..max_length {
            layer = self.extend_layer(&layer);
            out.extend(layer.iter().cloned());
        }
        out
    }

    /// Appends every symbol to every word of `prefixes`, prefix-major.
    ///
    /// Fed a shortlex-ordered slice of words of one length, the result is
    /// the shortlex-ordered slice of the next length. Consecutive blocks of
    /// `prefixes` produce consecutive blocks of the output.
    pub fn extend_layer(&self, prefixes: &[Word]) -> Vec<Word> {
        let mut next = Vec::with_capacity(prefixes.len() * self.symbols.len());
        for prefix in prefixes {
            for &symbol in &self.symbols {
                let mut extended = Vec::with_capacity(prefix.len() + 1);
                extended.extend_from_slice(prefix.symbols());
                extended.push(symbol);
                next.push(Word::from(extended));
            }
        }
        next
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{symbol}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_duplicate_declarations() {
        assert_eq!(Alphabet::from_chars(""), Err(AlphabetError::Empty));
        assert_eq!(
            Alphabet::from_chars("0|0"),
            Err(AlphabetError::Duplicate('0'))
        );
    }

    #[test]
    fn parse_reports_first_foreign_symbol() {
        let alphabet = Alphabet::from_chars("0|").unwrap();
        let err = alphabet.parse("00x|y").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownSymbol {
                symbol: 'x',
                position: 2
            }
        );
        assert_eq!(alphabet.parse("0|0").unwrap().to_string(), "0|0");
    }

    #[test]
    fn shortlex_enumeration_follows_declaration_order() {
        let alphabet = Alphabet::from_chars("|0").unwrap();
        let words: Vec<String> = alphabet
            .words_up_to(2)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(words, ["", "|", "0", "||", "|0", "0|", "00"]);
    }

    #[test]
    fn enumeration_size_is_geometric_sum() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        assert_eq!(alphabet.words_up_to(0).len(), 1);
        assert_eq!(alphabet.words_up_to(3).len(), 1 + 2 + 4 + 8);
    }

    #[test]
    fn blockwise_extension_matches_whole_layer() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let layer: Vec<Word> = alphabet
            .words_up_to(2)
            .into_iter()
            .filter(|w| w.len() == 2)
            .collect();
        let whole = alphabet.extend_layer(&layer);
        let blockwise: Vec<Word> = layer
            .chunks(3)
            .flat_map(|chunk| alphabet.extend_layer(chunk))
            .collect();
        assert_eq!(whole, blockwise);
        let rendered: Vec<String> = whole.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            ["aaa", "aab", "aba", "abb", "baa", "bab", "bba", "bbb"]
        );
        assert!(alphabet.extend_layer(&[]).is_empty());
    }
}
