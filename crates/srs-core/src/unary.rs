// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Unary block encoding over a `{unit, separator}` alphabet.
//!
//! A list of naturals `[b1, .., bn]` is written `unit^b1 sep unit^b2 sep ..
//! unit^bn`, so `[2, 3, 1]` over `{0, |}` is `00|000|0`. Arithmetic rule sets
//! (e.g. `0|0 → 00` for addition) operate on this encoding.
use crate::symbol::{ParseError, Symbol};
use crate::word::Word;

/// Encoder/decoder for unary blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnaryCodec {
    unit: Symbol,
    separator: Symbol,
}

impl Default for UnaryCodec {
    fn default() -> Self {
        Self::new(Symbol('0'), Symbol('|'))
    }
}

impl UnaryCodec {
    /// Creates a codec for the given unit and separator symbols.
    pub const fn new(unit: Symbol, separator: Symbol) -> Self {
        Self { unit, separator }
    }

    /// Unit symbol (one per counted item).
    pub const fn unit(&self) -> Symbol {
        self.unit
    }

    /// Block separator symbol.
    pub const fn separator(&self) -> Symbol {
        self.separator
    }

    /// Encodes block lengths as a word.
    pub fn encode(&self, blocks: &[usize]) -> Word {
        let total = blocks.iter().sum::<usize>() + blocks.len().saturating_sub(1);
        let mut out = Vec::with_capacity(total);
        for (i, &len) in blocks.iter().enumerate() {
            if i > 0 {
                out.push(self.separator);
            }
            out.extend(std::iter::repeat_n(self.unit, len));
        }
        Word::from(out)
    }

    /// Decodes a word into block lengths.
    ///
    /// Every separator closes the current block (possibly of length zero). A
    /// trailing block is emitted when it is non-empty or when the word does
    /// not end in a separator, so `"00|"` decodes to `[2]` and `""` to `[]`.
    ///
    /// # Errors
    /// Returns [`ParseError::UnknownSymbol`] for symbols that are neither the
    /// unit nor the separator.
    pub fn decode(&self, word: &Word) -> Result<Vec<usize>, ParseError> {
        let mut blocks = Vec::new();
        let mut current = 0usize;
        for (position, &symbol) in word.symbols().iter().enumerate() {
            if symbol == self.unit {
                current += 1;
            } else if symbol == self.separator {
                blocks.push(current);
                current = 0;
            } else {
                return Err(ParseError::UnknownSymbol {
                    symbol: symbol.as_char(),
                    position,
                });
            }
        }
        let ends_with_separator = word.symbols().last() == Some(&self.separator);
        if current > 0 || (!word.is_empty() && !ends_with_separator) {
            blocks.push(current);
        }
        Ok(blocks)
    }
}
