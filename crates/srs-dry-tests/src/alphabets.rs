// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The binary alphabet and word helpers.

use srs_core::{Alphabet, Word};

/// Symbols of the unary-encoding alphabet: unit `0`, separator `|`.
pub const BINARY_SYMBOLS: &str = "0|";

/// The `{0, |}` alphabet.
///
/// # Panics
/// Never in practice; the declaration is a literal.
#[allow(clippy::expect_used)]
pub fn binary_alphabet() -> Alphabet {
    Alphabet::from_chars(BINARY_SYMBOLS).expect("binary alphabet literal")
}

/// Parses `text` over the binary alphabet.
///
/// # Panics
/// Panics when `text` uses a symbol other than `0` or `|`.
#[allow(clippy::expect_used)]
pub fn word(text: &str) -> Word {
    binary_alphabet()
        .parse(text)
        .expect("fixture word must use only '0' and '|'")
}

/// Parses several words over the binary alphabet, preserving order.
///
/// # Panics
/// See [`word`].
pub fn words(texts: &[&str]) -> Vec<Word> {
    texts.iter().map(|t| word(t)).collect()
}
