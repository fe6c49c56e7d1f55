// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serializable description of a rewriting system and its exploration bounds.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::bounds::{check_max_length, check_max_steps, check_width, check_workers, BoundsError};
use crate::cancel::CancelToken;
use crate::engine_impl::Engine;
use crate::rule::{Rule, RuleError};
use crate::symbol::{Alphabet, AlphabetError};

/// Error type for loading and validating a [`SystemConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong shape.
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
    /// The declared alphabet is empty or repeats a symbol.
    #[error("alphabet: {0}")]
    Alphabet(#[from] AlphabetError),
    /// Rule `index` could not be parsed.
    #[error("rule {index}: {source}")]
    Rule {
        /// Zero-based position in the `rules` list.
        index: usize,
        /// Underlying failure.
        #[source]
        source: RuleError,
    },
    /// An exploration bound is out of range.
    #[error("bounds: {0}")]
    Bounds(#[from] BoundsError),
}

/// One rule in external notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Pattern.
    pub left: String,
    /// Replacement; may be empty.
    #[serde(default)]
    pub right: String,
}

/// Search and graph-construction bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// BFS depth for bounded searches and incremental graph builds.
    pub depth: usize,
    /// Maximum new words kept per BFS level.
    pub width: usize,
    /// Length bound for exhaustive graph construction.
    pub max_length: usize,
    /// Step budget for trajectory following.
    pub max_steps: usize,
    /// Fork-join workers; `None` means sequential.
    pub workers: Option<usize>,
    /// Wall-clock budget in milliseconds for a single search or build.
    pub timeout_ms: Option<u64>,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            width: 100,
            max_length: 4,
            max_steps: 1000,
            workers: None,
            timeout_ms: None,
        }
    }
}

impl ExplorationConfig {
    /// Checks every bound without doing any search work.
    ///
    /// # Errors
    /// Returns the first [`BoundsError`] in field order.
    pub fn validate(&self) -> Result<(), BoundsError> {
        check_width(self.width)?;
        check_max_length(self.max_length)?;
        check_max_steps(self.max_steps)?;
        check_workers(self.worker_count())?;
        Ok(())
    }

    /// Effective worker count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or(1)
    }

    /// A fresh token honouring `timeout_ms`, if any.
    pub fn cancel_token(&self) -> CancelToken {
        self.timeout_ms.map_or_else(CancelToken::new, |ms| {
            CancelToken::with_timeout(Duration::from_millis(ms))
        })
    }
}

/// Complete rewriting system: alphabet, ordered rules and bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Each character is one symbol, in declaration order.
    pub alphabet: String,
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    /// Bounds; omitted fields take their defaults.
    #[serde(default)]
    pub exploration: ExplorationConfig,
}

impl SystemConfig {
    /// Deserializes a configuration from JSON bytes.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] on malformed input.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes this configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] if serialization fails.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Validates the configuration and builds the alphabet and engine.
    ///
    /// Bounds are checked first, then the alphabet, then each rule in order.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] encountered.
    pub fn build(&self) -> Result<(Alphabet, Engine), ConfigError> {
        self.exploration.validate()?;
        let alphabet = Alphabet::from_chars(&self.alphabet)?;
        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                Rule::parse(&alphabet, &rule.left, &rule.right)
                    .map_err(|source| ConfigError::Rule { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            symbols = alphabet.len(),
            rules = rules.len(),
            "system config built"
        );
        let engine = Engine::new(rules).with_workers(self.exploration.worker_count())?;
        Ok((alphabet, engine))
    }
}
