// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core rewrite engine implementation.
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::bounds::{check_max_steps, check_width, check_workers, BoundsError};
use crate::cancel::CancelToken;
use crate::expand::expand_layer;
use crate::reach::{Frontier, Path, Step};
use crate::rule::{Rule, RuleError, RuleId};
use crate::symbol::Alphabet;
use crate::word::Word;

/// Number of trailing states reported when a trajectory never settles.
pub const OMEGA_WINDOW: usize = 100;

/// Errors emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A bound was rejected before any search work started.
    #[error(transparent)]
    InvalidBounds(#[from] BoundsError),
    /// The cancellation token tripped before `level` was expanded.
    #[error("search cancelled before expanding level {level}")]
    Cancelled {
        /// BFS level (or trajectory step) that was about to be processed.
        level: usize,
    },
    /// A rule handle was not issued by this engine.
    #[error("rule not registered: {0}")]
    UnknownRule(RuleId),
}

/// One candidate rewrite of a word: the result plus the `(rule, position)`
/// needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Application {
    /// Word obtained by the rewrite.
    pub word: Word,
    /// Rule that fired.
    pub rule: RuleId,
    /// Start offset of the replaced occurrence in the source word.
    pub position: usize,
}

impl Application {
    /// The `(rule, position)` pair of this application.
    pub const fn step(&self) -> Step {
        Step {
            rule: self.rule,
            position: self.position,
        }
    }
}

/// Result of calling [`Engine::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyResult {
    /// The pattern occurred at the position and was replaced.
    Applied(Word),
    /// The pattern does not occur at the position.
    NoMatch,
}

/// Long-run behaviour of the deterministic first-application trajectory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum OmegaLimit {
    /// The trajectory reached a word no rule applies to.
    Terminal(Word),
    /// The trajectory revisited a state; the repeating segment in order.
    Cycle(Vec<Word>),
    /// No repeat within the step budget; the last [`OMEGA_WINDOW`] states.
    Unresolved(Vec<Word>),
}

/// Nondeterministic string rewriting engine.
///
/// A plain value over an ordered rule list. Rule order is the enumeration
/// and tie-break order for every operation; it is never a priority, and every
/// rule is eligible at every step. The engine keeps no history between
/// queries, so one engine may serve concurrent callers and several engines
/// with different rule sets never interfere.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: Vec<Rule>,
    workers: usize,
}

impl Engine {
    /// Creates an engine over `rules` (already validated at construction).
    pub fn new(rules: Vec<Rule>) -> Self {
        debug_assert!(
            u32::try_from(rules.len()).is_ok(),
            "too many rules to assign compact ids"
        );
        Self { rules, workers: 1 }
    }

    /// Parses `(left, right)` pairs over `alphabet` into an engine.
    ///
    /// # Errors
    /// Returns the first [`RuleError`] encountered; no partial engine is built.
    pub fn from_pairs(alphabet: &Alphabet, pairs: &[(&str, &str)]) -> Result<Self, RuleError> {
        let rules = pairs
            .iter()
            .map(|(left, right)| Rule::parse(alphabet, left, right))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Sets the number of fork-join workers used to expand large BFS layers.
    ///
    /// # Errors
    /// Returns [`BoundsError::ZeroWorkers`] for zero.
    pub fn with_workers(mut self, workers: usize) -> Result<Self, BoundsError> {
        self.workers = check_workers(workers)?;
        Ok(self)
    }

    /// Fork-join worker count (1 = sequential).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by handle.
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.index())
    }

    /// Iterates `(handle, rule)` pairs in declaration order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter_rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (RuleId(i as u32), rule))
    }

    /// Ascending start offsets at which `pattern` occurs in `word`.
    ///
    /// Overlapping occurrences are all reported. An empty pattern occurs at
    /// every offset `0..=len(word)`.
    pub fn find_positions(&self, word: &Word, pattern: &Word) -> Vec<usize> {
        if pattern.len() > word.len() {
            return Vec::new();
        }
        (0..=word.len() - pattern.len())
            .filter(|&p| word.matches_at(pattern, p))
            .collect()
    }

    /// Applies `rule` at `position` if its pattern occurs there.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownRule`] for a handle this engine did not
    /// issue.
    pub fn apply(
        &self,
        word: &Word,
        rule: RuleId,
        position: usize,
    ) -> Result<ApplyResult, EngineError> {
        let Some(r) = self.rule(rule) else {
            return Err(EngineError::UnknownRule(rule));
        };
        if !word.matches_at(r.left(), position) {
            return Ok(ApplyResult::NoMatch);
        }
        Ok(rewrite(word, r, position).map_or(ApplyResult::NoMatch, ApplyResult::Applied))
    }

    /// Every one-step rewrite of `word`, ordered by rule declaration order and
    /// then by ascending position.
    ///
    /// This order is the canonical tie-break for every operation that needs
    /// "the first" application. Rules whose pattern is longer than `word` are
    /// skipped, so no reported position runs past the end.
    pub fn all_applications(&self, word: &Word) -> Vec<Application> {
        let mut out = Vec::new();
        for (id, rule) in self.iter_rules() {
            for position in self.find_positions(word, rule.left()) {
                if let Some(next) = rewrite(word, rule, position) {
                    out.push(Application {
                        word: next,
                        rule: id,
                        position,
                    });
                }
            }
        }
        out
    }

    /// The first entry [`Engine::all_applications`] would return, computed
    /// without materializing the rest.
    pub fn first_application(&self, word: &Word) -> Option<Application> {
        self.iter_rules().find_map(|(id, rule)| {
            let position = self.find_positions(word, rule.left()).into_iter().next()?;
            rewrite(word, rule, position).map(|next| Application {
                word: next,
                rule: id,
                position,
            })
        })
    }

    /// Returns `true` when no rule applies to `word`.
    pub fn is_normal_form(&self, word: &Word) -> bool {
        self.first_application(word).is_none()
    }

    /// Normal forms among the words of `frontier`, in frontier order.
    pub fn normal_forms(&self, frontier: &Frontier) -> Vec<Word> {
        frontier
            .iter()
            .filter(|w| self.is_normal_form(w))
            .cloned()
            .collect()
    }

    /// Breadth-first reachability bounded by `depth` levels and `width` words
    /// per level.
    ///
    /// See [`Engine::bounded_reach_with`].
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidBounds`] when `width` is zero.
    pub fn bounded_reach(
        &self,
        start: &Word,
        depth: usize,
        width: usize,
    ) -> Result<Frontier, EngineError> {
        self.bounded_reach_with(start, depth, width, &CancelToken::new())
    }

    /// Breadth-first reachability with cooperative cancellation.
    ///
    /// Level 0 is `{start}`. Level `k + 1` collects, in discovery order, the
    /// results of [`Engine::all_applications`] over level `k` that were not
    /// seen at any earlier level. When a level would hold more than `width`
    /// new words, only the first `width` are kept and the frontier is marked
    /// truncated; dropped words are not recorded as seen. The search stops
    /// after `depth` levels or at the first empty level.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidBounds`] when `width` is zero and
    /// [`EngineError::Cancelled`] when `cancel` trips at a layer boundary.
    #[instrument(level = "debug", skip(self, start, cancel), fields(start = %start))]
    pub fn bounded_reach_with(
        &self,
        start: &Word,
        depth: usize,
        width: usize,
        cancel: &CancelToken,
    ) -> Result<Frontier, EngineError> {
        check_width(width)?;

        let mut frontier = Frontier::new(start.clone());
        let mut seen: FxHashSet<Word> = FxHashSet::default();
        seen.insert(start.clone());
        let mut current = vec![start.clone()];

        for level in 0..depth {
            if cancel.is_cancelled() {
                warn!(level, "bounded_reach cancelled");
                return Err(EngineError::Cancelled { level });
            }
            let expansions = expand_layer(&current, self.workers, |w| self.all_applications(w));

            let mut next = Vec::new();
            let mut truncated = false;
            'scan: for apps in expansions {
                for app in apps {
                    if seen.contains(&app.word) {
                        continue;
                    }
                    if next.len() == width {
                        truncated = true;
                        break 'scan;
                    }
                    seen.insert(app.word.clone());
                    next.push(app.word);
                }
            }

            if truncated {
                warn!(level = level + 1, width, "level truncated to width");
                frontier.mark_truncated();
            }
            if next.is_empty() {
                debug!(level = level + 1, "frontier exhausted");
                break;
            }
            debug!(level = level + 1, words = next.len(), "level expanded");
            frontier.push_level(next.clone());
            current = next;
        }

        Ok(frontier)
    }

    /// Shortest rewrite path from `start` to `target` within `depth` steps.
    ///
    /// See [`Engine::reachable_with`].
    ///
    /// # Errors
    /// Never fails in practice; the `Result` mirrors [`Engine::reachable_with`].
    pub fn reachable(
        &self,
        start: &Word,
        target: &Word,
        depth: usize,
    ) -> Result<Option<Path>, EngineError> {
        self.reachable_with(start, target, depth, &CancelToken::new())
    }

    /// Path search with cooperative cancellation.
    ///
    /// Same layering as [`Engine::bounded_reach_with`] without a width cap.
    /// Every discovered word keeps a pointer to the word and step that first
    /// produced it; the search returns as soon as `target` is discovered, so
    /// the path is shortest in steps with ties broken by
    /// [`Engine::all_applications`] order. `Ok(None)` means "not found within
    /// `depth`", not "unreachable".
    ///
    /// # Errors
    /// Returns [`EngineError::Cancelled`] when `cancel` trips at a layer
    /// boundary.
    #[instrument(level = "debug", skip(self, start, target, cancel), fields(start = %start, target = %target))]
    pub fn reachable_with(
        &self,
        start: &Word,
        target: &Word,
        depth: usize,
        cancel: &CancelToken,
    ) -> Result<Option<Path>, EngineError> {
        if start == target {
            return Ok(Some(Path::new(vec![start.clone()], Vec::new())));
        }

        // Arena of discovered words with predecessor pointers.
        let mut arena: Vec<(Word, Option<(usize, Step)>)> = vec![(start.clone(), None)];
        let mut seen: FxHashSet<Word> = FxHashSet::default();
        seen.insert(start.clone());
        let mut layer: Vec<usize> = vec![0];

        for level in 0..depth {
            if cancel.is_cancelled() {
                warn!(level, "reachable cancelled");
                return Err(EngineError::Cancelled { level });
            }
            let words: Vec<Word> = layer.iter().map(|&i| arena[i].0.clone()).collect();
            let expansions = expand_layer(&words, self.workers, |w| self.all_applications(w));

            let mut next = Vec::new();
            for (&parent, apps) in layer.iter().zip(expansions) {
                for app in apps {
                    if !seen.insert(app.word.clone()) {
                        continue;
                    }
                    let step = app.step();
                    let found = app.word == *target;
                    arena.push((app.word, Some((parent, step))));
                    let idx = arena.len() - 1;
                    if found {
                        debug!(level = level + 1, discovered = arena.len(), "target found");
                        return Ok(Some(reconstruct(&arena, idx)));
                    }
                    next.push(idx);
                }
            }
            if next.is_empty() {
                break;
            }
            debug!(level = level + 1, words = next.len(), "level expanded");
            layer = next;
        }

        debug!(discovered = arena.len(), "target not found within depth");
        Ok(None)
    }

    /// Follows the deterministic trajectory that always takes the first
    /// application, for at most `max_steps` steps.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidBounds`] when `max_steps` is zero.
    #[instrument(level = "debug", skip(self, start), fields(start = %start))]
    pub fn omega_limit(&self, start: &Word, max_steps: usize) -> Result<OmegaLimit, EngineError> {
        check_max_steps(max_steps)?;

        let mut trajectory: Vec<Word> = Vec::new();
        let mut index: FxHashMap<Word, usize> = FxHashMap::default();
        let mut current = start.clone();

        for _ in 0..max_steps {
            index.insert(current.clone(), trajectory.len());
            trajectory.push(current.clone());
            let Some(first) = self.first_application(&current) else {
                return Ok(OmegaLimit::Terminal(current));
            };
            if let Some(&at) = index.get(&first.word) {
                return Ok(OmegaLimit::Cycle(trajectory.split_off(at)));
            }
            current = first.word;
        }

        let keep = trajectory.len().min(OMEGA_WINDOW);
        let tail = trajectory.split_off(trajectory.len() - keep);
        Ok(OmegaLimit::Unresolved(tail))
    }
}

/// Replaces the occurrence of `rule.left()` at `position` with `rule.right()`.
fn rewrite(word: &Word, rule: &Rule, position: usize) -> Option<Word> {
    word.splice(position..position + rule.left().len(), rule.right())
}

fn reconstruct(arena: &[(Word, Option<(usize, Step)>)], mut idx: usize) -> Path {
    let mut words = vec![arena[idx].0.clone()];
    let mut steps = Vec::new();
    while let Some((parent, step)) = arena[idx].1 {
        steps.push(step);
        words.push(arena[parent].0.clone());
        idx = parent;
    }
    words.reverse();
    steps.reverse();
    Path::new(words, steps)
}
