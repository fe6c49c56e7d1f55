// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Materializes an engine's one-step relation as a [`TransitionGraph`].
use srs_core::{
    check_max_length, expand_layer, Alphabet, Application, BoundsError, CancelToken, Engine, Word,
    PARALLEL_THRESHOLD,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::graph::{Edge, TransitionGraph, VertexId};

/// Prefixes extended per cancellation poll while `build_graph` enumerates
/// its vertex set.
pub const ENUMERATION_BLOCK: usize = 4096;

/// Errors emitted while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A bound was rejected before any vertex was expanded.
    #[error(transparent)]
    InvalidBounds(#[from] BoundsError),
    /// The cancellation token tripped after `processed` vertices were expanded.
    #[error("graph build cancelled after {processed} vertices")]
    Cancelled {
        /// Vertices whose edges had been recorded.
        processed: usize,
    },
}

/// Builds transition graphs from an [`Engine`].
///
/// The builder only reads the engine; it owns the graph it produces and
/// hands it back by value.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    engine: &'a Engine,
    cancel: CancelToken,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder over `engine` with a token that never trips.
    pub fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The engine whose relation is materialized.
    pub fn engine(&self) -> &'a Engine {
        self.engine
    }

    /// Exhaustive graph over every word of length `0..=max_length`.
    ///
    /// Vertices are interned in shortlex order first, so the vertex set is
    /// exactly the length-bounded closure of `alphabet`; edges whose target
    /// would be longer than `max_length` are dropped. Enumeration runs one
    /// length at a time in blocks of [`ENUMERATION_BLOCK`] prefixes, and
    /// per-vertex edge computation is fanned out over the engine's workers
    /// in blocks; the token is polled before every block of either phase.
    ///
    /// # Errors
    /// [`GraphError::InvalidBounds`] for a zero `max_length`,
    /// [`GraphError::Cancelled`] when the token trips.
    #[instrument(level = "debug", skip(self, alphabet), fields(symbols = alphabet.len()))]
    pub fn build_graph(
        &self,
        alphabet: &Alphabet,
        max_length: usize,
    ) -> Result<TransitionGraph, GraphError> {
        check_max_length(max_length)?;

        let mut graph = TransitionGraph::new();
        let mut words = vec![Word::empty()];
        let mut ids = vec![graph.add_vertex(Word::empty()).0];
        let mut layer_start = 0;
        for length in 1..=max_length {
            let layer_end = words.len();
            for offset in (layer_start..layer_end).step_by(ENUMERATION_BLOCK) {
                if self.cancel.is_cancelled() {
                    warn!(length, enumerated = words.len(), "build_graph cancelled");
                    return Err(GraphError::Cancelled { processed: 0 });
                }
                let block_end = (offset + ENUMERATION_BLOCK).min(layer_end);
                let extended = alphabet.extend_layer(&words[offset..block_end]);
                for w in extended {
                    ids.push(graph.add_vertex(w.clone()).0);
                    words.push(w);
                }
            }
            layer_start = layer_end;
        }
        debug!(vertices = ids.len(), "vertex set enumerated");

        let block = PARALLEL_THRESHOLD * self.engine.workers();
        let mut processed = 0;
        for (chunk_words, chunk_ids) in words.chunks(block).zip(ids.chunks(block)) {
            if self.cancel.is_cancelled() {
                warn!(processed, "build_graph cancelled");
                return Err(GraphError::Cancelled { processed });
            }
            let expansions = self.expand(chunk_words);
            for (&source, apps) in chunk_ids.iter().zip(expansions) {
                for app in apps {
                    if app.word.len() > max_length {
                        continue;
                    }
                    if let Some(target) = graph.id_of(&app.word) {
                        graph.add_edge(source, edge_to(target, &app));
                    }
                }
            }
            processed += chunk_words.len();
        }

        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            digest = %graph.short_digest(),
            "exhaustive graph built"
        );
        Ok(graph)
    }

    /// Graph over the reachable closure of `starts` within `depth` steps.
    ///
    /// Breadth-first from the deduplicated start set with no width cap. Every
    /// transition out of a vertex first reached at a level below `depth` is
    /// recorded; vertices first reached at level `depth` are kept without
    /// outgoing edges and marked as frontier (see
    /// [`TransitionGraph::is_frontier`]). `depth == 0` yields the start
    /// vertices only, all of them frontier.
    ///
    /// # Errors
    /// [`GraphError::Cancelled`] when the token trips at a layer boundary.
    #[instrument(level = "debug", skip(self, starts), fields(starts = starts.len()))]
    pub fn build_incremental(
        &self,
        starts: &[Word],
        depth: usize,
    ) -> Result<TransitionGraph, GraphError> {
        let mut graph = TransitionGraph::new();
        let mut layer: Vec<(VertexId, Word)> = Vec::new();
        for w in starts {
            let (id, fresh) = graph.add_vertex(w.clone());
            if fresh {
                layer.push((id, w.clone()));
            }
        }

        let mut processed = 0;
        for level in 0..depth {
            if layer.is_empty() {
                break;
            }
            if self.cancel.is_cancelled() {
                warn!(level, processed, "build_incremental cancelled");
                return Err(GraphError::Cancelled { processed });
            }
            let words: Vec<Word> = layer.iter().map(|(_, w)| w.clone()).collect();
            let expansions = self.expand(&words);

            let mut next = Vec::new();
            for ((source, _), apps) in layer.iter().zip(expansions) {
                for app in apps {
                    let (target, fresh) = graph.add_vertex(app.word.clone());
                    graph.add_edge(*source, edge_to(target, &app));
                    if fresh {
                        next.push((target, app.word));
                    }
                }
            }
            processed += layer.len();
            debug!(
                level = level + 1,
                new = next.len(),
                vertices = graph.vertex_count(),
                "layer recorded"
            );
            layer = next;
        }

        for (id, _) in &layer {
            graph.mark_frontier(*id);
        }

        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            frontier = graph.frontier_count(),
            digest = %graph.short_digest(),
            "incremental graph built"
        );
        Ok(graph)
    }

    fn expand(&self, words: &[Word]) -> Vec<Vec<Application>> {
        expand_layer(words, self.engine.workers(), |w| {
            self.engine.all_applications(w)
        })
    }
}

fn edge_to(target: VertexId, app: &Application) -> Edge {
    Edge {
        target,
        rule: app.rule,
        position: app.position,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use srs_core::Rule;

    fn alphabet() -> Alphabet {
        Alphabet::from_chars("0|").unwrap()
    }

    fn engine(pairs: &[(&str, &str)]) -> Engine {
        Engine::from_pairs(&alphabet(), pairs).unwrap()
    }

    #[test]
    fn exhaustive_graph_covers_the_length_closure() {
        let e = engine(&[("0", "00")]);
        let g = GraphBuilder::new(&e).build_graph(&alphabet(), 2).unwrap();
        // 1 + 2 + 4 words; growth edges out of length-2 words are dropped.
        assert_eq!(g.vertex_count(), 7);
        let zero = g.id_of(&Word::from_chars("0")).unwrap();
        let zz = g.id_of(&Word::from_chars("00")).unwrap();
        assert_eq!(g.successors(zero), [zz]);
        assert!(g.edges_from(zz).is_empty());
    }

    #[test]
    fn zero_max_length_is_rejected() {
        let e = engine(&[("0", "|")]);
        assert_eq!(
            GraphBuilder::new(&e).build_graph(&alphabet(), 0).unwrap_err(),
            GraphError::InvalidBounds(BoundsError::ZeroMaxLength)
        );
    }

    #[test]
    fn incremental_graph_leaves_the_last_level_unexpanded() {
        let e = Engine::new(vec![Rule::parse(&alphabet(), "0", "00").unwrap()]);
        let g = GraphBuilder::new(&e)
            .build_incremental(&[Word::from_chars("0")], 2)
            .unwrap();
        assert_eq!(g.vertex_count(), 3);
        let last = g.id_of(&Word::from_chars("000")).unwrap();
        assert!(g.edges_from(last).is_empty());
        // "00" → "000" at both positions.
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.frontier(), [last]);
        assert!(!g.is_frontier(g.id_of(&Word::from_chars("00")).unwrap()));
    }

    #[test]
    fn frontier_is_empty_once_the_closure_is_exhausted() {
        let e = engine(&[("0", "|"), ("|", "0")]);
        let builder = GraphBuilder::new(&e);
        let g = builder
            .build_incremental(&[Word::from_chars("0")], 5)
            .unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.frontier_count(), 0);

        let starts = builder
            .build_incremental(&[Word::from_chars("0"), Word::from_chars("|")], 0)
            .unwrap();
        assert_eq!(starts.frontier(), [VertexId(0), VertexId(1)]);

        let exhaustive = builder.build_graph(&alphabet(), 2).unwrap();
        assert_eq!(exhaustive.frontier_count(), 0);
    }

    #[test]
    fn tripped_token_cancels_builds() {
        let e = engine(&[("0", "|")]);
        let token = CancelToken::new();
        token.cancel();
        let builder = GraphBuilder::new(&e).with_cancel(token);
        assert_eq!(
            builder.build_graph(&alphabet(), 3).unwrap_err(),
            GraphError::Cancelled { processed: 0 }
        );
        assert_eq!(
            builder
                .build_incremental(&[Word::from_chars("0")], 3)
                .unwrap_err(),
            GraphError::Cancelled { processed: 0 }
        );
    }
}
