// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory transition graph over interned words.
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use srs_core::{update_word, RuleId, Word};

/// Canonical 256-bit graph digest.
pub type GraphDigest = [u8; 32];

/// Dense vertex handle, assigned in insertion order.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Returns the insertion index this handle stands for.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One recorded transition out of a vertex.
///
/// Distinct `(rule, position)` pairs are distinct edges even when they share
/// a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Edge {
    /// Word produced by the rewrite.
    pub target: VertexId,
    /// Rule that fired.
    pub rule: RuleId,
    /// Offset of the replaced occurrence in the source word.
    pub position: usize,
}

/// Directed multigraph whose vertices are words and whose edges are one-step
/// rewrites.
///
/// Vertices are interned: each distinct word is stored once and addressed by
/// a [`VertexId`]. Outgoing edges are kept per source in the order they were
/// added, which for the builders is [`srs_core::Engine::all_applications`]
/// order.
///
/// A vertex can be marked as *frontier*: it was reached but never expanded,
/// so its lack of outgoing edges says nothing about the rewriting system.
/// Frontier marks are not part of the [`TransitionGraph::digest`].
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    vertices: Vec<Word>,
    index: FxHashMap<Word, VertexId>,
    edges: Vec<Vec<Edge>>,
    edge_count: usize,
    frontier: FxHashSet<VertexId>,
}

impl TransitionGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `word`, returning its handle and whether it was newly added.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_vertex(&mut self, word: Word) -> (VertexId, bool) {
        if let Some(&id) = self.index.get(&word) {
            return (id, false);
        }
        let id = VertexId(self.vertices.len() as u32);
        self.index.insert(word.clone(), id);
        self.vertices.push(word);
        self.edges.push(Vec::new());
        (id, true)
    }

    /// Appends an edge out of `source`. Both endpoints must already exist.
    ///
    /// Returns `false` (and records nothing) for an unknown endpoint.
    pub fn add_edge(&mut self, source: VertexId, edge: Edge) -> bool {
        if edge.target.index() >= self.vertices.len() {
            return false;
        }
        let Some(out) = self.edges.get_mut(source.index()) else {
            return false;
        };
        out.push(edge);
        self.edge_count += 1;
        true
    }

    /// Marks `id` as reached but unexpanded.
    ///
    /// Returns `false` for an unknown vertex or one already marked.
    pub fn mark_frontier(&mut self, id: VertexId) -> bool {
        id.index() < self.vertices.len() && self.frontier.insert(id)
    }

    /// Returns `true` when `id` was left unexpanded by the builder.
    ///
    /// A frontier vertex has no outgoing edges in this graph, but it may
    /// have successors in the full one-step relation.
    pub fn is_frontier(&self, id: VertexId) -> bool {
        self.frontier.contains(&id)
    }

    /// Frontier vertices in ascending handle order.
    pub fn frontier(&self) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = self.frontier.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Number of frontier vertices.
    pub fn frontier_count(&self) -> usize {
        self.frontier.len()
    }

    /// Word stored at `id`.
    pub fn vertex(&self, id: VertexId) -> Option<&Word> {
        self.vertices.get(id.index())
    }

    /// Handle of `word`, if it is a vertex.
    pub fn id_of(&self, word: &Word) -> Option<VertexId> {
        self.index.get(word).copied()
    }

    /// Returns `true` when `word` is a vertex.
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    /// Iterates `(handle, word)` in insertion order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Word)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, w)| (VertexId(i as u32), w))
    }

    /// Outgoing edges of `id` in insertion order; empty for unknown ids.
    pub fn edges_from(&self, id: VertexId) -> &[Edge] {
        self.edges
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct targets of `id`, in first-occurrence order.
    pub fn successors(&self, id: VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::new();
        for edge in self.edges_from(id) {
            if !out.contains(&edge.target) {
                out.push(edge.target);
            }
        }
        out
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges, counting every `(rule, position)` separately.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct `(source, target)` pairs.
    pub fn simple_edge_count(&self) -> usize {
        (0..self.vertices.len())
            .map(|i| self.successors_at(i).len())
            .sum()
    }

    /// Predecessor lists indexed by target, deduplicated, in source order.
    pub fn reverse_adjacency(&self) -> Vec<Vec<VertexId>> {
        let mut rev: Vec<Vec<VertexId>> = vec![Vec::new(); self.vertices.len()];
        for (source, _) in self.vertices() {
            for target in self.successors(source) {
                rev[target.index()].push(source);
            }
        }
        rev
    }

    /// Dense successor lists (deduplicated), used by the SCC pass.
    pub(crate) fn adjacency(&self) -> Vec<Vec<usize>> {
        (0..self.vertices.len())
            .map(|i| self.successors_at(i))
            .collect()
    }

    fn successors_at(&self, i: usize) -> Vec<usize> {
        let mut out: Vec<usize> = Vec::new();
        for edge in &self.edges[i] {
            let t = edge.target.index();
            if !out.contains(&t) {
                out.push(t);
            }
        }
        out
    }

    /// Canonical BLAKE3 digest over the graph's content.
    ///
    /// Vertices are hashed in word order and edges in `(source word, target
    /// word, rule, position)` order, so two graphs with the same vertex and
    /// edge sets hash equally regardless of insertion order.
    pub fn digest(&self) -> GraphDigest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"srs-graph:v1\0");

        let mut words: Vec<&Word> = self.vertices.iter().collect();
        words.sort();
        hasher.update(&(words.len() as u64).to_le_bytes());
        for w in words {
            hasher.update(b"V\0");
            update_word(&mut hasher, w);
        }

        let mut all: Vec<(&Word, &Word, RuleId, usize)> = Vec::with_capacity(self.edge_count);
        for (i, out) in self.edges.iter().enumerate() {
            for e in out {
                all.push((
                    &self.vertices[i],
                    &self.vertices[e.target.index()],
                    e.rule,
                    e.position,
                ));
            }
        }
        all.sort();
        hasher.update(&(all.len() as u64).to_le_bytes());
        for (source, target, rule, position) in all {
            hasher.update(b"E\0");
            update_word(&mut hasher, source);
            update_word(&mut hasher, target);
            hasher.update(&rule.0.to_le_bytes());
            hasher.update(&(position as u64).to_le_bytes());
        }
        hasher.finalize().into()
    }

    /// Short hex form of [`TransitionGraph::digest`] for logs.
    pub fn short_digest(&self) -> String {
        hex::encode(&self.digest()[..8])
    }
}
