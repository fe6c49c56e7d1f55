// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Attractors (terminal components), their basins and per-vertex
//! classification.
use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument};

use crate::graph::{TransitionGraph, VertexId};
use crate::scc::{ComponentId, Scc, SccDecomposition};

/// Answers attractor and basin queries for one graph.
///
/// Holds the SCC decomposition and the reverse adjacency, both derived once
/// at construction. The graph is only borrowed.
#[derive(Debug, Clone)]
pub struct AttractorAnalyzer<'g> {
    graph: &'g TransitionGraph,
    scc: SccDecomposition,
    reverse: Vec<Vec<VertexId>>,
}

impl<'g> AttractorAnalyzer<'g> {
    /// Decomposes `graph` and prepares basin queries.
    pub fn new(graph: &'g TransitionGraph) -> Self {
        Self::with_decomposition(graph, SccDecomposition::compute(graph))
    }

    /// Reuses an existing decomposition of `graph`.
    pub fn with_decomposition(graph: &'g TransitionGraph, scc: SccDecomposition) -> Self {
        Self {
            graph,
            scc,
            reverse: graph.reverse_adjacency(),
        }
    }

    /// The analysed graph.
    pub fn graph(&self) -> &'g TransitionGraph {
        self.graph
    }

    /// The SCC decomposition in Tarjan order.
    pub fn decomposition(&self) -> &SccDecomposition {
        &self.scc
    }

    /// Returns `true` iff no edge starts inside `scc` and ends outside it.
    pub fn is_attractor(&self, scc: &Scc) -> bool {
        scc.vertices().iter().all(|&v| {
            self.graph
                .edges_from(v)
                .iter()
                .all(|e| scc.contains(e.target))
        })
    }

    /// Returns `true` when `scc` holds a frontier vertex.
    ///
    /// Such a component looks like a sink only because the builder stopped
    /// there; an attractor for which this holds is a depth cut-off, not a
    /// normal form or closed cycle of the system.
    pub fn is_depth_cutoff(&self, scc: &Scc) -> bool {
        scc.vertices().iter().any(|&v| self.graph.is_frontier(v))
    }

    /// Attractor components, in Tarjan order (lowest id first).
    pub fn attractors(&self) -> Vec<ComponentId> {
        self.scc
            .iter()
            .filter(|(_, c)| self.is_attractor(c))
            .map(|(id, _)| id)
            .collect()
    }

    /// Vertices with a directed path (possibly empty) into component
    /// `attractor`, ascending. The component itself is always included.
    ///
    /// Returns an empty basin for an unknown id.
    pub fn find_basin(&self, attractor: ComponentId) -> Vec<VertexId> {
        let Some(component) = self.scc.component(attractor) else {
            return Vec::new();
        };
        let mut seen: FxHashSet<VertexId> = component.vertices().iter().copied().collect();
        let mut queue: Vec<VertexId> = component.vertices().to_vec();
        while let Some(v) = queue.pop() {
            for &p in &self.reverse[v.index()] {
                if seen.insert(p) {
                    queue.push(p);
                }
            }
        }
        let mut basin: Vec<VertexId> = seen.into_iter().collect();
        basin.sort_unstable();
        basin
    }

    /// Assigns every vertex to at most one attractor.
    ///
    /// Each basin is computed independently and merged afterwards. A vertex
    /// in several basins goes to the attractor with the lowest component id
    /// (the one Tarjan completed first) and is also listed as ambiguous.
    #[instrument(level = "debug", skip(self), fields(vertices = self.graph.vertex_count()))]
    pub fn classify_vertices(&self) -> Classification {
        let attractors = self.attractors();
        let basins: Vec<(ComponentId, Vec<VertexId>)> = attractors
            .iter()
            .map(|&a| (a, self.find_basin(a)))
            .collect();

        let n = self.graph.vertex_count();
        let mut assignment: Vec<Option<ComponentId>> = vec![None; n];
        let mut hits = vec![0u32; n];
        for (attractor, basin) in &basins {
            for v in basin {
                hits[v.index()] += 1;
                if assignment[v.index()].is_none() {
                    assignment[v.index()] = Some(*attractor);
                }
            }
        }
        let ambiguous: Vec<VertexId> = self
            .graph
            .vertices()
            .map(|(id, _)| id)
            .filter(|id| hits[id.index()] > 1)
            .collect();

        debug!(
            attractors = attractors.len(),
            ambiguous = ambiguous.len(),
            "basins merged"
        );
        let classification = Classification {
            assignment,
            ambiguous,
            basins,
        };
        info!(
            attractors = classification.basins.len(),
            unclassified = classification.unclassified_count(),
            "vertices classified"
        );
        classification
    }
}

/// Vertex-to-attractor mapping with the tie-break applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    assignment: Vec<Option<ComponentId>>,
    ambiguous: Vec<VertexId>,
    basins: Vec<(ComponentId, Vec<VertexId>)>,
}

impl Classification {
    /// Attractor assigned to `vertex`, or `None` when it reaches none.
    pub fn attractor_of(&self, vertex: VertexId) -> Option<ComponentId> {
        self.assignment.get(vertex.index()).copied().flatten()
    }

    /// Vertices whose forward closure touches more than one attractor.
    pub fn ambiguous(&self) -> &[VertexId] {
        &self.ambiguous
    }

    /// Returns `true` when `vertex` lies in more than one basin.
    pub fn is_ambiguous(&self, vertex: VertexId) -> bool {
        self.ambiguous.binary_search(&vertex).is_ok()
    }

    /// Full basin of every attractor, in Tarjan order. Basins may overlap.
    pub fn basins(&self) -> &[(ComponentId, Vec<VertexId>)] {
        &self.basins
    }

    /// Number of vertices that reach no attractor.
    pub fn unclassified_count(&self) -> usize {
        self.assignment.iter().filter(|a| a.is_none()).count()
    }

    /// Iterates `(vertex, assigned attractor)` in vertex order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Option<ComponentId>)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .map(|(i, a)| (VertexId(i as u32), *a))
    }
}
