// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain topology counts for downstream reporting.
use crate::attractor::{AttractorAnalyzer, Classification};
use crate::graph::TransitionGraph;

/// Counts describing a graph's topology.
///
/// Plain numbers only; serialize with any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct TopologySummary {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges, counting each `(rule, position)` separately.
    pub edges: usize,
    /// Number of distinct `(source, target)` pairs.
    pub simple_edges: usize,
    /// Number of strongly connected components.
    pub scc_count: usize,
    /// Size of the largest component.
    pub largest_scc: usize,
    /// Components containing a nonempty cycle.
    pub cyclic_scc_count: usize,
    /// Number of attractors.
    pub attractor_count: usize,
    /// Basin size of each attractor, in Tarjan order.
    pub basin_sizes: Vec<usize>,
    /// Vertices reaching no attractor.
    pub unclassified: usize,
    /// Vertices reaching more than one attractor.
    pub ambiguous: usize,
    /// Vertices the builder reached but did not expand.
    pub frontier: usize,
    /// Attractors that are depth cut-offs rather than true sinks.
    pub cutoff_attractors: usize,
}

impl TopologySummary {
    /// Runs the full analysis of `graph`.
    pub fn of(graph: &TransitionGraph) -> Self {
        let analyzer = AttractorAnalyzer::new(graph);
        let classification = analyzer.classify_vertices();
        Self::from_parts(&analyzer, &classification)
    }

    /// Summarizes an existing analysis.
    pub fn from_parts(analyzer: &AttractorAnalyzer<'_>, classification: &Classification) -> Self {
        let graph = analyzer.graph();
        let scc = analyzer.decomposition();
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            simple_edges: graph.simple_edge_count(),
            scc_count: scc.len(),
            largest_scc: scc.largest_size(),
            cyclic_scc_count: scc.components().iter().filter(|c| c.is_cyclic()).count(),
            attractor_count: classification.basins().len(),
            basin_sizes: classification
                .basins()
                .iter()
                .map(|(_, basin)| basin.len())
                .collect(),
            unclassified: classification.unclassified_count(),
            ambiguous: classification.ambiguous().len(),
            frontier: graph.frontier_count(),
            cutoff_attractors: classification
                .basins()
                .iter()
                .filter_map(|(id, _)| scc.component(*id))
                .filter(|c| analyzer.is_depth_cutoff(c))
                .count(),
        }
    }
}
