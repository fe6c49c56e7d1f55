// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Strongly connected components via an iterative Tarjan pass.
use std::fmt;

use tracing::{debug, instrument};

use crate::graph::{TransitionGraph, VertexId};

/// Index of a component in Tarjan emission order.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Position in [`SccDecomposition::components`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// One strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Scc {
    vertices: Vec<VertexId>,
    cyclic: bool,
}

impl Scc {
    /// Member vertices in ascending id order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`: components have at least one member.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` when `vertex` is a member.
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    /// Returns `true` when the component contains a nonempty cycle: more than
    /// one member, or a single member with a self-loop.
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }
}

/// Partition of a graph's vertices into strongly connected components.
///
/// Components are stored in the order Tarjan's algorithm completes them,
/// which is a reverse topological order of the condensation: if any edge
/// leads from component `i` to component `j != i`, then `j < i`. Sinks of
/// the condensation therefore appear before everything that reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccDecomposition {
    components: Vec<Scc>,
    membership: Vec<ComponentId>,
    condensation: Vec<Vec<ComponentId>>,
}

impl SccDecomposition {
    /// Decomposes `graph`.
    ///
    /// Runs in O(V + E) with explicit work stacks, so vertex counts in the
    /// thousands never deepen the call stack. Roots are tried in ascending
    /// vertex order and successors in first-edge order, which makes the
    /// emitted order deterministic.
    #[instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count()))]
    #[allow(clippy::cast_possible_truncation)]
    pub fn compute(graph: &TransitionGraph) -> Self {
        const UNVISITED: usize = usize::MAX;

        let adj = graph.adjacency();
        let n = adj.len();

        let mut index_counter = 0usize;
        let mut stack: Vec<usize> = Vec::new();
        let mut on_stack = vec![false; n];
        let mut indices = vec![UNVISITED; n];
        let mut lowlinks = vec![UNVISITED; n];
        let mut membership = vec![ComponentId(u32::MAX); n];
        let mut components: Vec<Scc> = Vec::new();

        for root in 0..n {
            if indices[root] != UNVISITED {
                continue;
            }

            // (vertex, next successor slot)
            let mut work: Vec<(usize, usize)> = vec![(root, 0)];
            indices[root] = index_counter;
            lowlinks[root] = index_counter;
            index_counter += 1;
            stack.push(root);
            on_stack[root] = true;

            while let Some((v, slot)) = work.last_mut() {
                let v = *v;
                if let Some(&w) = adj[v].get(*slot) {
                    *slot += 1;
                    if indices[w] == UNVISITED {
                        indices[w] = index_counter;
                        lowlinks[w] = index_counter;
                        index_counter += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        work.push((w, 0));
                    } else if on_stack[w] {
                        lowlinks[v] = lowlinks[v].min(indices[w]);
                    }
                    continue;
                }

                if lowlinks[v] == indices[v] {
                    let id = ComponentId(components.len() as u32);
                    let mut members = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        membership[w] = id;
                        members.push(VertexId(w as u32));
                        if w == v {
                            break;
                        }
                    }
                    members.sort_unstable();
                    let cyclic = members.len() > 1 || adj[v].contains(&v);
                    components.push(Scc {
                        vertices: members,
                        cyclic,
                    });
                }

                let low = lowlinks[v];
                work.pop();
                if let Some(&(parent, _)) = work.last() {
                    lowlinks[parent] = lowlinks[parent].min(low);
                }
            }
        }

        let mut condensation: Vec<Vec<ComponentId>> = vec![Vec::new(); components.len()];
        for (v, succ) in adj.iter().enumerate() {
            let from = membership[v];
            for &w in succ {
                let to = membership[w];
                if to != from && !condensation[from.index()].contains(&to) {
                    condensation[from.index()].push(to);
                }
            }
        }
        for targets in &mut condensation {
            targets.sort_unstable();
        }

        debug!(components = components.len(), "tarjan complete");
        Self {
            components,
            membership,
            condensation,
        }
    }

    /// Components in reverse topological order of the condensation.
    pub fn components(&self) -> &[Scc] {
        &self.components
    }

    /// Iterates `(id, component)` in emission order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Scc)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i as u32), c))
    }

    /// Component by id.
    pub fn component(&self, id: ComponentId) -> Option<&Scc> {
        self.components.get(id.index())
    }

    /// Component containing `vertex`.
    pub fn component_of(&self, vertex: VertexId) -> Option<ComponentId> {
        self.membership.get(vertex.index()).copied()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` for the decomposition of an empty graph.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Size of the largest component, 0 for an empty graph.
    pub fn largest_size(&self) -> usize {
        self.components.iter().map(Scc::len).max().unwrap_or(0)
    }

    /// Distinct successor components of `id` in the condensation, ascending.
    pub fn condensation(&self, id: ComponentId) -> &[ComponentId] {
        self.condensation
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` when no edge leaves component `id`.
    pub fn is_sink(&self, id: ComponentId) -> bool {
        self.condensation(id).is_empty()
    }
}
