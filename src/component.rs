//! Largest-connected-component extraction.
//!
//! The spectral analyzer requires a connected graph: the Laplacian's null
//! space dimension equals the number of connected components, so a
//! disconnected graph trivially yields `λ2 = 0` and an empty bound.
//! Callers reduce to the largest component first and treat the result as
//! approximate when vertices were discarded.

use log::warn;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::graph::SatGraph;

/// The result of reducing a graph to its largest connected component.
#[derive(Debug, Clone)]
pub struct Reduction {
    /// The induced subgraph on the largest component, tags preserved.
    pub graph: SatGraph,
    /// Vertices outside the largest component that were dropped.
    pub discarded_vertices: usize,
}

impl Reduction {
    /// Whether the original graph was already fully connected.
    pub fn was_connected(&self) -> bool {
        self.discarded_vertices == 0
    }
}

/// Extracts the induced subgraph on the largest connected component.
///
/// Vertex and edge tags are preserved, as are parallel edges. Ties between
/// equally-sized components break deterministically (lowest union-find
/// label wins). Logs a warning when anything was discarded.
pub fn largest_component(graph: &SatGraph) -> Reduction {
    let inner = graph.inner();
    let n = inner.node_count();
    if n == 0 {
        return Reduction { graph: SatGraph::new(), discarded_vertices: 0 };
    }

    let mut uf = UnionFind::<usize>::new(n);
    for edge in inner.edge_references() {
        uf.union(edge.source().index(), edge.target().index());
    }
    let labels = uf.into_labeling();

    let mut sizes = vec![0usize; n];
    for &label in &labels {
        sizes[label] += 1;
    }
    let num_components = sizes.iter().filter(|&&s| s > 0).count();

    // Largest component; first-seen label wins ties.
    let best = labels
        .iter()
        .copied()
        .max_by_key(|&label| (sizes[label], std::cmp::Reverse(label)))
        .unwrap();

    let mut reduced = SatGraph::new();
    let mut mapping = vec![None; n];
    for v in graph.vertices() {
        if labels[v.index()] == best {
            mapping[v.index()] = Some(reduced.add_vertex(graph.vertex_kind(v)));
        }
    }
    for (a, b, kind) in graph.edges() {
        if let (Some(a), Some(b)) = (mapping[a.index()], mapping[b.index()]) {
            reduced.add_edge(a, b, kind);
        }
    }

    let discarded = n - reduced.num_vertices();
    if discarded > 0 {
        warn!(
            "graph has {} connected components; proceeding with largest ({} of {} vertices)",
            num_components,
            reduced.num_vertices(),
            n
        );
    }

    Reduction { graph: reduced, discarded_vertices: discarded }
}
