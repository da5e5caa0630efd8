//! The encoded-graph model shared by all encoders.
//!
//! A [`SatGraph`] is an undirected graph whose vertices and edges carry
//! closed tag enumerations. The tags exist for two reasons: downstream
//! renderers map them to fixed colors, and tests distinguish encoder
//! phases by them. The graph itself is a thin wrapper around
//! [`petgraph::graph::UnGraph`]; all mutation goes through `SatGraph`
//! methods so the no-self-loop invariant holds everywhere.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// What a vertex stands for in the originating formula.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexKind {
    /// One vertex per formula variable.
    Variable,
    /// One vertex per polarized literal (positive and negative side).
    Literal,
    /// One vertex per clause.
    Clause,
}

impl VertexKind {
    /// Fixed render color for this vertex kind.
    ///
    /// Purely a rendering discriminant: variable/literal vertices are
    /// "blue", clause vertices are "orange".
    pub fn color(self) -> &'static str {
        match self {
            VertexKind::Variable | VertexKind::Literal => "blue",
            VertexKind::Clause => "orange",
        }
    }
}

/// Why an edge exists. The meaning is encoder-specific.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EdgeKind {
    /// Clause-to-literal membership (literal-clause encoding).
    Structural,
    /// Link between a variable's positive and negative literal vertices.
    PolarityLink,
    /// Unnegated occurrence of a variable in a clause (polar encoding).
    PositiveOccurrence,
    /// Negated occurrence of a variable in a clause (polar encoding).
    NegativeOccurrence,
    /// Two variables share a clause (incidence encoding).
    CoOccurrence,
}

impl EdgeKind {
    /// Fixed render color for this edge kind.
    pub fn color(self) -> &'static str {
        match self {
            EdgeKind::Structural | EdgeKind::CoOccurrence => "black",
            EdgeKind::PolarityLink => "blue",
            EdgeKind::PositiveOccurrence => "green",
            EdgeKind::NegativeOccurrence => "red",
        }
    }
}

/// An undirected, tagged graph encoding of a SAT instance.
///
/// Multi-edges are permitted (two clauses sharing a literal produce two
/// parallel clause-literal edges); self-loops are not.
#[derive(Debug, Clone, Default)]
pub struct SatGraph {
    graph: UnGraph<VertexKind, EdgeKind>,
}

impl SatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, kind: VertexKind) -> NodeIndex {
        self.graph.add_node(kind)
    }

    /// Adds an edge between two distinct vertices.
    ///
    /// # Panics
    ///
    /// Panics on a self-loop; no encoder ever produces one.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, kind: EdgeKind) -> EdgeIndex {
        assert_ne!(a, b, "self-loops are not allowed");
        self.graph.add_edge(a, b, kind)
    }

    /// Adds an edge unless one already connects the two vertices.
    ///
    /// Lookup-or-create semantics for the incidence encoding: repeated
    /// co-occurrence across clauses must not create parallel edges.
    pub fn ensure_edge(&mut self, a: NodeIndex, b: NodeIndex, kind: EdgeKind) -> EdgeIndex {
        match self.graph.find_edge(a, b) {
            Some(e) => e,
            None => self.add_edge(a, b, kind),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertex_kind(&self, v: NodeIndex) -> VertexKind {
        self.graph[v]
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Edges as `(endpoint, endpoint, kind)` triples.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, EdgeKind)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target(), *e.weight()))
    }

    /// Number of incident edges, counting multiplicity.
    pub fn degree(&self, v: NodeIndex) -> usize {
        self.graph.edges(v).count()
    }

    pub fn count_kind(&self, kind: VertexKind) -> usize {
        self.graph.node_indices().filter(|&v| self.graph[v] == kind).count()
    }

    pub(crate) fn inner(&self) -> &UnGraph<VertexKind, EdgeKind> {
        &self.graph
    }
}
