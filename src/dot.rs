//! Encoded graph to DOT (Graphviz) conversion.
//!
//! Renders a [`SatGraph`] as an undirected DOT graph. Vertices are filled
//! with their tag color ("blue" for variable/literal vertices, "orange"
//! for clause vertices) and edges are drawn in their edge-tag color, so
//! an external renderer gets a consistent visual encoding without knowing
//! anything about the formula.
//!
//! ```
//! use sat_spectra::cnf::Cnf;
//! use sat_spectra::encode::{EncodeOptions, Encoding};
//! use sat_spectra::dot::to_dot;
//!
//! let cnf = Cnf::new(2, vec![vec![1, 2], vec![-1, 2]]).unwrap();
//! let graph = Encoding::PolarVar.encode(&cnf, &EncodeOptions::default());
//! let dot = to_dot(&graph).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use crate::graph::{SatGraph, VertexKind};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for variable and literal vertices (default: "circle")
    pub vertex_shape: &'static str,
    /// Shape for clause vertices (default: "box")
    pub clause_shape: &'static str,
    /// Whether to label vertices with their kind and index (default: true)
    pub labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self { vertex_shape: "circle", clause_shape: "box", labels: true }
    }
}

/// Converts an encoded graph to DOT format with default settings.
pub fn to_dot(graph: &SatGraph) -> Result<String, std::fmt::Error> {
    to_dot_with_config(graph, &DotConfig::default())
}

/// Converts an encoded graph to DOT format with custom configuration.
pub fn to_dot_with_config(graph: &SatGraph, config: &DotConfig) -> Result<String, std::fmt::Error> {
    use std::fmt::Write as _;

    let mut dot = String::new();
    writeln!(dot, "graph {{")?;
    writeln!(dot, "node [style=filled];")?;

    for v in graph.vertices() {
        let kind = graph.vertex_kind(v);
        let shape = match kind {
            VertexKind::Clause => config.clause_shape,
            _ => config.vertex_shape,
        };
        let label = if config.labels {
            let prefix = match kind {
                VertexKind::Variable => "v",
                VertexKind::Literal => "l",
                VertexKind::Clause => "c",
            };
            format!("{}{}", prefix, v.index())
        } else {
            String::new()
        };
        writeln!(
            dot,
            "{} [shape={}, fillcolor={}, label=\"{}\"];",
            v.index(),
            shape,
            kind.color(),
            label
        )?;
    }

    for (a, b, kind) in graph.edges() {
        writeln!(dot, "{} -- {} [color={}];", a.index(), b.index(), kind.color())?;
    }

    writeln!(dot, "}}")?;
    Ok(dot)
}
