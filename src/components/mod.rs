//! UI components.

pub mod roadmap_graph;
