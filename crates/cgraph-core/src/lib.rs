//! The adjacency-indexed graph and the five algorithms the pipeline runs on
//! it: Eulerian circuit, Prim MST / minimum arborescence, Kosaraju SCC /
//! undirected components, Edmonds-Karp max-flow, and Hamiltonian cycle.

mod graph;

pub mod euler;
pub mod hamilton;
pub mod maxflow;
pub mod mst;
pub mod scc;

pub use graph::{Edge, Graph, Vertex};
