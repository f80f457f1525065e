//! The per-client graph: adjacency-indexed, directed or undirected.

use std::fmt::Write as _;

use cgraph_util::fmt::fmt_weight;

/// A vertex identifier. The reference protocol uses dense `0..n` integers.
pub type Vertex = usize;

/// A logical edge `(from, to, weight)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
	/// The source vertex.
	pub from: Vertex,
	/// The destination vertex.
	pub to: Vertex,
	/// The edge weight (or capacity, for a residual graph).
	pub weight: f64,
}

impl Edge {
	/// Build a new edge.
	pub fn new(from: Vertex, to: Vertex, weight: f64) -> Self {
		Self { from, to, weight }
	}
}

/// A graph over `0..n`, directed or undirected, with weighted edges.
///
/// Undirected graphs store every arc twice (`u->v` and `v->u`), mirrored
/// with the same weight, so a single adjacency representation serves both
/// modes uniformly.
#[derive(Debug, Clone)]
pub struct Graph {
	n: usize,
	directed: bool,
	first_vertex: Option<Vertex>,
	adj: Vec<Vec<(Vertex, f64)>>,
}

impl Graph {
	/// Create an empty graph over `0..n` vertices.
	pub fn new(n: usize, directed: bool) -> Self {
		Self {
			n,
			directed,
			first_vertex: None,
			adj: vec![Vec::new(); n],
		}
	}

	/// The declared vertex count.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Whether this graph is directed.
	pub fn is_directed(&self) -> bool {
		self.directed
	}

	/// The first vertex ever mentioned by [`Graph::add_edge`], if any.
	pub fn first_vertex(&self) -> Option<Vertex> {
		self.first_vertex
	}

	/// Ensure vertex `v` has a bucket, growing past the declared `n` if a
	/// command references an out-of-range vertex. `n` itself is left
	/// untouched: it's the declared count, not a hard ceiling.
	fn ensure_capacity(&mut self, v: Vertex) {
		if v >= self.adj.len() {
			self.adj.resize(v + 1, Vec::new());
		}
	}

	fn note_first_vertex(&mut self, v: Vertex) {
		if self.first_vertex.is_none() {
			self.first_vertex = Some(v);
		}
	}

	fn has_arc(&self, u: Vertex, v: Vertex, w: f64) -> bool {
		self.adj
			.get(u)
			.map(|nbrs| nbrs.iter().any(|&(n, nw)| n == v && nw == w))
			.unwrap_or(false)
	}

	/// Add an edge `u -> v` with weight `w`. If this graph is undirected,
	/// the mirror arc `v -> u` is added too. A duplicate `(neighbor,
	/// weight)` pair for the same source is ignored.
	pub fn add_edge(&mut self, u: Vertex, v: Vertex, w: f64) {
		self.ensure_capacity(u.max(v));
		self.note_first_vertex(u);

		if !self.has_arc(u, v, w) {
			self.adj[u].push((v, w));
		}
		if !self.directed && u != v && !self.has_arc(v, u, w) {
			self.adj[v].push((u, w));
		}
	}

	/// Remove the edge `u -> v` with weight `w` (and its mirror, if
	/// undirected). A no-op if the edge isn't present.
	pub fn remove_edge(&mut self, u: Vertex, v: Vertex, w: f64) {
		if let Some(nbrs) = self.adj.get_mut(u) {
			nbrs.retain(|&(n, nw)| !(n == v && nw == w));
		}
		if !self.directed && u != v {
			if let Some(nbrs) = self.adj.get_mut(v) {
				nbrs.retain(|&(n, nw)| !(n == u && nw == w));
			}
		}
	}

	/// The `(neighbor, weight)` pairs reachable directly from `v`.
	pub fn neighbors(&self, v: Vertex) -> &[(Vertex, f64)] {
		self.adj.get(v).map(|n| n.as_slice()).unwrap_or(&[])
	}

	/// How many adjacency entries `v` has. For an undirected graph this is
	/// the usual notion of degree (self-loops count once, matching the
	/// "one neighbor entry" boundary rule).
	pub fn degree(&self, v: Vertex) -> usize {
		self.neighbors(v).len()
	}

	/// Out-degree (identical to [`Graph::degree`]; named separately because
	/// directed graphs care about the distinction).
	pub fn out_degree(&self, v: Vertex) -> usize {
		self.degree(v)
	}

	/// In-degree: how many other vertices hold an arc into `v`.
	pub fn in_degree(&self, v: Vertex) -> usize {
		self.adj
			.iter()
			.map(|nbrs| nbrs.iter().filter(|&&(n, _)| n == v).count())
			.sum()
	}

	/// Iterate over all vertices in `0..len`, where `len` is the declared
	/// count extended by any out-of-range vertex seen in an edge.
	pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
		0..self.adj.len()
	}

	/// Whether `v` has at least one adjacency entry (used to restrict
	/// connectivity/degree checks to "non-isolated vertices").
	pub fn is_isolated(&self, v: Vertex) -> bool {
		self.in_degree(v) == 0 && self.out_degree(v) == 0
	}

	/// `true` iff every non-isolated vertex has even degree (undirected
	/// Eulerian precondition).
	pub fn all_even_degree(&self) -> bool {
		self.vertices().all(|v| self.degree(v) % 2 == 0)
	}

	/// `true` iff the subgraph of non-isolated vertices is connected,
	/// ignoring direction.
	pub fn weakly_connected_nonzero(&self) -> bool {
		let nonzero: Vec<Vertex> = self.vertices().filter(|&v| !self.is_isolated(v)).collect();
		if nonzero.is_empty() {
			return true;
		}
		let mut undirected_adj: Vec<Vec<Vertex>> = vec![Vec::new(); self.adj.len()];
		for u in self.vertices() {
			for &(v, _) in self.neighbors(u) {
				undirected_adj[u].push(v);
				undirected_adj[v].push(u);
			}
		}
		let mut visited = vec![false; self.adj.len()];
		let mut stack = vec![nonzero[0]];
		visited[nonzero[0]] = true;
		while let Some(u) = stack.pop() {
			for &w in &undirected_adj[u] {
				if !visited[w] {
					visited[w] = true;
					stack.push(w);
				}
			}
		}
		nonzero.into_iter().all(|v| visited[v])
	}

	/// `true` iff this (undirected) graph is connected; an empty graph is
	/// vacuously connected.
	pub fn is_connected_undirected(&self) -> bool {
		if self.adj.is_empty() {
			return true;
		}
		let mut visited = vec![false; self.adj.len()];
		let mut stack = vec![0usize];
		visited[0] = true;
		let mut seen = 0usize;
		while let Some(u) = stack.pop() {
			seen += 1;
			for &(w, _) in self.neighbors(u) {
				if !visited[w] {
					visited[w] = true;
					stack.push(w);
				}
			}
		}
		seen == self.adj.len()
	}

	/// Render the adjacency dump used as the report header, e.g.
	/// `{\n 0 : [ (1, w=1) ]\n}`. `as_capacity` relabels the weight as a
	/// capacity for directed flow-style dumps.
	pub fn to_string_with_weights(&self, as_capacity: bool) -> String {
		let mut out = String::from("{\n");
		for v in self.vertices() {
			let _ = write!(out, " {v} : [ ");
			for &(nbr, w) in self.neighbors(v) {
				if self.directed && as_capacity {
					let _ = write!(out, "({nbr}, cap={}) ", fmt_weight(w));
				} else {
					let _ = write!(out, "({nbr}, w={}) ", fmt_weight(w));
				}
			}
			out.push_str("]\n");
		}
		out.push('}');
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn undirected_add_then_remove_is_a_no_op() {
		let mut g = Graph::new(3, false);
		g.add_edge(0, 1, 1.0);
		let before = g.clone();
		g.remove_edge(0, 1, 1.0);
		assert_eq!(g.degree(0), 0);
		assert_eq!(g.degree(1), 0);
		assert_ne!(before.degree(0), g.degree(0));
	}

	#[test]
	fn undirected_edges_are_mirrored() {
		let mut g = Graph::new(2, false);
		g.add_edge(0, 1, 2.0);
		assert_eq!(g.neighbors(0), &[(1, 2.0)]);
		assert_eq!(g.neighbors(1), &[(0, 2.0)]);
	}

	#[test]
	fn directed_edges_are_one_way() {
		let mut g = Graph::new(2, true);
		g.add_edge(0, 1, 2.0);
		assert_eq!(g.neighbors(0), &[(1, 2.0)]);
		assert!(g.neighbors(1).is_empty());
	}

	#[test]
	fn duplicate_neighbor_weight_pairs_are_rejected() {
		let mut g = Graph::new(2, true);
		g.add_edge(0, 1, 2.0);
		g.add_edge(0, 1, 2.0);
		assert_eq!(g.neighbors(0).len(), 1);
	}

	#[test]
	fn first_vertex_is_stable() {
		let mut g = Graph::new(3, true);
		g.add_edge(1, 2, 1.0);
		g.add_edge(0, 1, 1.0);
		assert_eq!(g.first_vertex(), Some(1));
	}

	#[test]
	fn single_vertex_no_edges_has_no_isolation_gap() {
		let g = Graph::new(1, false);
		assert!(g.is_connected_undirected());
		assert!(g.all_even_degree());
	}
}
