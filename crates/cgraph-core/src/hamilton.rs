//! Hamiltonian cycle search via bounded backtracking DFS.

use crate::graph::{Graph, Vertex};

/// Search for a Hamiltonian cycle: a vertex sequence visiting every vertex
/// exactly once, with an edge from the last vertex back to the first.
/// Starts from [`Graph::first_vertex`] (or vertex `0`). On success the
/// returned path has length `n+1` with `path[0] == path[n]`. Returns `None`
/// if the search space is exhausted without finding one.
pub fn hamilton_cycle(g: &Graph) -> Option<Vec<Vertex>> {
	let n = g.vertices().count();
	if n == 0 {
		return None;
	}
	let start = g.first_vertex().unwrap_or(0);

	let mut visited = vec![false; n];
	visited[start] = true;
	let mut path = vec![start];

	if extend(g, n, &mut visited, &mut path) {
		path.push(start);
		Some(path)
	} else {
		None
	}
}

fn extend(g: &Graph, n: usize, visited: &mut [bool], path: &mut Vec<Vertex>) -> bool {
	if path.len() == n {
		let last = *path.last().unwrap();
		let start = path[0];
		return g.neighbors(last).iter().any(|&(v, _)| v == start);
	}

	let last = *path.last().unwrap();
	let candidates: Vec<Vertex> = g.neighbors(last).iter().map(|&(v, _)| v).collect();
	for v in candidates {
		if !visited[v] {
			visited[v] = true;
			path.push(v);
			if extend(g, n, visited, path) {
				return true;
			}
			path.pop();
			visited[v] = false;
		}
	}
	false
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_graph_has_no_cycle() {
		let g = Graph::new(0, false);
		assert!(hamilton_cycle(&g).is_none());
	}

	#[test]
	fn undirected_triangle_closes_back_to_start() {
		let mut g = Graph::new(3, false);
		g.add_edge(0, 1, 1.0);
		g.add_edge(1, 2, 1.0);
		g.add_edge(2, 0, 1.0);
		let cycle = hamilton_cycle(&g).expect("triangle is Hamiltonian");
		assert_eq!(cycle.len(), 4);
		assert_eq!(cycle.first(), cycle.last());
	}

	#[test]
	fn path_of_five_vertices_has_no_cycle() {
		let mut g = Graph::new(5, false);
		for i in 0..4 {
			g.add_edge(i, i + 1, 1.0);
		}
		assert!(hamilton_cycle(&g).is_none());
	}

	#[test]
	fn k5_complete_graph_is_hamiltonian() {
		let mut g = Graph::new(5, false);
		for u in 0..5 {
			for v in (u + 1)..5 {
				g.add_edge(u, v, 1.0);
			}
		}
		let cycle = hamilton_cycle(&g).expect("complete graph is Hamiltonian");
		assert_eq!(cycle.len(), 6);
		assert_eq!(cycle.first(), cycle.last());
		let mut sorted = cycle[..5].to_vec();
		sorted.sort_unstable();
		assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
	}

	#[test]
	fn directed_cycle_is_hamiltonian_in_one_direction_only() {
		let mut g = Graph::new(4, true);
		g.add_edge(0, 1, 1.0);
		g.add_edge(1, 2, 1.0);
		g.add_edge(2, 3, 1.0);
		g.add_edge(3, 0, 1.0);
		let cycle = hamilton_cycle(&g).expect("directed cycle is Hamiltonian");
		assert_eq!(cycle, vec![0, 1, 2, 3, 0]);
	}
}
