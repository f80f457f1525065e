//! Minimum spanning tree (undirected, Prim) and minimum spanning
//! arborescence (directed, Chu-Liu/Edmonds), both rooted at the graph's
//! first-seen vertex.

use crate::graph::{Edge, Graph, Vertex};

/// Find a minimum spanning tree (undirected) or minimum spanning
/// arborescence (directed), rooted at [`Graph::first_vertex`] (or vertex `0`
/// if the graph has no edges at all).
///
/// Undirected: Prim grows from the root and simply stops when nothing more
/// is reachable, returning the edges of whatever component the root sits
/// in — a disconnected graph yields a partial tree, never `None`.
///
/// Directed: an arborescence needs every non-isolated vertex reachable from
/// the root, so `None` means some vertex genuinely isn't.
pub fn minimum_spanning(g: &Graph) -> Option<Vec<Edge>> {
	if g.is_directed() {
		minimum_arborescence(g)
	} else {
		prim_mst(g)
	}
}

fn prim_mst(g: &Graph) -> Option<Vec<Edge>> {
	let n = g.vertices().count();
	if n == 0 {
		return Some(Vec::new());
	}
	let root = g.first_vertex().unwrap_or(0);

	let mut in_tree = vec![false; n];
	let mut best = vec![f64::INFINITY; n];
	let mut parent: Vec<Option<Vertex>> = vec![None; n];
	best[root] = 0.0;

	let mut edges = Vec::new();
	for _ in 0..n {
		// Only vertices still reachable (finite `best`) can grow the tree;
		// once those run out the rest of the graph is a different
		// component, and Prim simply stops rather than erroring.
		let Some(u) = (0..n)
			.filter(|&v| !in_tree[v] && best[v].is_finite())
			.min_by(|&a, &b| best[a].partial_cmp(&best[b]).unwrap())
		else {
			break;
		};
		in_tree[u] = true;
		if let Some(p) = parent[u] {
			edges.push(Edge::new(p, u, best[u]));
		}
		for &(w, wt) in g.neighbors(u) {
			if !in_tree[w] && wt < best[w] {
				best[w] = wt;
				parent[w] = Some(u);
			}
		}
	}

	Some(edges)
}

fn minimum_arborescence(g: &Graph) -> Option<Vec<Edge>> {
	let n = g.vertices().count();
	if n == 0 {
		return Some(Vec::new());
	}
	let root = g.first_vertex().unwrap_or(0);

	// Restrict to the root plus every non-isolated vertex; isolated
	// vertices need no incoming edge to be spanned.
	let active: Vec<Vertex> = (0..n).filter(|&v| v == root || !g.is_isolated(v)).collect();
	if active.len() <= 1 {
		return Some(Vec::new());
	}
	let local_of: Vec<Option<usize>> = {
		let mut map = vec![None; n];
		for (i, &v) in active.iter().enumerate() {
			map[v] = Some(i);
		}
		map
	};
	let local_root = local_of[root].unwrap();

	let mut edges = Vec::new();
	for &u in &active {
		for &(v, w) in g.neighbors(u) {
			if let Some(lv) = local_of[v] {
				if lv != local_of[u].unwrap() {
					edges.push((local_of[u].unwrap(), lv, w));
				}
			}
		}
	}

	let chosen = edmonds(local_root, active.len(), &edges)?;
	Some(
		chosen
			.into_iter()
			.map(|i| {
				let (u, v, w) = edges[i];
				Edge::new(active[u], active[v], w)
			})
			.collect(),
	)
}

/// Chu-Liu/Edmonds minimum arborescence over a local `0..n` vertex space.
/// `edges` is `(from, to, weight)`. Returns indices into `edges` forming the
/// arborescence, or `None` if some vertex other than `root` is unreachable.
fn edmonds(root: usize, n: usize, edges: &[(usize, usize, f64)]) -> Option<Vec<usize>> {
	let orig_of: Vec<usize> = (0..edges.len()).collect();
	edmonds_rec(root, n, edges.to_vec(), orig_of)
}

fn edmonds_rec(root: usize, n: usize, edges: Vec<(usize, usize, f64)>, orig_of: Vec<usize>) -> Option<Vec<usize>> {
	let mut best: Vec<Option<usize>> = vec![None; n];
	for (i, &(u, v, w)) in edges.iter().enumerate() {
		if u == v || v == root {
			continue;
		}
		let better = match best[v] {
			Some(j) => w < edges[j].2,
			None => true,
		};
		if better {
			best[v] = Some(i);
		}
	}
	for v in 0..n {
		if v != root && best[v].is_none() {
			return None;
		}
	}

	// A cycle exists iff following best[]-pointers from some vertex loops
	// back on itself before reaching the root.
	let mut visited = vec![0u8; n];
	let mut cycle: Option<Vec<usize>> = None;
	for start in 0..n {
		if visited[start] != 0 || start == root {
			continue;
		}
		let mut path = Vec::new();
		let mut v = start;
		while v != root && visited[v] == 0 {
			visited[v] = 1;
			path.push(v);
			v = edges[best[v].unwrap()].0;
		}
		if v != root && visited[v] == 1 {
			let pos = path.iter().position(|&p| p == v).unwrap();
			cycle = Some(path[pos..].to_vec());
		}
		for &p in &path {
			visited[p] = 2;
		}
		if cycle.is_some() {
			break;
		}
	}

	let Some(cycle) = cycle else {
		return Some((0..n).filter(|&v| v != root).map(|v| orig_of[best[v].unwrap()]).collect());
	};

	let in_cycle: Vec<bool> = (0..n).map(|v| cycle.contains(&v)).collect();

	// Contract the cycle into one super-node, keeping every other vertex's id.
	let mut new_id = vec![0usize; n];
	let mut next = 0usize;
	let mut super_node = 0usize;
	let mut cycle_seen = false;
	for v in 0..n {
		if in_cycle[v] {
			if !cycle_seen {
				super_node = next;
				next += 1;
				cycle_seen = true;
			}
			new_id[v] = super_node;
		} else {
			new_id[v] = next;
			next += 1;
		}
	}
	let new_n = next;
	let new_root = new_id[root];

	let mut new_edges = Vec::new();
	let mut new_orig = Vec::new();
	let mut entry_target = Vec::new();
	for (i, &(u, v, w)) in edges.iter().enumerate() {
		if u == v || (in_cycle[u] && in_cycle[v]) {
			continue;
		}
		let weight = if in_cycle[v] { w - edges[best[v].unwrap()].2 } else { w };
		new_edges.push((new_id[u], new_id[v], weight));
		new_orig.push(orig_of[i]);
		entry_target.push(if in_cycle[v] { v } else { usize::MAX });
	}

	let sub = edmonds_rec(new_root, new_n, new_edges, new_orig.clone())?;

	let mut broken = None;
	for (j, &orig_idx) in new_orig.iter().enumerate() {
		if entry_target[j] != usize::MAX && sub.contains(&orig_idx) {
			broken = Some(entry_target[j]);
			break;
		}
	}

	let mut result = sub;
	for &v in &cycle {
		if Some(v) != broken {
			result.push(orig_of[best[v].unwrap()]);
		}
	}
	Some(result)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_graph_has_empty_spanning_structure() {
		let g = Graph::new(0, false);
		assert_eq!(minimum_spanning(&g), Some(Vec::new()));
	}

	#[test]
	fn undirected_triangle_picks_two_cheapest_edges() {
		let mut g = Graph::new(3, false);
		g.add_edge(0, 1, 1.0);
		g.add_edge(1, 2, 2.0);
		g.add_edge(0, 2, 5.0);
		let tree = minimum_spanning(&g).expect("connected graph has an MST");
		assert_eq!(tree.len(), 2);
		let total: f64 = tree.iter().map(|e| e.weight).sum();
		assert_eq!(total, 3.0);
	}

	#[test]
	fn disconnected_undirected_graph_returns_the_roots_component_only() {
		// Two triangles, no edges between them: Prim from a vertex in the
		// first should return that triangle's spanning tree (2 edges) and
		// say nothing about the second component.
		let mut g = Graph::new(6, false);
		g.add_edge(0, 1, 1.0);
		g.add_edge(1, 2, 1.0);
		g.add_edge(2, 0, 1.0);
		g.add_edge(3, 4, 1.0);
		g.add_edge(4, 5, 1.0);
		g.add_edge(5, 3, 1.0);
		let tree = minimum_spanning(&g).expect("undirected Prim never fails");
		assert_eq!(tree.len(), 2);
		for e in &tree {
			assert!(e.from < 3 && e.to < 3);
		}
	}

	#[test]
	fn directed_tree_is_its_own_arborescence() {
		let mut g = Graph::new(3, true);
		g.add_edge(0, 1, 1.0);
		g.add_edge(0, 2, 1.0);
		let tree = minimum_spanning(&g).expect("reachable from root");
		assert_eq!(tree.len(), 2);
	}

	#[test]
	fn directed_graph_with_unreachable_vertex_has_no_arborescence() {
		let mut g = Graph::new(4, true);
		g.add_edge(0, 1, 1.0);
		g.add_edge(2, 3, 1.0);
		assert!(minimum_spanning(&g).is_none());
	}

	#[test]
	fn directed_graph_with_a_cycle_contracts_correctly() {
		// root 0 -> 1 -> 2 -> 1 (cycle 1<->2), plus a cheaper direct entry
		// into 2 that should break the cycle: the optimal arborescence is
		// 0->2 (2.0) and 2->1 (1.0), total 3.0.
		let mut g = Graph::new(3, true);
		g.add_edge(0, 1, 10.0);
		g.add_edge(1, 2, 1.0);
		g.add_edge(2, 1, 1.0);
		g.add_edge(0, 2, 2.0);
		let tree = minimum_spanning(&g).expect("still reachable despite the cycle");
		assert_eq!(tree.len(), 2);
		let total: f64 = tree.iter().map(|e| e.weight).sum();
		assert_eq!(total, 3.0);
	}
}
