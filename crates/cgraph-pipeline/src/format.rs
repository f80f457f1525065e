//! Per-section text rendering. Pure formatting, no I/O: each function takes
//! a snapshot graph (plus parameters where needed) and returns the exact
//! text that lands in one `===== ... =====` section of the final payload.

use cgraph_core::{euler, hamilton, maxflow, mst, scc, Graph, Vertex};
use cgraph_util::fmt::fmt_weight;

/// `===== Graph =====` section body: the adjacency dump.
pub fn graph_header(g: &Graph) -> String {
	g.to_string_with_weights(false)
}

/// `===== Euler =====` section body.
pub fn euler_section(g: &Graph) -> String {
	let circuit = euler::euler_circuit(g);
	if circuit.is_empty() {
		"ERR|Graph is not Eulerian".to_string()
	} else {
		circuit.iter().map(Vertex::to_string).collect::<Vec<_>>().join(" ")
	}
}

/// `===== MST (Prim) | Directed Arborescence =====` section body.
pub fn mst_section(g: &Graph) -> String {
	match mst::minimum_spanning(g) {
		None => "ERR|No spanning tree/arborescence found from the given root".to_string(),
		Some(edges) => {
			let mut out = String::from("{\n");
			for e in edges {
				out.push_str(&format!("({}, {}, weight: {})\n", e.from, e.to, fmt_weight(e.weight)));
			}
			out.push('}');
			out
		}
	}
}

/// `===== Connected Components | Strongly Connected Components =====`
/// section body.
pub fn components_section(g: &Graph) -> String {
	let comps = scc::components(g);
	let mut out = String::from("{\n");
	for comp in comps {
		out.push_str("  { ");
		for v in comp {
			out.push_str(&format!("{v} "));
		}
		out.push_str("}\n");
	}
	out.push('}');
	out
}

/// `===== Hamiltonian =====` section body.
pub fn hamilton_section(g: &Graph) -> String {
	match hamilton::hamilton_cycle(g) {
		None => "ERR|No Cycle was detected".to_string(),
		Some(path) => {
			let mut out = String::from("{");
			for v in path {
				out.push_str(&format!("{v} "));
			}
			out.push('}');
			out
		}
	}
}

/// `===== Max-Flow =====` section body.
pub fn maxflow_section(g: &Graph, s: Vertex, t: Vertex) -> String {
	fmt_weight(maxflow::max_flow(g, s, t))
}

/// The label for the MST/arborescence section header, which depends on
/// whether the committed graph was directed.
pub fn mst_label(directed: bool) -> &'static str {
	if directed {
		"Directed Arborescence"
	} else {
		"MST (Prim)"
	}
}

/// The label for the components section header, same rule as [`mst_label`].
pub fn components_label(directed: bool) -> &'static str {
	if directed {
		"Strongly Connected Components"
	} else {
		"Connected Components"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn euler_section_reports_the_failure_message() {
		let mut g = Graph::new(3, false);
		g.add_edge(0, 1, 1.0);
		assert_eq!(euler_section(&g), "ERR|Graph is not Eulerian");
	}

	#[test]
	fn euler_section_renders_a_space_separated_sequence() {
		let mut g = Graph::new(3, false);
		g.add_edge(0, 1, 1.0);
		g.add_edge(1, 2, 1.0);
		g.add_edge(2, 0, 1.0);
		let section = euler_section(&g);
		assert!(!section.contains('{'));
		assert_eq!(section.split_whitespace().count(), 4);
	}

	#[test]
	fn mst_section_lists_one_line_per_edge() {
		let mut g = Graph::new(3, false);
		g.add_edge(0, 1, 1.0);
		g.add_edge(1, 2, 2.0);
		let section = mst_section(&g);
		assert!(section.starts_with("{\n"));
		assert!(section.contains("weight: 1"));
		assert!(section.contains("weight: 2"));
	}

	#[test]
	fn hamilton_section_reports_the_failure_message() {
		let mut g = Graph::new(5, false);
		for i in 0..4 {
			g.add_edge(i, i + 1, 1.0);
		}
		assert_eq!(hamilton_section(&g), "ERR|No Cycle was detected");
	}

	#[test]
	fn labels_switch_on_directedness() {
		assert_eq!(mst_label(false), "MST (Prim)");
		assert_eq!(mst_label(true), "Directed Arborescence");
		assert_eq!(components_label(false), "Connected Components");
		assert_eq!(components_label(true), "Strongly Connected Components");
	}
}
