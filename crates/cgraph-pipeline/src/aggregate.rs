//! The aggregator's per-job bookkeeping: collect four partial results, then
//! render and forward exactly one payload per job.

use crate::{
	format::{components_label, mst_label},
	job::Reply,
	result::AlgoKind,
};

/// Tracks the in-flight state of one committed job until all four
/// algorithm workers have reported in.
pub struct PartialSet {
	reply: Reply,
	header: String,
	euler: String,
	directed: bool,
	mst: Option<String>,
	scc: Option<String>,
	hamilton: Option<String>,
	maxflow: Option<String>,
	count: usize,
}

impl PartialSet {
	/// Start tracking a job. `header` is the `Graph` section body, `euler`
	/// the `Euler` section body — both already computed at fan-out time.
	pub fn new(reply: Reply, header: String, euler: String, directed: bool) -> Self {
		Self {
			reply,
			header,
			euler,
			directed,
			mst: None,
			scc: None,
			hamilton: None,
			maxflow: None,
			count: 0,
		}
	}

	/// Record one algorithm's result. Applying the same kind twice is a
	/// bug in the caller, but harmlessly overwrites rather than double
	/// counting (so a crash-free server never wedges a job open forever).
	pub fn apply(&mut self, kind: AlgoKind, body: String) {
		let slot = match kind {
			AlgoKind::Mst => &mut self.mst,
			AlgoKind::Scc => &mut self.scc,
			AlgoKind::Hamilton => &mut self.hamilton,
			AlgoKind::MaxFlow => &mut self.maxflow,
		};
		if slot.is_none() {
			self.count += 1;
		}
		*slot = Some(body);
	}

	/// Whether every one of the four algorithm results has arrived.
	pub fn is_complete(&self) -> bool {
		self.count == 4
	}

	/// Render the full payload and hand back the reply sink to deliver it
	/// to. Panics if called before [`PartialSet::is_complete`].
	pub fn finish(self) -> (Reply, String) {
		assert!(self.is_complete(), "finish() called on an incomplete job");
		let payload = format!(
			"===== Graph =====\n{}\n\n===== Euler =====\n{}\n===== {} =====\n{}\n===== {} =====\n{}\n===== Hamiltonian =====\n{}\n===== Max-Flow =====\n{}\n===== DONE =====\n",
			self.header,
			self.euler,
			mst_label(self.directed),
			self.mst.unwrap(),
			components_label(self.directed),
			self.scc.unwrap(),
			self.hamilton.unwrap(),
			self.maxflow.unwrap(),
		);
		(self.reply, payload)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::*;

	#[test]
	fn completes_after_four_distinct_kinds() {
		let received = Arc::new(Mutex::new(None));
		let received2 = Arc::clone(&received);
		let reply: Reply = Arc::new(move |payload| *received2.lock().unwrap() = Some(payload));

		let mut set = PartialSet::new(reply, "hdr".into(), "1 2 3 1".into(), false);
		assert!(!set.is_complete());
		set.apply(AlgoKind::Mst, "mst-body".into());
		set.apply(AlgoKind::Scc, "scc-body".into());
		set.apply(AlgoKind::Hamilton, "ham-body".into());
		assert!(!set.is_complete());
		set.apply(AlgoKind::MaxFlow, "flow-body".into());
		assert!(set.is_complete());

		let (reply, payload) = set.finish();
		reply("ignored, we already have `payload`".into());
		assert!(payload.contains("===== Graph =====\nhdr"));
		assert!(payload.contains("===== Euler =====\n1 2 3 1"));
		assert!(payload.contains("===== MST (Prim) =====\nmst-body"));
		assert!(payload.contains("===== Connected Components =====\nscc-body"));
		assert!(payload.contains("===== Hamiltonian =====\nham-body"));
		assert!(payload.contains("===== Max-Flow =====\nflow-body"));
		assert!(payload.ends_with("===== DONE =====\n"));
	}

	#[test]
	fn directed_jobs_use_the_directed_labels() {
		let reply: Reply = Arc::new(|_| {});
		let mut set = PartialSet::new(reply, String::new(), String::new(), true);
		set.apply(AlgoKind::Mst, String::new());
		set.apply(AlgoKind::Scc, String::new());
		set.apply(AlgoKind::Hamilton, String::new());
		set.apply(AlgoKind::MaxFlow, String::new());
		let (_, payload) = set.finish();
		assert!(payload.contains("===== Directed Arborescence ====="));
		assert!(payload.contains("===== Strongly Connected Components ====="));
	}
}
