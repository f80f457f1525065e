//! Types flowing through the pipeline's queues.

use std::sync::Arc;

use cgraph_core::{Graph, Vertex};
use cgraph_util::ids::JobId;

/// How a finished payload gets back to its connection. A closure rather
/// than a trait object with a `write` method, since delivering one string
/// is the only capability a reply needs.
pub type Reply = Arc<dyn Fn(String) + Send + Sync>;

/// A committed graph, ready for the pipeline to run the fixed battery of
/// algorithms on. Immutable after construction: nothing downstream ever
/// mutates `graph`.
#[derive(Clone)]
pub struct Job {
	pub id: JobId,
	pub graph: Arc<Graph>,
	pub directed: bool,
	pub maxflow_s: Vertex,
	pub maxflow_t: Vertex,
	pub reply: Reply,
}

/// One copy of a job routed to a single algorithm worker. All four
/// algorithm queues carry this same shape; only the queue (and therefore
/// the worker) determines which algorithm runs on it.
#[derive(Clone)]
pub struct AlgoTask {
	pub job_id: JobId,
	pub graph: Arc<Graph>,
	pub maxflow_s: Vertex,
	pub maxflow_t: Vertex,
}

/// A finished payload, ready for the responder to hand to its connection.
pub struct Outgoing {
	pub reply: Reply,
	pub payload: String,
}
