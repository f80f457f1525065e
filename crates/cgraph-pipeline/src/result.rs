//! The result one algorithm worker pushes back to the aggregator.

use cgraph_util::ids::JobId;

/// Which of the four parallel algorithm workers produced a [`AlgoResult`].
/// The Eulerian circuit isn't here: it's cheap enough to compute
/// synchronously during fan-out rather than earning its own queue/worker,
/// matching the four-queue pipeline this is grounded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgoKind {
	Mst,
	Scc,
	Hamilton,
	MaxFlow,
}

/// One algorithm's contribution to a job's payload. `body` is already the
/// exact section text (a success rendering or an `ERR|...` line) — the
/// aggregator only concatenates, it never re-derives formatting.
pub struct AlgoResult {
	pub job_id: JobId,
	pub kind: AlgoKind,
	pub body: String,
}
