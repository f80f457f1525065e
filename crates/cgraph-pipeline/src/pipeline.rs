//! Wires the seven active objects and seven queues into the staged
//! fan-out/fan-in compute graph, and exposes `submit`/`start`/`stop`.

use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
};

use cgraph_core::{Graph, Vertex};
use cgraph_queue::{ActiveObject, BoundedQueue};
use cgraph_util::ids::JobId;

use crate::{
	aggregate::PartialSet,
	format,
	job::{AlgoTask, Job, Outgoing},
	result::{AlgoKind, AlgoResult},
};

const Q_CAP_IN: usize = 128;
const Q_CAP_ALGO: usize = 128;
const Q_CAP_RESULTS: usize = 256;
const Q_CAP_OUT: usize = 256;

/// The compute pipeline. Holds its queues for the whole process lifetime;
/// [`Pipeline::start`]/[`Pipeline::stop`] spin its seven worker threads up
/// and down.
pub struct Pipeline {
	q_in: Arc<BoundedQueue<Job>>,
	q_mst: Arc<BoundedQueue<AlgoTask>>,
	q_scc: Arc<BoundedQueue<AlgoTask>>,
	q_ham: Arc<BoundedQueue<AlgoTask>>,
	q_flow: Arc<BoundedQueue<AlgoTask>>,
	q_results: Arc<BoundedQueue<AlgoResult>>,
	q_out: Arc<BoundedQueue<Outgoing>>,
	workers: Mutex<Option<Workers>>,
}

struct Workers {
	fanout: ActiveObject,
	mst: ActiveObject,
	scc: ActiveObject,
	ham: ActiveObject,
	flow: ActiveObject,
	aggregator: ActiveObject,
	responder: ActiveObject,
}

impl Pipeline {
	/// Build a pipeline with its queues allocated but no worker threads
	/// running yet. Call [`Pipeline::start`] before [`Pipeline::submit`].
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			q_in: Arc::new(BoundedQueue::new(Q_CAP_IN)),
			q_mst: Arc::new(BoundedQueue::new(Q_CAP_ALGO)),
			q_scc: Arc::new(BoundedQueue::new(Q_CAP_ALGO)),
			q_ham: Arc::new(BoundedQueue::new(Q_CAP_ALGO)),
			q_flow: Arc::new(BoundedQueue::new(Q_CAP_ALGO)),
			q_results: Arc::new(BoundedQueue::new(Q_CAP_RESULTS)),
			q_out: Arc::new(BoundedQueue::new(Q_CAP_OUT)),
			workers: Mutex::new(None),
		})
	}

	/// Submit a committed job. Returns `false` iff the pipeline has already
	/// been stopped.
	pub fn submit(&self, job: Job) -> bool {
		self.q_in.push(job)
	}

	/// Start all seven worker threads. Calling this twice without an
	/// intervening [`Pipeline::stop`] is a no-op.
	pub fn start(&self) {
		let mut guard = self.workers.lock().expect("pipeline workers lock poisoned");
		if guard.is_some() {
			return;
		}

		let pending: Arc<Mutex<HashMap<JobId, PartialSet>>> = Arc::new(Mutex::new(HashMap::new()));

		let responder = ActiveObject::spawn("cgraph-responder", Arc::clone(&self.q_out), move |out: Outgoing| {
			(out.reply)(out.payload);
		});

		let aggregator = {
			let q_out = Arc::clone(&self.q_out);
			let pending = Arc::clone(&pending);
			ActiveObject::spawn("cgraph-aggregator", Arc::clone(&self.q_results), move |res: AlgoResult| {
				let mut map = pending.lock().expect("pending jobs lock poisoned");
				match map.get_mut(&res.job_id) {
					Some(set) => {
						set.apply(res.kind, res.body);
						if set.is_complete() {
							let set = map.remove(&res.job_id).unwrap();
							drop(map);
							let (reply, payload) = set.finish();
							q_out.push(Outgoing { reply, payload });
						}
					}
					None => {
						tracing::warn!(job_id = %res.job_id, "result for unknown or already-finished job, dropping");
					}
				}
			})
		};

		let mst = Self::spawn_algo_worker("cgraph-algo-mst", Arc::clone(&self.q_mst), Arc::clone(&self.q_results), AlgoKind::Mst, |g, _, _| {
			format::mst_section(g)
		});
		let scc = Self::spawn_algo_worker("cgraph-algo-scc", Arc::clone(&self.q_scc), Arc::clone(&self.q_results), AlgoKind::Scc, |g, _, _| {
			format::components_section(g)
		});
		let ham = Self::spawn_algo_worker("cgraph-algo-hamilton", Arc::clone(&self.q_ham), Arc::clone(&self.q_results), AlgoKind::Hamilton, |g, _, _| {
			format::hamilton_section(g)
		});
		let flow = Self::spawn_algo_worker("cgraph-algo-maxflow", Arc::clone(&self.q_flow), Arc::clone(&self.q_results), AlgoKind::MaxFlow, format::maxflow_section);

		let fanout = {
			let q_mst = Arc::clone(&self.q_mst);
			let q_scc = Arc::clone(&self.q_scc);
			let q_ham = Arc::clone(&self.q_ham);
			let q_flow = Arc::clone(&self.q_flow);
			let pending = Arc::clone(&pending);
			ActiveObject::spawn("cgraph-fanout", Arc::clone(&self.q_in), move |job: Job| {
				let header = format::graph_header(&job.graph);
				let euler = format::euler_section(&job.graph);
				pending
					.lock()
					.expect("pending jobs lock poisoned")
					.insert(job.id, PartialSet::new(Arc::clone(&job.reply), header, euler, job.directed));

				let task = AlgoTask {
					job_id: job.id,
					graph: Arc::clone(&job.graph),
					maxflow_s: job.maxflow_s,
					maxflow_t: job.maxflow_t,
				};
				q_mst.push(task.clone());
				q_scc.push(task.clone());
				q_ham.push(task.clone());
				q_flow.push(task);
			})
		};

		*guard = Some(Workers {
			fanout,
			mst,
			scc,
			ham,
			flow,
			aggregator,
			responder,
		});
	}

	fn spawn_algo_worker(
		name: &'static str,
		q_task: Arc<BoundedQueue<AlgoTask>>,
		q_results: Arc<BoundedQueue<AlgoResult>>,
		kind: AlgoKind,
		render: fn(&Graph, Vertex, Vertex) -> String,
	) -> ActiveObject {
		ActiveObject::spawn(name, q_task, move |task: AlgoTask| {
			let body = render(&task.graph, task.maxflow_s, task.maxflow_t);
			q_results.push(AlgoResult {
				job_id: task.job_id,
				kind,
				body,
			});
		})
	}

	/// Stop every worker. Queues close in topological order so each active
	/// object drains what's already buffered before exiting; jobs whose
	/// results never completed are discarded.
	pub fn stop(&self) {
		let workers = self.workers.lock().expect("pipeline workers lock poisoned").take();
		let Some(workers) = workers else { return };

		self.q_in.close();
		workers.fanout.join();
		self.q_mst.close();
		self.q_scc.close();
		self.q_ham.close();
		self.q_flow.close();
		workers.mst.join();
		workers.scc.join();
		workers.ham.join();
		workers.flow.join();
		self.q_results.close();
		workers.aggregator.join();
		self.q_out.close();
		workers.responder.join();
	}
}
