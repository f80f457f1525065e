//! Per-connection and process-wide shared state.

use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicBool, AtomicUsize},
		Arc, Condvar, Mutex,
	},
};

use cgraph_core::{Graph, Vertex};
use cgraph_pipeline::Pipeline;
use cgraph_util::ids::JobIdGenerator;
use mio::{
	net::{TcpListener, TcpStream},
	Poll, Token,
};

/// A single client connection's mutable state: the graph it's building up
/// with `init`/`edge`, the pending `maxflow` source/sink, and whatever
/// bytes have arrived but don't yet form a complete line.
#[derive(Default)]
pub struct ConnState {
	pub graph: Option<Graph>,
	pub vertex_count: usize,
	pub maxflow_s: Option<Vertex>,
	pub maxflow_t: Option<Vertex>,
	pub inbuf: Vec<u8>,
}

/// One accepted connection: its socket, shared so the pipeline's responder
/// can write a finished payload back without coordinating with whichever
/// worker currently holds the leadership token, plus its protocol state.
pub struct Connection {
	pub stream: Arc<Mutex<TcpStream>>,
	pub state: ConnState,
}

/// Everything the leader-follower workers share: the registry, the
/// listener, per-connection state, the leadership token, and a handle to
/// the compute pipeline every `commit` is submitted to.
pub struct SharedState {
	pub poll: Mutex<Poll>,
	pub listener: Mutex<TcpListener>,
	pub listener_token: Token,
	pub connections: Mutex<HashMap<Token, Connection>>,
	pub next_token: AtomicUsize,
	pub leader_held: Mutex<bool>,
	pub leader_cv: Condvar,
	pub stop: AtomicBool,
	pub pipeline: Arc<Pipeline>,
	pub ids: JobIdGenerator,
}

impl SharedState {
	/// Allocate a fresh connection token, distinct from the listener's own
	/// and from every token handed out before it.
	pub fn next_token(&self) -> Token {
		Token(self.next_token.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
	}
}
