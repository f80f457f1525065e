//! `cgraphd`: a line-protocol server that runs a fixed battery of graph
//! algorithms over whatever graph a client builds up with `init`/`edge`
//! and hands off with `commit`.
//!
//! Connections are multiplexed by a small pool of leader-follower worker
//! threads (see [`mux`]) rather than one thread per connection; committed
//! jobs run on [`cgraph_pipeline::Pipeline`]'s own fixed worker threads, so
//! the two thread pools never block on each other.

pub mod cli;
pub mod config;
mod mux;
mod state;

use std::{
	collections::HashMap,
	io,
	net::SocketAddr,
	sync::{
		atomic::{AtomicBool, AtomicUsize, Ordering},
		Arc, Condvar, Mutex,
	},
	thread::{self, JoinHandle},
};

use cgraph_pipeline::Pipeline;
use cgraph_util::ids::JobIdGenerator;
use mio::{Interest, Poll, Token};
use socket2::{Domain, Protocol, Socket, Type};
use tracing::info;

use crate::state::SharedState;

const LISTENER_TOKEN: Token = Token(0);

/// Bind a listening socket with `SO_REUSEADDR` set, so a restarted server
/// doesn't have to wait out `TIME_WAIT` on the old listener.
fn bind_listener(addr: &str) -> io::Result<mio::net::TcpListener> {
	let sockaddr: SocketAddr = addr.parse().map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid address: {addr}")))?;
	let domain = if sockaddr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };

	let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
	socket.set_reuse_address(true)?;
	socket.bind(&sockaddr.into())?;
	socket.listen(1024)?;
	socket.set_nonblocking(true)?;

	let std_listener: std::net::TcpListener = socket.into();
	Ok(mio::net::TcpListener::from_std(std_listener))
}

/// A running server. Dropping this without calling [`ServerHandle::shutdown`]
/// leaves its threads running — always call `shutdown` when done with it.
pub struct ServerHandle {
	pub local_addr: SocketAddr,
	shared: Arc<SharedState>,
	pipeline: Arc<Pipeline>,
	workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
	/// Signal every worker thread to stop, join them, then stop the
	/// pipeline's own workers. Blocks until everything has wound down.
	pub fn shutdown(mut self) {
		self.shared.stop.store(true, Ordering::SeqCst);
		self.shared.leader_cv.notify_all();
		for worker in self.workers.drain(..) {
			let _ = worker.join();
		}
		self.pipeline.stop();
	}
}

/// Bind, register, and spawn the leader-follower worker pool, but don't
/// block — returns a [`ServerHandle`] the caller drives shutdown with.
pub fn serve(addr: &str, worker_threads: usize) -> io::Result<ServerHandle> {
	let mut listener = bind_listener(addr)?;
	let local_addr = listener.local_addr()?;

	let poll = Poll::new()?;
	poll.registry().register(&mut listener, LISTENER_TOKEN, Interest::READABLE)?;

	let pipeline = Pipeline::new();
	pipeline.start();

	let shared = Arc::new(SharedState {
		poll: Mutex::new(poll),
		listener: Mutex::new(listener),
		listener_token: LISTENER_TOKEN,
		connections: Mutex::new(HashMap::new()),
		next_token: AtomicUsize::new(1),
		leader_held: Mutex::new(false),
		leader_cv: Condvar::new(),
		stop: AtomicBool::new(false),
		pipeline: Arc::clone(&pipeline),
		ids: JobIdGenerator::new(),
	});

	info!(addr = %local_addr, workers = worker_threads, "cgraphd listening");

	let workers = (0..worker_threads.max(1))
		.map(|i| {
			let shared = Arc::clone(&shared);
			thread::Builder::new()
				.name(format!("cgraph-mux-{i}"))
				.spawn(move || mux::worker_loop(shared))
				.expect("failed to spawn worker thread")
		})
		.collect();

	Ok(ServerHandle {
		local_addr,
		shared,
		pipeline,
		workers,
	})
}

/// Run the server until an interrupt (Ctrl-C or SIGTERM-equivalent) is
/// delivered. Blocks the calling thread for the lifetime of the process.
pub fn run(addr: &str, worker_threads: usize) -> io::Result<()> {
	let handle = serve(addr, worker_threads)?;

	let (tx, rx) = std::sync::mpsc::channel();
	ctrlc::set_handler(move || {
		let _ = tx.send(());
	})
	.map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

	let _ = rx.recv();
	info!("received interrupt, shutting down");
	handle.shutdown();
	info!("cgraphd stopped");
	Ok(())
}
