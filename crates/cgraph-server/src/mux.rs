//! The leader-follower connection scheduler: every worker thread contends
//! for a single leadership token, the one holding it polls for readiness,
//! hands the token to the next waiter, then services every descriptor that
//! poll returned on its own before looping back to contend again. `mio` is
//! edge-triggered, so a readiness event not drained here is never
//! re-delivered until that peer sends more bytes — unlike the `poll(2)`
//! loop this is grounded on, which is level-triggered and can safely leave
//! a fd for a later round. Draining the whole batch keeps the behavior
//! equivalent despite that difference.

use std::{
	io::{self, Read, Write},
	sync::Arc,
	time::Duration,
};

use cgraph_core::Graph;
use cgraph_pipeline::{Job, Reply};
use cgraph_protocol::{parse_command, Command};
use mio::{net::TcpStream, Events, Interest, Token};
use tracing::{debug, trace, warn};

use crate::state::{Connection, ConnState, SharedState};

const POLL_TIMEOUT: Duration = Duration::from_millis(200);
const LEADER_WAIT_TIMEOUT: Duration = Duration::from_millis(200);

/// Body of one leader-follower worker thread. Runs until `shared.stop` is
/// set, at which point every thread waiting on the leadership condvar is
/// woken so it can notice and exit instead of waiting forever.
pub fn worker_loop(shared: Arc<SharedState>) {
	let mut events = Events::with_capacity(128);

	while !shared.stop.load(std::sync::atomic::Ordering::SeqCst) {
		let became_leader = acquire_leadership(&shared);
		if !became_leader {
			break;
		}

		{
			let mut poll = shared.poll.lock().expect("poll lock poisoned");
			if let Err(err) = poll.poll(&mut events, Some(POLL_TIMEOUT)) {
				if err.kind() != io::ErrorKind::Interrupted {
					warn!(?err, "poll failed");
				}
			}
		}

		// Snapshot every token this poll returned before releasing the
		// token, so no readiness event is silently dropped.
		let ready: Vec<Token> = events.iter().map(|e| e.token()).collect();

		release_leadership(&shared);

		for token in ready {
			if token == shared.listener_token {
				accept_all(&shared);
			} else {
				handle_readable(&shared, token);
			}
		}
	}
}

/// Block until this thread holds the leadership token, or `false` if the
/// server is shutting down first.
fn acquire_leadership(shared: &Arc<SharedState>) -> bool {
	let mut held = shared.leader_held.lock().expect("leader lock poisoned");
	while *held {
		if shared.stop.load(std::sync::atomic::Ordering::SeqCst) {
			return false;
		}
		let (guard, _timeout) = shared
			.leader_cv
			.wait_timeout(held, LEADER_WAIT_TIMEOUT)
			.expect("leader condvar poisoned");
		held = guard;
	}
	if shared.stop.load(std::sync::atomic::Ordering::SeqCst) {
		return false;
	}
	*held = true;
	true
}

fn release_leadership(shared: &Arc<SharedState>) {
	let mut held = shared.leader_held.lock().expect("leader lock poisoned");
	*held = false;
	shared.leader_cv.notify_one();
}

fn accept_all(shared: &Arc<SharedState>) {
	loop {
		let accepted = {
			let listener = shared.listener.lock().expect("listener lock poisoned");
			listener.accept()
		};
		let (mut stream, addr) = match accepted {
			Ok(pair) => pair,
			Err(err) if err.kind() == io::ErrorKind::WouldBlock => return,
			Err(err) => {
				warn!(?err, "accept failed");
				return;
			}
		};

		let token = shared.next_token();
		{
			let poll = shared.poll.lock().expect("poll lock poisoned");
			if let Err(err) = poll.registry().register(&mut stream, token, Interest::READABLE) {
				warn!(?err, "failed to register connection");
				continue;
			}
		}

		debug!(?addr, ?token, "accepted connection");
		shared.connections.lock().expect("connections lock poisoned").insert(
			token,
			Connection {
				stream: Arc::new(std::sync::Mutex::new(stream)),
				state: ConnState::default(),
			},
		);
	}
}

fn handle_readable(shared: &Arc<SharedState>, token: Token) {
	let mut conns = shared.connections.lock().expect("connections lock poisoned");
	let Some(conn) = conns.get_mut(&token) else {
		return;
	};

	let mut buf = [0u8; 4096];
	loop {
		let read = {
			let mut stream = conn.stream.lock().expect("stream lock poisoned");
			stream.read(&mut buf)
		};
		match read {
			Ok(0) => {
				trace!(?token, "connection closed by peer");
				deregister(shared, &conn.stream);
				conns.remove(&token);
				return;
			}
			Ok(n) => conn.state.inbuf.extend_from_slice(&buf[..n]),
			Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
			Err(err) => {
				warn!(?err, ?token, "read failed, dropping connection");
				deregister(shared, &conn.stream);
				conns.remove(&token);
				return;
			}
		}
	}

	while let Some(pos) = conn.state.inbuf.iter().position(|&b| b == b'\n') {
		let raw: Vec<u8> = conn.state.inbuf.drain(..=pos).collect();
		let line = String::from_utf8_lossy(&raw);
		let line = line.trim_end_matches(['\r', '\n']).to_string();
		process_line(shared, &mut conn.state, &conn.stream, &line);
	}
}

fn deregister(shared: &Arc<SharedState>, stream: &Arc<std::sync::Mutex<TcpStream>>) {
	let mut stream = stream.lock().expect("stream lock poisoned");
	let poll = shared.poll.lock().expect("poll lock poisoned");
	let _ = poll.registry().deregister(&mut *stream);
}

fn process_line(shared: &Arc<SharedState>, state: &mut ConnState, stream: &Arc<std::sync::Mutex<TcpStream>>, line: &str) {
	if line.is_empty() {
		return;
	}

	match parse_command(line) {
		Ok(Command::Init { n, directed }) => {
			state.graph = Some(Graph::new(n, directed));
			state.vertex_count = n;
			state.maxflow_s = None;
			state.maxflow_t = None;
		}
		Ok(Command::Edge { u, v, w }) => match state.graph.as_mut() {
			Some(g) => g.add_edge(u, v, w),
			None => write_line(stream, "ERR|Graph not initialized yet."),
		},
		Ok(Command::MaxFlow { s, t }) => {
			state.maxflow_s = s;
			state.maxflow_t = t;
		}
		Ok(Command::Print) => {}
		Ok(Command::Commit) => match state.graph.take() {
			None => write_line(stream, "ERR|Graph not initialized yet."),
			Some(g) => submit_job(shared, state, stream, g),
		},
		Err(err) => write_line(stream, &format!("ERR|{err}")),
	}
}

fn submit_job(shared: &Arc<SharedState>, state: &mut ConnState, stream: &Arc<std::sync::Mutex<TcpStream>>, g: Graph) {
	let directed = g.is_directed();
	let n = state.vertex_count.max(g.n()).max(1);
	let s = state.maxflow_s.unwrap_or(0);
	let t = state.maxflow_t.unwrap_or(n - 1);

	let reply_stream = Arc::clone(stream);
	let reply: Reply = Arc::new(move |payload: String| {
		write_bytes(&reply_stream, payload.as_bytes());
	});

	let job = Job {
		id: shared.ids.next(),
		graph: Arc::new(g),
		directed,
		maxflow_s: s,
		maxflow_t: t,
		reply,
	};
	shared.pipeline.submit(job);

	state.maxflow_s = None;
	state.maxflow_t = None;
}

fn write_line(stream: &Arc<std::sync::Mutex<TcpStream>>, line: &str) {
	write_bytes(stream, format!("{line}\n").as_bytes());
}

/// Write every byte of `bytes` to `stream`, retrying on `WouldBlock`. The
/// socket is non-blocking (mio always sets it so), so a short, best-effort
/// spin-and-yield is used rather than re-registering write interest —
/// payloads here are modest text reports, not bulk transfers.
fn write_bytes(stream: &Arc<std::sync::Mutex<TcpStream>>, bytes: &[u8]) {
	let mut stream = stream.lock().expect("stream lock poisoned");
	let mut written = 0;
	while written < bytes.len() {
		match stream.write(&bytes[written..]) {
			Ok(0) => break,
			Ok(n) => written += n,
			Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
				std::thread::sleep(Duration::from_millis(1));
			}
			Err(err) => {
				warn!(?err, "write failed, dropping remainder of payload");
				break;
			}
		}
	}
}
