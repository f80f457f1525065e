//! One thread, bound to one [`BoundedQueue`], serializing whatever it pops.

use std::{sync::Arc, thread::JoinHandle};

use crate::queue::BoundedQueue;

/// A worker thread that pops items off its queue one at a time and hands
/// each to a processing closure, until the queue is closed and drained.
pub struct ActiveObject {
	handle: Option<JoinHandle<()>>,
}

impl ActiveObject {
	/// Spawn the worker. `name` becomes the OS thread name, useful when
	/// reading a panic backtrace or a thread dump.
	pub fn spawn<T, F>(name: impl Into<String>, queue: Arc<BoundedQueue<T>>, mut process: F) -> Self
	where
		T: Send + 'static,
		F: FnMut(T) + Send + 'static,
	{
		let name = name.into();
		let handle = std::thread::Builder::new()
			.name(name.clone())
			.spawn(move || {
				while let Some(item) = queue.pop() {
					process(item);
				}
				tracing::debug!(worker = %name, "active object drained its queue, exiting");
			})
			.expect("failed to spawn active object thread");
		Self { handle: Some(handle) }
	}

	/// Block until the worker thread has exited. Call this only after the
	/// worker's queue has been closed, or it will block forever.
	pub fn join(mut self) {
		if let Some(handle) = self.handle.take() {
			let _ = handle.join();
		}
	}
}

impl Drop for ActiveObject {
	fn drop(&mut self) {
		if let Some(handle) = self.handle.take() {
			let _ = handle.join();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	};

	use super::*;

	#[test]
	fn processes_every_item_then_exits_on_close() {
		let queue = Arc::new(BoundedQueue::new(8));
		let sum = Arc::new(AtomicUsize::new(0));
		let sum2 = Arc::clone(&sum);

		let worker = ActiveObject::spawn("test-worker", Arc::clone(&queue), move |item: usize| {
			sum2.fetch_add(item, Ordering::SeqCst);
		});

		for i in 1..=5 {
			queue.push(i);
		}
		queue.close();
		worker.join();

		assert_eq!(sum.load(Ordering::SeqCst), 15);
	}
}
