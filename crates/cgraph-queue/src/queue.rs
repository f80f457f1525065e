//! A bounded blocking queue with explicit, idempotent shutdown.

use std::sync::Mutex;

use crossbeam::channel::{bounded, Receiver, Sender};

/// A fixed-capacity queue: `push` blocks while full, `pop` blocks while
/// empty. Closing the queue lets every item already buffered drain out
/// through `pop` before it starts returning `None`; `close` itself is
/// idempotent and safe to call more than once.
pub struct BoundedQueue<T> {
	sender: Mutex<Option<Sender<T>>>,
	receiver: Receiver<T>,
}

impl<T> BoundedQueue<T> {
	/// Create a queue holding at most `capacity` items at a time.
	pub fn new(capacity: usize) -> Self {
		let (tx, rx) = bounded(capacity);
		Self {
			sender: Mutex::new(Some(tx)),
			receiver: rx,
		}
	}

	/// Push an item, blocking if the queue is full. Returns `false` if the
	/// queue has already been closed.
	pub fn push(&self, item: T) -> bool {
		let guard = self.sender.lock().expect("queue sender lock poisoned");
		match guard.as_ref() {
			Some(tx) => tx.send(item).is_ok(),
			None => false,
		}
	}

	/// Pop an item, blocking if the queue is empty. Returns `None` once the
	/// queue is closed and every buffered item has been drained.
	pub fn pop(&self) -> Option<T> {
		self.receiver.recv().ok()
	}

	/// Close the queue. Idempotent: closing an already-closed queue is a
	/// no-op. Items already buffered remain poppable.
	pub fn close(&self) {
		let mut guard = self.sender.lock().expect("queue sender lock poisoned");
		*guard = None;
	}
}

#[cfg(test)]
mod tests {
	use std::{sync::Arc, thread, time::Duration};

	use super::*;

	#[test]
	fn pushed_items_pop_in_order() {
		let q = BoundedQueue::new(4);
		assert!(q.push(1));
		assert!(q.push(2));
		assert_eq!(q.pop(), Some(1));
		assert_eq!(q.pop(), Some(2));
	}

	#[test]
	fn close_drains_buffered_items_then_terminates() {
		let q = BoundedQueue::new(4);
		q.push(1);
		q.push(2);
		q.close();
		assert_eq!(q.pop(), Some(1));
		assert_eq!(q.pop(), Some(2));
		assert_eq!(q.pop(), None);
	}

	#[test]
	fn close_is_idempotent() {
		let q: BoundedQueue<i32> = BoundedQueue::new(1);
		q.close();
		q.close();
		assert!(!q.push(1));
	}

	#[test]
	fn push_after_close_is_rejected() {
		let q = BoundedQueue::new(1);
		q.close();
		assert!(!q.push(42));
	}

	#[test]
	fn pop_blocks_until_an_item_arrives() {
		let q = Arc::new(BoundedQueue::new(1));
		let q2 = Arc::clone(&q);
		let handle = thread::spawn(move || q2.pop());
		thread::sleep(Duration::from_millis(20));
		q.push(7);
		assert_eq!(handle.join().unwrap(), Some(7));
	}
}
