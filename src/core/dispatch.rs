//! Asynchronous dispatch policies for fire-and-forget emission
//!
//! The default policy spawns one thread per asynchronous call: unbounded,
//! unsupervised, and with no synchronization back to the caller. Ordering
//! across concurrent emissions is unspecified by design; callers that need
//! ordering use the synchronous entry points.
//!
//! The queued policy is a documented alternative for workloads where
//! unbounded thread growth is unacceptable: a bounded channel drained by a
//! single worker thread. When the queue is full the dispatcher falls back to
//! spawn-per-call, so a logging call still never blocks and no record is
//! dropped. Ordering remains unspecified in both modes.

use crossbeam_channel::{bounded, Sender, TrySendError};
use std::thread::{self, JoinHandle};

pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

pub(crate) enum AsyncDispatch {
    /// One thread per call, no queue, no backpressure.
    Spawn,
    /// Bounded work queue with a dedicated worker thread.
    Queued(QueuedDispatcher),
}

impl AsyncDispatch {
    pub(crate) fn queued(capacity: usize) -> Self {
        AsyncDispatch::Queued(QueuedDispatcher::new(capacity))
    }

    pub(crate) fn dispatch(&self, job: Job) {
        match self {
            AsyncDispatch::Spawn => {
                thread::spawn(job);
            }
            AsyncDispatch::Queued(queue) => queue.dispatch(job),
        }
    }
}

pub(crate) struct QueuedDispatcher {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl QueuedDispatcher {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded::<Job>(capacity);
        let worker = thread::spawn(move || {
            for job in receiver {
                job();
            }
        });

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    fn dispatch(&self, job: Job) {
        if let Some(ref sender) = self.sender {
            match sender.try_send(job) {
                Ok(()) => {}
                Err(TrySendError::Full(job)) => {
                    // Queue saturated: revert to spawn-per-call rather than
                    // blocking the caller or dropping the record.
                    thread::spawn(job);
                }
                Err(TrySendError::Disconnected(_)) => {
                    // Worker gone, logger is shutting down.
                }
            }
        }
    }
}

impl Drop for QueuedDispatcher {
    fn drop(&mut self) {
        // Close the channel so the worker drains remaining jobs and exits.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                eprintln!("[LOGISTRY ERROR] dispatch worker panicked during shutdown");
            }
        }
    }
}
