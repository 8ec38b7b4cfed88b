//! Single-worker FIFO queues for serialized units of work.
//!
//! Network loads and classifications each run on their own serial queue:
//! one unit executes at a time, in submission order, on a dedicated
//! worker thread. Dropping the queue closes its channel and lets the
//! worker drain what was already submitted before exiting.

use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// An ordered single-worker queue.
#[derive(Debug)]
pub struct SerialQueue {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl SerialQueue {
    /// Spawns the worker thread for a new queue.
    ///
    /// `name` identifies the queue in log output.
    pub fn new(name: &'static str) -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let worker = std::thread::spawn(move || {
            debug!(queue = name, "serial queue worker started");
            while let Ok(job) = receiver.recv() {
                job();
            }
            debug!(queue = name, "serial queue worker exiting");
        });
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Submits a unit of work; units execute in submission order.
    ///
    /// Returns `false` if the worker has already shut down.
    pub fn submit<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        match &self.sender {
            Some(sender) => sender.send(Box::new(job)).is_ok(),
            None => false,
        }
    }
}

impl Drop for SerialQueue {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop after queued jobs run.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn jobs_run_in_submission_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let queue = SerialQueue::new("test");
        for i in 0..16 {
            let order = Arc::clone(&order);
            assert!(queue.submit(move || order.lock().unwrap().push(i)));
        }
        drop(queue);
        assert_eq!(*order.lock().unwrap(), (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn drop_drains_already_submitted_jobs() {
        let ran = Arc::new(Mutex::new(0));
        {
            let queue = SerialQueue::new("drain");
            for _ in 0..4 {
                let ran = Arc::clone(&ran);
                queue.submit(move || *ran.lock().unwrap() += 1);
            }
        }
        assert_eq!(*ran.lock().unwrap(), 4);
    }
}
