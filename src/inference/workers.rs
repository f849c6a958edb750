//! Fixed-size worker pool for batches of recommendations.

use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::warn;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct Pool {
    tx: Option<mpsc::Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawn `size` workers (at least one).
    pub fn new(size: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let shared_rx = Arc::new(Mutex::new(rx));

        let handles = (0..size.max(1))
            .map(|_| {
                let rx = Arc::clone(&shared_rx);
                thread::spawn(move || loop {
                    let job = match rx.lock() {
                        Ok(guard) => guard.recv(),
                        Err(_) => break,
                    };

                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                })
            })
            .collect();

        Self {
            tx: Some(tx),
            handles,
        }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let sent = self
            .tx
            .as_ref()
            .map(|tx| tx.send(Box::new(job)).is_ok())
            .unwrap_or(false);
        if !sent {
            warn!("worker pool is shut down, job dropped");
        }
    }
}

impl Drop for Pool {
    /// Close the queue and wait for in-flight jobs.
    fn drop(&mut self) {
        self.tx.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
