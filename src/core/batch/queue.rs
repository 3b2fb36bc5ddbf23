//! Fire-and-forget work queue for report generation

use super::report::ReportGenerator;
use dashmap::DashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Sender side of the report queue
///
/// A request id is queued at most once at a time; enqueuing it again while a
/// task for it is pending or running does nothing.
#[derive(Debug, Clone)]
pub struct ReportQueue {
    sender: mpsc::Sender<String>,
    in_flight: Arc<DashSet<String>>,
}

impl ReportQueue {
    /// Spawn `workers` consumers sharing one bounded channel
    pub fn start(
        generator: Arc<ReportGenerator>,
        workers: usize,
        capacity: usize,
    ) -> (Self, Vec<JoinHandle<()>>) {
        let (sender, receiver) = mpsc::channel::<String>(capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));
        let in_flight = Arc::new(DashSet::new());

        let handles = (0..workers.max(1))
            .map(|worker| {
                tokio::spawn(run_worker(
                    worker,
                    receiver.clone(),
                    generator.clone(),
                    in_flight.clone(),
                ))
            })
            .collect();

        info!(workers, capacity, "Report queue started");
        (Self { sender, in_flight }, handles)
    }

    /// Queue generation for `request_id` and return immediately
    ///
    /// Returns whether a new task was queued.
    pub fn enqueue(&self, request_id: &str) -> bool {
        if !self.in_flight.insert(request_id.to_string()) {
            debug!(request_id, "Report generation already queued");
            return false;
        }

        match self.sender.try_send(request_id.to_string()) {
            Ok(()) => {
                debug!(request_id, "Report generation queued");
                true
            }
            Err(e) => {
                self.in_flight.remove(request_id);
                warn!(request_id, "Report queue rejected task: {}", e);
                false
            }
        }
    }

    /// Whether a task for `request_id` is pending or running
    pub fn is_in_flight(&self, request_id: &str) -> bool {
        self.in_flight.contains(request_id)
    }

    /// Number of tasks pending or running
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

async fn run_worker(
    worker: usize,
    receiver: Arc<Mutex<mpsc::Receiver<String>>>,
    generator: Arc<ReportGenerator>,
    in_flight: Arc<DashSet<String>>,
) {
    loop {
        let next = { receiver.lock().await.recv().await };
        let Some(request_id) = next else {
            break;
        };

        if let Err(e) = generator.generate(&request_id).await {
            error!(worker, request_id = %request_id, "Report generation failed: {}", e);
        }
        in_flight.remove(&request_id);
    }

    debug!(worker, "Report worker stopped");
}
