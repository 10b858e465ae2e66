use crate::error::{FincaError, Result};
use crate::models::{Task, Worker};
use tracing::debug;

/// Workers on record, keyed by DNI.
#[derive(Debug, Clone, Default)]
pub struct WorkerService {
    workers: Vec<Worker>,
}

impl WorkerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a worker, replacing any existing one with the same DNI.
    pub fn register(&mut self, worker: Worker) {
        debug!(dni = %worker.dni, name = %worker.name, "Worker registered");
        match self.workers.iter().position(|w| w.dni == worker.dni) {
            Some(idx) => self.workers[idx] = worker,
            None => self.workers.push(worker),
        }
    }

    pub fn list(&self) -> &[Worker] {
        &self.workers
    }

    pub fn find(&self, dni: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.dni == dni)
    }

    pub fn assign_task(&mut self, dni: &str, task: Task) -> Result<()> {
        let worker = self
            .workers
            .iter_mut()
            .find(|w| w.dni == dni)
            .ok_or_else(|| FincaError::NotFound(format!("worker with DNI {}", dni)))?;
        debug!(dni, task = %task.description, "Task assigned");
        worker.assign_task(task);
        Ok(())
    }
}
