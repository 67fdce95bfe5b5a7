//! Job Store — keyed job records shared by submission and polling.
//!
//! Injected as `Arc<dyn JobStore>`; swap the in-memory implementation for a
//! durable one without touching the orchestrator.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::Job;

pub trait JobStore: Send + Sync {
    /// Inserts or replaces a record.
    fn put(&self, job: Job);

    /// Returns a snapshot of the record.
    fn get(&self, id: &str) -> Option<Job>;

    /// Mutates a record in place. Returns false when the id is unknown.
    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut Job)) -> bool;
}

/// Process-lifetime store. Nothing is persisted or evicted.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<String, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }
}

impl JobStore for InMemoryJobStore {
    fn put(&self, job: Job) {
        self.jobs.write().insert(job.id.clone(), job);
    }

    fn get(&self, id: &str) -> Option<Job> {
        self.jobs.read().get(id).cloned()
    }

    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut Job)) -> bool {
        let mut jobs = self.jobs.write();
        match jobs.get_mut(id) {
            Some(job) => {
                apply(job);
                job.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}
