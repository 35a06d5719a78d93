use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{InvoiceData, Job, JobId, JobStatus};

/// Process-lifetime job registry. Finished jobs are never evicted.
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    async fn transition<F>(&self, id: JobId, status: JobStatus, apply: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut Job),
    {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("job {}", id.as_uuid())))?;

        if !job.status.can_transition_to(status) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "illegal transition {} -> {}",
                job.status, status
            )));
        }

        job.status = status;
        job.updated_at = Utc::now();
        apply(job);
        Ok(())
    }
}

impl Default for InMemoryJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self) -> Result<Job, RepositoryError> {
        let mut jobs = self.jobs.write().await;
        // v4 collisions are not expected; regenerate rather than clobber an
        // existing record if one ever occurs.
        let mut job = Job::new();
        while jobs.contains_key(&job.id) {
            job = Job::new();
        }
        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError> {
        self.transition(id, status, |job| {
            job.error_message = error_message.map(String::from);
        })
        .await
    }

    async fn complete(&self, id: JobId, result: InvoiceData) -> Result<(), RepositoryError> {
        self.transition(id, JobStatus::Completed, |job| {
            job.result = Some(result);
        })
        .await
    }
}
