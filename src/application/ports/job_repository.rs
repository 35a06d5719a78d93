use async_trait::async_trait;

use crate::domain::{InvoiceData, Job, JobId, JobStatus};

use super::RepositoryError;

/// Registry of extraction jobs. Transitions are forward-only; after creation
/// only the extraction worker writes to a job.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Allocates a fresh job in `pending` and stores it.
    async fn create(&self) -> Result<Job, RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Applies a forward transition. Regressions are rejected with
    /// `ConstraintViolation`; unknown ids with `NotFound` — callers on the
    /// background path log and tolerate both.
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError>;

    /// Terminal success transition: sets `completed` and attaches the result.
    async fn complete(&self, id: JobId, result: InvoiceData) -> Result<(), RepositoryError>;
}
