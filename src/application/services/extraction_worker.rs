use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crate::application::ports::{InvoiceExtractor, JobRepository};
use crate::application::services::{EVENT_JOB_COMPLETED, NotificationService};
use crate::domain::{JobId, JobStatus};

pub struct ExtractionMessage {
    pub job_id: JobId,
    pub image_base64: String,
}

/// Background runner for queued extraction jobs.
///
/// Each received message is processed as its own task, so jobs progress
/// independently. A job gets exactly one terminal transition; extractor
/// failures are recorded on the job and never propagate further.
pub struct ExtractionWorker<E> {
    receiver: mpsc::Receiver<ExtractionMessage>,
    extractor: Arc<E>,
    job_repository: Arc<dyn JobRepository>,
    notifier: Arc<NotificationService>,
}

impl<E> ExtractionWorker<E>
where
    E: InvoiceExtractor + 'static,
{
    pub fn new(
        receiver: mpsc::Receiver<ExtractionMessage>,
        extractor: Arc<E>,
        job_repository: Arc<dyn JobRepository>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self {
            receiver,
            extractor,
            job_repository,
            notifier,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Extraction worker started");
        while let Some(msg) = self.receiver.recv().await {
            let extractor = Arc::clone(&self.extractor);
            let job_repository = Arc::clone(&self.job_repository);
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                process_job(extractor, job_repository, notifier, msg).await;
            });
        }
        tracing::info!("Extraction worker stopped: channel closed");
    }
}

#[tracing::instrument(skip_all, fields(job_id = %msg.job_id.as_uuid()))]
async fn process_job<E>(
    extractor: Arc<E>,
    job_repository: Arc<dyn JobRepository>,
    notifier: Arc<NotificationService>,
    msg: ExtractionMessage,
) where
    E: InvoiceExtractor,
{
    let job_id = msg.job_id;

    update_status(&*job_repository, job_id, JobStatus::Processing, None).await;

    match extractor.extract(&msg.image_base64).await {
        Ok(result) => {
            let vendor = result.vendor_name.clone();
            if let Err(e) = job_repository.complete(job_id, result).await {
                tracing::warn!(error = %e, "Failed to store job result");
            }
            tracing::info!(vendor = %vendor, "Extraction completed");
            notifier
                .emit(
                    EVENT_JOB_COMPLETED,
                    json!({
                        "jobId": job_id.as_uuid().to_string(),
                        "outcome": "success",
                    }),
                )
                .await;
        }
        Err(e) => {
            let error_message = e.to_string();
            tracing::warn!(error = %error_message, "Extraction failed");
            update_status(
                &*job_repository,
                job_id,
                JobStatus::Failed,
                Some(&error_message),
            )
            .await;
            notifier
                .emit(
                    EVENT_JOB_COMPLETED,
                    json!({
                        "jobId": job_id.as_uuid().to_string(),
                        "outcome": "failed",
                        "error": error_message,
                    }),
                )
                .await;
        }
    }
}

/// The job may be unknown (evicted) or already past this status; both are
/// tolerated here rather than surfaced.
async fn update_status(
    job_repository: &dyn JobRepository,
    job_id: JobId,
    status: JobStatus,
    error_message: Option<&str>,
) {
    tracing::debug!(status = %status, "Job status transition");
    if let Err(e) = job_repository
        .update_status(job_id, status, error_message)
        .await
    {
        tracing::warn!(error = %e, status = %status, "Job status transition skipped");
    }
}
