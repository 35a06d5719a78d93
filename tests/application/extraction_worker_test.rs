use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use factura::application::ports::{
    DeliveryError, EventStore, ExtractionError, InvoiceExtractor, JobRepository,
    SubscriptionStore, WebhookDeliverer,
};
use factura::application::services::{ExtractionMessage, ExtractionWorker, NotificationService};
use factura::domain::{InvoiceData, JobId, JobStatus, WebhookEvent};
use factura::infrastructure::persistence::{
    InMemoryEventLog, InMemoryJobRepository, InMemorySubscriptionStore,
};

struct MockExtractor;

#[async_trait::async_trait]
impl InvoiceExtractor for MockExtractor {
    async fn extract(&self, _image_base64: &str) -> Result<InvoiceData, ExtractionError> {
        Ok(InvoiceData {
            vendor_name: "ACME Ltd".to_string(),
            total_amount: 1190.0,
            ..InvoiceData::default()
        })
    }
}

struct FailingExtractor;

#[async_trait::async_trait]
impl InvoiceExtractor for FailingExtractor {
    async fn extract(&self, _image_base64: &str) -> Result<InvoiceData, ExtractionError> {
        Err(ExtractionError::ApiRequestFailed(
            "upstream unavailable".to_string(),
        ))
    }
}

struct NullDeliverer;

#[async_trait::async_trait]
impl WebhookDeliverer for NullDeliverer {
    async fn deliver(&self, _url: &str, _event: &WebhookEvent) -> Result<(), DeliveryError> {
        Ok(())
    }
}

fn worker_fixture<E>(
    extractor: E,
) -> (
    mpsc::Sender<ExtractionMessage>,
    Arc<InMemoryJobRepository>,
    Arc<InMemoryEventLog>,
)
where
    E: InvoiceExtractor + 'static,
{
    let job_repository = Arc::new(InMemoryJobRepository::new());
    let event_log = Arc::new(InMemoryEventLog::new());
    let notifier = Arc::new(NotificationService::new(
        Arc::clone(&event_log) as Arc<dyn EventStore>,
        Arc::new(InMemorySubscriptionStore::new()) as Arc<dyn SubscriptionStore>,
        Arc::new(NullDeliverer),
    ));

    let (sender, receiver) = mpsc::channel(8);
    let worker = ExtractionWorker::new(
        receiver,
        Arc::new(extractor),
        Arc::clone(&job_repository) as Arc<dyn JobRepository>,
        notifier,
    );
    tokio::spawn(worker.run());

    (sender, job_repository, event_log)
}

async fn wait_for_terminal(repo: &InMemoryJobRepository, id: JobId) -> factura::domain::Job {
    for _ in 0..100 {
        if let Some(job) = repo.get_by_id(id).await.unwrap() {
            if job.status.is_terminal() {
                return job;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job never reached a terminal status");
}

#[tokio::test]
async fn given_successful_extraction_when_processed_then_job_completes_and_event_is_emitted() {
    let (sender, repo, event_log) = worker_fixture(MockExtractor);
    let job = repo.create().await.unwrap();

    sender
        .send(ExtractionMessage {
            job_id: job.id,
            image_base64: "aGVsbG8=".to_string(),
        })
        .await
        .unwrap();

    let settled = wait_for_terminal(&repo, job.id).await;
    assert_eq!(settled.status, JobStatus::Completed);
    assert_eq!(settled.result.unwrap().vendor_name, "ACME Ltd");
    assert!(settled.error_message.is_none());

    let events = event_log.list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "completed");
    assert_eq!(events[0].data["outcome"], "success");
    assert_eq!(events[0].data["jobId"], job.id.as_uuid().to_string());
}

#[tokio::test]
async fn given_failing_extraction_when_processed_then_job_fails_without_crashing() {
    let (sender, repo, event_log) = worker_fixture(FailingExtractor);
    let job = repo.create().await.unwrap();

    sender
        .send(ExtractionMessage {
            job_id: job.id,
            image_base64: "aGVsbG8=".to_string(),
        })
        .await
        .unwrap();

    let settled = wait_for_terminal(&repo, job.id).await;
    assert_eq!(settled.status, JobStatus::Failed);
    let message = settled.error_message.unwrap();
    assert!(!message.is_empty());
    assert!(settled.result.is_none());

    let events = event_log.list().await.unwrap();
    assert_eq!(events[0].data["outcome"], "failed");
    assert_eq!(events[0].data["error"], message);
}

#[tokio::test]
async fn given_unknown_job_id_when_processed_then_worker_tolerates_it() {
    let (sender, repo, event_log) = worker_fixture(MockExtractor);
    let orphan_id = JobId::new();

    sender
        .send(ExtractionMessage {
            job_id: orphan_id,
            image_base64: "aGVsbG8=".to_string(),
        })
        .await
        .unwrap();

    // the terminal event still goes out even though the record is gone
    for _ in 0..100 {
        if !event_log.list().await.unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let events = event_log.list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert!(repo.get_by_id(orphan_id).await.unwrap().is_none());
}

#[tokio::test]
async fn given_multiple_jobs_when_queued_together_then_each_settles_independently() {
    let (sender, repo, _event_log) = worker_fixture(MockExtractor);
    let first = repo.create().await.unwrap();
    let second = repo.create().await.unwrap();

    for job_id in [first.id, second.id] {
        sender
            .send(ExtractionMessage {
                job_id,
                image_base64: "aGVsbG8=".to_string(),
            })
            .await
            .unwrap();
    }

    let first_settled = wait_for_terminal(&repo, first.id).await;
    let second_settled = wait_for_terminal(&repo, second.id).await;
    assert_eq!(first_settled.status, JobStatus::Completed);
    assert_eq!(second_settled.status, JobStatus::Completed);
}
