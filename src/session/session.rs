use super::config::SessionConfig;
use super::stats::{ReportSource, SessionStats};
use crate::error::Result;
use crate::generation::{GenerationStatus, ReportGenerator, StatusObserver};
use crate::report::Report;
use crate::store::{ReportStore, StorageBackend};
use crate::transcript::{infer_duration_minutes, iso_timestamp, ReportOptions, TranscriptMessage};
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::info;

/// A practice session: transcript snapshot plus its report collection
pub struct PracticeSession {
    /// Session configuration
    config: SessionConfig,

    /// When the session was opened
    created_at: chrono::DateTime<chrono::Utc>,

    /// Messages received from the media layer, in arrival order
    transcript: Mutex<Vec<TranscriptMessage>>,

    /// Reports generated for this session
    store: ReportStore,

    /// Serializes report requests so the model is called at most once
    generation_gate: Mutex<()>,

    /// Latest generation status
    status_tx: watch::Sender<GenerationStatus>,

    /// Number of model calls made
    generations: AtomicUsize,
}

impl PracticeSession {
    /// Create a new practice session backed by `backend`
    pub fn new(config: SessionConfig, backend: Arc<dyn StorageBackend>) -> Self {
        info!("Creating practice session: {}", config.session_id);

        let store = ReportStore::new(backend, config.collection.clone());
        let (status_tx, _) = watch::channel(GenerationStatus::idle());

        Self {
            config,
            created_at: Utc::now(),
            transcript: Mutex::new(Vec::new()),
            store,
            generation_gate: Mutex::new(()),
            status_tx,
            generations: AtomicUsize::new(0),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.session_id
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Append one message to the transcript
    pub async fn record(&self, message: TranscriptMessage) {
        self.transcript.lock().await.push(message);
    }

    /// Append messages to the transcript, preserving their order
    pub async fn record_all(&self, messages: impl IntoIterator<Item = TranscriptMessage>) -> usize {
        let mut transcript = self.transcript.lock().await;
        transcript.extend(messages);
        transcript.len()
    }

    /// Snapshot of the accumulated transcript
    pub async fn transcript(&self) -> Vec<TranscriptMessage> {
        self.transcript.lock().await.clone()
    }

    /// Current generation status
    pub fn status(&self) -> GenerationStatus {
        self.status_tx.borrow().clone()
    }

    /// Watch generation status changes
    pub fn subscribe(&self) -> watch::Receiver<GenerationStatus> {
        self.status_tx.subscribe()
    }

    /// Return the session's report, generating it only if none is stored.
    ///
    /// `timestamp` defaults to now and `duration` to the span of the transcript.
    /// Concurrent calls are serialized: the second caller sees the report saved
    /// by the first. Generation errors are returned unchanged and nothing is
    /// saved.
    pub async fn report(
        &self,
        generator: &ReportGenerator,
        timestamp: Option<String>,
        duration: Option<u32>,
        observer: Option<&dyn StatusObserver>,
    ) -> Result<(Report, ReportSource)> {
        let _gate = self.generation_gate.lock().await;

        if let Some(existing) = self.store.latest() {
            info!("Reusing stored report for session {}", self.config.session_id);
            return Ok((existing, ReportSource::Stored));
        }

        let transcript = self.transcript().await;
        let duration = duration.unwrap_or_else(|| infer_duration_minutes(&transcript));
        let options = ReportOptions::new(
            transcript,
            duration,
            timestamp.unwrap_or_else(iso_timestamp),
        );

        self.generations.fetch_add(1, Ordering::SeqCst);
        let observers = FanOut {
            session: &self.status_tx,
            caller: observer,
        };
        let report = generator.generate(&options, Some(&observers)).await?;

        self.store.save(&report);
        info!(
            "Report saved for session {} (collection={})",
            self.config.session_id,
            self.store.collection()
        );

        Ok((report, ReportSource::Generated))
    }

    /// Remove stored reports so the next `report` call generates again
    pub fn clear_reports(&self) {
        info!("Clearing reports for session {}", self.config.session_id);
        self.store.clear();
        self.status_tx.send_replace(GenerationStatus::idle());
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let (message_count, self_message_count, duration_minutes) = {
            let transcript = self.transcript.lock().await;
            (
                transcript.len(),
                transcript.iter().filter(|m| m.is_self).count(),
                infer_duration_minutes(&transcript),
            )
        };

        SessionStats {
            session_id: self.config.session_id.clone(),
            created_at: self.created_at,
            message_count,
            self_message_count,
            duration_minutes,
            report_count: self.store.list().len(),
            generations: self.generations.load(Ordering::SeqCst),
            storage: self.store.health(),
        }
    }
}

/// Publishes to the session's status cell and, if given, the caller's observer
struct FanOut<'a> {
    session: &'a watch::Sender<GenerationStatus>,
    caller: Option<&'a dyn StatusObserver>,
}

impl StatusObserver for FanOut<'_> {
    fn notify(&self, status: &GenerationStatus) {
        self.session.notify(status);
        if let Some(caller) = self.caller {
            caller.notify(status);
        }
    }
}
