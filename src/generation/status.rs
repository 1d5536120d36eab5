use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl GenerationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationPhase::Success | GenerationPhase::Error)
    }
}

/// Progress of one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub status: GenerationPhase,

    /// Percentage, 0..=100
    pub progress: u8,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationStatus {
    pub fn idle() -> Self {
        Self {
            status: GenerationPhase::Idle,
            progress: 0,
            message: String::new(),
            error: None,
        }
    }

    pub fn loading(progress: u8, message: &str) -> Self {
        Self {
            status: GenerationPhase::Loading,
            progress,
            message: message.to_string(),
            error: None,
        }
    }

    pub fn success(message: &str) -> Self {
        Self {
            status: GenerationPhase::Success,
            progress: 100,
            message: message.to_string(),
            error: None,
        }
    }

    pub fn failed(message: &str, error: String) -> Self {
        Self {
            status: GenerationPhase::Error,
            progress: 0,
            message: message.to_string(),
            error: Some(error),
        }
    }
}

impl Default for GenerationStatus {
    fn default() -> Self {
        Self::idle()
    }
}

/// Sink for status transitions
///
/// `notify` must not block; generation never waits on an observer.
pub trait StatusObserver: Send + Sync {
    fn notify(&self, status: &GenerationStatus);
}

/// Queue of every transition, drained by the caller at its own pace
impl StatusObserver for mpsc::UnboundedSender<GenerationStatus> {
    fn notify(&self, status: &GenerationStatus) {
        // A dropped receiver means nobody is listening any more
        let _ = self.send(status.clone());
    }
}

/// Latest-value cell, polled by readers
impl StatusObserver for watch::Sender<GenerationStatus> {
    fn notify(&self, status: &GenerationStatus) {
        self.send_replace(status.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(GenerationStatus::loading(20, "Analyzing conversation...")).unwrap();
        assert_eq!(json["status"], "loading");
        assert_eq!(json["progress"], 20);
        assert!(json.get("error").is_none());

        let json = serde_json::to_value(GenerationStatus::failed("Failed", "boom".into())).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["progress"], 0);
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!GenerationPhase::Idle.is_terminal());
        assert!(!GenerationPhase::Loading.is_terminal());
        assert!(GenerationPhase::Success.is_terminal());
        assert!(GenerationPhase::Error.is_terminal());
    }

    #[test]
    fn test_mpsc_observer_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<GenerationStatus>();
        drop(rx);
        tx.notify(&GenerationStatus::idle());
    }

    #[test]
    fn test_watch_observer_keeps_latest() {
        let (tx, rx) = watch::channel(GenerationStatus::idle());
        tx.notify(&GenerationStatus::loading(20, "a"));
        tx.notify(&GenerationStatus::loading(60, "b"));
        assert_eq!(rx.borrow().progress, 60);
    }
}
