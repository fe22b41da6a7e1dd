// transcript/provider.rs
//
// TranscriptionProvider trait and error types.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use super::types::Transcript;

/// Error types for transcript acquisition
#[derive(Debug, Clone)]
pub enum TranscriptionError {
    /// The media contains no detectable speech
    NoSpeechDetected,
    /// Service not reachable
    ProviderUnavailable(String),
    /// Request failed (network, timeout, non-2xx status)
    RequestFailed(String),
    /// Response could not be decoded
    InvalidResponse(String),
}

impl fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptionError::NoSpeechDetected => {
                write!(f, "The video does not contain any detectable speech")
            }
            TranscriptionError::ProviderUnavailable(msg) => {
                write!(f, "Transcription service unavailable: {}", msg)
            }
            TranscriptionError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            TranscriptionError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for TranscriptionError {}

/// Map a raw provider error message onto the taxonomy above.
///
/// The hosted service reports silent uploads with a "no spoken data found"
/// message rather than a dedicated status code.
pub fn classify_provider_error(message: String) -> TranscriptionError {
    if message.to_lowercase().contains("no spoken data found") {
        TranscriptionError::NoSpeechDetected
    } else {
        TranscriptionError::RequestFailed(message)
    }
}

/// The trait all transcription backends implement
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Provider name (e.g. "videodb")
    fn provider_name(&self) -> &'static str;

    /// Upload the media file and return its timed transcript
    async fn transcribe(&self, path: &Path) -> Result<Transcript, TranscriptionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_no_speech() {
        let err = classify_provider_error("Upload rejected: No Spoken Data Found".to_string());
        assert!(matches!(err, TranscriptionError::NoSpeechDetected));
    }

    #[test]
    fn test_classify_other_errors_pass_through() {
        let err = classify_provider_error("quota exceeded".to_string());
        match err {
            TranscriptionError::RequestFailed(msg) => assert_eq!(msg, "quota exceeded"),
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
    }
}
