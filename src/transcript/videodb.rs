//! VideoDB transcription provider
//!
//! Uploads media to the hosted VideoDB service and fetches the generated
//! transcript (default: api.videodb.io)

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;

use super::provider::{classify_provider_error, TranscriptionError, TranscriptionProvider};
use super::types::{Transcript, TranscriptSegment};

/// Upload acknowledgement
#[derive(Debug, Deserialize)]
struct VideoDbUploadResponse {
    video_id: String,
}

/// Transcript fetch response
#[derive(Debug, Deserialize)]
struct VideoDbTranscriptResponse {
    segments: Vec<TranscriptSegment>,
}

/// VideoDB provider configuration
#[derive(Debug, Clone)]
pub struct VideoDbConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for VideoDbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.videodb.io".to_string(),
            api_key: String::new(),
            timeout_secs: 300,
        }
    }
}

/// Hosted transcription provider
pub struct VideoDbProvider {
    config: VideoDbConfig,
    client: Client,
}

impl VideoDbProvider {
    pub fn new(config: VideoDbConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn upload(&self, path: &Path) -> Result<String, TranscriptionError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            TranscriptionError::RequestFailed(format!(
                "Cannot read media file {}: {}",
                path.display(),
                e
            ))
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.mp4".to_string());

        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(bytes).file_name(file_name),
        );

        let url = format!("{}/videos", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                TranscriptionError::ProviderUnavailable(format!("Cannot connect to VideoDB: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_provider_error(error_text));
        }

        let upload: VideoDbUploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        Ok(upload.video_id)
    }

    /// Kick off transcript generation; the service blocks until it is ready
    async fn generate_transcript(&self, video_id: &str) -> Result<(), TranscriptionError> {
        let url = format!("{}/videos/{}/transcript", self.config.base_url, video_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_provider_error(error_text));
        }

        Ok(())
    }

    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptionError> {
        let url = format!("{}/videos/{}/transcript", self.config.base_url, video_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_provider_error(error_text));
        }

        let transcript: VideoDbTranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        Ok(Transcript::new(transcript.segments))
    }
}

#[async_trait]
impl TranscriptionProvider for VideoDbProvider {
    fn provider_name(&self) -> &'static str {
        "videodb"
    }

    async fn transcribe(&self, path: &Path) -> Result<Transcript, TranscriptionError> {
        let video_id = self.upload(path).await?;
        log::info!("Uploaded {} as video {}", path.display(), video_id);

        self.generate_transcript(&video_id).await?;
        let transcript = self.fetch_transcript(&video_id).await?;

        if transcript.is_blank() {
            return Err(TranscriptionError::NoSpeechDetected);
        }

        Ok(transcript)
    }
}
