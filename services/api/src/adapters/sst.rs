//! services/api/src/adapters/sst.rs
//!
//! This module contains the adapter for OpenAI's Speech-to-Text (Whisper) service.
//! It implements the `SpeechToTextService` port from the `core` crate.
//! Clients upload an already-encoded clip (wav, m4a, mp3, ...), which is passed through as-is.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::audio::{AudioInput, CreateTranscriptionRequest},
    Client,
};
use async_trait::async_trait;
use fridge_core::ports::{PortError, PortResult, SpeechToTextService};
use tracing::debug;

/// An adapter that implements the `SpeechToTextService` port using the OpenAI Whisper API.
#[derive(Clone)]
pub struct OpenAiSstAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSstAdapter {
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SpeechToTextService for OpenAiSstAdapter {
    /// Transcribes an encoded audio clip using the configured Whisper model.
    async fn transcribe_audio(&self, file_name: &str, audio_data: &[u8]) -> PortResult<String> {
        if audio_data.is_empty() {
            return Err(PortError::Unexpected("Audio clip is empty".to_string()));
        }
        debug!(file_name, bytes = audio_data.len(), "Transcribing voice command");

        let input = AudioInput::from_vec_u8(file_name.to_string(), audio_data.to_vec());
        let request = CreateTranscriptionRequest {
            file: input,
            model: self.model.clone(),
            ..Default::default()
        };

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .audio()
            .transcription()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(response.text.trim().to_string())
    }
}
