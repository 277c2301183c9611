use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

use super::messages::{MediaSavedMessage, RecordingEventMessage};
use crate::library::SavedMedia;

pub struct BusClient {
    client: Client,
    subject_prefix: String,
}

impl BusClient {
    /// Connect to the NATS server
    pub async fn connect(url: &str, subject_prefix: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self {
            client,
            subject_prefix,
        })
    }

    /// Publish a saved-media notice
    pub async fn publish_media_saved(&self, saved: &SavedMedia) -> Result<()> {
        let subject = format!("{}.event.media_saved", self.subject_prefix);

        let message = MediaSavedMessage {
            kind: saved.kind,
            path: saved.path.display().to_string(),
            bytes: saved.bytes,
            recorded_secs: saved.recorded_secs,
            timestamp: saved.saved_at.to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish saved-media notice")?;

        info!(
            "Published media_saved to {} ({} bytes at {})",
            subject,
            saved.bytes,
            saved.path.display()
        );

        Ok(())
    }

    /// Publish a recording lifecycle notice
    pub async fn publish_recording_event(&self, event: &str, clip_id: &str) -> Result<()> {
        let subject = format!("{}.event.recording", self.subject_prefix);

        let message = RecordingEventMessage {
            event: event.to_string(),
            clip_id: clip_id.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish recording notice")?;

        info!("Published recording event to {} ({} {})", subject, event, clip_id);

        Ok(())
    }

    /// Subscribe to shutter triggers from companion devices
    pub async fn subscribe_remote(&self) -> Result<async_nats::Subscriber> {
        let subject = format!("{}.remote.>", self.subject_prefix);

        info!("Subscribing to remote triggers on {}", subject);

        let subscriber = self
            .client
            .subscribe(subject.clone())
            .await
            .context("Failed to subscribe to remote triggers")?;

        info!("Subscribed to {}", subject);

        Ok(subscriber)
    }

    /// Close the NATS connection
    pub async fn close(self) -> Result<()> {
        info!("Closing NATS connection");
        // async-nats handles cleanup on drop
        Ok(())
    }
}
