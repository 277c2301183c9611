//! NATS bridge
//!
//! Publishes session lifecycle and saved-media notices for companion
//! services, and maps remote shutter triggers back onto controller intents.

pub mod client;
pub mod messages;

pub use client::BusClient;
pub use messages::{MediaSavedMessage, RecordingEventMessage, RemoteAction, RemoteTriggerMessage};

use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use crate::session::{CameraController, CameraEvent};

/// Forward controller events onto the bus until the channel closes
pub async fn forward_events(bus: Arc<BusClient>, mut events: broadcast::Receiver<CameraEvent>) {
    info!("Bus forwarder started");

    loop {
        match events.recv().await {
            Ok(event) => {
                let result = match &event {
                    CameraEvent::RecordingStarted { clip_id } => {
                        bus.publish_recording_event("started", clip_id).await
                    }
                    CameraEvent::RecordingPaused { clip_id } => {
                        bus.publish_recording_event("paused", clip_id).await
                    }
                    CameraEvent::RecordingResumed { clip_id } => {
                        bus.publish_recording_event("resumed", clip_id).await
                    }
                    CameraEvent::RecordingStopped { clip_id, saved } => {
                        let mut result = bus.publish_recording_event("stopped", clip_id).await;
                        if let (Ok(()), Some(saved)) = (&result, saved) {
                            result = bus.publish_media_saved(saved).await;
                        }
                        result
                    }
                    CameraEvent::PhotoSaved { saved } => bus.publish_media_saved(saved).await,
                    // failures stay local; the status endpoint carries the banner
                    CameraEvent::CaptureFailed { .. } | CameraEvent::SaveFailed { .. } => Ok(()),
                };

                if let Err(e) = result {
                    error!("Failed to publish camera event: {}", e);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Bus forwarder lagged, skipped {} events", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    info!("Bus forwarder stopped");
}

/// Apply remote shutter triggers to the controller until the subscription ends
pub async fn listen_remote(
    bus: Arc<BusClient>,
    controller: Arc<Mutex<CameraController>>,
) -> anyhow::Result<()> {
    let mut subscriber = bus.subscribe_remote().await?;

    while let Some(msg) = subscriber.next().await {
        match serde_json::from_slice::<RemoteTriggerMessage>(&msg.payload) {
            Ok(trigger) => {
                info!("Remote trigger {:?} from {}", trigger.action, trigger.source);

                let mut controller = controller.lock().await;
                let result = match trigger.action {
                    RemoteAction::CapturePhoto => controller.capture_photo().await.map(|_| ()),
                    RemoteAction::StartRecording => controller.start_recording().await.map(|_| ()),
                    RemoteAction::PauseRecording => controller.pause_recording().await.map(|_| ()),
                    RemoteAction::ResumeRecording => {
                        controller.resume_recording().await.map(|_| ())
                    }
                    RemoteAction::StopRecording => controller.stop_recording().await.map(|_| ()),
                };

                if let Err(e) = result {
                    warn!("Remote trigger rejected: {}", e);
                }
            }
            Err(e) => {
                warn!("Failed to parse remote trigger: {}", e);
            }
        }
    }

    Ok(())
}
