//! Image capture port.
//!
//! Presenting is fire-and-forget: the host shows its camera or library UI and
//! later reports the photo (or a cancellation) through
//! `TaskLifecycleEngine::resolve_capture`.

use crate::task::domain::{CapturePurpose, CaptureSessionId, CaptureSource, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for capture port operations.
pub type ImageCaptureResult<T> = Result<T, ImageCapturePortError>;

/// What the host is asked to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Session the eventual photo must be resolved against.
    pub session_id: CaptureSessionId,
    /// Task being captured for.
    pub task_id: TaskId,
    /// Leg being captured.
    pub purpose: CapturePurpose,
    /// Preferred photo source.
    pub source: CaptureSource,
}

/// Host capture UI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageCapturePort: Send + Sync {
    /// Presents the capture UI for the request.
    async fn present(&self, request: &CaptureRequest) -> ImageCaptureResult<()>;
}

/// Errors returned by capture adapters.
#[derive(Debug, Clone, Error)]
pub enum ImageCapturePortError {
    /// The device has no usable camera.
    #[error("camera unavailable")]
    CameraUnavailable,

    /// The user denied access to the camera or library.
    #[error("permission denied for {0:?}")]
    PermissionDenied(CaptureSource),

    /// Generic capture failure.
    #[error("capture error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl ImageCapturePortError {
    /// Wraps a capture error.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
