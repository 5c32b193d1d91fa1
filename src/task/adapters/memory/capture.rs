//! In-memory capture UI host.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::CaptureSource,
    ports::{CaptureRequest, ImageCapturePort, ImageCapturePortError, ImageCaptureResult},
};

/// Capture host that records presentation requests.
///
/// Photos never arrive on their own: tests resolve sessions through the
/// engine, mimicking the user picking (or dismissing) a photo.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageCapture {
    state: Arc<RwLock<CaptureState>>,
}

#[derive(Debug, Default)]
struct CaptureState {
    presented: Vec<CaptureRequest>,
    camera_missing: bool,
    denied: Vec<CaptureSource>,
}

impl InMemoryImageCapture {
    /// Creates a host with a working camera and library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a device without a camera.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCapturePortError::Runtime`] when lock acquisition
    /// fails.
    pub fn set_camera_missing(&self, missing: bool) -> ImageCaptureResult<()> {
        let mut state = self.state.write().map_err(runtime_error)?;
        state.camera_missing = missing;
        Ok(())
    }

    /// Simulates the user denying access to a source.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCapturePortError::Runtime`] when lock acquisition
    /// fails.
    pub fn deny(&self, source: CaptureSource) -> ImageCaptureResult<()> {
        let mut state = self.state.write().map_err(runtime_error)?;
        state.denied.push(source);
        Ok(())
    }

    /// Returns every successfully presented request, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCapturePortError::Runtime`] when lock acquisition
    /// fails.
    pub fn presented(&self) -> ImageCaptureResult<Vec<CaptureRequest>> {
        let state = self.state.read().map_err(runtime_error)?;
        Ok(state.presented.clone())
    }
}

fn runtime_error(err: impl ToString) -> ImageCapturePortError {
    ImageCapturePortError::runtime(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ImageCapturePort for InMemoryImageCapture {
    async fn present(&self, request: &CaptureRequest) -> ImageCaptureResult<()> {
        let mut state = self.state.write().map_err(runtime_error)?;
        if request.source == CaptureSource::Camera && state.camera_missing {
            return Err(ImageCapturePortError::CameraUnavailable);
        }
        if state.denied.contains(&request.source) {
            return Err(ImageCapturePortError::PermissionDenied(request.source));
        }
        state.presented.push(request.clone());
        Ok(())
    }
}
