use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::error::ReelError;
use crate::timeline::assemble::Composition;

/// Everything a renderer needs to produce one video.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Identifier of the composition (`Video<hex>`).
    pub composition_id: String,
    /// Assembled timeline to render.
    pub composition: Arc<Composition>,
    /// Where the finished video must be written.
    pub output_path: PathBuf,
}

/// A finished video file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderArtifact {
    /// Location of the written file.
    pub path: PathBuf,
}

/// Renderer-side failure; the detail ends up on the job's error state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct RenderFailure {
    /// Diagnostic text (typically the renderer's stderr).
    pub detail: String,
}

impl RenderFailure {
    /// Failure carrying `detail`.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl From<RenderFailure> for ReelError {
    fn from(f: RenderFailure) -> Self {
        ReelError::render(f.detail)
    }
}

/// External collaborator that turns a composition into a video file.
///
/// Implementations must be callable concurrently for different jobs.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render `request`, resolving once the output file is complete or rendering failed.
    async fn render(&self, request: RenderRequest) -> Result<RenderArtifact, RenderFailure>;
}
