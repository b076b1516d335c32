use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::foundation::error::{ReelError, ReelResult};

/// Process-unique render job identifier (UUID v4). Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(Uuid);

impl JobId {
    /// Fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Composition identifier handed to the renderer (`Video` + 32 hex digits).
    pub fn composition_id(&self) -> String {
        format!("Video{}", self.0.simple())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for JobId {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ReelError::not_found(format!("job '{s}'")))
    }
}

impl serde::Serialize for JobId {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Lifecycle stage of a render job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted and assembled.
    Processing,
    /// Handed to the renderer.
    Rendering,
    /// Video written.
    Completed,
    /// Renderer failed.
    Error,
}

impl JobStatus {
    /// Progress percentage reported while in this stage.
    pub fn progress(self) -> u8 {
        match self {
            Self::Processing => 25,
            Self::Rendering => 50,
            Self::Completed => 100,
            Self::Error => 0,
        }
    }

    /// `true` for `completed` and `error`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Wire name (`"rendering"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Rendering => "rendering",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened to a job.
#[derive(Clone, Debug, PartialEq)]
pub enum JobEvent {
    /// The renderer was invoked.
    RenderStarted,
    /// The renderer produced a video.
    RenderSucceeded {
        /// Where the video was written.
        artifact_path: PathBuf,
        /// Public location of the video.
        video_url: String,
        /// Whole seconds, rounded up.
        duration_secs: u64,
    },
    /// The renderer failed.
    RenderFailed {
        /// Renderer diagnostic.
        detail: String,
    },
}

impl JobEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::RenderStarted => "render_started",
            Self::RenderSucceeded { .. } => "render_succeeded",
            Self::RenderFailed { .. } => "render_failed",
        }
    }
}

/// Snapshot of a render job as reported to callers.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderJob {
    /// Job identifier.
    pub job_id: JobId,
    /// Current lifecycle stage.
    pub status: JobStatus,
    /// `0..=100`, non-decreasing until the job fails.
    pub progress: u8,
    /// Output file, once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<PathBuf>,
    /// Public URL of the output, once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Whole seconds of video, rounded up, once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    /// Renderer diagnostic, once failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Time of the last transition.
    pub updated_at: DateTime<Utc>,
}

impl RenderJob {
    /// Freshly submitted job in `processing`.
    pub fn new(job_id: JobId, now: DateTime<Utc>) -> Self {
        Self {
            job_id,
            status: JobStatus::Processing,
            progress: JobStatus::Processing.progress(),
            artifact_path: None,
            video_url: None,
            duration_secs: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance the job. Only `processing -> rendering -> completed | error` is allowed; any other
    /// transition is rejected and leaves the job untouched.
    pub fn apply(&mut self, event: JobEvent, now: DateTime<Utc>) -> ReelResult<()> {
        let next = match (self.status, &event) {
            (JobStatus::Processing, JobEvent::RenderStarted) => JobStatus::Rendering,
            (JobStatus::Rendering, JobEvent::RenderSucceeded { .. }) => JobStatus::Completed,
            (JobStatus::Rendering, JobEvent::RenderFailed { .. }) => JobStatus::Error,
            (status, event) => {
                return Err(ReelError::assembly(format!(
                    "job {}: invalid transition {status} --{}-->",
                    self.job_id,
                    event.name()
                )));
            }
        };

        match event {
            JobEvent::RenderStarted => {}
            JobEvent::RenderSucceeded {
                artifact_path,
                video_url,
                duration_secs,
            } => {
                self.artifact_path = Some(artifact_path);
                self.video_url = Some(video_url);
                self.duration_secs = Some(duration_secs);
            }
            JobEvent::RenderFailed { detail } => {
                self.error = Some(detail);
            }
        }
        self.status = next;
        self.progress = next.progress();
        self.updated_at = now;
        Ok(())
    }
}

/// Acknowledgement returned by `submit`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTicket {
    /// Identifier to poll with.
    pub job_id: JobId,
    /// Always `processing`.
    pub status: JobStatus,
    /// Human readable acknowledgement.
    pub message: String,
    /// Rough wall-clock estimate.
    pub estimated_time: String,
}

impl JobTicket {
    pub(crate) fn accepted(job_id: JobId) -> Self {
        Self {
            job_id,
            status: JobStatus::Processing,
            message: "Video generation started".to_owned(),
            estimated_time: "2-5 minutes".to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/state.rs"]
mod tests;
