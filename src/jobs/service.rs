use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::foundation::core::{FRAME_RATE, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::jobs::state::{JobEvent, JobId, JobTicket, RenderJob};
use crate::jobs::store::JobStore;
use crate::render::renderer::{RenderRequest, Renderer};
use crate::sections::registry::ComponentRegistry;
use crate::sections::validate::VideoRequest;
use crate::timeline::assemble::{Composition, compile_request};

/// Front door for render jobs: validates, assembles, hands off to the renderer and tracks status.
pub struct RenderService {
    registry: Arc<ComponentRegistry>,
    store: Arc<JobStore>,
    renderer: Arc<dyn Renderer>,
    config: Arc<ServiceConfig>,
    fps: Fps,
}

impl RenderService {
    /// Service with the built-in section registry and the retention policy from `config`.
    pub fn new(config: ServiceConfig, renderer: Arc<dyn Renderer>) -> Self {
        let store = JobStore::new(config.retention.policy());
        Self {
            registry: Arc::new(ComponentRegistry::builtin()),
            store: Arc::new(store),
            renderer,
            config: Arc::new(config),
            fps: FRAME_RATE,
        }
    }

    /// Replace the section registry.
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Replace the job table.
    pub fn with_store(mut self, store: JobStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Section registry requests are validated against.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Settings the service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// `tag -> description` for every registered section type.
    pub fn section_types(&self) -> BTreeMap<String, String> {
        self.registry.section_types()
    }

    /// Decode a JSON request and [`submit`](Self::submit) it.
    pub fn submit_json(&self, request: &Value) -> ReelResult<JobTicket> {
        self.submit(&VideoRequest::from_value(request)?)
    }

    /// Validate and assemble `request`, start rendering it in the background and return at once.
    ///
    /// Validation and assembly failures are returned here and create no job. Renderer failures
    /// only ever show up on the job. Must be called from within a Tokio runtime.
    pub fn submit(&self, request: &VideoRequest) -> ReelResult<JobTicket> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ReelError::Other(anyhow::anyhow!("render jobs need a Tokio runtime: {e}")))?;

        let job_id = JobId::new();
        let composition = Arc::new(compile_request(
            &self.registry,
            request,
            job_id.composition_id(),
            self.fps,
        )?);

        self.store.insert(RenderJob::new(job_id, Utc::now()));
        tracing::info!(
            job = %job_id,
            sections = composition.sections.len(),
            frames = composition.total_duration_frames,
            "job accepted"
        );

        self.store.apply(&job_id, JobEvent::RenderStarted)?;
        let task = RenderTask {
            job_id,
            composition,
            store: Arc::clone(&self.store),
            renderer: Arc::clone(&self.renderer),
            config: Arc::clone(&self.config),
        };
        runtime.spawn(task.run());

        Ok(JobTicket::accepted(job_id))
    }

    /// Current snapshot of `job_id`. Never waits on the renderer.
    pub fn status(&self, job_id: &str) -> ReelResult<RenderJob> {
        let id: JobId = job_id.parse()?;
        self.status_of(&id)
    }

    /// [`status`](Self::status) for an already parsed identifier.
    pub fn status_of(&self, id: &JobId) -> ReelResult<RenderJob> {
        self.store
            .get(id)
            .ok_or_else(|| ReelError::not_found(format!("job '{id}'")))
    }

    /// Resolve once `job_id` reaches `completed` or `error`.
    pub async fn wait(&self, job_id: &str) -> ReelResult<RenderJob> {
        let id: JobId = job_id.parse()?;
        let mut rx = self
            .store
            .subscribe(&id)
            .ok_or_else(|| ReelError::not_found(format!("job '{id}'")))?;

        loop {
            {
                let snap = rx.borrow_and_update();
                if snap.status.is_terminal() {
                    return Ok(snap.clone());
                }
            }
            if rx.changed().await.is_err() {
                // Evicted while waiting: the last value seen is all there is.
                let snap = rx.borrow().clone();
                if snap.status.is_terminal() {
                    return Ok(snap);
                }
                return Err(ReelError::not_found(format!("job '{id}' was evicted")));
            }
        }
    }
}

impl std::fmt::Debug for RenderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderService")
            .field("registry", &self.registry)
            .field("jobs", &self.store.len())
            .field("fps", &self.fps)
            .finish_non_exhaustive()
    }
}

struct RenderTask {
    job_id: JobId,
    composition: Arc<Composition>,
    store: Arc<JobStore>,
    renderer: Arc<dyn Renderer>,
    config: Arc<ServiceConfig>,
}

impl RenderTask {
    async fn run(self) {
        let id = self.job_id.to_string();
        let request = RenderRequest {
            composition_id: self.composition.id.clone(),
            composition: Arc::clone(&self.composition),
            output_path: self.config.artifact_path(&id),
        };

        // A panicking renderer must still leave the job in a terminal state.
        let renderer = Arc::clone(&self.renderer);
        let outcome = tokio::spawn(async move { renderer.render(request).await }).await;

        let event = match outcome {
            Ok(Ok(artifact)) => {
                tracing::info!(job = %id, path = %artifact.path.display(), "render finished");
                JobEvent::RenderSucceeded {
                    artifact_path: artifact.path,
                    video_url: self.config.video_url(&id),
                    duration_secs: self.composition.duration_secs_ceil(),
                }
            }
            Ok(Err(failure)) => {
                tracing::warn!(job = %id, error = %failure, "render failed");
                JobEvent::RenderFailed {
                    detail: failure.detail,
                }
            }
            Err(join) => {
                tracing::error!(job = %id, error = %join, "render task aborted");
                JobEvent::RenderFailed {
                    detail: format!("renderer aborted: {}", panic_detail(join)),
                }
            }
        };

        match self.store.apply(&self.job_id, event) {
            Ok(job) => debug_assert!(job.status.is_terminal()),
            Err(e) => tracing::warn!(job = %id, error = %e, "could not record render outcome"),
        }
    }
}

fn panic_detail(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/service.rs"]
mod tests;
