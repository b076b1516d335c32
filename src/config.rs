//! Service configuration loaded from TOML.
//!
//! ```toml
//! output_dir = "public/videos"
//! video_url_prefix = "/videos"
//!
//! [renderer]
//! program = "npx"
//! args = ["remotion", "render", "{composition_id}", "{output}", "--codec", "h264"]
//!
//! [retention]
//! max_jobs = 1024
//! ttl_secs = 86400
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};
use crate::jobs::store::RetentionPolicy;

/// Default number of jobs kept in the job table.
pub const DEFAULT_MAX_JOBS: usize = 1024;

/// Top-level service settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Directory finished videos are written to (`{output_dir}/{job_id}.mp4`).
    pub output_dir: PathBuf,
    /// Public URL prefix for finished videos (`{prefix}/{job_id}.mp4`).
    pub video_url_prefix: String,
    /// `[renderer]` table.
    pub renderer: RendererConfig,
    /// `[retention]` table.
    pub retention: RetentionConfig,
}

/// External renderer invocation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Executable, resolved through `PATH`.
    pub program: String,
    /// Argument templates; `{composition_id}`, `{composition_json}` and `{output}` are substituted.
    pub args: Vec<String>,
}

/// Job table limits. Only finished jobs are ever evicted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetentionConfig {
    /// Most jobs kept at once; unbounded when absent.
    pub max_jobs: Option<usize>,
    /// Seconds a finished job stays queryable; forever when absent.
    pub ttl_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/videos"),
            video_url_prefix: "/videos".to_owned(),
            renderer: RendererConfig::default(),
            retention: RetentionConfig::default(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_owned(),
            args: [
                "remotion",
                "render",
                "{composition_id}",
                "{output}",
                "--codec",
                "h264",
                "--props",
                "{composition_json}",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_jobs: Some(DEFAULT_MAX_JOBS),
            ttl_secs: None,
        }
    }
}

impl RetentionConfig {
    /// Policy enforced by the job table.
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_jobs: self.max_jobs,
            ttl: self.ttl_secs.map(Duration::from_secs),
        }
    }
}

impl ServiceConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> ReelResult<Self> {
        let cfg: Self = toml::from_str(text).map_err(|e| ReelError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value constraints not expressible in the TOML shape.
    pub fn validate(&self) -> ReelResult<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ReelError::config("output_dir must not be empty"));
        }
        if self.renderer.program.trim().is_empty() {
            return Err(ReelError::config("renderer.program must not be empty"));
        }
        if self.retention.max_jobs == Some(0) {
            return Err(ReelError::config("retention.max_jobs must be > 0"));
        }
        if self.retention.ttl_secs == Some(0) {
            return Err(ReelError::config("retention.ttl_secs must be > 0"));
        }
        Ok(())
    }

    /// Output file for `job_id`.
    pub fn artifact_path(&self, job_id: &str) -> PathBuf {
        self.output_dir.join(format!("{job_id}.mp4"))
    }

    /// Public URL for `job_id`'s video.
    pub fn video_url(&self, job_id: &str) -> String {
        format!("{}/{job_id}.mp4", self.video_url_prefix.trim_end_matches('/'))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
