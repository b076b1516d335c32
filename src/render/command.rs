use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::config::RendererConfig;
use crate::render::renderer::{RenderArtifact, RenderFailure, RenderRequest, Renderer};

const VAR_COMPOSITION_ID: &str = "{composition_id}";
const VAR_COMPOSITION_JSON: &str = "{composition_json}";
const VAR_OUTPUT: &str = "{output}";

/// Renderer that runs an external program once per job.
///
/// The composition is written as JSON next to the output file, then `program` is spawned with
/// `args` after substituting `{composition_id}`, `{composition_json}` and `{output}`.
#[derive(Clone, Debug)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Renderer invoking `program` with argument templates `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Renderer described by a `[renderer]` config section.
    pub fn from_config(cfg: &RendererConfig) -> Self {
        Self::new(cfg.program.clone(), cfg.args.clone())
    }

    /// Program that will be spawned.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn expand_args(&self, composition_id: &str, composition_json: &Path, output: &Path) -> Vec<String> {
        let json = composition_json.display().to_string();
        let out = output.display().to_string();
        self.args
            .iter()
            .map(|a| {
                a.replace(VAR_COMPOSITION_ID, composition_id)
                    .replace(VAR_COMPOSITION_JSON, &json)
                    .replace(VAR_OUTPUT, &out)
            })
            .collect()
    }
}

/// Path the composition JSON is written to for `output` (`<id>.composition.json`).
pub fn composition_json_path(output: &Path) -> PathBuf {
    output.with_extension("composition.json")
}

#[async_trait::async_trait]
impl Renderer for CommandRenderer {
    #[tracing::instrument(skip(self, request), fields(composition = %request.composition_id))]
    async fn render(&self, request: RenderRequest) -> Result<RenderArtifact, RenderFailure> {
        if request.composition.is_empty() {
            return Err(RenderFailure::new(
                "composition has zero length; nothing to render",
            ));
        }

        if let Some(parent) = request.output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RenderFailure::new(format!(
                    "failed to create output directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let json_path = composition_json_path(&request.output_path);
        let json = serde_json::to_vec_pretty(request.composition.as_ref())
            .map_err(|e| RenderFailure::new(format!("failed to serialize composition: {e}")))?;
        tokio::fs::write(&json_path, json).await.map_err(|e| {
            RenderFailure::new(format!(
                "failed to write composition to '{}': {e}",
                json_path.display()
            ))
        })?;

        let args = self.expand_args(&request.composition_id, &json_path, &request.output_path);
        tracing::info!(program = %self.program, ?args, "spawning renderer");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                RenderFailure::new(format!("failed to spawn '{}': {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderFailure::new(format!(
                "{} exited with status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        match tokio::fs::metadata(&request.output_path).await {
            Ok(meta) if meta.is_file() => Ok(RenderArtifact {
                path: request.output_path,
            }),
            _ => Err(RenderFailure::new(format!(
                "{} exited successfully but produced no file at '{}'",
                self.program,
                request.output_path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/command.rs"]
mod tests;
