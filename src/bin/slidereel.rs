use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    /// Service config (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a request with the configured renderer and print the final job.
    Render(RenderArgs),
    /// Print the assembled timeline for a request.
    Timeline(InputArgs),
    /// Print interpolated element values at one frame of a request.
    Sample(SampleArgs),
    /// List the registered section types.
    Types,
    /// Print a complete sample request.
    Example,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Request JSON (`-` for stdin).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Override the output directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override the renderer program.
    #[arg(long)]
    program: Option<String>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => slidereel::ServiceConfig::load(path)?,
        None => slidereel::ServiceConfig::default(),
    };

    match cli.cmd {
        Command::Render(args) => cmd_render(config, args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Types => print_json(&slidereel::ComponentRegistry::builtin().section_types()),
        Command::Example => print_json(&slidereel::example_request()),
    }
}

fn cmd_render(mut config: slidereel::ServiceConfig, args: RenderArgs) -> anyhow::Result<()> {
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(program) = args.program {
        config.renderer.program = program;
    }
    config.validate()?;

    let request = read_request(&args.input.in_path)?;
    let renderer = Arc::new(slidereel::CommandRenderer::from_config(&config.renderer));
    let service = slidereel::RenderService::new(config, renderer);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")?;
    let job = runtime.block_on(async {
        let ticket = service.submit(&request)?;
        tracing::info!(job = %ticket.job_id, "{}", ticket.message);
        service.wait(&ticket.job_id.to_string()).await
    })?;

    print_json(&job)?;
    if job.status == slidereel::JobStatus::Error {
        anyhow::bail!(
            "render failed: {}",
            job.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn cmd_timeline(args: InputArgs) -> anyhow::Result<()> {
    let comp = compile(&args.in_path)?;
    print_json(&comp)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let comp = compile(&args.input.in_path)?;
    let frame = comp.sample(args.frame)?.with_context(|| {
        format!(
            "frame {} is past the end of the timeline ({} frames)",
            args.frame, comp.total_duration_frames
        )
    })?;
    print_json(&frame)
}

fn compile(path: &Path) -> anyhow::Result<slidereel::Composition> {
    let request = read_request(path)?;
    let comp = slidereel::compile_request(
        &slidereel::ComponentRegistry::builtin(),
        &request,
        slidereel::JobId::new().composition_id(),
        slidereel::FRAME_RATE,
    )?;
    Ok(comp)
}

fn read_request(path: &Path) -> anyhow::Result<slidereel::VideoRequest> {
    let text = if path == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read request from stdin")?;
        s
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display()))?
    };
    Ok(slidereel::VideoRequest::from_json_str(&text)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}
