use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stackface::{
    Balloon, BalloonConfig, Emotion, FaceConfig, FaceState, PixmapSurface, Renderer, Surface as _,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stackface", version)]
struct Cli {
    /// Face configuration JSON; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Milliseconds of simulated time per tick.
    #[arg(long, global = true, default_value_t = 1000.0 / 60.0)]
    tick_ms: f64,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate some ticks and write the final frame as a PNG.
    Frame(FrameArgs),
    /// Simulate a session cycling through every emotion and report redraw statistics.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Ticks to simulate before capturing.
    #[arg(long, default_value_t = 60)]
    ticks: u64,

    /// Emotion to show.
    #[arg(long, default_value = "neutral")]
    emotion: Emotion,

    /// Speech balloon text.
    #[arg(long)]
    say: Option<String>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Ticks between emotion changes.
    #[arg(long, default_value_t = 120)]
    every: u64,

    /// Write the final frame to this PNG path.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(
        cli.tick_ms.is_finite() && cli.tick_ms > 0.0,
        "--tick-ms must be positive"
    );
    let config = match &cli.config {
        Some(path) => FaceConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => FaceConfig::default(),
    };
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&config, cli.tick_ms, args),
        Command::Run(args) => cmd_run(&config, cli.tick_ms, args),
    }
}

fn build(config: &FaceConfig) -> anyhow::Result<Renderer<PixmapSurface>> {
    let surface = PixmapSurface::new(config.surface.width, config.surface.height)?;
    Ok(config.build_renderer(surface)?)
}

fn cmd_frame(config: &FaceConfig, tick_ms: f64, args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = build(config)?;
    renderer.bind_emotion(args.emotion)?;
    if let Some(text) = args.say {
        renderer.push_decorator(Balloon::new(BalloonConfig {
            text,
            ..BalloonConfig::default()
        })?);
    }

    let reference = FaceState {
        emotion: args.emotion,
        ..FaceState::default()
    };
    for _ in 0..args.ticks {
        renderer.update(tick_ms, &reference)?;
        renderer.surface_mut().present()?;
    }
    renderer.surface_mut().present()?;

    write_png(renderer.surface(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(Debug, Default)]
struct Stats {
    rendered: u64,
    cleared: u64,
    decorated: u64,
    retired: u64,
    slowest: Duration,
}

fn cmd_run(config: &FaceConfig, tick_ms: f64, args: RunArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be at least 1");
    let mut renderer = build(config)?;
    let mut reference = FaceState::default();
    let mut stats = Stats::default();

    for tick in 0..args.ticks {
        let idx = (tick / args.every) as usize % Emotion::ALL.len();
        reference.emotion = Emotion::ALL[idx];

        let started = Instant::now();
        let report = renderer
            .update(tick_ms, &reference)
            .with_context(|| format!("tick {tick}"))?;
        renderer.surface_mut().present()?;
        stats.slowest = stats.slowest.max(started.elapsed());

        stats.rendered += u64::from(report.rendered);
        stats.cleared += u64::from(report.cleared);
        stats.decorated += report.decorated as u64;
        stats.retired += report.retired as u64;
    }

    tracing::info!(
        ticks = args.ticks,
        rendered = stats.rendered,
        cleared = stats.cleared,
        decorated = stats.decorated,
        retired = stats.retired,
        slowest = ?stats.slowest,
        "session finished"
    );
    println!(
        "ticks={} rendered={} cleared={} decorator_draws={} retired={} slowest={:?}",
        args.ticks, stats.rendered, stats.cleared, stats.decorated, stats.retired, stats.slowest
    );

    if let Some(out) = args.out {
        write_png(renderer.surface(), &out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn write_png(surface: &PixmapSurface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &surface.to_rgba8(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}
