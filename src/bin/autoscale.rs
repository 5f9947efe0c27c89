use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "autoscale", version)]
struct Cli {
    /// Log resolver and engine decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one surface activation and print the applied metrics as JSON.
    Compute(ComputeArgs),
    /// Convert a length to px under the globally scaled metrics.
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct ComputeArgs {
    /// Input scaling manifest JSON (must carry a device profile).
    #[arg(long)]
    manifest: PathBuf,

    /// Surface key to activate.
    #[arg(long, default_value = "main")]
    surface: String,

    /// The surface opts out of scaling.
    #[arg(long, conflicts_with = "design")]
    cancel: bool,

    /// The surface declares its own design size in dp (`0` means the global size).
    #[arg(long)]
    design: Option<f32>,

    /// Axis of `--design`.
    #[arg(long, value_enum, default_value_t = AxisChoice::Width)]
    axis: AxisChoice,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input scaling manifest JSON (must carry a device profile).
    #[arg(long)]
    manifest: PathBuf,

    /// Length to convert.
    #[arg(long, allow_negative_numbers = true)]
    value: f32,

    /// Unit of `--value`.
    #[arg(long, value_enum)]
    unit: autoscale::Unit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisChoice {
    Width,
    Height,
}

impl From<AxisChoice> for autoscale::Axis {
    fn from(value: AxisChoice) -> Self {
        match value {
            AxisChoice::Width => autoscale::Axis::Width,
            AxisChoice::Height => autoscale::Axis::Height,
        }
    }
}

#[derive(serde::Serialize)]
struct ComputeReport {
    surface: String,
    outcome: Option<autoscale::AdaptOutcome>,
    display: autoscale::DisplayMetrics,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Compute(args) => cmd_compute(args),
        Command::Convert(args) => cmd_convert(args),
    }
}

fn load_context(path: &Path) -> anyhow::Result<autoscale::ScalingContext> {
    let manifest = autoscale::ScalingManifest::from_path(path)?;
    if manifest.profile.is_none() {
        anyhow::bail!(
            "scaling manifest '{}' has no device profile",
            path.display()
        );
    }
    let ctx = manifest
        .into_context()
        .with_context(|| format!("build scaling context from '{}'", path.display()))?;
    Ok(ctx)
}

fn cmd_compute(args: ComputeArgs) -> anyhow::Result<()> {
    let mut ctx = load_context(&args.manifest)?;

    let capability = if args.cancel {
        autoscale::SurfaceCapability::Cancel
    } else if let Some(size_in_dp) = args.design {
        autoscale::SurfaceCapability::Custom(autoscale::DesignSpec {
            base_on: args.axis.into(),
            size_in_dp,
        })
    } else {
        autoscale::SurfaceCapability::None
    };
    let activation =
        autoscale::SurfaceActivation::new(args.surface.as_str()).with_capability(capability);

    let mut display = autoscale::DisplayMetrics::baseline(ctx.store().profile()?);
    let outcome = ctx.activate(&activation, &mut [&mut display])?;

    let report = ComputeReport {
        surface: args.surface,
        outcome,
        display,
    };
    let json = serde_json::to_string_pretty(&report).with_context(|| "serialize report")?;
    println!("{json}");
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut ctx = load_context(&args.manifest)?;

    let mut display = autoscale::DisplayMetrics::baseline(ctx.store().profile()?);
    ctx.adapt_global(&mut [&mut display])?;

    let px = autoscale::to_px(args.value, args.unit, &display);
    println!("{px}");
    Ok(())
}
