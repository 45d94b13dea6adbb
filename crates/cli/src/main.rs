use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use paraline::kernel::PolyKernel;
use paraline::{GenCfg, ParalineFeature, ParalineParams};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod output;
mod provenance;

use output::ShapeSummary;
use provenance::Payload;

#[derive(Parser)]
#[command(name = "paraline")]
#[command(about = "Generate Paraline lens profiles and extruded solids")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the closed boundary, extrude it, and write the result
    Generate(GenerateArgs),
    /// Print version, defaults and code revision as JSON
    Report,
}

#[derive(Args, Clone, Debug)]
struct GenerateArgs {
    /// JSON parameter file; accepts `H`/`ExtrudeHeight`/`Resolution` or snake_case
    #[arg(long)]
    params: Option<PathBuf>,
    /// Height parameter H (overrides the file)
    #[arg(long)]
    h: Option<f64>,
    /// Extrusion distance along +Z (overrides the file)
    #[arg(long, allow_negative_numbers = true)]
    extrude_height: Option<f64>,
    /// Sample spacing on [-1, 1] (overrides the file)
    #[arg(long)]
    resolution: Option<f64>,
    /// Reject resolutions that need more samples than this
    #[arg(long, default_value_t = GenCfg::default().max_steps)]
    max_steps: usize,
    /// Output path; .json, .csv or .parquet
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate(args) => generate(&args).map(|_| ()),
        Action::Report => report(),
    }
}

fn load_params(args: &GenerateArgs) -> Result<ParalineParams> {
    let mut params = match &args.params {
        Some(path) => {
            let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("parsing params {}", path.display()))?
        }
        None => ParalineParams::default(),
    };
    if let Some(h) = args.h {
        params.h = h;
    }
    if let Some(extrude_height) = args.extrude_height {
        params.extrude_height = extrude_height;
    }
    if let Some(resolution) = args.resolution {
        params.resolution = resolution;
    }
    Ok(params)
}

/// Returns the provenance sidecar path.
fn generate(args: &GenerateArgs) -> Result<PathBuf> {
    let params = load_params(args)?;
    let cfg = GenCfg {
        max_steps: args.max_steps,
    };
    let feature = ParalineFeature::with_cfg(params, cfg).context("invalid paraline parameters")?;
    let steps = feature.num_steps();
    let boundary = feature.boundary()?;
    let shape = feature.execute_on(&PolyKernel::default(), &boundary)?;
    let summary = ShapeSummary::of(&shape);
    tracing::info!(
        h = params.h,
        extrude_height = params.extrude_height,
        resolution = params.resolution,
        steps,
        points = boundary.len(),
        solid = shape.is_solid(),
        "generate"
    );

    let format = output::write_profile(&args.out, &params, steps, &boundary, &summary)?;
    let payload = Payload::new(
        "generate",
        serde_json::json!({
            "paraline": params,
            "max_steps": args.max_steps,
            "num_steps": steps,
            "format": format.as_str(),
            "shape": summary,
        }),
    );
    let sidecar = provenance::write_sidecar(&args.out, payload)?;
    tracing::info!(out = %args.out.display(), provenance = %sidecar.display(), "wrote");
    Ok(sidecar)
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "paraline_version": paraline::VERSION,
        "defaults": ParalineParams::default(),
        "max_steps": GenCfg::default().max_steps,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
