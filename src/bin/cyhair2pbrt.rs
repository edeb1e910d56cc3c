//! Convert CyHair files to pbrt curve shapes
//!
//! Usage:
//!   cyhair2pbrt <CyHair file> <pbrt output file | -> [lod level] [max strands] [thickness] [options]
//!
//! Options:
//!   --config <file.json>   Load settings from a JSON file (arguments override it)
//!   --seed <n>             Seed for LOD sample selection
//!   --max-radius <r>       Radius cap of merged LOD curves
//!   --sort <root|start-end|samples>  LOD similarity metric

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use hair_curves::{convert_file, ConversionConfig, OutputTarget, SortMetric};

fn print_usage(program: &str) {
    eprintln!(
        "usage: {} [CyHair filename] [pbrt output filename] (lod level) (max strands) (thickness)",
        program
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file.json>             Load settings from a JSON file");
    eprintln!("  --seed <n>                       Seed for LOD sample selection");
    eprintln!("  --max-radius <r>                 Radius cap of merged LOD curves");
    eprintln!("  --sort <root|start-end|samples>  LOD similarity metric");
    eprintln!();
    eprintln!("Use \"-\" as output filename to write to standard output.");
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> anyhow::Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", flag))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cyhair2pbrt");

    if args.len() <= 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(program);
        std::process::exit(1);
    }

    let input = PathBuf::from(&args[1]);
    let output = OutputTarget::from_arg(&args[2]);

    // Parse options
    let mut positional: Vec<&str> = Vec::new();
    let mut config_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut max_radius: Option<f32> = None;
    let mut sort_metric: Option<SortMetric> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(flag_value(&args, i, "--config")?));
            }
            "--seed" => {
                i += 1;
                seed = Some(flag_value(&args, i, "--seed")?.parse().context("invalid --seed")?);
            }
            "--max-radius" => {
                i += 1;
                let value: f32 = flag_value(&args, i, "--max-radius")?
                    .parse()
                    .context("invalid --max-radius")?;
                if !value.is_finite() || value <= 0.0 {
                    bail!("--max-radius must be a positive number, got {}", value);
                }
                max_radius = Some(value);
            }
            "--sort" => {
                i += 1;
                sort_metric = Some(match flag_value(&args, i, "--sort")? {
                    "root" => SortMetric::RootPoint,
                    "start-end" => SortMetric::StartAndEnd,
                    "samples" => SortMetric::SamplePoints,
                    other => bail!("unknown --sort metric '{}'", other),
                });
            }
            other => positional.push(other),
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => ConversionConfig::load_from_file(path)?,
        None => ConversionConfig::default(),
    };

    if let Some(lod_level) = positional.first() {
        config.lod_level = lod_level.parse().context("invalid lod level")?;
    }
    if let Some(max_strands) = positional.get(1) {
        let max_strands: i64 = max_strands.parse().context("invalid max strands")?;
        // Negative converts all strands
        config.max_strands = usize::try_from(max_strands).ok();
    }
    if let Some(thickness) = positional.get(2) {
        let thickness: f32 = thickness.parse().context("invalid thickness")?;
        config.thickness = (thickness > 0.0).then_some(thickness);
    }
    if let Some(seed) = seed {
        config.lod.seed = seed;
    }
    if let Some(max_radius) = max_radius {
        config.lod.max_radius = max_radius;
    }
    if let Some(sort_metric) = sort_metric {
        config.lod.sort_metric = sort_metric;
    }

    let summary = convert_file(&input, &output, &config)?;
    log::info!("Converted {} strands.", summary.curves);

    Ok(())
}
