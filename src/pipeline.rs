//! End-to-end conversion: load, convert, emit
//!
//! Output is rendered in memory and only written once loading and conversion
//! have succeeded, so a failed run never leaves a partial output file.

use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ConversionConfig;
use crate::curves::to_cubic_bezier_curves;
use crate::cyhair::CyHairFile;
use crate::emit::{render_pbrt, EmitHeader, SceneBounds};

/// Where the pbrt text goes
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` means standard output
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(arg))
        }
    }

    fn write_all(&self, bytes: &[u8]) -> anyhow::Result<()> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(bytes)?;
                stdout.flush()?;
            }
            OutputTarget::File(path) => {
                std::fs::write(path, bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Ok(())
    }
}

/// What a run produced
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub strands_in_file: usize,
    pub curves: usize,
    pub bounds: SceneBounds,
}

/// Convert `input` and write the pbrt text to `output`
pub fn convert_file(
    input: &Path,
    output: &OutputTarget,
    config: &ConversionConfig,
) -> anyhow::Result<ConversionSummary> {
    let start = std::time::Instant::now();
    config.validate()?;

    let hair = CyHairFile::load(input)
        .with_context(|| format!("Failed to load CyHair file [ {} ]", input.display()))?;
    if !hair.info_text().is_empty() {
        log::debug!("[CyHair] Info: {}", hair.info_text());
    }

    let buffers = to_cubic_bezier_curves(&hair, &config.to_convert_options())
        .with_context(|| format!("Failed to convert CyHair data [ {} ]", input.display()))?;

    let source = input.display().to_string();
    let header = EmitHeader {
        source: &source,
        user_thickness: config.reported_thickness(),
    };
    let bytes = render_pbrt(&buffers, &header);
    output.write_all(&bytes)?;

    let summary = ConversionSummary {
        strands_in_file: hair.num_strands(),
        curves: buffers.num_curves(),
        bounds: SceneBounds::from_buffers(&buffers),
    };
    log::debug!(
        "Conversion finished in {:.2}ms: {}",
        start.elapsed().as_secs_f64() * 1000.0,
        serde_json::to_string(&summary).unwrap_or_default()
    );
    Ok(summary)
}
