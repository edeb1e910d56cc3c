//! pbrt-v3 curve shape output
//!
//! One `Shape "curve"` record per cubic Bezier curve, preceded by comment
//! lines naming the source file, curve count and scene bounds.

use std::io::{self, Write};

use super::bounds::SceneBounds;
use crate::curves::CurveBuffers;

/// Values reported in the comment header
#[derive(Debug, Clone)]
pub struct EmitHeader<'a> {
    /// Input file name as given on the command line
    pub source: &'a str,
    /// Reported verbatim; negative means file thickness was used
    pub user_thickness: f32,
}

/// Write a single cylinder curve record
pub fn write_curve_record<W: Write>(
    writer: &mut W,
    points: &[f32],
    width0: f32,
    width1: f32,
) -> io::Result<()> {
    write!(writer, "Shape \"curve\" \"string type\" [ \"cylinder\" ] \"point P\" [ ")?;
    for p in points {
        write!(writer, "{:.6} ", p)?;
    }
    writeln!(
        writer,
        " ] \"float width0\" [ {:.6} ] \"float width1\" [ {:.6} ]",
        width0, width1
    )
}

/// Write the full pbrt scene fragment for `buffers`
pub fn write_pbrt<W: Write>(
    writer: &mut W,
    buffers: &CurveBuffers,
    header: &EmitHeader<'_>,
) -> io::Result<()> {
    let bounds = SceneBounds::from_buffers(buffers);
    let num_curves = buffers.num_curves();

    writeln!(writer, "# Converted from \"{}\" by cyhair2pbrt", header.source)?;
    writeln!(
        writer,
        "# The number of strands = {}. user_thickness = {:.6}",
        num_curves, header.user_thickness
    )?;
    writeln!(
        writer,
        "# Scene bounds: ({:.6}, {:.6}, {:.6}) - ({:.6}, {:.6}, {:.6})\n\n",
        bounds.min[0], bounds.min[1], bounds.min[2], bounds.max[0], bounds.max[1], bounds.max[2]
    )?;

    for i in 0..num_curves {
        let (width0, width1) = buffers.curve_widths(i);
        write_curve_record(writer, buffers.curve_points(i), width0, width1)?;
    }
    Ok(())
}

/// Render into memory
pub fn render_pbrt(buffers: &CurveBuffers, header: &EmitHeader<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_pbrt(&mut out, buffers, header);
    out
}
