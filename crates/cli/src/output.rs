//! Output writers: JSON document, or an `x,y,z` table via polars (CSV/Parquet).

use anyhow::{bail, Context, Result};
use paraline::kernel::PolyKernel;
use paraline::{KernelShape, ParalineParams, Point3, Shape};
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Parquet,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("csv") => Ok(Format::Csv),
            Some("parquet") => Ok(Format::Parquet),
            other => bail!(
                "unsupported output extension {:?} (use .json, .csv or .parquet)",
                other
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Parquet => "parquet",
        }
    }
}

/// Measures of the shape the reference kernel produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSummary {
    Solid {
        area: f64,
        perimeter: f64,
        surface_area: f64,
        centroid: [f64; 3],
        volume: f64,
        height: f64,
        vertices: usize,
        edges: usize,
        faces: usize,
    },
    Wire {
        length: f64,
        closed: bool,
        vertices: usize,
    },
}

impl ShapeSummary {
    pub fn of(shape: &KernelShape<PolyKernel>) -> Self {
        match shape {
            Shape::Solid(prism) => {
                let c = prism.base().centroid();
                ShapeSummary::Solid {
                    area: prism.base().area(),
                    perimeter: prism.base().perimeter(),
                    surface_area: prism.surface_area(),
                    centroid: [c.x, c.y, c.z],
                    volume: prism.volume(),
                    height: prism.height(),
                    vertices: prism.vertex_count(),
                    edges: prism.edge_count(),
                    faces: prism.face_count(),
                }
            }
            Shape::Wire(wire) => ShapeSummary::Wire {
                length: wire.length(),
                closed: wire.is_closed(),
                vertices: wire.vertices().len(),
            },
        }
    }
}

#[derive(Serialize)]
struct ProfileDoc<'a> {
    paraline_version: &'a str,
    params: &'a ParalineParams,
    num_steps: usize,
    boundary: Vec<[f64; 3]>,
    shape: &'a ShapeSummary,
}

/// Boundary points as a three-column frame.
pub fn boundary_frame(boundary: &[Point3<f64>]) -> PolarsResult<DataFrame> {
    let xs: Vec<f64> = boundary.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = boundary.iter().map(|p| p.y).collect();
    let zs: Vec<f64> = boundary.iter().map(|p| p.z).collect();
    df!("x" => xs, "y" => ys, "z" => zs)
}

/// Write the profile to `out`; the format follows the extension.
pub fn write_profile(
    out: &Path,
    params: &ParalineParams,
    num_steps: usize,
    boundary: &[Point3<f64>],
    shape: &ShapeSummary,
) -> Result<Format> {
    let format = Format::from_path(out)?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    match format {
        Format::Json => {
            let doc = ProfileDoc {
                paraline_version: paraline::VERSION,
                params,
                num_steps,
                boundary: boundary.iter().map(|p| [p.x, p.y, p.z]).collect(),
                shape,
            };
            fs::write(out, serde_json::to_vec_pretty(&doc)?)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        Format::Csv => {
            let mut df = boundary_frame(boundary)?;
            let mut file =
                File::create(out).with_context(|| format!("creating {}", out.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
        }
        Format::Parquet => {
            let mut df = boundary_frame(boundary)?;
            let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
    }
    Ok(format)
}
