//! Fill command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, info};
use serde::Serialize;

use motif_tiler::{
    FieldSet, MotifSvg, PatternTiler, Placement, Polygon, Shape, extract_polygons_from_svg,
    read_pattern_attributes,
};

use super::common::{
    PatternArgs, ShapeFill, generate_png, load_motif, placements_to_svg, read_svg_input,
    write_output,
};

#[derive(Args, Debug)]
pub struct FillArgs {
    /// Region SVG whose closed shapes get filled ('-' for stdin)
    pub region: String,

    /// Motif SVG; its document size is the motif size
    #[arg(short, long, value_name = "FILE")]
    pub motif: PathBuf,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Rotation of the owning shapes in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub owner_rotation: f64,

    /// Seed for wobble and angle jitter (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit placements as JSON instead of SVG
    #[arg(long)]
    pub json: bool,

    /// Draw the shape outlines over the fill (SVG and PNG output)
    #[arg(long)]
    pub outline: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also render the SVG result to this PNG
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// PNG pixels per SVG unit
    #[arg(long, default_value_t = 2.0)]
    pub png_scale: f64,
}

/// A placement in JSON output format. Rotation is in degrees.
#[derive(Serialize)]
struct JsonPlacement {
    x: f64,
    y: f64,
    rotation: f64,
}

/// A shape with its placements in JSON output.
#[derive(Serialize)]
struct JsonShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    index: usize,
    scale: f64,
    cells: usize,
    culled: usize,
    placements: Vec<JsonPlacement>,
}

#[derive(Serialize)]
struct JsonOutput {
    seed: u64,
    shapes: Vec<JsonShape>,
}

impl From<&ShapeFill> for JsonShape {
    fn from(fill: &ShapeFill) -> Self {
        JsonShape {
            id: fill.id.clone(),
            index: fill.index,
            scale: fill.scale,
            cells: fill.stats.cells,
            culled: fill.stats.culled,
            placements: fill
                .placements
                .iter()
                .map(|p| JsonPlacement {
                    x: p.position.x,
                    y: p.position.y,
                    rotation: p.rotation.to_degrees(),
                })
                .collect(),
        }
    }
}

/// Fill every polygon with its own tiler.
///
/// Each shape's parameters are the flags layered over its
/// `data-pattern-*` attributes (looked up by id) and the base fields.
/// Shape `i` is seeded with `seed + i` so shapes don't share jitter.
pub fn fill_shapes(
    polygons: &[Polygon],
    motif: &MotifSvg,
    pattern: &PatternArgs,
    base: &FieldSet,
    attributes: &BTreeMap<String, FieldSet>,
    owner_rotation: f64,
    seed: u64,
) -> Vec<ShapeFill> {
    polygons
        .iter()
        .enumerate()
        .map(|(index, polygon)| {
            let shape_fields = polygon.id.as_ref().and_then(|id| attributes.get(id));
            let params = pattern.parameters_for(base, shape_fields);
            let scale = params.scale();

            let mut tiler = PatternTiler::with_motif(motif)
                .with_parameters(params)
                .with_seed(seed.wrapping_add(index as u64));
            let shape = Shape::new(polygon.clone(), owner_rotation);

            let mut placements: Vec<Placement> = Vec::new();
            let stats = tiler.fill_shape(&shape, &mut placements);
            debug!(
                "shape {} ({}): {} placements, {} culled",
                index,
                polygon.id.as_deref().unwrap_or("-"),
                stats.emitted,
                stats.culled
            );

            ShapeFill {
                id: polygon.id.clone(),
                index,
                scale,
                placements,
                stats,
            }
        })
        .collect()
}

/// Execute the fill command.
pub fn cmd_fill(args: &FillArgs) -> Result<()> {
    let svg_content = read_svg_input(&args.region)?;

    let polygons = extract_polygons_from_svg(&svg_content)
        .context("Failed to extract shapes from region SVG")?;
    let attributes =
        read_pattern_attributes(&svg_content).context("Failed to read data-pattern attributes")?;
    let motif = load_motif(&args.motif)?;
    let base = args.pattern.base_fields()?;

    let with_holes = polygons.iter().filter(|p| !p.holes.is_empty()).count();
    info!(
        "Loaded {} polygons ({} with holes), {} with pattern attributes",
        polygons.len(),
        with_holes,
        attributes.len()
    );

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Seed: {}", seed);

    let start = Instant::now();
    let fills = fill_shapes(
        &polygons,
        &motif,
        &args.pattern,
        &base,
        &attributes,
        args.owner_rotation.to_radians(),
        seed,
    );
    let total: usize = fills.iter().map(|f| f.placements.len()).sum();
    info!("Generated {} placements in {} shapes in {:?}", total, fills.len(), start.elapsed());

    if args.json {
        let output = JsonOutput {
            seed,
            shapes: fills.iter().map(JsonShape::from).collect(),
        };
        let json = serde_json::to_string(&output).context("Failed to serialize JSON")?;
        write_output(args.output.as_deref(), &json)?;
    }

    if !args.json || args.png.is_some() {
        let outlines: &[Polygon] = if args.outline { &polygons } else { &[] };
        let svg = placements_to_svg(&fills, &motif, outlines, &svg_content);
        if !args.json {
            write_output(args.output.as_deref(), &svg)?;
        }
        if let Some(png_path) = &args.png {
            generate_png(&svg, png_path, args.png_scale)?;
        }
    }

    Ok(())
}
