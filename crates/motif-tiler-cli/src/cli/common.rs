//! Common utilities shared across CLI commands.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::{info, warn};
use quick_xml::escape::escape;

use motif_tiler::{
    FieldSet, FillStats, MotifImage, MotifSvg, PatternParameters, Placement, Point, Polygon, Size,
};

/// Pattern parameter flags shared by `fill`, `params` and `benchmark`.
///
/// Layering, lowest to highest: defaults, `--params` file, the shape's
/// `data-pattern-*` attributes, these flags.
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Saved field set (.json, .yaml or .yml)
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Motif scale factor
    #[arg(long, allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Extra space between motifs before scaling (negative overlaps)
    #[arg(long, allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// Pattern grid angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Add the shape's rotation to the pattern angle
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub relative_to_object: Option<bool>,

    /// Motif angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub motif_angle: Option<f64>,

    /// Add the pattern angle to the motif angle
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub relative_to_pattern: Option<bool>,

    /// Odd-row x shift, as a fraction of the grid step (0..1)
    #[arg(long, allow_negative_numbers = true)]
    pub alternate_x: Option<f64>,

    /// Odd-column y shift, as a fraction of the grid step (0..1)
    #[arg(long, allow_negative_numbers = true)]
    pub alternate_y: Option<f64>,

    /// Positional jitter as a fraction of the grid step (0..1)
    #[arg(long, allow_negative_numbers = true)]
    pub wobble: Option<f64>,

    /// Angular jitter as a fraction of a full turn (0..1)
    #[arg(long, allow_negative_numbers = true)]
    pub angle_randomness: Option<f64>,

    /// Drop motifs that are not fully inside the shape
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub suppress_clipped: Option<bool>,
}

impl PatternArgs {
    /// Fields from `--params`, or an empty set.
    pub fn base_fields(&self) -> Result<FieldSet> {
        match &self.params {
            Some(path) => load_field_set(path),
            None => Ok(FieldSet::new()),
        }
    }

    /// Effective parameters for one shape.
    pub fn parameters_for(
        &self,
        base: &FieldSet,
        attributes: Option<&FieldSet>,
    ) -> PatternParameters {
        let mut fields = base.clone();
        if let Some(attributes) = attributes {
            fields.merge(attributes);
        }
        for key in fields.unknown_keys() {
            warn!("Ignoring unknown pattern field '{}'", key);
        }

        let mut params = PatternParameters::restore(&fields);
        self.apply_flags(&mut params);
        params
    }

    fn apply_flags(&self, params: &mut PatternParameters) {
        if let Some(scale) = self.scale {
            params.set_scale(scale);
        }
        if let Some(interval) = self.interval {
            params.set_interval(interval);
        }
        if let Some(angle) = self.angle {
            params.set_angle_degrees(angle);
        }
        if let Some(relative) = self.relative_to_object {
            params.set_angle_is_relative_to_object(relative);
        }
        if let Some(angle) = self.motif_angle {
            params.set_motif_angle_degrees(angle);
        }
        if let Some(relative) = self.relative_to_pattern {
            params.set_motif_angle_is_relative_to_pattern(relative);
        }
        if self.alternate_x.is_some() || self.alternate_y.is_some() {
            let current = params.alternate_offset();
            params.set_alternate_offset(Size::new(
                self.alternate_x.unwrap_or(current.width),
                self.alternate_y.unwrap_or(current.height),
            ));
        }
        if let Some(wobble) = self.wobble {
            params.set_wobble(wobble);
        }
        if let Some(randomness) = self.angle_randomness {
            params.set_motif_angle_randomness(randomness);
        }
        if let Some(suppress) = self.suppress_clipped {
            params.set_suppress_clipped_elements(suppress);
        }
    }
}

/// Read a field set, picking the format from the file extension.
pub fn load_field_set(path: &Path) -> Result<FieldSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file {}", path.display()))?;

    let fields: FieldSet = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML field set in {}", path.display()))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON field set in {}", path.display()))?,
    };
    info!("Loaded {} pattern fields from {}", fields.len(), path.display());
    Ok(fields)
}

/// Read an SVG from a path, or from stdin when the path is `-`.
pub fn read_svg_input(path: &str) -> Result<String> {
    if path == "-" {
        info!("Reading SVG from stdin...");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        info!("Loading: {}", path);
        fs::read_to_string(path).with_context(|| format!("Failed to read SVG file {}", path))
    }
}

pub fn load_motif(path: &Path) -> Result<MotifSvg> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read motif {}", path.display()))?;
    let motif: MotifSvg = text
        .parse()
        .with_context(|| format!("Failed to parse motif {}", path.display()))?;
    let size = motif.intrinsic_size();
    info!("Motif {} is {}x{}", path.display(), size.width, size.height);
    Ok(motif)
}

/// Write to a file, or stdout when no path (or `-`) is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            eprintln!("Wrote: {}", path.display());
        }
        _ => println!("{}", content),
    }
    Ok(())
}

/// The placements generated for one shape.
pub struct ShapeFill {
    pub id: Option<String>,
    pub index: usize,
    pub scale: f64,
    pub placements: Vec<Placement>,
    pub stats: FillStats,
}

/// Render fills as SVG: the motif becomes a `<symbol>` and every placement
/// a `<use>` centered on its position.
pub fn placements_to_svg(
    fills: &[ShapeFill],
    motif: &MotifSvg,
    outlines: &[Polygon],
    original_svg: &str,
) -> String {
    let viewbox = extract_viewbox(original_svg).unwrap_or_else(|| "0 0 1000 1000".to_string());
    let size = motif.intrinsic_size();

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="{}">
<defs>
<symbol id="motif" overflow="visible">
{}
</symbol>
</defs>
"#,
        viewbox,
        motif.embeddable_markup()
    );

    for fill in fills {
        match &fill.id {
            Some(id) => {
                let _ = writeln!(
                    svg,
                    r#"<g id="{}-fill" data-shape="{}">"#,
                    escape(id.as_str()),
                    fill.index
                );
            }
            None => {
                let _ = writeln!(svg, r#"<g data-shape="{}">"#, fill.index);
            }
        }
        for placement in &fill.placements {
            let _ = writeln!(svg, "  {}", use_element(placement, size, fill.scale));
        }
        svg.push_str("</g>\n");
    }

    if !outlines.is_empty() {
        svg.push_str("<g stroke=\"black\" stroke-width=\"0.5\" fill=\"none\">\n");
        for polygon in outlines {
            let _ = writeln!(svg, "  <path d=\"{}\"/>", polygon_path_data(polygon));
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn use_element(placement: &Placement, motif: Size, scale: f64) -> String {
    format!(
        "<use xlink:href=\"#motif\" width=\"{w}\" height=\"{h}\" \
         transform=\"translate({x:.3} {y:.3}) rotate({deg:.3}) \
         scale({scale}) translate({hx} {hy})\"/>",
        w = motif.width,
        h = motif.height,
        x = placement.position.x,
        y = placement.position.y,
        deg = placement.rotation.to_degrees(),
        scale = scale,
        hx = -motif.width / 2.0,
        hy = -motif.height / 2.0,
    )
}

fn polygon_path_data(polygon: &Polygon) -> String {
    std::iter::once(&polygon.outer)
        .chain(polygon.holes.iter())
        .filter(|ring| !ring.is_empty())
        .map(|ring| ring_path_data(ring))
        .collect::<Vec<_>>()
        .join(" ")
}

fn ring_path_data(ring: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in ring.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{:.2},{:.2} ", cmd, p.x, p.y);
    }
    d.push('Z');
    d
}

/// Extract viewBox from SVG content.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    ["viewBox=\"", "viewbox=\""].iter().find_map(|attr| {
        let start = svg.find(attr)? + attr.len();
        let rest = &svg[start..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    })
}

/// Rasterize an SVG to PNG at `scale` times its document size.
pub fn generate_png(svg_content: &str, png_path: &Path, scale: f64) -> Result<()> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .context("Failed to parse generated SVG")?;

    let size = tree.size();
    let pixmap_width = (size.width() as f64 * scale).ceil() as u32;
    let pixmap_height = (size.height() as f64 * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height).with_context(|| {
        format!("Could not create a {}x{} pixmap", pixmap_width, pixmap_height)
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("Failed to write PNG {}", png_path.display()))?;
    eprintln!("Wrote: {} ({}x{})", png_path.display(), pixmap_width, pixmap_height);
    Ok(())
}
