//! Benchmark command implementation.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use motif_tiler::{extract_polygons_from_svg, read_pattern_attributes};

use super::common::{PatternArgs, load_motif, read_svg_input};
use super::fill::fill_shapes;

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// Region SVG whose closed shapes get filled
    pub region: String,

    /// Motif SVG
    #[arg(short, long, value_name = "FILE")]
    pub motif: PathBuf,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Number of full passes over all shapes
    #[arg(short = 'n', long, default_value_t = 10)]
    pub iterations: usize,
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &BenchmarkArgs) -> Result<()> {
    println!("Loading: {}", args.region);
    let start_load = Instant::now();

    let svg_content = read_svg_input(&args.region)?;
    let polygons = extract_polygons_from_svg(&svg_content)
        .context("Failed to extract shapes from region SVG")?;
    let attributes =
        read_pattern_attributes(&svg_content).context("Failed to read data-pattern attributes")?;
    let motif = load_motif(&args.motif)?;
    let base = args.pattern.base_fields()?;

    let load_time = start_load.elapsed();
    println!("Loaded {} polygons in {:?}", polygons.len(), load_time);

    let iterations = args.iterations.max(1);
    println!("\nRunning {} fill passes...", iterations);

    let mut cells = 0;
    let mut emitted = 0;
    let mut culled = 0;

    let start = Instant::now();
    for pass in 0..iterations {
        // Fresh tilers every pass; the seed only varies the jitter drawn
        let fills = fill_shapes(
            &polygons,
            &motif,
            &args.pattern,
            &base,
            &attributes,
            0.0,
            pass as u64,
        );
        for fill in &fills {
            cells += fill.stats.cells;
            emitted += fill.stats.emitted;
            culled += fill.stats.culled;
        }
    }
    let elapsed = start.elapsed();

    let per_pass_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  MOTIF FILL BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Polygons: {}", polygons.len());
    println!("  Passes: {}", iterations);
    println!("  Cells visited: {}", cells);
    println!("  Placements: {} ({} culled)", emitted, culled);
    println!("  Time: {:?}", elapsed);
    println!("  Avg per pass: {:.3}ms", per_pass_ms);
    if !polygons.is_empty() {
        println!("  Avg per polygon: {:.3}ms", per_pass_ms / polygons.len() as f64);
    }
    println!("═══════════════════════════════════════════════");

    Ok(())
}
