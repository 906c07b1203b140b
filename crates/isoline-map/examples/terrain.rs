//! Example: topographic-style contours of a synthetic terrain.
//!
//! Builds a bumpy height field, pads it so every contour closes, picks
//! levels with the histogram helper, and extracts isolines per level.
//! Per-level stats are printed to stdout and the polylines are written to
//! a JSON file.
//!
//! Run from the workspace root:
//!   cargo run -p isoline-map --example terrain -- --help
//!   cargo run -p isoline-map --example terrain

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use iso_levels::histogram_levels;
use isoline_map::{ScalarGrid, contours};
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Extract closed contours from a synthetic terrain")]
struct Args {
    /// Field width in samples
    #[arg(long, default_value_t = 256)]
    width: usize,

    /// Field height in samples
    #[arg(long, default_value_t = 256)]
    height: usize,

    /// Number of contour levels
    #[arg(long, default_value_t = 8)]
    levels: usize,

    /// Output JSON path
    #[arg(long, default_value = "terrain_contours.json")]
    out: String,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PointDto {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct LevelResult {
    z: f64,
    /// Wall-clock time for this level's extraction, in milliseconds.
    elapsed_ms: f64,
    contours: Vec<Vec<PointDto>>,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let grid = ScalarGrid::from_fn(args.width, args.height, |x, y| {
        let fx = x as f64 * 0.03;
        let fy = y as f64 * 0.03;
        fx.sin() * fy.cos() + 0.5 * (fx * 2.1 + 0.7).sin() * (fy * 1.7).cos()
    });
    println!(
        "field: {}x{}, range [{:.3}, {:.3}]",
        grid.width(),
        grid.height(),
        grid.minimum(),
        grid.maximum()
    );

    let zs = histogram_levels(&grid, args.levels);
    let padded = grid.with_boundary_padding();

    let mut results: Vec<LevelResult> = Vec::with_capacity(zs.len());
    let total_start = Instant::now();

    for &z in &zs {
        let t0 = Instant::now();
        let cs = contours(&padded, z);
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

        let closed = cs.iter().filter(|c| c.is_closed()).count();
        println!(
            "  z = {z:+.4}: {} contours, {closed} closed  ({elapsed_ms:.2} ms)",
            cs.len()
        );

        let polylines = cs
            .iter()
            .map(|c| {
                c.points
                    .iter()
                    // Shift back into source-grid coordinates.
                    .map(|p| PointDto {
                        x: p.x - 1.0,
                        y: p.y - 1.0,
                    })
                    .collect()
            })
            .collect();

        results.push(LevelResult {
            z,
            elapsed_ms,
            contours: polylines,
        });
    }

    let total_ms = total_start.elapsed().as_secs_f64() * 1e3;
    println!("total extraction time: {total_ms:.2} ms");

    let out_file =
        std::fs::File::create(&args.out).with_context(|| format!("creating {}", args.out))?;
    serde_json::to_writer(out_file, &results)
        .with_context(|| format!("writing JSON to {}", args.out))?;

    println!("contours written to {}", args.out);
    Ok(())
}
