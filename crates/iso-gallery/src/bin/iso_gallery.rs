use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{ImageReader, Rgb, RgbImage};
use iso_core::{Contour, Point2d, ScalarGrid, Vec2d};
use iso_levels::histogram_levels;
use iso_march::{ExtractConfig, SaddlePolicy, extract_contours};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "iso_gallery")]
#[command(about = "Extract and render isolines from images or synthetic fields")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Contour a grayscale image.
    #[command(name = "image")]
    Image(ImageArgs),
    /// Contour a built-in synthetic field.
    #[command(name = "function")]
    Function(FunctionArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Number of histogram-chosen levels; ignored when --z is given.
    #[arg(long, default_value_t = 6)]
    levels: usize,
    /// Extract a single explicit level instead of histogram levels.
    #[arg(long)]
    z: Option<f64>,
    /// Leave contours open at the grid border instead of padding.
    #[arg(long, default_value_t = false)]
    no_padding: bool,
    #[arg(long, default_value_t = false)]
    connect_high: bool,
}

#[derive(Args, Debug, Clone)]
struct ImageArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    input: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct FunctionArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 512)]
    width: usize,
    #[arg(long, default_value_t = 512)]
    height: usize,
}

#[derive(Debug, Serialize)]
struct LevelSummary {
    z: f64,
    num_contours: usize,
    num_closed: usize,
    total_points: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    case: String,
    width: usize,
    height: usize,
    padded: bool,
    levels: Vec<LevelSummary>,
}

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([230, 80, 60]),
    Rgb([250, 170, 50]),
    Rgb([120, 200, 70]),
    Rgb([60, 170, 220]),
    Rgb([130, 90, 220]),
    Rgb([220, 90, 180]),
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Image(args) => {
            let gray = ImageReader::open(&args.input)
                .with_context(|| format!("opening {}", args.input.display()))?
                .decode()
                .with_context(|| format!("decoding {}", args.input.display()))?
                .into_luma16();

            let (w, h) = (gray.width() as usize, gray.height() as usize);
            let grid = ScalarGrid::from_gray16(w, h, gray.as_raw())
                .context("building grid from image samples")?;

            run("image", grid, &args.common)
        }
        Command::Function(args) => {
            if args.width < 2 || args.height < 2 {
                bail!("field must be at least 2x2");
            }

            let grid = ScalarGrid::from_fn(args.width, args.height, |x, y| {
                let fx = x as f64 * 0.045;
                let fy = y as f64 * 0.045;
                fx.sin() * fy.cos() + 0.4 * ((fx + fy) * 1.7).sin()
            });

            run("function", grid, &args.common)
        }
    }
}

fn run(case: &str, grid: ScalarGrid, args: &CommonArgs) -> Result<()> {
    let zs = match args.z {
        Some(z) => vec![z],
        None => {
            if args.levels == 0 {
                bail!("--levels must be positive");
            }
            histogram_levels(&grid, args.levels)
        }
    };

    let cfg = ExtractConfig {
        saddle: if args.connect_high {
            SaddlePolicy::ConnectHigh
        } else {
            SaddlePolicy::ConnectLow
        },
    };

    // Padded coordinates are offset by one cell relative to the source grid.
    let padded;
    let (field, offset) = if args.no_padding {
        (&grid, Vec2d::default())
    } else {
        padded = grid.with_boundary_padding();
        (&padded, Vec2d { x: -1.0, y: -1.0 })
    };

    let mut canvas = RgbImage::from_pixel(grid.width() as u32, grid.height() as u32, Rgb([20; 3]));
    let mut levels = Vec::with_capacity(zs.len());

    for (i, &z) in zs.iter().enumerate() {
        let cs = extract_contours(field, z, &cfg);
        let color = PALETTE[i % PALETTE.len()];
        for c in &cs {
            draw_contour(&mut canvas, c, offset, color);
        }

        let num_closed = cs.iter().filter(|c| c.is_closed()).count();
        let total_points = cs.iter().map(Contour::len).sum();
        println!(
            "z = {z:.4}: {} contours ({num_closed} closed, {total_points} points)",
            cs.len()
        );

        levels.push(LevelSummary {
            z,
            num_contours: cs.len(),
            num_closed,
            total_points,
        });
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let png_path = args.out.join(format!("{case}_contours.png"));
    canvas
        .save(&png_path)
        .with_context(|| format!("writing {}", png_path.display()))?;

    let summary = Summary {
        case: case.to_string(),
        width: grid.width(),
        height: grid.height(),
        padded: !args.no_padding,
        levels,
    };
    let json_path = args.out.join(format!("{case}_summary.json"));
    let json_file = fs::File::create(&json_path)
        .with_context(|| format!("creating {}", json_path.display()))?;
    serde_json::to_writer_pretty(json_file, &summary)
        .with_context(|| format!("writing {}", json_path.display()))?;

    println!(
        "wrote {} and {}",
        png_path.display(),
        json_path.display()
    );
    Ok(())
}

fn draw_contour(canvas: &mut RgbImage, contour: &Contour, offset: Vec2d, color: Rgb<u8>) {
    for w in contour.points.windows(2) {
        draw_segment(canvas, w[0] + offset, w[1] + offset, color);
    }
}

fn draw_segment(canvas: &mut RgbImage, a: Point2d, b: Point2d, color: Rgb<u8>) {
    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;

    for i in 0..=steps {
        let q = a + d * (i as f64 / steps as f64);
        if q.x < 0.0 || q.y < 0.0 {
            continue;
        }

        let (xi, yi) = (q.x.round() as u32, q.y.round() as u32);
        if xi < canvas.width() && yi < canvas.height() {
            canvas.put_pixel(xi, yi, color);
        }
    }
}
