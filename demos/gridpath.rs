//! Terminal pathfinding visualizer.
//!
//! Run: cargo run --bin gridpath -- --wall 9,25 --wall 10,25 --wall 11,25 --animate
//!      cargo run --bin gridpath -- --layout demos/layouts/corridor.txt
//!      cargo run --bin gridpath -- --config demos/grid.json --scatter 25 --json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridpath_core::{Grid, GridConfig, Point, WallPolicy};
use gridpath_demos::{Pacing, Report, Timeline, render, scatter_walls, term};
use gridpath_search::{PathEngine, PathOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Build a grid, toggle walls, and show the shortest path from start to finish.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ASCII layout file: `.` open, `#` wall, `S` start, `F` finish
    #[arg(short, long, conflicts_with_all = ["config", "rows", "cols", "start", "finish"])]
    layout: Option<PathBuf>,

    #[arg(long)]
    rows: Option<i32>,

    #[arg(long)]
    cols: Option<i32>,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// Finish cell as ROW,COL
    #[arg(long, value_parser = parse_point)]
    finish: Option<Point>,

    /// Let walls be placed on the start and finish cells
    #[arg(long)]
    allow_endpoint_walls: bool,

    /// Toggle the wall at ROW,COL (repeatable)
    #[arg(short, long = "wall", value_parser = parse_point)]
    walls: Vec<Point>,

    /// Turn this percentage of plain cells into walls
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    scatter: Option<u32>,

    /// Seed for --scatter
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the run as JSON instead of a picture
    #[arg(long, conflicts_with = "animate")]
    json: bool,

    /// Replay the run cell by cell
    #[arg(long)]
    animate: bool,

    /// Replay speed multiplier for --animate (0.01 to 100)
    #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
    speed: f64,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse::<i32>().map_err(|e| format!("bad row {row:?}: {e}"))?;
    let col = col.trim().parse::<i32>().map_err(|e| format!("bad column {col:?}: {e}"))?;
    Ok(Point::new(row, col))
}

fn parse_speed(s: &str) -> std::result::Result<f64, String> {
    let speed = s.trim().parse::<f64>().map_err(|e| format!("bad speed {s:?}: {e}"))?;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(format!("speed must be a positive number, got {s:?}"));
    }
    Ok(speed.clamp(0.01, 100.0))
}

fn load_config(args: &Args) -> Result<GridConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GridConfig::default(),
    };
    cfg.rows = args.rows.unwrap_or(cfg.rows);
    cfg.cols = args.cols.unwrap_or(cfg.cols);
    cfg.start = args.start.unwrap_or(cfg.start);
    cfg.finish = args.finish.unwrap_or(cfg.finish);
    if args.allow_endpoint_walls {
        cfg.wall_policy = WallPolicy::Allow;
    }
    Ok(cfg)
}

fn build_grid(args: &Args) -> Result<Grid> {
    let mut grid = match &args.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading layout {}", path.display()))?;
            let grid = Grid::parse(&text).with_context(|| format!("parsing layout {}", path.display()))?;
            if args.allow_endpoint_walls {
                grid.with_policy(WallPolicy::Allow)
            } else {
                grid
            }
        }
        None => Grid::from_config(&load_config(args)?).context("building grid")?,
    };

    if let Some(percent) = args.scatter {
        let mut rng = StdRng::seed_from_u64(args.seed);
        grid = scatter_walls(&grid, &mut rng, percent).context("scattering walls")?;
    }
    for &p in &args.walls {
        grid = grid.toggle_wall(p).with_context(|| format!("toggling wall at {p}"))?;
    }
    Ok(grid)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let grid = build_grid(&args)?;
    log::info!(
        "{}x{} grid, {} walls, start {}, finish {}",
        grid.rows(),
        grid.cols(),
        grid.wall_count(),
        grid.start(),
        grid.finish()
    );

    let mut engine = PathEngine::new(grid.bounds());
    let result = engine.search_grid(&grid).context("running search")?;

    if args.json {
        let report = Report::new(&grid, &result);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.animate {
        let pacing = Pacing::default().scaled(1.0 / args.speed);
        term::play(&grid, &Timeline::new(&result, pacing)).context("drawing to terminal")?;
    } else {
        print!("{}", render(&grid, Some(&result)));
    }

    match result.path() {
        PathOutcome::Found(path) => println!(
            "path: {} steps, {} cells visited ({})",
            path.len() - 1,
            result.visited().len(),
            result.termination()
        ),
        PathOutcome::NoPath => println!(
            "no path: {} cells visited ({})",
            result.visited().len(),
            result.termination()
        ),
    }
    Ok(())
}
