use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use citygen::{CityConfig, CityGenerator, GeneratedCity};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One character per cell, `#` for streets
    Ascii,
    /// The full generated city as JSON
    Json,
    /// District table with bounds and neighbors
    Summary,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short = 'W', long, default_value_t = 30, allow_negative_numbers = true)]
    width: i64,
    #[arg(short = 'H', long, default_value_t = 20, allow_negative_numbers = true)]
    height: i64,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Optional TOML file overriding the built-in archetype catalog and tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CityConfig::load(path)
            .with_context(|| format!("Failed to load city config: {}", path.display()))?,
        None => CityConfig::default(),
    };

    let city = CityGenerator::new(args.width, args.height)
        .and_then(|generator| generator.with_config(config))
        .and_then(|generator| generator.generate(args.seed))
        .with_context(|| {
            format!(
                "Failed to generate a {}x{} city from seed {}",
                args.width, args.height, args.seed
            )
        })?;

    let output = match args.format {
        OutputFormat::Ascii => render_ascii(&city),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&city).context("Failed to serialize city as JSON")?
        }
        OutputFormat::Summary => render_summary(&city),
    };
    println!("{output}");

    Ok(())
}

/// Lowercase letter per district id, wrapping after `z`.
fn district_glyph(index: usize) -> char {
    char::from(b'a' + (index % 26) as u8)
}

fn render_ascii(city: &GeneratedCity) -> String {
    let mut out = String::with_capacity((city.width + 1) * city.height);
    for row in city.rows() {
        for cell in row {
            let glyph = match (cell.is_street, cell.district) {
                (true, _) => '#',
                (false, Some(id)) => district_glyph(id.index()),
                (false, None) => '?',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    for district in city.districts.values() {
        let _ = writeln!(out, "{} = {}", district_glyph(district.id.index()), district.archetype);
    }
    out
}

fn render_summary(city: &GeneratedCity) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}x{} city: {} districts, {} street cells, {} main segments",
        city.width,
        city.height,
        city.districts.len(),
        city.street_cell_count(),
        city.streets.len()
    );
    for district in city.districts.values() {
        let neighbors: Vec<String> =
            district.neighbors.iter().map(|neighbor| neighbor.to_string()).collect();
        let _ = writeln!(
            out,
            "{} {:<12} {} cells={:<4} center=({}, {}) bounds=({}, {})..=({}, {}) neighbors=[{}]",
            district.id,
            district.archetype,
            district.color,
            district.cells.len(),
            district.center.x,
            district.center.y,
            district.bounds.min.x,
            district.bounds.min.y,
            district.bounds.max.x,
            district.bounds.max.y,
            neighbors.join(", ")
        );
    }
    out
}
