use std::collections::BTreeSet;
use std::io;

use anyhow::{Result, bail};
use citygen::{
    CityConfig, CityGenError, GeneratedCity, InvariantViolation, generate, rasterize_line,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    #[arg(long, default_value_t = 8)]
    min_extent: i64,
    #[arg(long, default_value_t = 96)]
    max_extent: i64,
}

fn pick_extent(rng: &mut ChaCha8Rng, min: i64, max: i64) -> i64 {
    let span = (max - min + 1).max(1) as u64;
    min + (rng.next_u64() % span) as i64
}

fn check_city(city: &GeneratedCity) -> Result<()> {
    let total = city.width * city.height;
    if city.cells.len() != total {
        bail!(
            "Invariant failed: {} cells for a {}x{} grid",
            city.cells.len(),
            city.width,
            city.height
        );
    }
    if let Some(cell) = city.cells.iter().find(|cell| cell.district.is_none()) {
        bail!("Invariant failed: cell {:?} has no district", cell.pos);
    }

    let members: usize = city.districts.values().map(|district| district.cells.len()).sum();
    if members + city.street_cell_count() != total {
        bail!("Invariant failed: coverage {members} + {} != {total}", city.street_cell_count());
    }

    let graph = city.adjacency();
    for (id, neighbors) in &graph {
        for neighbor in neighbors {
            if neighbor == id || !graph.get(neighbor).is_some_and(|back| back.contains(id)) {
                bail!("Invariant failed: edge {id} -> {neighbor}");
            }
        }
    }

    let mut seen = BTreeSet::new();
    for district in city.districts.values() {
        for &pos in &district.cells {
            if !seen.insert(pos) || !district.bounds.contains(pos) {
                bail!("Invariant failed: {} member {pos:?}", district.id);
            }
        }
    }

    for segment in &city.streets {
        if rasterize_line(segment.start, segment.end)
            .into_iter()
            .any(|pos| !city.cell_at(pos).is_some_and(|cell| cell.is_street))
        {
            bail!("Invariant failed: segment {segment:?} is not fully carved");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.min_extent < 1 || args.max_extent < args.min_extent {
        bail!("Extent range {}..={} is empty", args.min_extent, args.max_extent);
    }

    println!(
        "Sweeping {} cities from seed {} with extents {}..={}...",
        args.runs, args.seed, args.min_extent, args.max_extent
    );
    let config = CityConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut vanished = 0_u32;

    for run in 0..args.runs {
        let width = pick_extent(&mut rng, args.min_extent, args.max_extent);
        let height = pick_extent(&mut rng, args.min_extent, args.max_extent);
        let city_seed = rng.next_u64();
        let mut city_rng = ChaCha8Rng::seed_from_u64(city_seed);

        match generate(width, height, &config, &mut city_rng) {
            Ok(city) => {
                if let Err(err) = check_city(&city) {
                    bail!("run {run}: {width}x{height} seed={city_seed}: {err}");
                }
                tracing::debug!(run, width, height, city_seed, fingerprint = city.fingerprint());
            }
            Err(CityGenError::InternalInvariantViolation(
                InvariantViolation::SeedWithoutDistrict { seed, archetype },
            )) => {
                vanished += 1;
                tracing::warn!(
                    run,
                    width,
                    height,
                    city_seed,
                    %seed,
                    %archetype,
                    "district vanished"
                );
            }
            Err(err) => bail!("run {run}: {width}x{height} seed={city_seed}: {err}"),
        }
    }

    println!("Sweep finished: {} runs, {vanished} with a vanished district", args.runs);
    Ok(())
}
