//! Grid allocation with baseline elevation noise.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand_chacha::rand_core::Rng;

use crate::config::ElevationConfig;
use crate::types::Pos;

use super::grid::CellGrid;
use super::model::Cell;
use super::rng::{noise_seed, unit_f64};

pub(super) fn initialize_grid<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    config: &ElevationConfig,
    rng: &mut R,
) -> CellGrid {
    let mut noise = FastNoiseLite::with_seed(noise_seed(rng));
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(config.noise_frequency as f32));

    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let baseline = unit_f64(rng) * config.baseline_max;
            let raw = f64::from(noise.get_noise_2d(x as f32, y as f32)).clamp(-1.0, 1.0);
            let relief = (raw + 1.0) * 0.5 * config.noise_amplitude;
            cells.push(Cell::new(Pos::new(x as i32, y as i32), (baseline + relief) as f32));
        }
    }

    CellGrid { width, height, cells }
}
