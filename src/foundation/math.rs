use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Seeded generator when `seed` is set, otherwise one seeded from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Round `value` up to the next multiple of `1 / divider`.
pub fn quantize(value: f64, divider: f64) -> f64 {
    (value * divider).ceil() / divider
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.r#gen::<f64>()
}

/// Normal sample with mean `mean` and standard deviation `sd` (Box-Muller).
///
/// A fair coin picks the sine or cosine branch of the transform.
pub fn norm_rand<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    // `1 - u` keeps `a` in (0, 1] so the log stays finite.
    let a = 1.0 - rng.r#gen::<f64>();
    let b = 1.0 - rng.r#gen::<f64>();
    let c = (-2.0 * a.ln()).sqrt();
    let theta = std::f64::consts::TAU * b;
    if rng.r#gen::<bool>() {
        c * theta.sin() * sd + mean
    } else {
        c * theta.cos() * sd + mean
    }
}
