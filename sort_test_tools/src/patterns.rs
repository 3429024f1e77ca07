//! Seeded inputs for the test suite and the benchmarks.
//!
//! A [`Pattern`] describes the shape of an input as a sequence of `i32` keys.
//! [`Pattern::generate`] maps those keys into any [`Element`] type with [`Element::from_i32`], so
//! one shape exercises every supported element type. Raw bytes and float specials have their own
//! generators.
//!
//! All randomness derives from one seed per process, printed by the suite. Set `OVERRIDE_SEED`
//! to reproduce a failure.

use std::env;
use std::sync::Mutex;

use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;

use zipf::ZipfDistribution;

use crate::Element;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Keys over the whole `i32` range.
    Random,
    /// Keys drawn from `0..distinct`.
    Dense { distinct: i32 },
    /// Keys drawn from `0..=log2(len)`.
    DenseLog,
    /// Keys `1..=len` with a Zipf distribution, few values dominate.
    Zipf { exponent: f64 },
    /// The leading `percent` of the input is sorted, the rest is random.
    PartiallySorted { percent: f64 },
    AllEqual,
    /// Distinct keys spread over the whole `i32` range, so narrow types still see distinct values.
    Ascending,
    Descending,
    /// About `log2(len)` runs, each ascending or descending.
    Saws,
    /// Ascending first half, descending second half.
    PipeOrgan,
}

impl Pattern {
    pub fn name(&self) -> String {
        match *self {
            Pattern::Random => "random".into(),
            Pattern::Dense { distinct } => format!("random_d{distinct}"),
            Pattern::DenseLog => "random_dense".into(),
            Pattern::Zipf { exponent } => format!("random_z{exponent}"),
            Pattern::PartiallySorted { percent } => format!("random_s{percent}"),
            Pattern::AllEqual => "all_equal".into(),
            Pattern::Ascending => "ascending".into(),
            Pattern::Descending => "descending".into(),
            Pattern::Saws => "saws".into(),
            Pattern::PipeOrgan => "pipe_organ".into(),
        }
    }

    /// The raw keys of the pattern.
    pub fn keys(&self, len: usize) -> Vec<i32> {
        let mut rng = seeded_rng();

        match *self {
            Pattern::Random => random_keys(&mut rng, len),
            Pattern::Dense { distinct } => {
                sample(&mut rng, len, Uniform::new(0, distinct.max(1)))
            }
            Pattern::DenseLog => sample(&mut rng, len, Uniform::new_inclusive(0, log2_round(len))),
            Pattern::Zipf { exponent } => {
                if len == 0 {
                    return Vec::new();
                }

                let dist = ZipfDistribution::new(len, exponent).unwrap();
                (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
            }
            Pattern::PartiallySorted { percent } => {
                let mut keys = random_keys(&mut rng, len);
                let sorted_len = ((len as f64) * (percent / 100.0)).round() as usize;
                keys[..sorted_len.min(len)].sort_unstable();
                keys
            }
            Pattern::AllEqual => vec![66; len],
            Pattern::Ascending => ascending_keys(len),
            Pattern::Descending => {
                let mut keys = ascending_keys(len);
                keys.reverse();
                keys
            }
            Pattern::Saws => {
                let mut keys = random_keys(&mut rng, len);
                let run_len = (len / (log2_round(len) as usize).max(1)).max(1);

                for run in keys.chunks_mut(run_len) {
                    if rng.gen::<bool>() {
                        run.sort_unstable();
                    } else {
                        run.sort_unstable_by(|a, b| b.cmp(a));
                    }
                }

                keys
            }
            Pattern::PipeOrgan => {
                let mut keys = random_keys(&mut rng, len);
                let (rising, falling) = keys.split_at_mut(len / 2);
                rising.sort_unstable();
                falling.sort_unstable_by(|a, b| b.cmp(a));
                keys
            }
        }
    }

    /// The pattern mapped into `T`.
    pub fn generate<T: Element>(&self, len: usize) -> Vec<T> {
        self.keys(len).into_iter().map(T::from_i32).collect()
    }
}

/// Raw bytes without any element structure.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = seeded_rng();

    (0..len).map(|_| rng.gen::<u8>()).collect()
}

/// Random floats sprinkled with NaNs of both signs, infinities and signed zeros.
pub fn random_floats_with_nan(len: usize) -> Vec<f64> {
    const SPECIALS: [f64; 6] = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -0.0, -f64::NAN];

    let mut rng = seeded_rng();

    (0..len)
        .map(|_| {
            if rng.gen_ratio(1, 8) {
                SPECIALS[rng.gen_range(0..SPECIALS.len())]
            } else {
                rng.gen_range(-1e6..1e6)
            }
        })
        .collect()
}

/// Makes every pattern draw a fresh seed, instead of the same one per process.
///
/// Benchmarks call this so repeated runs do not measure a single input.
pub fn use_random_seed_each_time() {
    if let SeedMode::Override(_) = seed_mode() {
        panic!("use_random_seed_each_time conflicts with OVERRIDE_SEED.");
    }

    *SEED_MODE.lock().unwrap() = Some(SeedMode::EachTime);
}

/// The seed patterns are generated from.
pub fn random_init_seed() -> u64 {
    match seed_mode() {
        SeedMode::PerProcess(seed) | SeedMode::Override(seed) => seed,
        SeedMode::EachTime => thread_rng().gen(),
    }
}

// --- Private ---

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SeedMode {
    PerProcess(u64),
    /// From the `OVERRIDE_SEED` env var.
    Override(u64),
    EachTime,
}

static SEED_MODE: Mutex<Option<SeedMode>> = Mutex::new(None);

fn seed_mode() -> SeedMode {
    *SEED_MODE
        .lock()
        .unwrap()
        .get_or_insert_with(|| match env::var("OVERRIDE_SEED") {
            Ok(seed) => SeedMode::Override(seed.parse().expect("OVERRIDE_SEED must be a u64")),
            Err(_) => SeedMode::PerProcess(thread_rng().gen()),
        })
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

fn random_keys(rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

fn sample(rng: &mut StdRng, len: usize, dist: Uniform<i32>) -> Vec<i32> {
    dist.sample_iter(rng).take(len).collect()
}

fn ascending_keys(len: usize) -> Vec<i32> {
    let step = ((1u64 << 32) / len.max(1) as u64).max(1) as i64;
    (0..len as i64)
        .map(|i| (i32::MIN as i64 + i * step) as i32)
        .collect()
}

fn log2_round(len: usize) -> i32 {
    (len.max(1) as f64).log2().round() as i32
}
