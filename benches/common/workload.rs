//! Deterministic key streams for hit-rate benchmarks.

use lrutree::policy::ordered_lru::OrderedLruCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// `hot_prob` of accesses land in the first `hot_fraction` of the universe.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Zipf-distributed ranks, scattered over the universe so that popular
    /// keys are not also the smallest ones.
    Zipfian { exponent: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> WorkloadGenerator {
        WorkloadGenerator::new(self)
    }
}

pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: StdRng,
    // cumulative rank weights, only for `Zipfian`
    zipf_cdf: Vec<f64>,
}

impl WorkloadGenerator {
    fn new(spec: WorkloadSpec) -> Self {
        let universe = spec.universe.max(1);
        let zipf_cdf = match spec.workload {
            Workload::Zipfian { exponent } => zipf_cdf(universe, exponent),
            Workload::Uniform | Workload::Hotset { .. } => Vec::new(),
        };
        Self {
            universe,
            workload: spec.workload,
            rng: StdRng::seed_from_u64(spec.seed),
            zipf_cdf,
        }
    }

    pub fn next_key(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.rng.gen_range(0..self.universe),
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size = ((self.universe as f64 * hot_fraction.clamp(0.0, 1.0)) as u64)
                    .clamp(1, self.universe);
                if hot_size == self.universe || self.rng.gen_bool(hot_prob.clamp(0.0, 1.0)) {
                    self.rng.gen_range(0..hot_size)
                } else {
                    self.rng.gen_range(hot_size..self.universe)
                }
            },
            Workload::Zipfian { .. } => {
                let u: f64 = self.rng.r#gen();
                let rank = self.zipf_cdf.partition_point(|&c| c < u) as u64;
                scatter(rank.min(self.universe - 1), self.universe)
            },
        }
    }
}

fn zipf_cdf(universe: u64, exponent: f64) -> Vec<f64> {
    let mut cdf = Vec::with_capacity(universe as usize);
    let mut total = 0.0;
    for rank in 1..=universe {
        total += 1.0 / (rank as f64).powf(exponent);
        cdf.push(total);
    }
    for c in &mut cdf {
        *c /= total;
    }
    cdf
}

/// Spreads ranks over the universe so hot ranks do not build a sorted chain.
/// Bijective when `universe` is a power of two.
fn scatter(rank: u64, universe: u64) -> u64 {
    rank.wrapping_mul(0x9E37_79B9_7F4A_7C15 | 1) % universe
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HitRate {
    pub hits: u64,
    pub misses: u64,
}

impl HitRate {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Lookup, and insert on miss.
pub fn run_hit_rate(
    cache: &mut OrderedLruCache<u64, u64>,
    generator: &mut WorkloadGenerator,
    operations: usize,
) -> HitRate {
    let mut rate = HitRate::default();
    for _ in 0..operations {
        let key = generator.next_key();
        if cache.find(&key).is_end() {
            rate.misses += 1;
            cache.insert(key, key);
        } else {
            rate.hits += 1;
        }
    }
    rate
}
