use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait Jitter {
    fn sample(&mut self, low: f64, high: f64) -> f64;
}

#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Jitter for RandomJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if low > 0.0 {
            low
        } else if high < 0.0 {
            high
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct FixedJitter {
    fractions: Vec<f64>,
    next: usize,
}

impl FixedJitter {
    pub fn new(fractions: Vec<f64>) -> Self {
        Self { fractions, next: 0 }
    }
}

impl Jitter for FixedJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if self.fractions.is_empty() {
            return low;
        }
        let fraction = self.fractions[self.next % self.fractions.len()].clamp(0.0, 1.0);
        self.next += 1;
        low + (high - low) * fraction
    }
}
