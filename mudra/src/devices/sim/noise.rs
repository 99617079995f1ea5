//! Armband sensor imperfections: orientation jitter and lost samples.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::Normal;

/// Per-sample noise model of the simulated armband.
///
/// Seed 0 draws from entropy; any other seed replays the same noise.
#[derive(Clone)]
pub struct SensorNoise {
    rng: SmallRng,
    /// Per-axis orientation jitter in degrees, `None` when disabled
    jitter: Option<Normal<f32>>,
    drop_rate: f64,
}

impl SensorNoise {
    pub fn new(seed: u64, stddev_deg: f32, drop_rate: f32) -> Self {
        let rng = match seed {
            0 => SmallRng::from_entropy(),
            seed => SmallRng::seed_from_u64(seed),
        };
        let jitter = (stddev_deg > 0.0)
            .then(|| Normal::new(0.0, stddev_deg).ok())
            .flatten();
        Self {
            rng,
            jitter,
            drop_rate: f64::from(drop_rate).clamp(0.0, 1.0),
        }
    }

    /// Roll, pitch and yaw in degrees with independent jitter on each axis.
    pub fn jitter(&mut self, pose: [f32; 3]) -> [f32; 3] {
        match self.jitter {
            Some(normal) => pose.map(|angle| angle + normal.sample(&mut self.rng)),
            None => pose,
        }
    }

    /// Whether the next sample is lost in transit.
    pub fn drops_sample(&mut self) -> bool {
        self.drop_rate > 0.0 && self.rng.gen_bool(self.drop_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_noise() {
        let mut a = SensorNoise::new(42, 2.0, 0.5);
        let mut b = SensorNoise::new(42, 2.0, 0.5);
        for _ in 0..100 {
            assert_eq!(a.jitter([0.0; 3]), b.jitter([0.0; 3]));
            assert_eq!(a.drops_sample(), b.drops_sample());
        }
    }

    #[test]
    fn test_disabled_noise_is_exact() {
        let mut noise = SensorNoise::new(42, 0.0, 0.0);
        assert_eq!(noise.jitter([10.0, -20.0, 30.0]), [10.0, -20.0, 30.0]);
        assert!(!(0..1000).any(|_| noise.drops_sample()));
    }

    #[test]
    fn test_jitter_spread() {
        let mut noise = SensorNoise::new(7, 1.5, 0.0);
        let rolls: Vec<f32> = (0..5000).map(|_| noise.jitter([0.0; 3])[0]).collect();
        let mean = rolls.iter().sum::<f32>() / rolls.len() as f32;
        let var = rolls.iter().map(|r| (r - mean).powi(2)).sum::<f32>() / rolls.len() as f32;

        assert!(mean.abs() < 0.1, "mean {}", mean);
        assert!((var.sqrt() - 1.5).abs() < 0.1, "stddev {}", var.sqrt());
    }

    #[test]
    fn test_drop_rate() {
        let mut noise = SensorNoise::new(42, 0.0, 0.3);
        let dropped = (0..10_000).filter(|_| noise.drops_sample()).count();
        assert!((dropped as f32 / 10_000.0 - 0.3).abs() < 0.05);

        // Out-of-range rates are clamped rather than rejected
        let mut always = SensorNoise::new(42, 0.0, 1.5);
        assert!((0..100).all(|_| always.drops_sample()));
    }
}
