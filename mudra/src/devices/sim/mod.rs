//! Simulated armband
//!
//! Plays a configured keyframe motion as a stream of noisy orientation
//! samples, standing in for a wearable orientation sensor.
//!
//! Each cycle of the motion starts with a `begin` event and ends its pass
//! with a `stop-recording` event (the wearer's double tap), then rests while
//! the arm returns to the first pose. The cycle restarts whenever a session
//! begins, so every recording or rep sees one full pass.

mod motion;
mod noise;

pub use motion::Motion;
pub use noise::SensorNoise;

use crate::config::SimulationConfig;
use mudra_core::{EulerAngles, Input, SensorSource};
use std::time::{Duration, Instant};

/// Simulated orientation sensor driven by a [`Motion`].
pub struct SimulatedArmband {
    motion: Motion,
    noise: SensorNoise,
    speed: f32,
    sample_period_us: u64,
    /// Device clock
    time_us: u64,
    next_sample_us: u64,
    /// Device time at which the current cycle started
    cycle_origin_us: u64,
    created: Instant,
    connect_delay: Duration,
}

impl SimulatedArmband {
    pub fn new(config: &SimulationConfig) -> Self {
        let rate = if config.sample_rate_hz > 0.0 {
            config.sample_rate_hz
        } else {
            50.0
        };
        let connect_delay = if config.speed > 0.0 {
            Duration::from_millis(config.connect_delay_ms).div_f32(config.speed)
        } else {
            Duration::ZERO
        };

        let motion = Motion::new(&config.keyframes, config.rest_ms);
        log::info!(
            "Simulated armband: {} keyframes, {:.1} s pass, {:.0} Hz, noise {:.1}°",
            config.keyframes.len(),
            motion.pass_us() as f32 / 1e6,
            rate,
            config.noise_stddev_deg
        );

        Self {
            motion,
            noise: SensorNoise::new(config.seed, config.noise_stddev_deg, config.drop_rate),
            speed: config.speed.max(0.0),
            // At least 1 µs, or the sample loop in poll never advances
            sample_period_us: ((1e6 / rate) as u64).max(1),
            time_us: 0,
            next_sample_us: 0,
            cycle_origin_us: 0,
            created: Instant::now(),
            connect_delay,
        }
    }

    /// The motion being played.
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    fn sample_at(&mut self, t_us: u64) -> Input {
        let pose = self.motion.pose_at(t_us - self.cycle_origin_us);
        let [roll, pitch, yaw] = self.noise.jitter(pose);
        let orientation = EulerAngles::from_degrees(roll, pitch, yaw).to_quaternion();
        Input::sample(orientation, t_us)
    }
}

impl SensorSource for SimulatedArmband {
    fn poll(&mut self, timeout: Duration) -> Vec<Input> {
        if self.speed > 0.0 {
            std::thread::sleep(timeout.div_f32(self.speed));
        }
        if !self.is_connected() {
            return Vec::new();
        }

        let start = self.time_us;
        let end = start + timeout.as_micros() as u64;

        let mut inputs: Vec<Input> = self
            .motion
            .marks(start - self.cycle_origin_us, end - self.cycle_origin_us)
            .into_iter()
            .map(|(t, event)| Input::event(event, t + self.cycle_origin_us))
            .collect();
        while self.next_sample_us < end {
            let t = self.next_sample_us;
            if !self.noise.drops_sample() {
                inputs.push(self.sample_at(t));
            }
            self.next_sample_us += self.sample_period_us;
        }
        // Stable: events stay ahead of samples with the same timestamp
        inputs.sort_by_key(Input::timestamp_us);

        self.time_us = end;
        inputs
    }

    fn is_connected(&self) -> bool {
        self.created.elapsed() >= self.connect_delay
    }

    fn begin_session(&mut self) {
        self.cycle_origin_us = self.time_us;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Keyframe;
    use mudra_core::{Event, Quantizer, SessionConfig, Waypoint, record};

    fn config() -> SimulationConfig {
        SimulationConfig {
            keyframes: vec![
                Keyframe::new(0.0, 0.0, 0.0, 300),
                Keyframe::new(0.0, 0.0, 90.0, 900),
                Keyframe::new(0.0, 60.0, 90.0, 600),
            ],
            rest_ms: 1000,
            sample_rate_hz: 50.0,
            noise_stddev_deg: 0.0,
            drop_rate: 0.0,
            connect_delay_ms: 0,
            seed: 1,
            speed: 0.0,
        }
    }

    #[test]
    fn test_sample_rate_and_events() {
        let mut armband = SimulatedArmband::new(&config());
        armband.begin_session();

        let first = armband.poll(Duration::from_millis(100));
        assert_eq!(first[0].as_event(), Some(Event::Begin));
        assert_eq!(first.iter().filter(|i| i.as_sample().is_some()).count(), 5);

        // Pass ends at 1.8 s
        let mut stop_at = None;
        for _ in 0..20 {
            for input in armband.poll(Duration::from_millis(100)) {
                if input.as_event() == Some(Event::StopRecording) {
                    stop_at = Some(input.timestamp_us());
                }
            }
        }
        assert_eq!(stop_at, Some(1_800_000));
    }

    #[test]
    fn test_extreme_sample_rate_still_advances() {
        let mut armband = SimulatedArmband::new(&SimulationConfig {
            sample_rate_hz: 2_000_000.0,
            ..config()
        });
        let slice = armband.poll(Duration::from_millis(1));
        assert_eq!(slice.iter().filter(|i| i.as_sample().is_some()).count(), 1000);
    }

    #[test]
    fn test_timestamps_increase() {
        let mut armband = SimulatedArmband::new(&config());
        let mut last = 0;
        for _ in 0..40 {
            for input in armband.poll(Duration::from_millis(100)) {
                assert!(input.timestamp_us() >= last);
                last = input.timestamp_us();
            }
        }
    }

    #[test]
    fn test_session_restarts_cycle() {
        let mut armband = SimulatedArmband::new(&config());
        for _ in 0..7 {
            armband.poll(Duration::from_millis(100));
        }
        armband.begin_session();
        let slice = armband.poll(Duration::from_millis(100));
        assert_eq!(slice[0].as_event(), Some(Event::Begin));
        assert_eq!(slice[0].timestamp_us(), 700_000);
    }

    #[test]
    fn test_recording_one_pass() {
        let armband = SimulatedArmband::new(&config());
        let gesture = record(armband, &SessionConfig::default());

        let q = Quantizer::default();
        let level = q.quantize_euler(&EulerAngles::from_degrees(0.0, 0.0, 0.0));
        let raised = q.quantize_euler(&EulerAngles::from_degrees(0.0, 60.0, 90.0));
        assert_eq!(level, Waypoint::new(9, 9, 9));
        assert_eq!(gesture[0], level);
        assert!(gesture.len() >= 3);
        // Debouncing lags a slow sweep by up to two bins
        let end = gesture[gesture.len() - 1];
        assert!(end.within_tolerance(&raised, 2), "{} vs {}", end, raised);
    }
}
