//! Keyframe motion profile for the simulated armband
//!
//! One cycle is a pass through the keyframes followed by a rest during which
//! the arm drifts back to the first pose:
//!
//! ```text
//! t=0          pass_us                 cycle_us
//! │ begin      │ stop-recording         │ begin ...
//! ├─ kf0 → kf1 → ... → kfN ─┼─ kfN → kf0 (rest) ─┤
//! ```

use crate::config::Keyframe;
use mudra_core::Event;

/// Shortest cycle, so a degenerate profile cannot spin
const MIN_CYCLE_US: u64 = 100_000;

/// Piecewise-linear pose over time, in degrees.
#[derive(Debug, Clone)]
pub struct Motion {
    keyframes: Vec<Keyframe>,
    pass_us: u64,
    cycle_us: u64,
}

impl Motion {
    /// Build a looping profile. With no keyframes the arm stays level.
    pub fn new(keyframes: &[Keyframe], rest_ms: u64) -> Self {
        let keyframes = if keyframes.is_empty() {
            vec![Keyframe::new(0.0, 0.0, 0.0, 0)]
        } else {
            keyframes.to_vec()
        };
        let pass_us = keyframes.iter().map(|k| k.duration_ms * 1000).sum::<u64>();
        let cycle_us = (pass_us + rest_ms * 1000).max(MIN_CYCLE_US);

        Self {
            keyframes,
            pass_us,
            cycle_us,
        }
    }

    /// Duration of the moving part of a cycle.
    pub fn pass_us(&self) -> u64 {
        self.pass_us
    }

    /// Duration of a full cycle including the rest.
    pub fn cycle_us(&self) -> u64 {
        self.cycle_us
    }

    /// Roll, pitch, yaw in degrees at `t_us` after the start of a cycle.
    pub fn pose_at(&self, t_us: u64) -> [f32; 3] {
        let t = t_us % self.cycle_us;
        let first = &self.keyframes[0];
        let last = &self.keyframes[self.keyframes.len() - 1];

        if t >= self.pass_us {
            let rest_us = self.cycle_us - self.pass_us;
            return lerp(last, first, (t - self.pass_us) as f32 / rest_us as f32);
        }

        let mut start = 0;
        let mut prev = first;
        for kf in &self.keyframes {
            let end = start + kf.duration_ms * 1000;
            if t < end {
                return lerp(prev, kf, (t - start) as f32 / (end - start) as f32);
            }
            prev = kf;
            start = end;
        }
        pose(last)
    }

    /// Pass boundaries in `[from_us, to_us)`, as cycle-relative times.
    ///
    /// Each cycle starts with [`Event::Begin`] and the end of its pass is
    /// marked with [`Event::StopRecording`].
    pub fn marks(&self, from_us: u64, to_us: u64) -> Vec<(u64, Event)> {
        let mut marks = Vec::new();
        let first_cycle = from_us / self.cycle_us;
        let last_cycle = to_us / self.cycle_us;
        for k in first_cycle..=last_cycle {
            let start = k * self.cycle_us;
            for (t, event) in [(start, Event::Begin), (start + self.pass_us, Event::StopRecording)] {
                if (from_us..to_us).contains(&t) {
                    marks.push((t, event));
                }
            }
        }
        marks
    }
}

fn pose(k: &Keyframe) -> [f32; 3] {
    [k.roll, k.pitch, k.yaw]
}

fn lerp(a: &Keyframe, b: &Keyframe, f: f32) -> [f32; 3] {
    let f = f.clamp(0.0, 1.0);
    [
        a.roll + (b.roll - a.roll) * f,
        a.pitch + (b.pitch - a.pitch) * f,
        a.yaw + (b.yaw - a.yaw) * f,
    ]
}
