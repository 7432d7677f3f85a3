//! Time management utilities

use std::time::Instant;

/// Wall-clock frame timer
///
/// Samples the real time elapsed between calls to [`Timer::update`]; the
/// resulting delta is what the host feeds into the simulation loop.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame) and return the new delta
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Fixed-timestep accumulator
///
/// Banks variable frame deltas and hands them back as a whole number of
/// constant-size steps. At most `max_sub_steps` steps are released per frame;
/// when that budget is exhausted the leftover time is discarded so a long
/// stall never turns into a burst of catch-up work on later frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_sub_steps: u32,
    accumulator: f32,
    dropped_time: f32,
}

impl FixedTimestep {
    /// Create an accumulator releasing steps of `step` seconds, at most `max_sub_steps` per frame
    pub fn new(step: f32, max_sub_steps: u32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            max_sub_steps: max_sub_steps.max(1),
            accumulator: 0.0,
            dropped_time: 0.0,
        }
    }

    /// Bank `frame_delta` seconds and return how many fixed steps to run this frame
    ///
    /// The accumulator is decremented by one step for every step returned.
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        if frame_delta.is_finite() && frame_delta > 0.0 {
            self.accumulator += frame_delta;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_sub_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_sub_steps && self.accumulator >= self.step {
            let remainder = self.accumulator % self.step;
            let excess = self.accumulator - remainder;
            log::debug!(
                "Sub-step budget of {} exhausted, dropping {:.4}s of simulation time",
                self.max_sub_steps,
                excess
            );
            self.dropped_time += excess;
            self.accumulator = remainder;
        }

        steps
    }

    /// Size of one fixed step in seconds
    pub fn step_size(&self) -> f32 {
        self.step
    }

    /// Maximum number of steps released per frame
    pub fn max_sub_steps(&self) -> u32 {
        self.max_sub_steps
    }

    /// Time banked but not yet simulated (always below one step after `advance`)
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Total simulation time discarded because of the sub-step cap
    pub fn dropped_time(&self) -> f32 {
        self.dropped_time
    }

    /// Interpolation factor between the last two fixed steps, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_releases_whole_steps() {
        let mut timestep = FixedTimestep::new(0.25, 3);

        assert_eq!(timestep.advance(0.125), 0);
        assert_eq!(timestep.advance(0.125), 1);
        assert_relative_eq!(timestep.accumulator(), 0.0);

        assert_eq!(timestep.advance(0.5), 2);
        assert_relative_eq!(timestep.accumulator(), 0.0);
    }

    #[test]
    fn test_advance_keeps_remainder_below_one_step() {
        let mut timestep = FixedTimestep::new(0.25, 3);

        assert_eq!(timestep.advance(0.375), 1);
        assert_relative_eq!(timestep.accumulator(), 0.125);
        assert_relative_eq!(timestep.alpha(), 0.5);
    }

    #[test]
    fn test_sub_step_cap_drops_excess_time() {
        let mut timestep = FixedTimestep::new(0.25, 3);

        // 10 steps worth of time in one frame: only 3 run, the rest is dropped
        assert_eq!(timestep.advance(2.5), 3);
        assert!(timestep.accumulator() < timestep.step_size());
        assert_relative_eq!(timestep.dropped_time(), 1.75);

        // The next ordinary frame is not followed by a catch-up burst
        assert_eq!(timestep.advance(0.25), 1);
    }

    #[test]
    fn test_variable_frames_match_elapsed_time() {
        let step = 1.0 / 64.0;
        let frame_patterns: [&[f32]; 3] = [
            &[1.0 / 64.0],
            &[1.0 / 128.0, 3.0 / 128.0],
            &[1.0 / 32.0, 1.0 / 256.0, 7.0 / 256.0, 1.0 / 64.0],
        ];

        for pattern in frame_patterns {
            let mut timestep = FixedTimestep::new(step, 3);
            let mut total_time = 0.0_f32;
            let mut total_steps = 0_u32;

            for frame in pattern.iter().cycle().take(400) {
                total_time += frame;
                total_steps += timestep.advance(*frame);
            }

            // Every frame fits inside the sub-step budget, so no time is lost
            assert_relative_eq!(timestep.dropped_time(), 0.0);
            let expected = (total_time / step).floor() as u32;
            assert!(
                total_steps.abs_diff(expected) <= 1,
                "pattern {pattern:?}: {total_steps} steps vs {expected} expected"
            );
        }
    }

    #[test]
    fn test_ignores_invalid_deltas() {
        let mut timestep = FixedTimestep::new(0.25, 3);
        assert_eq!(timestep.advance(-1.0), 0);
        assert_eq!(timestep.advance(f32::NAN), 0);
        assert_relative_eq!(timestep.accumulator(), 0.0);
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        let delta = timer.update();
        assert!(delta >= 0.0);
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= timer.delta_time());
    }
}
