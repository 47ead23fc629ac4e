use std::time::Instant;

/// Measures the time between frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
    fps: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    // weight of the newest frame in the fps average
    const SMOOTHING: f32 = 0.1;

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self { last: now, fps: 0.0 }
    }

    /// Seconds since the previous tick, never negative.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = self.last.max(now);
        if delta > 0.0 {
            let instant_fps = 1.0 / delta;
            self.fps = if self.fps == 0.0 {
                instant_fps
            } else {
                self.fps + (instant_fps - self.fps) * Self::SMOOTHING
            };
        }
        delta
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn delta_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-6);
        assert!((clock.fps() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn going_back_in_time_yields_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(500)), 0.0);
        let dt = clock.tick_at(start + Duration::from_millis(10));
        assert!((dt - 0.01).abs() < 1e-6);
    }
}
