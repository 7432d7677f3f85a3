//! Heads-up display sink

/// Receiver for the values the overlay shows
pub trait Hud {
    /// Avatar health as a fraction of its maximum, in `[0, 1]`
    fn set_health01(&mut self, fraction: f32);

    /// Number of live hostiles
    fn set_enemy_count(&mut self, count: usize);
}

/// HUD that keeps the latest values and logs changes
#[derive(Debug, Clone, PartialEq)]
pub struct LogHud {
    health01: f32,
    enemy_count: usize,
}

impl LogHud {
    /// Full health, no enemies
    pub fn new() -> Self {
        Self { health01: 1.0, enemy_count: 0 }
    }

    /// Last reported health fraction
    pub fn health01(&self) -> f32 {
        self.health01
    }

    /// Last reported hostile count
    pub fn enemy_count(&self) -> usize {
        self.enemy_count
    }
}

impl Default for LogHud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud for LogHud {
    fn set_health01(&mut self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        if (fraction - self.health01).abs() >= 0.01 {
            log::debug!("HUD health {:.0}%", fraction * 100.0);
        }
        self.health01 = fraction;
    }

    fn set_enemy_count(&mut self, count: usize) {
        if count != self.enemy_count {
            log::debug!("HUD enemies {}", count);
        }
        self.enemy_count = count;
    }
}
