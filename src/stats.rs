use crate::settings::Settings;

/// Counters for the running session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub score: u32,
    /// Survives `reset_stats`; only ever goes up.
    pub high_score: u32,
    pub level: u32,
    pub ships_left: u32,
    pub game_active: bool,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        let mut stats = GameStats {
            score: 0,
            high_score: 0,
            level: 1,
            ships_left: 0,
            game_active: false,
        };
        stats.reset_stats(settings);
        stats
    }

    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Raise the high score to the current score if it was beaten.
    /// Returns true when it changed.
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
