//! Game tunables.
//!
//! Everything is measured in terminal cells and ticks.  The static half is
//! fixed for the whole session; the dynamic half is reset on every new game
//! and grows each time a fleet is cleared.

/// RGB triple; the display layer turns it into a terminal colour.
pub type Rgb = (u8, u8, u8);

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    // ── Screen ────────────────────────────────────────────────────────────────
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Rgb,

    // ── Ship ──────────────────────────────────────────────────────────────────
    pub ship_width: i32,
    pub ship_height: i32,
    pub ship_limit: u32,

    // ── Bullets ───────────────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Rgb,
    pub bullets_allowed: usize,

    // ── Aliens ────────────────────────────────────────────────────────────────
    pub alien_width: i32,
    pub alien_height: i32,
    /// Rows the whole fleet drops when it touches a side edge.
    pub fleet_drop_speed: i32,

    /// Multiplier applied to speeds and points on every level-up.
    pub speedup_scale: f32,

    // ── Dynamic (reset per game) ──────────────────────────────────────────────
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
    /// +1 moves the fleet right, -1 moves it left.
    pub fleet_direction: i32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Settings {
            screen_width: 80,
            screen_height: 24,
            bg_color: (10, 10, 30),

            ship_width: 3,
            ship_height: 2,
            ship_limit: 3,

            bullet_width: 1,
            bullet_height: 1,
            bullet_color: (255, 220, 60),
            bullets_allowed: 3,

            alien_width: 3,
            alien_height: 2,
            fleet_drop_speed: 1,

            speedup_scale: 1.1,

            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
            fleet_direction: 1,
        };
        settings.reset_dynamic();
        settings
    }
}

impl Settings {
    /// Restore the values that change during play to their new-game state.
    pub fn reset_dynamic(&mut self) {
        self.ship_speed = 0.5;
        self.bullet_speed = 0.6;
        self.alien_speed = 0.1;
        self.alien_points = 50;
        self.fleet_direction = 1;
    }

    /// Level-up: everything gets faster and every alien is worth more.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points = (self.alien_points as f32 * self.speedup_scale) as u32;
    }
}
