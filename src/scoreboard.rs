//! HUD text derived from `GameStats`.  Holds no game logic: each `prep_*`
//! call re-renders one piece of text from the stats it is given.

use crate::stats::GameStats;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    /// One ship glyph is drawn per remaining ship.
    pub ships: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut board = Scoreboard::default();
        board.prep_images(stats);
        board
    }

    pub fn prep_images(&mut self, stats: &GameStats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = stats.ships_left;
    }
}

/// Round to the nearest ten (ties go to the even ten) and group thousands
/// with commas: `1_234_565` → `"1,234,560"`.
pub fn format_score(score: u32) -> String {
    let rounded = round_to_ten(score);
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn round_to_ten(value: u32) -> u32 {
    let tens = value / 10;
    let rem = value % 10;
    let tens = match rem {
        0..=4 => tens,
        5 if tens % 2 == 0 => tens,
        _ => tens + 1,
    };
    tens.saturating_mul(10)
}
