//! Game entity types and their per-tick steps.
//!
//! Entities only ever change their own fields.  Spawning, removal and every
//! cross-entity rule live in `compute`.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::assets::{ExplosionSheet, Frame};
use crate::group::{Group, Sprite, TickContext, Updatable};
use crate::rect::Rect;
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::stats::GameStats;

/// Minimum time an explosion frame stays on screen.
pub const EXPLOSION_FRAME_RATE: Duration = Duration::from_millis(50);

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    /// Exact horizontal position; `rect.x` is its truncation.
    pub x: f32,
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            x: 0.0,
            rect: Rect::new(0, 0, settings.ship_width, settings.ship_height),
            moving_left: false,
            moving_right: false,
        };
        ship.center_ship(settings);
        ship
    }

    /// Put the ship back at the bottom centre of the screen.
    pub fn center_ship(&mut self, settings: &Settings) {
        self.rect.x = settings.screen_width / 2 - self.rect.width / 2;
        self.rect.y = settings.screen_height - self.rect.height;
        self.x = self.rect.x as f32;
    }
}

impl Updatable for Ship {
    fn update(&mut self, ctx: &TickContext) {
        let max_x = (ctx.settings.screen_width - self.rect.width).max(0) as f32;
        if self.moving_right {
            self.x += ctx.settings.ship_speed;
        }
        if self.moving_left {
            self.x -= ctx.settings.ship_speed;
        }
        self.x = self.x.clamp(0.0, max_x);
        self.rect.x = self.x as i32;
    }
}

impl Sprite for Ship {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub y: f32,
    pub rect: Rect,
}

impl Bullet {
    /// A bullet leaving the ship's nose.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let rect = Rect::new(
            ship.rect.center_x() - settings.bullet_width / 2,
            ship.rect.top(),
            settings.bullet_width,
            settings.bullet_height,
        );
        Bullet {
            y: rect.y as f32,
            rect,
        }
    }
}

impl Updatable for Bullet {
    fn update(&mut self, ctx: &TickContext) {
        self.y -= ctx.settings.bullet_speed;
        self.rect.y = self.y as i32;
    }
}

impl Sprite for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub x: f32,
    pub rect: Rect,
}

impl Alien {
    pub fn at(settings: &Settings, x: i32, y: i32) -> Self {
        Alien {
            x: x as f32,
            rect: Rect::new(x, y, settings.alien_width, settings.alien_height),
        }
    }

    /// True if the alien touches either side of the screen.
    pub fn check_edges(&self, settings: &Settings) -> bool {
        self.rect.right() >= settings.screen_width || self.rect.left() <= 0
    }
}

impl Updatable for Alien {
    fn update(&mut self, ctx: &TickContext) {
        self.x += ctx.settings.alien_speed * ctx.settings.fleet_direction as f32;
        self.rect.x = self.x as i32;
    }
}

impl Sprite for Alien {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// One-shot animation.  Plays every frame of the sheet once, then dies.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    pub frame: usize,
    pub last_update: Instant,
    pub frame_rate: Duration,
    sheet: Rc<ExplosionSheet>,
}

impl Explosion {
    pub fn new(sheet: Rc<ExplosionSheet>, x: i32, y: i32, now: Instant) -> Self {
        let (width, height) = sheet
            .frame(0)
            .map(|f| {
                let width = f.iter().map(|row| row.chars().count()).max().unwrap_or(0);
                (width as i32, f.len() as i32)
            })
            .unwrap_or((0, 0));
        Explosion {
            rect: Rect::new(x, y, width, height),
            frame: 0,
            last_update: now,
            frame_rate: EXPLOSION_FRAME_RATE,
            sheet,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.sheet.len()
    }

    /// The frame to draw, or `None` once the animation has finished.
    pub fn image(&self) -> Option<&Frame> {
        self.sheet.frame(self.frame)
    }
}

impl Updatable for Explosion {
    fn update(&mut self, ctx: &TickContext) {
        if ctx.now.saturating_duration_since(self.last_update) > self.frame_rate {
            self.last_update = ctx.now;
            self.frame += 1;
        }
    }

    fn is_alive(&self) -> bool {
        self.frame < self.sheet.len()
    }
}

impl Sprite for Explosion {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Play button ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    pub const WIDTH: i32 = 12;
    pub const HEIGHT: i32 = 3;

    /// A button centred on the screen.
    pub fn new(settings: &Settings, label: &str) -> Self {
        let x = settings.screen_width / 2 - Self::WIDTH / 2;
        let y = settings.screen_height / 2 - Self::HEIGHT / 2;
        Button {
            rect: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
            label: label.to_owned(),
        }
    }
}

// ── Loop pauses ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseKind {
    /// Short beat after losing a ship while others remain.
    Respawn,
    /// The GAME OVER overlay stays up until the deadline.
    GameOver,
}

/// While a pause is pending the loop reads no input and advances nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pause {
    pub kind: PauseKind,
    pub until: Instant,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the controller owns.
#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub ship: Ship,
    pub bullets: Group<Bullet>,
    pub aliens: Group<Alien>,
    pub explosions: Group<Explosion>,
    pub play_button: Button,
    pub sheet: Rc<ExplosionSheet>,
    pub pause: Option<Pause>,
    /// Whether the pointer should be shown (menu) or hidden (playing).
    pub pointer_visible: bool,
}
