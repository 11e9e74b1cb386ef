//! Game controller.
//!
//! Every function here takes the `GameState` it drives.  The only side
//! effects are the injected `Audio` sink and the `now` instant the caller
//! passes in, so tests fully control time and sound.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::assets::ExplosionSheet;
use crate::audio::{Audio, Sound};
use crate::entities::{Alien, Bullet, Button, Explosion, GameState, Pause, PauseKind, Ship};
use crate::group::{group_collide, Group, TickContext, Updatable};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::stats::GameStats;

/// Freeze after losing a ship while others remain.
pub const RESPAWN_PAUSE: Duration = Duration::from_millis(500);
/// How long the GAME OVER overlay is held.
pub const GAME_OVER_PAUSE: Duration = Duration::from_secs(2);

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Play,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer click at a screen cell.
    Click { x: i32, y: i32 },
    /// The host asked us to close.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the session state: ship centred, first fleet in place, menu showing.
pub fn init_state(settings: Settings, sheet: Rc<ExplosionSheet>) -> GameState {
    let stats = GameStats::new(&settings);
    let scoreboard = Scoreboard::new(&stats);
    let ship = Ship::new(&settings);
    let play_button = Button::new(&settings, "Play");
    let mut state = GameState {
        settings,
        stats,
        scoreboard,
        ship,
        bullets: Group::new(),
        aliens: Group::new(),
        explosions: Group::new(),
        play_button,
        sheet,
        pause: None,
        pointer_visible: true,
    };
    create_fleet(&mut state);
    state
}

// ── Input handling ────────────────────────────────────────────────────────────

pub fn handle_input(state: &mut GameState, input: Input) -> Flow {
    match input {
        Input::Quit | Input::KeyDown(Key::Quit) => return Flow::Quit,
        Input::KeyDown(Key::Left) => state.ship.moving_left = true,
        Input::KeyDown(Key::Right) => state.ship.moving_right = true,
        Input::KeyDown(Key::Fire) => {
            fire_bullet(state);
        }
        Input::KeyDown(Key::Play) => {
            start_game(state);
        }
        Input::KeyUp(Key::Left) => state.ship.moving_left = false,
        Input::KeyUp(Key::Right) => state.ship.moving_right = false,
        Input::KeyUp(_) => {}
        Input::Click { x, y } => {
            check_play_button(state, x, y);
        }
    }
    Flow::Continue
}

/// Start a game if the click landed on the Play button while in the menu.
/// Returns true when a game was started.
pub fn check_play_button(state: &mut GameState, x: i32, y: i32) -> bool {
    state.play_button.rect.contains_point(x, y) && start_game(state)
}

/// Reset everything for a fresh game.  Does nothing while a game is running.
pub fn start_game(state: &mut GameState) -> bool {
    if state.stats.game_active {
        return false;
    }
    state.settings.reset_dynamic();
    state.stats.reset_stats(&state.settings);
    state.stats.game_active = true;
    state.pointer_visible = false;
    state.scoreboard.prep_images(&state.stats);

    state.aliens.empty();
    state.bullets.empty();
    create_fleet(state);
    state.ship.center_ship(&state.settings);

    tracing::info!(high_score = state.stats.high_score, "new game started");
    true
}

/// Fire from the ship's nose, unless the on-screen cap is reached.
pub fn fire_bullet(state: &mut GameState) -> bool {
    if !state.stats.game_active || state.bullets.len() >= state.settings.bullets_allowed {
        return false;
    }
    state.bullets.add(Bullet::new(&state.settings, &state.ship));
    true
}

// ── Pauses ────────────────────────────────────────────────────────────────────

/// Returns true while a pause is still running.  Once its deadline has
/// passed the pause is cleared and the loop carries on (into the game after
/// a respawn, into the menu after a game over).
pub fn resume_if_due(state: &mut GameState, now: Instant) -> bool {
    match state.pause {
        None => false,
        Some(pause) if now < pause.until => true,
        Some(pause) => {
            state.pause = None;
            tracing::debug!(kind = ?pause.kind, "pause finished");
            false
        }
    }
}

/// The Play button and pointer are shown in the menu, but not while the
/// GAME OVER overlay is still being held.
pub fn menu_visible(state: &GameState) -> bool {
    !state.stats.game_active
        && !matches!(state.pause, Some(p) if p.kind == PauseKind::GameOver)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one frame.  Entities only move while a game is
/// active; explosions animate whenever the loop is not paused.
pub fn tick(state: &mut GameState, now: Instant, audio: &mut impl Audio) {
    if state.pause.is_some() {
        return;
    }

    if state.stats.game_active {
        {
            let ctx = TickContext {
                settings: &state.settings,
                now,
            };
            state.ship.update(&ctx);
        }
        update_bullets(state, now, audio);
        update_aliens(state, now, audio);
    }

    animate_explosions(state, now);
}

pub fn animate_explosions(state: &mut GameState, now: Instant) {
    let ctx = TickContext {
        settings: &state.settings,
        now,
    };
    state.explosions.update(&ctx);
}

fn update_bullets(state: &mut GameState, now: Instant, audio: &mut impl Audio) {
    let ctx = TickContext {
        settings: &state.settings,
        now,
    };
    state.bullets.update(&ctx);
    state.bullets.retain(|b| b.rect.bottom() > 0);

    check_bullet_alien_collisions(state, now, audio);
}

fn check_bullet_alien_collisions(state: &mut GameState, now: Instant, audio: &mut impl Audio) {
    let collisions = group_collide(&mut state.bullets, &mut state.aliens);
    if !collisions.is_empty() {
        for (_bullet, aliens) in &collisions {
            for alien in aliens {
                state.explosions.add(Explosion::new(
                    Rc::clone(&state.sheet),
                    alien.rect.x,
                    alien.rect.y,
                    now,
                ));
            }
            let gain = state.settings.alien_points.saturating_mul(aliens.len() as u32);
            state.stats.score = state.stats.score.saturating_add(gain);
            state.scoreboard.prep_score(&state.stats);
            audio.play(Sound::AlienHit);
        }
        if state.stats.check_high_score() {
            state.scoreboard.prep_high_score(&state.stats);
        }
    }

    if state.aliens.is_empty() {
        start_new_level(state);
    }
}

fn start_new_level(state: &mut GameState) {
    state.bullets.empty();
    state.settings.increase_speed();
    state.stats.level += 1;
    state.scoreboard.prep_level(&state.stats);
    create_fleet(state);
    tracing::info!(
        level = state.stats.level,
        alien_points = state.settings.alien_points,
        "fleet destroyed, next level"
    );
}

fn update_aliens(state: &mut GameState, now: Instant, audio: &mut impl Audio) {
    check_fleet_edges(state);
    {
        let ctx = TickContext {
            settings: &state.settings,
            now,
        };
        state.aliens.update(&ctx);
    }

    if state.aliens.collide_any(&state.ship.rect) {
        ship_hit(state, now, audio);
    } else if aliens_reached_bottom(state) {
        ship_hit(state, now, audio);
    }
}

/// Flip and drop the fleet as soon as one alien is found at an edge.
fn check_fleet_edges(state: &mut GameState) {
    if state.aliens.iter().any(|a| a.check_edges(&state.settings)) {
        change_fleet_direction(state);
    }
}

fn change_fleet_direction(state: &mut GameState) {
    let drop = state.settings.fleet_drop_speed;
    for alien in state.aliens.iter_mut() {
        alien.rect.y += drop;
    }
    state.settings.fleet_direction *= -1;
}

fn aliens_reached_bottom(state: &GameState) -> bool {
    state
        .aliens
        .iter()
        .any(|a| a.rect.bottom() >= state.settings.screen_height)
}

// ── Ship hit ──────────────────────────────────────────────────────────────────

/// The ship was rammed or the fleet landed.  Either respawn behind a short
/// pause or, with no ships left, end the game.
pub fn ship_hit(state: &mut GameState, now: Instant, audio: &mut impl Audio) {
    state.stats.ships_left = state.stats.ships_left.saturating_sub(1);
    state.scoreboard.prep_ships(&state.stats);

    if state.stats.ships_left > 0 {
        state.aliens.empty();
        state.bullets.empty();
        create_fleet(state);
        state.ship.center_ship(&state.settings);

        state.explosions.add(Explosion::new(
            Rc::clone(&state.sheet),
            state.ship.rect.x,
            state.ship.rect.y,
            now,
        ));
        audio.play(Sound::ShipHit);

        state.pause = Some(Pause {
            kind: PauseKind::Respawn,
            until: now + RESPAWN_PAUSE,
        });
        tracing::info!(ships_left = state.stats.ships_left, "ship hit");
    } else {
        state.stats.game_active = false;
        state.pointer_visible = true;
        state.ship.moving_left = false;
        state.ship.moving_right = false;
        state.pause = Some(Pause {
            kind: PauseKind::GameOver,
            until: now + GAME_OVER_PAUSE,
        });
        tracing::info!(
            score = state.stats.score,
            high_score = state.stats.high_score,
            level = state.stats.level,
            "game over"
        );
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// How many aliens fit in one row, leaving an alien-wide gap between them
/// and at both sides.
pub fn number_aliens_x(settings: &Settings) -> i32 {
    let available_space_x = settings.screen_width - 2 * settings.alien_width;
    available_space_x
        .checked_div(2 * settings.alien_width)
        .unwrap_or(0)
        .max(0)
}

/// How many rows fit above the ship with room left to manoeuvre.
pub fn number_rows(settings: &Settings) -> i32 {
    let available_space_y =
        settings.screen_height - 3 * settings.alien_height - settings.ship_height;
    available_space_y
        .checked_div(2 * settings.alien_height)
        .unwrap_or(0)
        .max(0)
}

/// Top-left corner of every alien in a fresh fleet, row by row.
pub fn fleet_layout(settings: &Settings) -> Vec<(i32, i32)> {
    let width = settings.alien_width;
    let height = settings.alien_height;
    let columns = number_aliens_x(settings);
    (0..number_rows(settings))
        .flat_map(|row| {
            (0..columns).map(move |col| (width + 2 * width * col, height + 2 * height * row))
        })
        .collect()
}

/// Add a full fleet to the (normally empty) alien group.
pub fn create_fleet(state: &mut GameState) {
    for (x, y) in fleet_layout(&state.settings) {
        state.aliens.add(Alien::at(&state.settings, x, y));
    }
    tracing::debug!(aliens = state.aliens.len(), "fleet created");
}
