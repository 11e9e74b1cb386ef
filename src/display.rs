//! Terminal drawing for a `GameState`.
//!
//! Reads the state, never changes it.  The play field starts at the terminal's
//! top-left cell, so screen coordinates and terminal cells coincide.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use alien_invasion::compute::menu_visible;
use alien_invasion::entities::{Alien, Bullet, Button, Explosion, GameState, PauseKind, Ship};
use alien_invasion::rect::Rect;
use alien_invasion::settings::Rgb;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_SHIPS: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_EXPLOSION: Color = Color::Red;
const C_BUTTON_BG: Color = Color::Rgb { r: 0, g: 160, b: 0 };
const C_BUTTON_TEXT: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;

// ── Sprites ───────────────────────────────────────────────────────────────────

const SHIP_SPRITE: [&str; 2] = [" ▲ ", "/|\\"];
const ALIEN_SPRITE: [&str; 2] = ["<▼>", "[_]"];
const BULLET_GLYPH: &str = "║";
const SHIP_ICON: &str = "▲";

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

// ── Drawable capability ───────────────────────────────────────────────────────

/// Draws itself inside the play field `field`.  Cells outside the field are
/// clipped.
pub trait Drawable {
    fn draw<W: Write>(&self, out: &mut W, field: &Rect) -> std::io::Result<()>;
}

impl Drawable for Ship {
    fn draw<W: Write>(&self, out: &mut W, field: &Rect) -> std::io::Result<()> {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        draw_rows(out, field, self.rect.x, self.rect.y, SHIP_SPRITE.iter().copied())
    }
}

impl Drawable for Alien {
    fn draw<W: Write>(&self, out: &mut W, field: &Rect) -> std::io::Result<()> {
        out.queue(style::SetForegroundColor(C_ALIEN))?;
        draw_rows(out, field, self.rect.x, self.rect.y, ALIEN_SPRITE.iter().copied())
    }
}

impl Drawable for Bullet {
    fn draw<W: Write>(&self, out: &mut W, field: &Rect) -> std::io::Result<()> {
        let line = BULLET_GLYPH.repeat(self.rect.width.max(1) as usize);
        let rows = std::iter::repeat(line.as_str()).take(self.rect.height.max(1) as usize);
        draw_rows(out, field, self.rect.x, self.rect.y, rows)
    }
}

impl Drawable for Explosion {
    fn draw<W: Write>(&self, out: &mut W, field: &Rect) -> std::io::Result<()> {
        let Some(image) = self.image() else {
            return Ok(());
        };
        out.queue(style::SetForegroundColor(C_EXPLOSION))?;
        draw_rows(out, field, self.rect.x, self.rect.y, image.iter().map(String::as_str))
    }
}

impl Drawable for Button {
    fn draw<W: Write>(&self, out: &mut W, field: &Rect) -> std::io::Result<()> {
        out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
        out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
        let width = self.rect.width.max(0) as usize;
        let blank = " ".repeat(width);
        let label = format!("{:^width$}", self.label, width = width);
        let middle = self.rect.height / 2;
        for row in 0..self.rect.height {
            let text = if row == middle { &label } else { &blank };
            draw_line(out, field, self.rect.x, self.rect.y + row, text, false)?;
        }
        Ok(())
    }
}

fn draw_group<'a, T, W>(
    out: &mut W,
    field: &Rect,
    members: impl IntoIterator<Item = &'a T>,
) -> std::io::Result<()>
where
    T: Drawable + 'a,
    W: Write,
{
    for member in members {
        member.draw(out, field)?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let settings = &state.settings;
    let field = Rect::new(0, 0, settings.screen_width, settings.screen_height);
    let bg = rgb(settings.bg_color);

    out.queue(style::SetBackgroundColor(bg))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    out.queue(style::SetForegroundColor(rgb(settings.bullet_color)))?;
    draw_group(out, &field, &state.bullets)?;
    state.ship.draw(out, &field)?;
    draw_group(out, &field, &state.aliens)?;
    draw_group(out, &field, &state.explosions)?;

    draw_scoreboard(out, state, &field)?;

    let menu = menu_visible(state);
    if menu {
        state.play_button.draw(out, &field)?;
        out.queue(style::SetBackgroundColor(bg))?;
    }

    if matches!(state.pause, Some(p) if p.kind == PauseKind::GameOver) {
        draw_game_over(out, state, &field)?;
    }

    out.queue(style::ResetColor)?;
    if state.pointer_visible && menu {
        // Rest the cursor on the Play button so it reads as a pointer.
        let button = &state.play_button.rect;
        out.queue(cursor::MoveTo(
            button.center_x().max(0) as u16,
            button.center_y().max(0) as u16,
        ))?;
        out.queue(cursor::Show)?;
    } else {
        out.queue(cursor::Hide)?;
        out.queue(cursor::MoveTo(0, field.bottom().saturating_sub(1).max(0) as u16))?;
    }
    out.flush()?;
    Ok(())
}

// ── Scoreboard (rows 0–1) ─────────────────────────────────────────────────────

fn draw_scoreboard<W: Write>(out: &mut W, state: &GameState, field: &Rect) -> std::io::Result<()> {
    let board = &state.scoreboard;

    // Remaining ships — left
    out.queue(style::SetForegroundColor(C_HUD_SHIPS))?;
    let ships = SHIP_ICON.repeat(board.ships as usize);
    draw_line(out, field, 1, 0, &ships, false)?;

    // High score — centre
    let high = format!("High: {}", board.high_score_text);
    let hx = field.center_x() - high.chars().count() as i32 / 2;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    draw_line(out, field, hx, 0, &high, false)?;

    // Score and level — right
    let score = format!("Score: {}", board.score_text);
    let sx = field.right() - score.chars().count() as i32 - 1;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    draw_line(out, field, sx, 0, &score, false)?;

    let level = format!("Level: {}", board.level_text);
    let lx = field.right() - level.chars().count() as i32 - 1;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    draw_line(out, field, lx, 1, &level, false)?;

    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, field: &Rect) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.scoreboard.score_text);
    let lines: [(&str, Color); 4] = [
        ("╔══════════════════╗", C_GAME_OVER),
        ("║    GAME  OVER    ║", C_GAME_OVER),
        ("╚══════════════════╝", C_GAME_OVER),
        (score_line.as_str(), C_HUD_SCORE),
    ];

    let start_row = field.center_y() - lines.len() as i32 / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = field.center_x() - msg.chars().count() as i32 / 2;
        out.queue(style::SetForegroundColor(*color))?;
        draw_line(out, field, col, start_row + i as i32, msg, false)?;
    }
    Ok(())
}

// ── Clipped text helpers ──────────────────────────────────────────────────────

/// Draw consecutive rows starting at (`x`, `y`).  Spaces in sprites are
/// transparent.
fn draw_rows<'a, W: Write>(
    out: &mut W,
    field: &Rect,
    x: i32,
    y: i32,
    rows: impl Iterator<Item = &'a str>,
) -> std::io::Result<()> {
    for (i, row) in rows.enumerate() {
        draw_line(out, field, x, y + i as i32, row, true)?;
    }
    Ok(())
}

/// Print `text` at (`x`, `y`), dropping every character that falls outside
/// `field`.
fn draw_line<W: Write>(
    out: &mut W,
    field: &Rect,
    x: i32,
    y: i32,
    text: &str,
    transparent_spaces: bool,
) -> std::io::Result<()> {
    if y < field.top() || y >= field.bottom() {
        return Ok(());
    }
    for (i, ch) in text.chars().enumerate() {
        let col = x + i as i32;
        if col < field.left() || col >= field.right() {
            continue;
        }
        if transparent_spaces && ch == ' ' {
            continue;
        }
        out.queue(cursor::MoveTo(col as u16, y as u16))?;
        out.queue(Print(ch))?;
    }
    Ok(())
}
