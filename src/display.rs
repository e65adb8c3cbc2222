/// Rendering layer. All terminal output lives here.
///
/// The simulation works in logical units; this module maps them onto
/// terminal cells, resolves sprites through the asset library and draws
/// the menu, the playfield with its HUD, and the end-of-game screens.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use alien_invasion::assets::{AssetLibrary, AssetProvider, Rgb, Shape, Sprite};
use alien_invasion::compute::{self, GameSession};
use alien_invasion::entities::{GameStatus, MenuOption, Rect};
use alien_invasion::error::GameError;
use alien_invasion::game_loop::Renderer;
use alien_invasion::viewport::ViewportConfig;

/// Logical units covered by one terminal cell. 80×24 cells map to the
/// 800×600 reference screen.
pub const CELL_WIDTH: i32 = 10;
pub const CELL_HEIGHT: i32 = 25;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Yellow;
const C_TITLE_SHADOW: Color = Color::DarkBlue;
const C_MENU: Color = Color::Cyan;
const C_MENU_SELECTED: Color = Color::Yellow;
const C_MENU_SELECTED_BG: Color = Color::DarkMagenta;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_POWERUP_ACTIVE: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;
const C_VICTORY: Color = Color::Yellow;
const C_FINAL_SCORE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_ART: Color = Color::White;

/// Logical viewport for a terminal of `cols` × `rows` cells.
pub fn viewport_for(cols: u16, rows: u16) -> ViewportConfig {
    ViewportConfig::new(cols as i32 * CELL_WIDTH, rows as i32 * CELL_HEIGHT)
}

/// Cell-space box: (col, row, width, height). Width and height are at least 1.
fn to_cells(rect: Rect, viewport: &ViewportConfig, cols: u16, rows: u16) -> (i32, i32, i32, i32) {
    let cols = cols as i32;
    let rows = rows as i32;
    let col = (rect.x * cols).div_euclid(viewport.width);
    let row = (rect.y * rows).div_euclid(viewport.height);
    let w = (rect.w * cols / viewport.width).max(1);
    let h = (rect.h * rows / viewport.height).max(1);
    (col, row, w, h)
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    assets: AssetLibrary,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, assets: AssetLibrary) -> Self {
        Self { out, assets }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, session: &GameSession) -> Result<(), GameError> {
        let (cols, rows) = terminal::size()?;
        render(&mut self.out, &self.assets, session, cols, rows)?;
        Ok(())
    }
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    assets: &AssetLibrary,
    session: &GameSession,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.status {
        GameStatus::Menu => draw_menu(out, session, cols, rows)?,
        GameStatus::Playing => {
            draw_playfield(out, assets, session, cols, rows)?;
            draw_hud(out, session, cols)?;
            draw_controls_hint(out, rows)?;
        }
        GameStatus::GameOver => draw_end_screen(out, session, "GAME OVER", C_GAME_OVER, cols, rows)?,
        GameStatus::Victory => draw_end_screen(out, session, "VICTORY!", C_VICTORY, cols, rows)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    text: &str,
    row: u16,
    cols: u16,
    color: Color,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, session: &GameSession, cols: u16, rows: u16) -> std::io::Result<()> {
    let title = "ALIEN INVASION";
    let title_row = rows / 5;
    let title_col = (cols / 2).saturating_sub(title.len() as u16 / 2);

    // Shadow one cell down-right, then the title on top
    out.queue(cursor::MoveTo(title_col + 1, title_row + 1))?;
    out.queue(style::SetForegroundColor(C_TITLE_SHADOW))?;
    out.queue(Print(title))?;
    print_centered(out, title, title_row, cols, C_TITLE)?;

    let first_option_row = rows * 2 / 5;
    for (i, option) in MenuOption::ALL.iter().enumerate() {
        let row = first_option_row + i as u16 * 2;
        if option == &session.selected_option() {
            let label = format!("> {} <", option.label());
            let col = (cols / 2).saturating_sub(label.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetBackgroundColor(C_MENU_SELECTED_BG))?;
            out.queue(style::SetForegroundColor(C_MENU_SELECTED))?;
            out.queue(Print(&label))?;
            out.queue(style::SetBackgroundColor(Color::Reset))?;
        } else {
            print_centered(out, option.label(), row, cols, C_MENU)?;
        }
    }

    let high_score = format!("High Score: {}", session.high_score);
    print_centered(out, &high_score, rows.saturating_sub(3), cols, C_TITLE)?;
    print_centered(
        out,
        "↑ ↓ / W S : Select   ENTER : Confirm   Q : Quit",
        rows.saturating_sub(1),
        cols,
        C_HINT,
    )?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(
    out: &mut W,
    assets: &AssetLibrary,
    session: &GameSession,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    for command in compute::draw_list(session) {
        let cells = to_cells(command.rect, &session.viewport, cols, rows);
        draw_sprite(out, assets.sprite(command.sprite), cells, cols, rows)?;
    }
    Ok(())
}

fn put_cell<W: Write>(out: &mut W, col: i32, row: i32, glyph: &str, cols: u16, rows: u16) -> std::io::Result<()> {
    if col < 0 || row < 0 || col >= cols as i32 || row >= rows as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    (col, row, w, h): (i32, i32, i32, i32),
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    match sprite {
        Sprite::Art(lines) => {
            out.queue(style::SetForegroundColor(C_ART))?;
            for (dy, line) in lines.iter().enumerate() {
                for (dx, ch) in line.chars().enumerate() {
                    if ch != ' ' {
                        let glyph = ch.to_string();
                        put_cell(out, col + dx as i32, row + dy as i32, &glyph, cols, rows)?;
                    }
                }
            }
        }
        Sprite::Fallback { shape, color } => {
            out.queue(style::SetForegroundColor(to_color(*color)))?;
            match shape {
                Shape::Rectangle => {
                    for dy in 0..h {
                        for dx in 0..w {
                            put_cell(out, col + dx, row + dy, "█", cols, rows)?;
                        }
                    }
                }
                Shape::Circle => {
                    // Cell centres inside the inscribed ellipse
                    let mut drawn = false;
                    for dy in 0..h {
                        for dx in 0..w {
                            let nx = (dx as f32 + 0.5) / w as f32 * 2.0 - 1.0;
                            let ny = (dy as f32 + 0.5) / h as f32 * 2.0 - 1.0;
                            if nx * nx + ny * ny <= 1.0 {
                                put_cell(out, col + dx, row + dy, "█", cols, rows)?;
                                drawn = true;
                            }
                        }
                    }
                    if !drawn {
                        put_cell(out, col + w / 2, row + h / 2, "●", cols, rows)?;
                    }
                }
                Shape::Triangle => {
                    for dy in 0..h {
                        let span = (w * (dy + 1) / h).max(1);
                        let start = col + (w - span) / 2;
                        let glyph = if dy == 0 && span == 1 { "▲" } else { "█" };
                        for dx in 0..span {
                            put_cell(out, start + dx, row + dy, glyph, cols, rows)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {} / {}", session.score, session.target_score)))?;

    // Full hearts for remaining lives, outlines for the rest
    let hearts: String = (0..session.max_lives)
        .map(|i| if i < session.lives { '♥' } else { '♡' })
        .collect();
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(hearts))?;

    let player = &session.player;
    let mut tags = String::new();
    if player.speed_boost_active() {
        tags.push_str(&format!("[» SPEED {:>2}s] ", player.speed_boost_timer / 60 + 1));
    }
    if player.rapid_fire_active() {
        tags.push_str(&format!("[! RAPID {:>2}s] ", player.rapid_fire_timer / 60 + 1));
    }
    if !tags.is_empty() {
        let col = cols.saturating_sub(tags.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&tags))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over / victory screen ────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    session: &GameSession,
    headline: &str,
    headline_color: Color,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let mid = rows / 2;
    print_centered(out, headline, mid.saturating_sub(4), cols, headline_color)?;

    let score_line = format!("Final Score: {}", session.score);
    print_centered(out, &score_line, mid, cols, C_FINAL_SCORE)?;

    if session.new_best {
        print_centered(out, "★ NEW BEST ★", mid + 1, cols, C_TITLE)?;
    }

    print_centered(out, "Press ENTER to continue", mid + 4, cols, Color::White)?;
    Ok(())
}
