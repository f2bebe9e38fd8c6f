/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer only ever sees a `Snapshot`, never the live world.
/// Actors move in pixels; each is drawn on the tile nearest its box.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::entity::{GhostColor, GlobalPhase};
use crate::domain::maze::TilePos;
use crate::domain::physics::{PixelPos, TILE_SIZE};
use crate::sim::snapshot::Snapshot;
use crate::sim::world::Phase;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every cell, so the terminal's own
    /// default never shows through between rows.
    const BASE_BG: Color = Color::Rgb { r: 12, g: 12, b: 24 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i, y, Cell::new(ch, fg, Cell::BASE_BG));
        }
    }

    /// Draw a two-column glyph for the maze tile at (col, row).
    fn put_tile(&mut self, tile: TilePos, glyph: [char; 2], fg: Color, bg: Color) {
        if tile.col < 0 || tile.row < 0 { return; }
        let x = tile.col as usize * CELL_W;
        let y = MAP_ROW + tile.row as usize;
        self.set(x, y, Cell::new(glyph[0], fg, bg));
        self.set(x + 1, y, Cell::new(glyph[1], fg, bg));
    }
}

// ── Layout ──

/// Each maze tile is two terminal columns wide, which keeps it roughly square.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

const WALL_BG: Color = Color::Rgb { r: 30, g: 40, b: 160 };
const PELLET_FG: Color = Color::Rgb { r: 250, g: 200, b: 160 };
const PLAYER_FG: Color = Color::Rgb { r: 255, g: 230, b: 0 };
const FRIGHT_FG: Color = Color::Rgb { r: 60, g: 90, b: 255 };

/// Tile whose origin is nearest to a pixel position.
fn nearest_tile(pos: PixelPos) -> TilePos {
    let half = TILE_SIZE / 2;
    TilePos::new((pos.x + half).div_euclid(TILE_SIZE), (pos.y + half).div_euclid(TILE_SIZE))
}

fn ghost_fg(color: GhostColor) -> Color {
    match color {
        GhostColor::Red => Color::Rgb { r: 255, g: 40, b: 40 },
        GhostColor::Pink => Color::Rgb { r: 255, g: 150, b: 210 },
        GhostColor::Cyan => Color::Rgb { r: 0, g: 230, b: 230 },
        GhostColor::White => Color::White,
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, snap: &Snapshot) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        compose(&mut self.front, snap);

        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

// ── Compose: build front buffer content ──

fn compose(buf: &mut FrameBuffer, snap: &Snapshot) {
    // ── HUD row ──
    let mode = match snap.global_phase {
        GlobalPhase::Patrol => "PATROL",
        GlobalPhase::Pursuit => "PURSUIT",
    };
    let hud = format!(
        " Score: {:<7} Lives: {}   {} {}s",
        snap.score, snap.lives, mode, snap.phase_secs_left
    );
    buf.put_str(0, HUD_ROW, &hud, Color::White);

    // ── Maze ──
    for &tile in &snap.walls {
        buf.put_tile(tile, [' ', ' '], Color::White, WALL_BG);
    }
    for &tile in &snap.pellets {
        buf.put_tile(tile, ['·', ' '], PELLET_FG, Cell::BASE_BG);
    }
    for &tile in &snap.powers {
        buf.put_tile(tile, ['●', ' '], PELLET_FG, Cell::BASE_BG);
    }

    // ── Actors (ghosts over the player, like the arcade) ──
    buf.put_tile(nearest_tile(snap.player_pos), ['(', ')'], PLAYER_FG, Cell::BASE_BG);
    for g in &snap.ghosts {
        let fg = if g.frightened { FRIGHT_FG } else { ghost_fg(g.color) };
        buf.put_tile(nearest_tile(g.pos), ['M', 'M'], fg, Cell::BASE_BG);
    }

    // ── Footer / end banner ──
    let footer_row = MAP_ROW + snap.height + 1;
    match snap.phase {
        Phase::Playing => {
            buf.put_str(0, footer_row, " Arrows/WASD: Move   Q/Esc: Quit", Color::DarkGrey);
        }
        Phase::Won => {
            buf.put_str(0, footer_row, " MAZE CLEARED!  Press any key.", Color::Rgb { r: 80, g: 255, b: 80 });
        }
        Phase::GameOver => {
            buf.put_str(0, footer_row, " GAME OVER  Press any key.", Color::Rgb { r: 255, g: 60, b: 60 });
        }
    }
}
