mod input;
pub mod style;

pub use input::{Field, InputAction, InputPanel};

use crate::config::ConfigUpdate;
use crate::scramble::{CellGrid, DISPLAY_CADENCE, PollableState, RenderTarget, Row, Ticker};
use crate::session::ScrambleSession;
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use style::ColorScheme;

/// Errors that can occur while driving the terminal
#[derive(thiserror::Error, Debug)]
pub enum TerminalError {
    #[error("stdout is not a terminal")]
    NotATerminal,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Puts the terminal in raw mode on the alternate screen and restores it when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Top left corner of the grid when centered on a screen of `size` (columns, rows).
///
/// Cells are separated by a blank column.
pub fn grid_origin(size: (u16, u16), width: usize) -> (u16, u16) {
    let (columns, rows) = size;
    let drawn_width = u16::try_from((width * 2).saturating_sub(1)).unwrap_or(u16::MAX);
    (columns.saturating_sub(drawn_width) / 2, rows.saturating_sub(3) / 2)
}

/// A render target that draws the grid in the middle of a terminal, with the input panel
/// below it.
pub struct TerminalScreen<W: Write> {
    writer: W,
    grid: CellGrid,
    size: (u16, u16),
    revealed: Color,
    noise: Color,
    footer: Vec<String>,
    clear_pending: bool,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(writer: W, size: (u16, u16), colors: &ColorScheme) -> Self {
        Self {
            writer,
            grid: CellGrid::default(),
            size,
            revealed: colors.revealed.to_color(),
            noise: colors.noise.to_color(),
            footer: Vec::new(),
            clear_pending: true,
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.size = (columns, rows);
        self.clear_pending = true;
    }

    pub fn set_footer(&mut self, footer: Vec<String>) {
        self.footer = footer;
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn draw_grid(&mut self) -> io::Result<()> {
        let width = self.grid.cell_count(Row::Middle);
        let (left, top) = grid_origin(self.size, width);
        for (offset, row) in Row::ALL.into_iter().enumerate() {
            queue!(self.writer, MoveTo(left, top + offset as u16))?;
            for (index, cell) in self.grid.row(row).iter().enumerate() {
                if index > 0 {
                    queue!(self.writer, Print(' '))?;
                }
                if cell.revealed {
                    queue!(
                        self.writer,
                        SetForegroundColor(self.revealed),
                        SetAttribute(Attribute::Bold),
                        Print(cell.ch),
                        SetAttribute(Attribute::NormalIntensity)
                    )?;
                } else {
                    queue!(self.writer, SetForegroundColor(self.noise), Print(cell.ch))?;
                }
            }
        }
        queue!(self.writer, ResetColor)
    }

    fn draw_footer(&mut self) -> io::Result<()> {
        let (columns, rows) = self.size;
        let top = rows.saturating_sub(self.footer.len() as u16);
        for (offset, line) in self.footer.iter().enumerate() {
            let visible: String = line.chars().take(columns as usize).collect();
            queue!(self.writer, MoveTo(0, top + offset as u16), Clear(ClearType::CurrentLine), Print(visible))?;
        }
        Ok(())
    }
}

impl<W: Write> RenderTarget for TerminalScreen<W> {
    fn cell_count(&self, row: Row) -> usize {
        self.grid.cell_count(row)
    }

    fn set_cell_count(&mut self, row: Row, count: usize) {
        if self.grid.cell_count(row) != count {
            self.clear_pending = true;
        }
        self.grid.set_cell_count(row, count);
    }

    fn set_text(&mut self, row: Row, index: usize, ch: char) {
        self.grid.set_text(row, index, ch);
    }

    fn set_revealed(&mut self, row: Row, index: usize, revealed: bool) {
        self.grid.set_revealed(row, index, revealed);
    }

    fn present(&mut self) -> io::Result<()> {
        if self.clear_pending {
            queue!(self.writer, Clear(ClearType::All))?;
            self.clear_pending = false;
        }
        self.draw_grid()?;
        self.draw_footer()?;
        self.writer.flush()
    }
}

/// Run the animation on the terminal until the user quits.
pub fn run(mut session: ScrambleSession, input_enabled: bool) -> Result<(), TerminalError> {
    if !io::stdout().is_terminal() {
        return Err(TerminalError::NotATerminal);
    }
    let _guard = TerminalGuard::enter()?;
    let mut screen = TerminalScreen::new(io::stdout(), terminal::size()?, session.config().colors());
    let mut panel = InputPanel::new(session.config(), input_enabled);

    let ticker = Ticker::new(DISPLAY_CADENCE);
    let stop = ticker.stop_handle();
    log::info!("starting animation with words {:?}", session.config().words());
    ticker.run(|now| -> Result<PollableState, TerminalError> {
        let mut redraw = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match panel.handle_key(key, session.config().letter_case()) {
                    InputAction::Quit => {
                        stop.stop();
                        return Ok(PollableState::Unmodified);
                    }
                    InputAction::Update(update) => {
                        let committed = matches!(update, ConfigUpdate::HoldTime(_) | ConfigUpdate::FrameRate(_));
                        session.apply(update, now);
                        if committed {
                            panel.sync_numbers(session.config());
                        }
                        redraw = true;
                    }
                    InputAction::Redraw => redraw = true,
                    InputAction::None => {}
                },
                Event::Resize(columns, rows) => {
                    screen.resize(columns, rows);
                    redraw = true;
                }
                _ => {}
            }
        }

        screen.set_footer(panel.lines(session.config(), session.state()));
        let outcome = session.tick(now, &mut screen)?;
        if redraw && outcome == PollableState::Unmodified {
            screen.present()?;
        }
        Ok(outcome)
    })?;
    log::info!("animation stopped");
    Ok(())
}
