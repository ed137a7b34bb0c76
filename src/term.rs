use std::{io::{stdout, Stdout, Write}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::grid::{GRID_HEIGHT, GRID_WIDTH};
use crate::{Cell, GridInt};

// One border row/column on each side of the grid
const SCREEN_WIDTH: GridInt = GRID_WIDTH + 2;
const SCREEN_HEIGHT: GridInt = GRID_HEIGHT + 2;

/// Thin crossterm wrapper drawing grid cells onto the terminal. Grid
/// coordinates are offset by the one-character frame around the playfield.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    /// Whether the terminal is big enough for the grid plus its frame.
    /// Checked before entering the alternate screen so the error is readable.
    pub fn is_big_enough(&self) -> bool {
        let (w, h) = terminal::size().expect("Error reading size.");
        w >= SCREEN_WIDTH && h >= SCREEN_HEIGHT
    }

    pub fn setup(&mut self) {
        execute!(self.stdout, EnterAlternateScreen).expect("Error entering alt screen");
        self.set_raw_mode(true);
        self.set_cursor_visibility(false);
        self.set_cursor_blink(false);
    }

    pub fn restore(&mut self) {
        self.set_raw_mode(false);
        self.set_cursor_visibility(true);
        self.set_cursor_blink(true);
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen)
            .expect("Error leaving alt screen");
    }

    /// All key events queued by the terminal since the last drain.
    pub fn read_key_events_queue(&self) -> Vec<KeyEvent> {
        let mut events = vec![];

        while poll(Duration::from_millis(1)).unwrap() {
            if let Event::Key(ev) = read().unwrap() {
                events.push(ev);
            }
        }

        events
    }

    /// Paints one grid-aligned cell.
    pub fn draw_cell(&mut self, cell: Cell, ch: char, color: Color) {
        queue!(
            self.stdout,
            cursor::MoveTo(cell.0 + 1, cell.1 + 1),
            SetForegroundColor(color),
            style::Print(ch)
        )
        .unwrap();
    }

    /// Paints a cell back to the background.
    pub fn clear_cell(&mut self, cell: Cell) {
        queue!(self.stdout, cursor::MoveTo(cell.0 + 1, cell.1 + 1), style::Print(' ')).unwrap();
    }

    /// Frame around the playfield, marking the torus seam.
    pub fn draw_border(&mut self) {
        let end_x = SCREEN_WIDTH - 1;
        let end_y = SCREEN_HEIGHT - 1;

        for x in 0..SCREEN_WIDTH {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, 0), ch);
            self.print_at((x, end_y), ch);
        }

        for y in 1..end_y {
            self.print_at((0, y), '|');
            self.print_at((end_x, y), '|');
        }

        self.present();
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing.");
    }

    /// Commits everything queued this tick to the screen.
    pub fn present(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: (GridInt, GridInt), ch: char) {
        // Raw screen coordinates, used for the frame only
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(Color::Reset),
            style::Print(ch)
        )
        .unwrap();
    }

    fn set_raw_mode(&self, option: bool) {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.expect("Error setting raw mode.");
    }

    fn set_cursor_blink(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.expect("Error setting cursor blink.");
    }

    fn set_cursor_visibility(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.expect("Error setting cursor visibility.");
    }
}
