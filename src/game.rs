use std::{process::exit, thread::sleep, time::Duration};

use crate::apple::Apple;
use crate::grid::Direction::{self, *};
use crate::snake::Snake;
use crate::term::TermManager;
use crate::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use rand::rngs::ThreadRng;
use rand::thread_rng;

// 20 updates per second
const TICK_INTERVAL_MS: u64 = 50;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';

const SNAKE_COLOR: Color = Color::Green;
const APPLE_COLOR: Color = Color::Red;

pub struct SnakeGame {
    term: TermManager,
    rng: ThreadRng,
}

impl SnakeGame {
    pub fn new() -> Self {
        SnakeGame { term: TermManager::new(), rng: thread_rng() }
    }

    pub fn initialize(&mut self) {
        if !self.term.is_big_enough() {
            eprintln!("Terminal too small: the playfield needs 34x26 characters.");
            exit(1);
        }

        self.term.setup();
    }

    pub fn play(&mut self) {
        let mut snake = Snake::new();
        // One free segment on an empty 32x24 grid: a spot always exists
        let mut apple = Apple::spawn(snake.occupied(), &mut self.rng)
            .expect("empty grid has a free cell");

        self.redraw_board(&snake, &apple);

        loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            // Drain everything the terminal queued since the last tick. The
            // single-slot buffer inside the snake coalesces direction keys:
            // the last legal request before the move wins.
            for key_ev in self.term.read_key_events_queue() {
                match key_dir(&key_ev) {
                    Some(dir) => snake.request_turn(dir),
                    None if is_quit(&key_ev) => self.clean_exit(),
                    None => {}
                }
            }

            snake.advance_heading();
            let outcome = snake.move_step(apple.position());

            if outcome.self_collision {
                snake.reset();
                // The old apple may sit under the fresh single-segment body
                if snake.occupied().contains(apple.position()) {
                    apple.relocate(snake.occupied(), &mut self.rng);
                }
                self.redraw_board(&snake, &apple);
                continue;
            }

            if outcome.ate && apple.relocate(snake.occupied(), &mut self.rng).is_none() {
                // The snake covers the whole grid; start over
                snake.reset();
                apple.relocate(snake.occupied(), &mut self.rng);
                self.redraw_board(&snake, &apple);
                continue;
            }

            self.draw_tick(&snake, &apple, outcome.freed_tail);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clean_exit(&mut self) -> ! {
        self.term.restore();
        exit(0);
    }

    /// Erases the vacated tail, then repaints the apple and every body cell.
    fn draw_tick(&mut self, snake: &Snake, apple: &Apple, freed_tail: Option<Cell>) {
        if let Some(tail) = freed_tail {
            self.term.clear_cell(tail);
        }

        self.term.draw_cell(apple.position(), APPLE_CHAR, APPLE_COLOR);
        self.print_snake(snake);
        self.term.present();
    }

    /// Full repaint, used at startup and after a reset.
    fn redraw_board(&mut self, snake: &Snake, apple: &Apple) {
        self.term.clear();
        self.term.draw_border();
        self.term.draw_cell(apple.position(), APPLE_CHAR, APPLE_COLOR);
        self.print_snake(snake);
        self.term.present();
    }

    fn print_snake(&mut self, snake: &Snake) {
        for (i, cell) in snake.body().enumerate() {
            let ch = if i == 0 { head_char(snake.heading()) } else { SNAKE_BODY_CHAR };
            self.term.draw_cell(cell, ch, SNAKE_COLOR);
        }
    }
}

fn head_char(heading: Direction) -> char {
    match heading {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}

fn key_dir(ev: &KeyEvent) -> Option<Direction> {
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Esc, .. }
            | KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
    )
}
