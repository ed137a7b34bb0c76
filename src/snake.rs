use std::collections::VecDeque;

use crate::grid::{self, wrap, Direction, Occupancy, GRID_HEIGHT, GRID_WIDTH};
use crate::Cell;

/// What a single tick's move did, for the orchestrator and the renderer.
pub struct MoveOutcome {
    pub new_head: Cell,
    /// The tail cell vacated this tick, to be erased; `None` when growing.
    pub freed_tail: Option<Cell>,
    pub ate: bool,
    pub self_collision: bool,
}

pub struct Snake {
    body: VecDeque<Cell>,
    occupied: Occupancy,
    heading: Direction,
    pending_heading: Option<Direction>,
}

impl Snake {
    /// A single segment at the grid center, heading right.
    pub fn new() -> Self {
        let mut body = VecDeque::new();
        let mut occupied = Occupancy::new();
        let start = grid::center();
        body.push_back(start);
        occupied.insert(start);

        Snake { body, occupied, heading: Direction::Right, pending_heading: None }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupied(&self) -> &Occupancy {
        &self.occupied
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Buffers a turn for the next move. Requests equal to the current
    /// heading or its 180° reversal are silently dropped; later requests in
    /// the same tick overwrite earlier ones. Validation is always against
    /// `heading`, not the buffer, so two same-tick requests cannot compound
    /// into a reversal.
    pub fn request_turn(&mut self, dir: Direction) {
        if dir != self.heading && !dir.is_opposite(self.heading) {
            self.pending_heading = Some(dir);
        }
    }

    /// Latches the buffered turn, if any. Called once per tick, before the move.
    pub fn advance_heading(&mut self) {
        if let Some(dir) = self.pending_heading.take() {
            self.heading = dir;
        }
    }

    /// Advances one cell along the current heading, wrapping at the grid
    /// edges, eating `food` if the new head lands on it.
    pub fn move_step(&mut self, food: Cell) -> MoveOutcome {
        let (dx, dy) = self.heading.delta();
        let (hx, hy) = self.head();
        let new_head = (wrap(hx as i32 + dx, GRID_WIDTH), wrap(hy as i32 + dy, GRID_HEIGHT));

        let ate = new_head == food;

        // Pop the tail before the collision check: moving into the cell the
        // tail vacates on this same tick is not a collision.
        let freed_tail = if ate {
            None
        } else {
            let tail = self.body.pop_back().expect("snake body is never empty");
            self.occupied.remove(tail);
            Some(tail)
        };

        // The new head can never coincide with the old one (a move is a unit
        // step), so membership here means a segment behind the head was hit.
        let self_collision = self.occupied.contains(new_head);

        self.body.push_front(new_head);
        self.occupied.insert(new_head);

        MoveOutcome { new_head, freed_tail, ate, self_collision }
    }

    /// Back to the initial state. On self-collision the body briefly holds a
    /// duplicated cell; the caller reacts to the outcome by calling this, so
    /// that state never survives the tick.
    pub fn reset(&mut self) {
        *self = Snake::new();
    }
}
