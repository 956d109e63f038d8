//! Snake body and heading.
//!
//! The body lives in a fixed-capacity [`ArrayVec`] so a running game never
//! reallocates. Index 0 is the head, the last element is the tail.

use arrayvec::ArrayVec;

use snek_types::{Cell, Direction, GRID_HEIGHT, GRID_WIDTH, INITIAL_SNAKE_LENGTH, SNAKE_CAPACITY};

pub type Body = ArrayVec<Cell, SNAKE_CAPACITY>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Body,
    heading: Direction,
    /// Heading to commit at the start of the next step.
    pending: Direction,
}

impl Snake {
    /// Three horizontal segments centred on the grid, heading right.
    pub fn new() -> Self {
        let head = Cell::new(GRID_WIDTH / 2, GRID_HEIGHT / 2);
        let mut body = Body::new();
        for i in 0..INITIAL_SNAKE_LENGTH as i32 {
            body.push(Cell::new(head.x - i, head.y));
        }
        Self {
            body,
            heading: Direction::Right,
            pending: Direction::Right,
        }
    }

    /// Build a snake from explicit segments (head first).
    ///
    /// Segments beyond [`SNAKE_CAPACITY`] are dropped.
    pub fn from_cells(cells: &[Cell], heading: Direction) -> Self {
        let mut body = Body::new();
        for &c in cells.iter().take(SNAKE_CAPACITY) {
            body.push(c);
        }
        Self {
            body,
            heading,
            pending: heading,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> &[Cell] {
        &self.body
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Queue a heading for the next step.
    ///
    /// Ignored (returns false) when it would reverse either the committed
    /// heading or the heading already queued.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir.is_reverse_of(self.heading) || dir.is_reverse_of(self.pending) {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Commit the pending heading; returns it.
    pub fn commit_heading(&mut self) -> Direction {
        self.heading = self.pending;
        self.heading
    }

    /// Shift every segment one slot toward the tail and place `head`.
    ///
    /// The old tail position is discarded.
    pub fn advance(&mut self, head: Cell) {
        let len = self.body.len();
        if len == 0 {
            self.body.push(head);
            return;
        }
        self.body.copy_within(0..len - 1, 1);
        self.body[0] = head;
    }

    /// Append a segment duplicating the current tail.
    ///
    /// No-op once the body is at capacity; returns whether it grew.
    pub fn grow(&mut self) -> bool {
        let Some(&tail) = self.body.last() else {
            return false;
        };
        self.body.try_push(tail).is_ok()
    }

    /// Overwrite everything; used by save-block restore.
    pub(crate) fn restore(&mut self, cells: &[Cell], heading: Direction, pending: Direction) {
        self.body.clear();
        for &c in cells.iter().take(SNAKE_CAPACITY) {
            self.body.push(c);
        }
        self.heading = heading;
        self.pending = pending;
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}
