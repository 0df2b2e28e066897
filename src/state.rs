use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::board::{Board, Cell};
use crate::input::Command;
use crate::snake::{Direction, Tail};
use crate::{Coords, TermInt};

/// Random interior draws tried before falling back to a full scan.
const FOOD_DRAWS: usize = 64;
/// Random placements stay this many cells away from each edge.
const INTERIOR_MARGIN: TermInt = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Moving,
    /// `cleared` is set when the snake filled the whole board.
    GameOver { cleared: bool },
}

pub struct GameState {
    board: Board,
    tail: Tail,
    food: Coords,
    direction: Direction,
    phase: Phase,
    score: u32,
    last_score: u32,
}

impl GameState {
    pub fn new(size: TermInt) -> Self {
        let area = size as usize * size as usize;
        GameState {
            board: Board::new(size),
            tail: Tail::with_capacity(area),
            food: (0, 0),
            direction: Direction::Up,
            phase: Phase::NotStarted,
            score: 0,
            last_score: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tail(&self) -> &Tail {
        &self.tail
    }

    /// `None` unless a game is running.
    pub fn head(&self) -> Option<Coords> {
        self.tail.head()
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    /// Applies a turn or new-game request. Quit is the caller's business and
    /// is ignored here.
    pub fn apply<R: Rng + ?Sized>(&mut self, cmd: Command, rng: &mut R) {
        match cmd {
            Command::Turn(dir) => self.turn(dir),
            Command::NewGame => self.new_game(rng),
            Command::Quit => {}
        }
    }

    pub fn turn(&mut self, dir: Direction) {
        if self.phase != Phase::Moving {
            return;
        }
        // Checked against the cell behind the head, not the current
        // direction, which may already have changed since the last move.
        let (Some(head), Some(neck)) = (self.tail.head(), self.tail.neck()) else {
            self.direction = dir;
            return;
        };
        if dir.step(head) == Some(neck) {
            return;
        }
        self.direction = dir;
    }

    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.phase == Phase::Moving {
            self.end_game(false);
        }

        let head = self.random_interior(rng);
        let mut food = self.random_interior(rng);
        while food == head {
            food = self.random_interior(rng);
        }
        self.begin(head, food, Direction::Up);
    }

    /// Begin a game with the head and food at fixed cells. Both must be
    /// distinct cells inside the walls.
    pub fn start_at(&mut self, head: Coords, food: Coords, direction: Direction) -> Result<()> {
        for (what, pos) in [("head", head), ("food", food)] {
            if !self.board.contains(pos) || self.board.is_border(pos) {
                let size = self.board.size();
                bail!("{} at {:?} is not inside the walls of a {}x{} board", what, pos, size, size);
            }
        }
        if head == food {
            bail!("head and food share the cell {:?}", head);
        }
        self.begin(head, food, direction);
        Ok(())
    }

    fn begin(&mut self, head: Coords, food: Coords, direction: Direction) {
        self.reset_round();
        self.food = food;
        self.direction = direction;
        self.tail.reset_to(head);
        self.phase = Phase::Moving;
        self.repaint();

        info!(?head, ?food, "new game");
    }

    /// Advances the snake one cell when `can_move` is set.
    pub fn tick<R: Rng + ?Sized>(&mut self, can_move: bool, rng: &mut R) {
        if self.phase != Phase::Moving || !can_move {
            return;
        }

        let Some(head) = self.tail.head() else {
            return;
        };
        let dest = match self.direction.step(head) {
            Some(pos) => pos,
            None => return self.end_game(false),
        };

        match self.board.get(dest) {
            None | Some(Cell::Wall) | Some(Cell::Body) => return self.end_game(false),
            _ => {}
        }

        let ate = dest == self.food;
        self.tail.advance(dest, ate);

        if !ate {
            self.repaint();
            return;
        }

        self.score += 1;
        self.repaint();
        info!(score = self.score, at = ?dest, "food eaten");

        match self.place_food(rng) {
            Some(pos) => {
                self.food = pos;
                self.board.set(pos, Cell::Food);
            }
            None => self.end_game(true),
        }
    }

    fn end_game(&mut self, cleared: bool) {
        if cleared {
            info!(score = self.score, "board cleared");
        } else {
            info!(score = self.score, head = ?self.tail.head(), "game over");
        }
        self.last_score = self.score;
        self.reset_round();
        self.phase = Phase::GameOver { cleared };
    }

    fn reset_round(&mut self) {
        self.score = 0;
        self.tail.clear();
        self.board.reset();
    }

    /// Draws random interior cells until one is empty, then settles for any
    /// empty cell on the board. `None` means the board is full.
    fn place_food<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coords> {
        for _ in 0..FOOD_DRAWS {
            let pos = self.random_interior(rng);
            if self.board.get(pos) == Some(Cell::Empty) {
                return Some(pos);
            }
        }

        self.board.empty_cells().choose(rng).copied()
    }

    fn random_interior<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        let size = self.board.size();
        let lo = INTERIOR_MARGIN.min(size / 2);
        let hi = size.saturating_sub(INTERIOR_MARGIN).max(lo + 1);
        (rng.gen_range(lo..hi), rng.gen_range(lo..hi))
    }

    /// Rebuilds the board from food, body and head, in that order.
    fn repaint(&mut self) {
        self.board.reset();
        if self.phase != Phase::Moving {
            return;
        }

        if self.tail.head() != Some(self.food) {
            self.board.set(self.food, Cell::Food);
        }
        for pos in self.tail.body() {
            self.board.set(pos, Cell::Body);
        }
        if let Some(head) = self.tail.head() {
            self.board.set(head, Cell::Head);
        }
    }
}
