use crate::{Coords, TermInt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Empty,
    Food,
    Head,
    Body,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => 'X',
            Cell::Empty => ' ',
            Cell::Food => '#',
            Cell::Head => '0',
            Cell::Body => '*',
        }
    }
}

/// Square grid whose outermost ring is always wall.
#[derive(Clone, Debug)]
pub struct Board {
    size: TermInt,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: TermInt) -> Self {
        let mut board = Board { size, cells: vec![Cell::Empty; size as usize * size as usize] };
        board.reset();
        board
    }

    /// Blank every cell, then rebuild the border walls.
    pub fn reset(&mut self) {
        let size = self.size;
        for y in 0..size {
            for x in 0..size {
                let cell = if self.is_border((x, y)) { Cell::Wall } else { Cell::Empty };
                let idx = self.index((x, y));
                self.cells[idx] = cell;
            }
        }
    }

    pub fn size(&self) -> TermInt {
        self.size
    }

    pub fn get(&self, pos: Coords) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    /// Writes a cell unless `pos` is off the grid or on the border.
    pub fn set(&mut self, pos: Coords, cell: Cell) -> bool {
        if !self.contains(pos) || self.is_border(pos) {
            return false;
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
        true
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.size && pos.1 < self.size
    }

    pub fn is_border(&self, pos: Coords) -> bool {
        pos.0 == 0 || pos.1 == 0 || pos.0 == self.size - 1 || pos.1 == self.size - 1
    }

    pub fn empty_cells(&self) -> Vec<Coords> {
        (0..self.size)
            .flat_map(|y| (0..self.size).map(move |x| (x, y)))
            .filter(|pos| self.get(*pos) == Some(Cell::Empty))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size as usize)
    }

    fn index(&self, pos: Coords) -> usize {
        self.size as usize * pos.1 as usize + pos.0 as usize
    }
}
