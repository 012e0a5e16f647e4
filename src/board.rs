use rand::{seq::SliceRandom, thread_rng};
use std::fmt;
use thiserror::Error;

pub const MIN_CELLS: usize = 2;
pub const MAX_CELLS: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must hold between 2 and 128 cells, got {0}")]
    SizeOutOfRange(usize),
    #[error("expected a square grid, got {rows} row(s) holding {cells} cell(s)")]
    NotSquare { rows: usize, cells: usize },
    #[error("tile values must use each of 0..{limit} exactly once, found {value}")]
    InvalidTiles { value: u32, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Left,
    Right,
    Down,
}

impl Move {
    /// Enumeration order used by `Board::neighbors`.
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Right, Move::Down];

    /// Offset of the tile that slides into the blank, relative to the blank,
    /// in (row, col).
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Right => "Right",
            Move::Down => "Down",
        };
        write!(f, "{}", s)
    }
}

/// One configuration of the n²-1 sliding puzzle. Tiles are numbered
/// `1..n²-1`, `0` is the blank. Never mutated after construction; moves
/// produce fresh boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<Vec<u32>>,
    blank_row: usize,
    blank_col: usize,
}

impl Board {
    /// Builds a board from a row-major grid. The grid must be square, hold
    /// between 2 and 128 cells, and use each value in `0..n²` exactly once.
    pub fn new(tiles: Vec<Vec<u32>>) -> Result<Self, BoardError> {
        let cells: usize = tiles.iter().map(|row| row.len()).sum();
        if !(MIN_CELLS..=MAX_CELLS).contains(&cells) {
            return Err(BoardError::SizeOutOfRange(cells));
        }

        let rows = tiles.len();
        if rows * rows != cells || tiles.iter().any(|row| row.len() != rows) {
            return Err(BoardError::NotSquare { rows, cells });
        }

        let mut seen = vec![false; cells];
        for row in &tiles {
            for &tile in row {
                if tile as usize >= cells || seen[tile as usize] {
                    return Err(BoardError::InvalidTiles {
                        value: tile,
                        limit: cells,
                    });
                }
                seen[tile as usize] = true;
            }
        }

        // The permutation check guarantees exactly one blank.
        let (blank_row, blank_col) = Self::locate_blank(&tiles);

        Ok(Self {
            size: rows,
            tiles,
            blank_row,
            blank_col,
        })
    }

    /// The solved layout: `1..n²-1` in row-major order, blank last.
    pub fn goal(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::SizeOutOfRange(0));
        }

        let mut tiles = Vec::new();
        let mut value = 1;
        for i in 0..size {
            let mut row = Vec::new();
            for j in 0..size {
                if i == size - 1 && j == size - 1 {
                    row.push(0);
                } else {
                    row.push(value);
                    value += 1;
                }
            }
            tiles.push(row);
        }

        Self::new(tiles)
    }

    /// A uniformly shuffled board, re-shuffled until solvable.
    pub fn scrambled(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::SizeOutOfRange(0));
        }

        let mut rng = thread_rng();
        let mut flattened: Vec<u32> = (0..(size * size) as u32).collect();

        loop {
            flattened.shuffle(&mut rng);
            let tiles = flattened.chunks(size).map(<[u32]>::to_vec).collect();
            let board = Self::new(tiles)?;
            if board.is_solvable() {
                return Ok(board);
            }
        }
    }

    fn locate_blank(tiles: &[Vec<u32>]) -> (usize, usize) {
        for (i, row) in tiles.iter().enumerate() {
            for (j, &tile) in row.iter().enumerate() {
                if tile == 0 {
                    return (i, j);
                }
            }
        }
        unreachable!("validated boards always hold a blank")
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    /// Value of the tile at (row, col); `0` for the blank.
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row][col]
    }

    /// Number of tiles out of place. The blank never counts.
    pub fn hamming(&self) -> usize {
        let mut out_of_place = 0;
        let mut expected = 1;
        for row in &self.tiles {
            for &tile in row {
                if tile != 0 && tile != expected {
                    out_of_place += 1;
                }
                expected += 1;
            }
        }
        out_of_place
    }

    /// Sum over all tiles of the grid distance to each tile's goal cell.
    /// The blank contributes nothing.
    pub fn manhattan(&self) -> usize {
        let mut distance = 0;
        for i in 0..self.size {
            for j in 0..self.size {
                let value = self.tiles[i][j];
                if value != 0 {
                    let target_row = (value as usize - 1) / self.size;
                    let target_col = (value as usize - 1) % self.size;
                    distance += i.abs_diff(target_row) + j.abs_diff(target_col);
                }
            }
        }
        distance
    }

    pub fn is_goal(&self) -> bool {
        let mut expected = 1;
        for i in 0..self.size {
            for j in 0..self.size {
                if i == self.size - 1 && j == self.size - 1 {
                    if self.tiles[i][j] != 0 {
                        return false;
                    }
                } else {
                    if self.tiles[i][j] != expected {
                        return false;
                    }
                    expected += 1;
                }
            }
        }
        true
    }

    /// Slides the tile on the given side of the blank into the blank,
    /// or returns `None` when that cell falls outside the grid.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset();
        let row = self.blank_row as isize + dr;
        let col = self.blank_col as isize + dc;
        if row < 0 || row >= self.size as isize || col < 0 || col >= self.size as isize {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        let mut tiles = self.tiles.clone();
        tiles[self.blank_row][self.blank_col] = tiles[row][col];
        tiles[row][col] = 0;

        Some(Self {
            size: self.size,
            tiles,
            blank_row: row,
            blank_col: col,
        })
    }

    /// Every board one move away, in up, left, right, down order.
    pub fn neighbors(&self) -> Vec<Self> {
        Move::ALL.iter().filter_map(|&m| self.slide(m)).collect()
    }

    /// A board with the first two non-blank tiles (row-major order)
    /// exchanged. Exactly one of a board and its twin is solvable.
    pub fn twin(&self) -> Self {
        let mut first: Option<(usize, usize)> = None;
        for i in 0..self.size {
            for j in 0..self.size {
                if self.tiles[i][j] == 0 {
                    continue;
                }
                match first {
                    None => first = Some((i, j)),
                    Some((fi, fj)) => {
                        let mut tiles = self.tiles.clone();
                        tiles[fi][fj] = self.tiles[i][j];
                        tiles[i][j] = self.tiles[fi][fj];
                        return Self {
                            size: self.size,
                            tiles,
                            blank_row: self.blank_row,
                            blank_col: self.blank_col,
                        };
                    }
                }
            }
        }
        unreachable!("a board always holds at least two tiles besides the blank")
    }

    pub fn is_solvable(&self) -> bool {
        let flattened: Vec<u32> = self
            .tiles
            .iter()
            .flat_map(|row| row.iter().copied())
            .collect();

        let inversions = Self::count_inversions(&flattened);

        if self.size % 2 == 1 {
            // Odd-sized puzzle: solvable if inversions count is even
            inversions % 2 == 0
        } else {
            // Even-sized puzzle: solvable if (inversions + empty row index) is odd
            (inversions + self.blank_row) % 2 == 1
        }
    }

    fn count_inversions(flattened: &[u32]) -> usize {
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.size)?;
        for row in &self.tiles {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
