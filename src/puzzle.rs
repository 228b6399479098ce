use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Direction the blank travels when it swaps with a neighbouring tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order used by the search.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, col)` delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// Axis partner: `ALL` pairs each move with its reverse at `i ^ 1`.
    pub fn opposite(&self) -> Self {
        Move::ALL[*self as usize ^ 1]
    }

    pub fn name(&self) -> &'static str {
        ["up", "down", "left", "right"][*self as usize]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            other => Err(format!("Unknown move '{}'", other)),
        }
    }
}

/// Immutable square tile arrangement. The blank is stored as `0`.
///
/// Every transformation returns a fresh `Board`, so search states can hold
/// their own snapshot without observing each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
}

/// Widest board whose labels still fit in a `u8`.
pub const MAX_SIZE: usize = 16;

/// Rejects widths outside `2..=MAX_SIZE`.
pub fn check_size(size: usize) -> Result<(), BoardError> {
    if size < 2 {
        Err(BoardError::SizeTooSmall(size))
    } else if size > MAX_SIZE {
        Err(BoardError::SizeTooLarge {
            size,
            max: MAX_SIZE,
        })
    } else {
        Ok(())
    }
}

impl Board {
    /// The solved arrangement: `1..size²-1` in order, blank last.
    pub fn goal(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        let cells = size * size;
        let mut tiles: Vec<u8> = (1..cells).map(|v| v as u8).collect();
        tiles.push(0);

        Ok(Self {
            size,
            tiles,
            blank: cells - 1,
        })
    }

    /// Builds a board from raw labels, rejecting anything that is not a
    /// permutation of `0..size²`.
    pub fn from_tiles(size: usize, tiles: Vec<u8>) -> Result<Self, BoardError> {
        check_size(size)?;
        let cells = size * size;
        if tiles.len() != cells {
            return Err(BoardError::WrongLength {
                expected: cells,
                found: tiles.len(),
            });
        }

        let blanks = tiles.iter().filter(|&&t| t == 0).count();
        if blanks != 1 {
            return Err(BoardError::BlankCount(blanks));
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let idx = tile as usize;
            if idx >= cells {
                return Err(BoardError::TileOutOfRange {
                    tile,
                    max: cells - 1,
                });
            }
            if seen[idx] {
                return Err(BoardError::DuplicateTile(tile));
            }
            seen[idx] = true;
        }

        let blank = tiles.iter().position(|&t| t == 0).unwrap_or(cells - 1);
        Ok(Self { size, tiles, blank })
    }

    /// Builds a board from UI-style slots where `None` marks the blank.
    pub fn from_slots(size: usize, slots: &[Option<u8>]) -> Result<Self, BoardError> {
        let tiles = slots.iter().map(|slot| slot.unwrap_or(0)).collect();
        Self::from_tiles(size, tiles)
    }

    /// Uniformly shuffled, solvable board drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, BoardError> {
        let mut board = Self::goal(size)?;

        loop {
            board.tiles.shuffle(rng);
            board.blank = board
                .tiles
                .iter()
                .position(|&t| t == 0)
                .unwrap_or(board.tiles.len() - 1);

            if board.is_solvable() {
                return Ok(board);
            }
        }
    }

    pub fn shuffled(size: usize) -> Result<Self, BoardError> {
        Self::random(size, &mut thread_rng())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Tiles as UI slots, blank as `None`.
    pub fn to_slots(&self) -> Vec<Option<u8>> {
        self.tiles
            .iter()
            .map(|&t| if t == 0 { None } else { Some(t) })
            .collect()
    }

    /// Inversion parity test. Odd widths need an even inversion count; even
    /// widths need `inversions + blank row` (counted from the top) to be odd.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank / self.size) % 2 == 1
        }
    }

    /// Pairs of labelled tiles that appear in descending order; the blank is
    /// ignored.
    fn count_inversions(&self) -> usize {
        let labels: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        let mut inversions = 0;
        for (i, &high) in labels.iter().enumerate() {
            inversions += labels[i + 1..].iter().filter(|&&low| low < high).count();
        }
        inversions
    }

    /// Index the blank would land on after `movement`, if it stays on the grid.
    pub fn target_of(&self, movement: Move) -> Option<usize> {
        let (dr, dc) = movement.as_offset();
        let row = (self.blank / self.size) as isize + dr;
        let col = (self.blank % self.size) as isize + dc;
        let size = self.size as isize;

        if row >= 0 && row < size && col >= 0 && col < size {
            Some(row as usize * self.size + col as usize)
        } else {
            None
        }
    }

    /// New board with the blank moved one cell in `movement`'s direction.
    pub fn apply_move(&self, movement: Move) -> Option<Self> {
        self.target_of(movement).map(|target| self.slide(target))
    }

    pub(crate) fn slide(&self, target: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Self {
            size: self.size,
            tiles,
            blank: target,
        }
    }

    /// Every board visited while applying `moves`, starting with `self`.
    /// `None` if some move would push the blank off the grid.
    pub fn replay(&self, moves: &[Move]) -> Option<Vec<Self>> {
        let mut boards = Vec::with_capacity(moves.len() + 1);
        boards.push(self.clone());

        for &movement in moves {
            let next = boards.last()?.apply_move(movement)?;
            boards.push(next);
        }
        Some(boards)
    }

    /// Blank direction that slides the tile at `index` into the blank, when
    /// that tile is orthogonally adjacent to it.
    pub fn move_toward(&self, index: usize) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&movement| self.target_of(movement) == Some(index))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses `"1,2,3,4,5,6,7,8,0"` style input; `0`, `_` and `.` mark the
    /// blank. The width is inferred from the tile count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| match token {
                "_" | "." => Ok(0),
                _ => token
                    .parse::<u8>()
                    .map_err(|_| BoardError::InvalidToken(token.to_string())),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let size = (tiles.len() as f64).sqrt().round() as usize;
        if size * size != tiles.len() {
            return Err(BoardError::NotSquare(tiles.len()));
        }
        Self::from_tiles(size, tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                if val == 0 {
                    write!(f, " _ ")?;
                } else {
                    write!(f, "{:2} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
