//! Distance-to-goal estimators.
//!
//! Each estimator takes a `Board` (which carries its own width) and returns a
//! non-negative move count that is zero on the goal board. Manhattan and
//! linear conflict are admissible; the corner term is a tie-breaking nudge
//! and can overestimate.

use crate::puzzle::Board;

/// Signature shared by every estimator in the catalog.
pub type HeuristicFn = fn(&Board) -> u32;

/// Named estimator, as listed in [`HEURISTICS`].
#[derive(Debug, Clone, Copy)]
pub struct HeuristicDescriptor {
    pub name: &'static str,
    pub func: HeuristicFn,
}

pub const MANHATTAN: HeuristicDescriptor = HeuristicDescriptor {
    name: "Manhattan",
    func: manhattan_distance,
};

pub const LINEAR_CONFLICT: HeuristicDescriptor = HeuristicDescriptor {
    name: "Manhattan + Linear Conflict",
    func: manhattan_with_conflicts,
};

pub const ADVANCED: HeuristicDescriptor = HeuristicDescriptor {
    name: "Advanced (Manhattan + Linear + Corners)",
    func: advanced,
};

/// Catalog in increasing order of information.
pub const HEURISTICS: [HeuristicDescriptor; 3] = [MANHATTAN, LINEAR_CONFLICT, ADVANCED];

pub fn heuristic_names() -> Vec<&'static str> {
    HEURISTICS.iter().map(|h| h.name).collect()
}

/// Sum of every tile's row and column distance from its goal cell.
pub fn manhattan_distance(board: &Board) -> u32 {
    let size = board.size();
    let mut distance = 0;

    for (i, &value) in board.tiles().iter().enumerate() {
        if value == 0 {
            continue;
        }
        let goal = value as usize - 1;
        distance += (i / size).abs_diff(goal / size) + (i % size).abs_diff(goal % size);
    }
    distance as u32
}

/// Two moves for every pair of tiles that sit in their goal row (or column)
/// but in reversed order. Rows and columns are counted independently.
pub fn linear_conflict(board: &Board) -> u32 {
    let size = board.size();
    let tiles = board.tiles();
    let mut conflicts = 0;

    // Rows
    for row in 0..size {
        let in_goal_row: Vec<u8> = (0..size)
            .map(|col| tiles[row * size + col])
            .filter(|&v| v != 0 && (v as usize - 1) / size == row)
            .collect();
        conflicts += count_reversed_pairs(&in_goal_row);
    }

    // Columns
    for col in 0..size {
        let in_goal_col: Vec<u8> = (0..size)
            .map(|row| tiles[row * size + col])
            .filter(|&v| v != 0 && (v as usize - 1) % size == col)
            .collect();
        conflicts += count_reversed_pairs(&in_goal_col);
    }

    2 * conflicts
}

fn count_reversed_pairs(line: &[u8]) -> u32 {
    let mut count = 0;
    for (i, &a) in line.iter().enumerate() {
        count += line[i + 1..].iter().filter(|&&b| a > b).count() as u32;
    }
    count
}

/// Two moves for each corner whose tile is missing while both cells feeding
/// it (its horizontal and vertical neighbour) are also wrong.
// One flat penalty per corner, not one per misplaced feeder.
pub fn corner_penalty(board: &Board) -> u32 {
    let size = board.size();
    let tiles = board.tiles();
    let last = size * size - 1;
    // Goal label for an index; the final cell belongs to the blank.
    let expected = |idx: usize| if idx == last { 0 } else { (idx + 1) as u8 };
    let misplaced = |idx: usize| tiles[idx] != expected(idx);

    let top_right = size - 1;
    let bottom_left = (size - 1) * size;
    // (corner, horizontal feeder, vertical feeder)
    let corners = [
        (0, 1, size),
        (top_right, top_right - 1, top_right + size),
        (bottom_left, bottom_left + 1, bottom_left - size),
        (last, last - 1, last - size),
    ];

    let mut penalty = 0;
    for (corner, horizontal, vertical) in corners {
        if misplaced(corner) && misplaced(horizontal) && misplaced(vertical) {
            penalty += 2;
        }
    }
    penalty
}

pub fn manhattan_with_conflicts(board: &Board) -> u32 {
    manhattan_distance(board) + linear_conflict(board)
}

pub fn advanced(board: &Board) -> u32 {
    manhattan_distance(board) + linear_conflict(board) + corner_penalty(board)
}
