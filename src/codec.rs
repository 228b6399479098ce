//! Canonical board encodings used as visited-set keys.

use crate::puzzle::Board;

/// One `char` per cell, blank as `'\0'`. Works for any board size.
pub fn encode_compact(board: &Board) -> String {
    board.tiles().iter().map(|&t| char::from(t)).collect()
}

/// Packs a 4x4 board into 64 bits, 4 bits per cell, cell 0 in the top nibble.
pub fn encode_wide(board: &Board) -> u64 {
    debug_assert_eq!(board.size(), 4);
    board
        .tiles()
        .iter()
        .take(16)
        .fold(0u64, |key, &t| (key << 4) | u64::from(t))
}

/// `true` when every tile sits at index `tile - 1` and the blank is last.
pub fn is_goal(board: &Board) -> bool {
    let tiles = board.tiles();
    let last = tiles.len() - 1;

    tiles[..last]
        .iter()
        .enumerate()
        .all(|(i, &t)| t as usize == i + 1)
        && tiles[last] == 0
}

/// Deduplication key for a board, with the representation picked by size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VisitedKey {
    Compact(String),
    Wide(u64),
}

impl VisitedKey {
    pub fn for_board(board: &Board) -> Self {
        if board.size() == 4 {
            VisitedKey::Wide(encode_wide(board))
        } else {
            VisitedKey::Compact(encode_compact(board))
        }
    }
}
