//! A*-style best-first search over sliding-puzzle boards.
//!
//! Both entry points run the same loop: pop the state with the lowest
//! `cost + estimate`, stop on the goal, skip states already settled at an
//! equal or lower cost, and push every neighbour that is new or reached more
//! cheaply than before. The work is capped by a hard step budget, so an
//! unsolved result does not prove the board unsolvable.

use rustc_hash::FxHashMap;

use crate::codec::{is_goal, VisitedKey};
use crate::config::{ReversalPolicy, SolverConfig};
use crate::heap::MinHeap;
use crate::heuristics::{self, HeuristicFn};
use crate::puzzle::{Board, Move};

/// One node of the search graph. Owns its board snapshot and path.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    pub board: Board,
    pub moves: Vec<Move>,
    pub cost: u32,
    pub estimate: u32,
}

impl PuzzleState {
    pub fn root(board: Board, heuristic: HeuristicFn) -> Self {
        let estimate = heuristic(&board);
        Self {
            board,
            moves: Vec::new(),
            cost: 0,
            estimate,
        }
    }

    pub fn priority(&self) -> u32 {
        self.cost + self.estimate
    }

    /// Successor states in up, down, left, right order. Estimates are left at
    /// zero for the caller to fill in.
    pub fn neighbors(&self, policy: ReversalPolicy) -> Vec<PuzzleState> {
        let last_move = self.moves.last().copied();
        let mut neighbors = Vec::with_capacity(4);

        for movement in Move::ALL {
            if policy == ReversalPolicy::Forbid && last_move == Some(movement.opposite()) {
                continue;
            }
            if let Some(target) = self.board.target_of(movement) {
                let mut moves = Vec::with_capacity(self.moves.len() + 1);
                moves.extend_from_slice(&self.moves);
                moves.push(movement);

                neighbors.push(PuzzleState {
                    board: self.board.slide(target),
                    moves,
                    cost: self.cost + 1,
                    estimate: 0,
                });
            }
        }
        neighbors
    }
}

/// Lowest cost at which each board has been expanded.
#[derive(Debug, Default)]
struct Settled {
    costs: FxHashMap<VisitedKey, u32>,
}

impl Settled {
    /// Records an expansion of `key` at `cost`. Returns `false`, leaving the
    /// record untouched, when the board was already expanded at an equal or
    /// lower cost.
    fn settle(&mut self, key: VisitedKey, cost: u32) -> bool {
        match self.costs.get(&key) {
            Some(&known) if known <= cost => false,
            _ => {
                self.costs.insert(key, cost);
                true
            }
        }
    }

    /// Whether reaching `key` at `cost` beats every earlier expansion.
    fn improves(&self, key: &VisitedKey, cost: u32) -> bool {
        self.costs.get(key).map_or(true, |&known| cost < known)
    }
}

/// Outcome of one bounded search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicSolveResult {
    /// Blank moves from the start board to the goal, `None` when unsolved.
    pub moves: Option<Vec<Move>>,
    /// Number of states fully expanded.
    pub steps: u32,
    pub solved: bool,
}

impl HeuristicSolveResult {
    fn solved(moves: Vec<Move>, steps: u32) -> Self {
        Self {
            moves: Some(moves),
            steps,
            solved: true,
        }
    }

    fn unsolved(steps: u32) -> Self {
        Self {
            moves: None,
            steps,
            solved: false,
        }
    }
}

/// Searches with an arbitrary estimator, as the benchmark harness does.
pub fn solve_with_heuristic(
    board: &Board,
    heuristic: HeuristicFn,
    max_steps: u32,
) -> HeuristicSolveResult {
    search(board, heuristic, max_steps, ReversalPolicy::default())
}

/// Best-effort solve with the advanced estimator. `None` means the budget ran
/// out (or the board is unsolvable).
pub fn solve(board: &Board, config: &SolverConfig) -> Option<Vec<Move>> {
    search(
        board,
        heuristics::advanced,
        config.max_steps,
        config.reversal_policy,
    )
    .moves
}

pub fn search(
    board: &Board,
    heuristic: HeuristicFn,
    max_steps: u32,
    policy: ReversalPolicy,
) -> HeuristicSolveResult {
    if is_goal(board) {
        return HeuristicSolveResult::solved(Vec::new(), 0);
    }

    let mut open = MinHeap::new(PuzzleState::priority);
    let mut settled = Settled::default();
    open.push(PuzzleState::root(board.clone(), heuristic));
    let mut steps = 0;

    while steps < max_steps {
        let current = match open.pop() {
            Some(state) => state,
            None => break,
        };

        if is_goal(&current.board) {
            tracing::debug!(steps, moves = current.moves.len(), "Search solved board");
            return HeuristicSolveResult::solved(current.moves, steps);
        }

        // Stale duplicates are dropped without spending budget.
        if !settled.settle(VisitedKey::for_board(&current.board), current.cost) {
            continue;
        }

        for mut neighbor in current.neighbors(policy) {
            let key = VisitedKey::for_board(&neighbor.board);
            if settled.improves(&key, neighbor.cost) {
                neighbor.estimate = heuristic(&neighbor.board);
                open.push(neighbor);
            }
        }
        steps += 1;
    }

    tracing::debug!(steps, queued = open.len(), "Search stopped without a solution");
    HeuristicSolveResult::unsolved(steps)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use rustc_hash::FxHashSet;

    use super::*;
    use crate::heuristics::{manhattan_distance, HEURISTICS};

    fn board(size: usize, tiles: &[u8]) -> Board {
        Board::from_tiles(size, tiles.to_vec()).unwrap()
    }

    /// Shortest solution length by plain breadth-first search.
    fn bfs_distance(start: &Board) -> usize {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([(start.clone(), 0)]);
        seen.insert(start.clone());

        while let Some((board, depth)) = queue.pop_front() {
            if is_goal(&board) {
                return depth;
            }
            for movement in Move::ALL {
                if let Some(next) = board.apply_move(movement) {
                    if seen.insert(next.clone()) {
                        queue.push_back((next, depth + 1));
                    }
                }
            }
        }
        panic!("goal unreachable from\n{}", start);
    }

    /// Admissible but not consistent: the estimate collapses to zero as
    /// soon as tile 1 leaves the top-left cell.
    fn manhattan_when_anchored(board: &Board) -> u32 {
        if board.tiles()[0] == 1 {
            manhattan_distance(board)
        } else {
            0
        }
    }

    thread_local! {
        static RING: RefCell<Vec<Board>> = RefCell::new(Vec::new());
    }

    /// Steers the search the long way round the 2x2 cycle: the first three
    /// boards in ring order look expensive, everything else free.
    fn ring_detour(board: &Board) -> u32 {
        RING.with(|ring| match ring.borrow().iter().position(|b| b == board) {
            Some(1..=3) => 20,
            _ => 0,
        })
    }

    /// The 12 boards of a 2x2 parity class in the order the blank visits them.
    fn ring_from(start: &Board) -> Vec<Board> {
        let mut ring = vec![start.clone()];
        let mut last: Option<Move> = None;
        loop {
            let current = ring.last().unwrap();
            let (movement, next) = Move::ALL
                .into_iter()
                .filter(|&m| last != Some(m.opposite()))
                .find_map(|m| current.apply_move(m).map(|b| (m, b)))
                .unwrap();
            if &next == start {
                return ring;
            }
            ring.push(next);
            last = Some(movement);
        }
    }

    #[test]
    fn test_settled_keeps_lowest_cost() {
        let key = VisitedKey::for_board(&Board::goal(3).unwrap());
        let mut settled = Settled::default();

        assert!(settled.improves(&key, 9));
        assert!(settled.settle(key.clone(), 8));
        assert!(!settled.settle(key.clone(), 8));
        assert!(!settled.settle(key.clone(), 9));
        assert!(!settled.improves(&key, 8));
        assert!(settled.improves(&key, 4));

        assert!(settled.settle(key.clone(), 4));
        assert!(!settled.improves(&key, 5));
    }

    #[test]
    fn test_neighbors_from_corner() {
        let root = PuzzleState::root(Board::goal(3).unwrap(), manhattan_distance);
        let neighbors = root.neighbors(ReversalPolicy::Forbid);

        let moves: Vec<Move> = neighbors.iter().map(|n| n.moves[0]).collect();
        assert_eq!(moves, vec![Move::Up, Move::Left]);
        assert!(neighbors.iter().all(|n| n.cost == 1 && n.estimate == 0));
    }

    #[test]
    fn test_neighbors_skip_reversal_only_when_forbidden() {
        let root = PuzzleState::root(Board::goal(3).unwrap(), manhattan_distance);
        let up = root
            .neighbors(ReversalPolicy::Forbid)
            .into_iter()
            .find(|n| n.moves == vec![Move::Up])
            .unwrap();

        let pruned: Vec<Move> = up
            .neighbors(ReversalPolicy::Forbid)
            .iter()
            .map(|n| *n.moves.last().unwrap())
            .collect();
        assert_eq!(pruned, vec![Move::Up, Move::Left]);

        let all: Vec<Move> = up
            .neighbors(ReversalPolicy::Allow)
            .iter()
            .map(|n| *n.moves.last().unwrap())
            .collect();
        assert_eq!(all, vec![Move::Up, Move::Down, Move::Left]);
    }

    #[test]
    fn test_neighbors_leave_parent_untouched() {
        let start = board(3, &[1, 2, 3, 4, 0, 5, 7, 8, 6]);
        let root = PuzzleState::root(start.clone(), manhattan_distance);
        let neighbors = root.neighbors(ReversalPolicy::Forbid);

        assert_eq!(neighbors.len(), 4);
        assert_eq!(root.board, start);
        assert!(root.moves.is_empty());
    }

    #[test]
    fn test_goal_board_needs_no_steps() {
        for h in HEURISTICS {
            let result = solve_with_heuristic(&Board::goal(4).unwrap(), h.func, 10);
            assert_eq!(result, HeuristicSolveResult::solved(Vec::new(), 0));
        }
        // Even a zero budget reports an already solved board.
        let result = solve_with_heuristic(&Board::goal(3).unwrap(), manhattan_distance, 0);
        assert!(result.solved);
    }

    #[test]
    fn test_two_move_board() {
        let start = board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let result = solve_with_heuristic(&start, manhattan_distance, 1000);
        assert!(result.solved);
        assert_eq!(result.moves, Some(vec![Move::Right, Move::Right]));
    }

    #[test]
    fn test_budget_is_a_hard_ceiling() {
        let unsolvable = board(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        let result = solve_with_heuristic(&unsolvable, manhattan_distance, 50);
        assert!(!result.solved);
        assert!(result.moves.is_none());
        assert_eq!(result.steps, 50);
    }

    #[test]
    fn test_exhausts_tiny_unsolvable_space() {
        // 2x2 has 12 reachable boards per parity class.
        let unsolvable = board(2, &[2, 1, 3, 0]);
        for policy in [ReversalPolicy::Allow, ReversalPolicy::Forbid] {
            let result = search(&unsolvable, manhattan_distance, 1000, policy);
            assert!(!result.solved);
            // The far side of the cycle is queued twice but expanded once.
            assert_eq!(result.steps, 12);
        }
    }

    #[test]
    fn test_cheaper_path_reopens_settled_board() {
        let start = board(2, &[2, 1, 3, 0]);
        let ring = ring_from(&start);
        assert_eq!(ring.len(), 12);
        RING.with(|cell| *cell.borrow_mut() = ring);

        // Boards 4 and 5 are settled the long way (costs 8 and 7) and
        // expanded again once the short side reaches them at 4 and 5. The
        // long-way copy of board 3 is popped stale and costs nothing.
        let result = solve_with_heuristic(&start, ring_detour, 1000);
        assert!(!result.solved);
        assert_eq!(result.steps, 14);

        let capped = solve_with_heuristic(&start, ring_detour, 13);
        assert_eq!(capped.steps, 13);
    }

    #[test]
    fn test_inconsistent_estimate_still_finds_shortest_path() {
        let scrambles: [&[Move]; 4] = [
            &[Move::Up, Move::Up, Move::Left, Move::Left, Move::Down, Move::Right],
            &[Move::Left, Move::Left, Move::Up, Move::Up, Move::Right, Move::Down, Move::Right],
            &[
                Move::Up,
                Move::Left,
                Move::Down,
                Move::Left,
                Move::Up,
                Move::Up,
                Move::Right,
                Move::Right,
                Move::Down,
            ],
            &[
                Move::Left,
                Move::Up,
                Move::Right,
                Move::Up,
                Move::Left,
                Move::Left,
                Move::Down,
                Move::Down,
                Move::Right,
                Move::Up,
            ],
        ];

        for scramble in scrambles {
            let start = Board::goal(3)
                .unwrap()
                .replay(scramble)
                .and_then(|boards| boards.last().cloned())
                .unwrap();
            let optimal = bfs_distance(&start);

            for policy in [ReversalPolicy::Forbid, ReversalPolicy::Allow] {
                let result = search(&start, manhattan_when_anchored, 200_000, policy);
                let moves = result.moves.unwrap();
                assert_eq!(moves.len(), optimal, "{:?} on\n{}", policy, start);

                let boards = start.replay(&moves).unwrap();
                assert!(is_goal(boards.last().unwrap()));
            }
        }
    }

    #[test]
    fn test_solve_uses_wide_keys_for_4x4() {
        let start = Board::goal(4)
            .unwrap()
            .replay(&[Move::Up, Move::Left, Move::Left, Move::Down, Move::Right])
            .and_then(|boards| boards.last().cloned())
            .unwrap();

        let moves = solve(&start, &SolverConfig::default()).unwrap();
        let end = start.replay(&moves).unwrap();
        assert!(is_goal(end.last().unwrap()));
    }
}
