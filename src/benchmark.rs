use std::fmt;
use std::time::{Duration, Instant};

use crate::heuristics::{HeuristicDescriptor, HEURISTICS};
use crate::puzzle::Board;
use crate::solver::solve_with_heuristic;

/// Timing and outcome of one heuristic on one board.
#[derive(Debug, Clone)]
pub struct BenchmarkRow {
    pub name: &'static str,
    pub elapsed: Duration,
    /// Solution length, `None` when the search gave up.
    pub moves: Option<usize>,
    pub steps: u32,
    pub solved: bool,
}

impl BenchmarkRow {
    /// Wall-clock time in milliseconds, rounded to one decimal.
    pub fn elapsed_ms(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 10_000.0).round() / 10.0
    }

    /// Move count for display, `-` when unsolved.
    pub fn moves_label(&self) -> String {
        match self.moves {
            Some(n) => n.to_string(),
            None => "-".to_string(),
        }
    }
}

impl fmt::Display for BenchmarkRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<40} {:>10.1} ms {:>6} moves {:>8} steps  {}",
            self.name,
            self.elapsed_ms(),
            self.moves_label(),
            self.steps,
            if self.solved { "solved" } else { "unsolved" }
        )
    }
}

/// Runs one search per entry in `heuristics` on the same start board.
pub fn run_with(
    board: &Board,
    max_steps: u32,
    heuristics: &[HeuristicDescriptor],
) -> Vec<BenchmarkRow> {
    heuristics
        .iter()
        .map(|h| {
            let start = Instant::now();
            let result = solve_with_heuristic(board, h.func, max_steps);
            let elapsed = start.elapsed();

            let row = BenchmarkRow {
                name: h.name,
                elapsed,
                moves: result.moves.as_ref().map(Vec::len),
                steps: result.steps,
                solved: result.solved,
            };
            tracing::info!(
                heuristic = row.name,
                elapsed_ms = row.elapsed_ms(),
                steps = row.steps,
                solved = row.solved,
                "Benchmark run finished"
            );
            row
        })
        .collect()
}

/// Benchmarks every heuristic in the catalog.
pub fn run_benchmarks(board: &Board, max_steps: u32) -> Vec<BenchmarkRow> {
    run_with(board, max_steps, &HEURISTICS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    #[test]
    fn test_one_row_per_heuristic() {
        let start = Board::goal(3)
            .unwrap()
            .replay(&[Move::Up, Move::Left, Move::Down])
            .and_then(|boards| boards.last().cloned())
            .unwrap();

        let rows = run_benchmarks(&start, 10_000);
        assert_eq!(rows.len(), HEURISTICS.len());
        for (row, h) in rows.iter().zip(HEURISTICS.iter()) {
            assert_eq!(row.name, h.name);
            assert!(row.solved);
            assert_eq!(row.moves, Some(3));
        }
    }

    #[test]
    fn test_unsolved_row_uses_placeholder() {
        let unsolvable = Board::from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let rows = run_benchmarks(&unsolvable, 100);

        for row in &rows {
            assert!(!row.solved);
            assert_eq!(row.moves, None);
            assert_eq!(row.moves_label(), "-");
            assert_eq!(row.steps, 100);
            assert!(row.to_string().contains("unsolved"));
        }
    }

    #[test]
    fn test_elapsed_rounds_to_one_decimal() {
        let row = BenchmarkRow {
            name: "Manhattan",
            elapsed: Duration::from_micros(12_345),
            moves: Some(4),
            steps: 10,
            solved: true,
        };
        assert!((row.elapsed_ms() - 12.3).abs() < 1e-9);
        assert!(row.to_string().contains("12.3 ms"));
    }
}
