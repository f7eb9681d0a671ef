use std::fmt;

use crate::tie_break;
use crate::traceback::{TracebackMatrix, TracebackOperation};
use crate::ScoreParams;

/// A cell coordinate: `row` indexes the second sequence, `col` the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
    pub execution_time_ms: f32,
}

impl AlignmentStats {
    pub fn from_operations(operations: &[TracebackOperation]) -> Self {
        operations
            .iter()
            .fold(AlignmentStats::default(), |mut acc, op| {
                match op {
                    TracebackOperation::Match => acc.matches += 1,
                    TracebackOperation::Mismatch => acc.mismatches += 1,
                    TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
                }
                acc
            })
    }
}

/// Row-major table of prefix alignment scores, `(len2 + 1) x (len1 + 1)`.
pub struct ScoreMatrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Score of the bottom-right cell, i.e. of the full alignment.
    pub fn final_score(&self) -> i64 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Fills the score matrix and the parallel back-pointer table in one pass.
///
/// Row 0 and column 0 hold `gap * i` and `gap * j`. Every interior cell takes
/// the best of the diagonal, up and left candidates as chosen by
/// [`tie_break::select`], and the same choice is recorded as its back-pointer.
pub fn fill_matrix(
    seq1: &[u8],
    seq2: &[u8],
    params: &ScoreParams,
) -> (ScoreMatrix, TracebackMatrix) {
    let rows = seq2.len() + 1;
    let cols = seq1.len() + 1;
    let gap = params.gap_score();

    let mut scores = ScoreMatrix::new(rows, cols);
    let mut pointers = TracebackMatrix::new(rows, cols);

    for col in 0..cols {
        scores.set(0, col, gap * col as i64);
    }
    for row in 0..rows {
        scores.set(row, 0, gap * row as i64);
    }

    for row in 1..rows {
        let symbol2 = seq2[row - 1];
        for col in 1..cols {
            let diagonal = scores.get(row - 1, col - 1) + params.substitution(seq1[col - 1], symbol2);
            let up = scores.get(row - 1, col) + gap;
            let left = scores.get(row, col - 1) + gap;

            let (best, direction) = tie_break::select(diagonal, up, left);
            scores.set(row, col, best);
            pointers.record(row, col, direction);
        }
    }

    (scores, pointers)
}

/// Bottom-right score of the same recurrence, computed with two rows.
pub fn last_cell_score(seq1: &[u8], seq2: &[u8], params: &ScoreParams) -> i64 {
    let gap = params.gap_score();
    let mut prev: Vec<i64> = (0..=seq1.len()).map(|col| gap * col as i64).collect();
    let mut curr = vec![0i64; seq1.len() + 1];

    for (row, &symbol2) in seq2.iter().enumerate() {
        curr[0] = gap * (row as i64 + 1);
        for col in 1..=seq1.len() {
            let diagonal = prev[col - 1] + params.substitution(seq1[col - 1], symbol2);
            curr[col] = diagonal.max(prev[col] + gap).max(curr[col - 1] + gap);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[seq1.len()]
}
