use crate::scoring::{AlignmentStats, Position};
use crate::tie_break::Direction;
use crate::AlignerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Symbol from the second sequence against a gap.
    Insertion,
    /// Symbol from the first sequence against a gap.
    Deletion,
}

/// Kind of step stored in a back-pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Start,
    Diagonal,
    Up,
    Left,
}

impl From<Direction> for Move {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Diagonal => Move::Diagonal,
            Direction::Up => Move::Up,
            Direction::Left => Move::Left,
        }
    }
}

/// Predecessor cell and the move that leads from it.
///
/// The symbols consumed by the move sit at the predecessor's coordinates:
/// the first sequence at `predecessor.col`, the second at `predecessor.row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackPointer {
    pub predecessor: Position,
    pub kind: Move,
}

impl BackPointer {
    pub const START: BackPointer = BackPointer {
        predecessor: Position::ORIGIN,
        kind: Move::Start,
    };

    pub fn new(row: usize, col: usize, kind: Move) -> Self {
        Self {
            predecessor: Position::new(row, col),
            kind,
        }
    }

    /// Back-pointer for interior cell `(row, col)`; both must be at least 1.
    pub fn from_direction(row: usize, col: usize, direction: Direction) -> Self {
        match direction {
            Direction::Diagonal => Self::new(row - 1, col - 1, Move::Diagonal),
            Direction::Up => Self::new(row - 1, col, Move::Up),
            Direction::Left => Self::new(row, col - 1, Move::Left),
        }
    }

    /// Whether this pointer, stored at `from`, is one step back in the table.
    fn steps_back_from(&self, from: Position) -> bool {
        let expected = match self.kind {
            Move::Start => return false,
            Move::Diagonal => from
                .row
                .checked_sub(1)
                .zip(from.col.checked_sub(1))
                .map(|(row, col)| Position::new(row, col)),
            Move::Up => from.row.checked_sub(1).map(|row| Position::new(row, from.col)),
            Move::Left => from.col.checked_sub(1).map(|col| Position::new(from.row, col)),
        };
        expected == Some(self.predecessor)
    }
}

#[derive(Debug, Clone)]
pub struct AlignmentResult {
    pub score: i64,
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
    pub statistics: AlignmentStats,
}

impl AlignmentResult {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        f64::from(self.statistics.matches) / self.len() as f64
    }

    pub fn aligned_strings(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.aligned_seq1).into_owned(),
            String::from_utf8_lossy(&self.aligned_seq2).into_owned(),
        )
    }
}

/// Back-pointer table laid out parallel to the score matrix.
///
/// Borders are filled on construction: `(0, 0)` is the start, row 0 chains
/// left and column 0 chains up towards it. Interior cells stay empty until
/// [`TracebackMatrix::record`] is called for them.
pub struct TracebackMatrix {
    data: Vec<Option<BackPointer>>,
    rows: usize,
    cols: usize,
}

impl TracebackMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut matrix = Self {
            data: vec![None; rows * cols],
            rows,
            cols,
        };

        if rows > 0 && cols > 0 {
            matrix.set(0, 0, BackPointer::START);
        }
        for col in 1..cols {
            matrix.set(0, col, BackPointer::new(0, col - 1, Move::Left));
        }
        for row in 1..rows {
            matrix.set(row, 0, BackPointer::new(row - 1, 0, Move::Up));
        }

        matrix
    }

    pub fn set(&mut self, row: usize, col: usize, value: BackPointer) {
        self.data[row * self.cols + col] = Some(value);
    }

    pub fn get(&self, row: usize, col: usize) -> Option<BackPointer> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data[row * self.cols + col]
    }

    pub fn record(&mut self, row: usize, col: usize, direction: Direction) {
        self.set(row, col, BackPointer::from_direction(row, col, direction));
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

pub struct Traceback<'a> {
    matrix: TracebackMatrix,
    seq1: &'a [u8],
    seq2: &'a [u8],
    gap_marker: u8,
}

impl<'a> Traceback<'a> {
    pub fn new(
        matrix: TracebackMatrix,
        seq1: &'a [u8],
        seq2: &'a [u8],
        gap_marker: u8,
    ) -> Result<Self, AlignerError> {
        if matrix.rows() != seq2.len() + 1 || matrix.cols() != seq1.len() + 1 {
            return Err(AlignerError::Traceback(format!(
                "{}x{} back-pointer table does not fit sequences of length {} and {}",
                matrix.rows(),
                matrix.cols(),
                seq1.len(),
                seq2.len()
            )));
        }

        Ok(Self {
            matrix,
            seq1,
            seq2,
            gap_marker,
        })
    }

    /// Walks from the bottom-right cell back to the origin and returns the
    /// visited back-pointers in forward order, excluding the start.
    pub fn collect_path(&self) -> Result<Vec<BackPointer>, AlignerError> {
        let mut current = Position::new(self.matrix.rows() - 1, self.matrix.cols() - 1);
        let mut path = Vec::with_capacity(current.row + current.col);

        loop {
            let pointer = self.matrix.get(current.row, current.col).ok_or_else(|| {
                AlignerError::Traceback(format!("no back-pointer recorded at {}", current))
            })?;

            if pointer.kind == Move::Start {
                if current != Position::ORIGIN {
                    return Err(AlignerError::Traceback(format!(
                        "start pointer found at {}",
                        current
                    )));
                }
                break;
            }
            if !pointer.steps_back_from(current) {
                return Err(AlignerError::Traceback(format!(
                    "{:?} pointer at {} does not lead to {}",
                    pointer.kind, current, pointer.predecessor
                )));
            }

            path.push(pointer);
            current = pointer.predecessor;
        }

        path.reverse();
        log::trace!("Traceback path of {} steps", path.len());
        Ok(path)
    }

    pub fn reconstruct_alignment(&self, score: i64) -> Result<AlignmentResult, AlignerError> {
        let path = self.collect_path()?;

        let mut aligned_seq1 = Vec::with_capacity(path.len());
        let mut aligned_seq2 = Vec::with_capacity(path.len());
        let mut operations = Vec::with_capacity(path.len());

        for pointer in &path {
            let Position { row, col } = pointer.predecessor;
            match pointer.kind {
                Move::Diagonal => {
                    let (a, b) = (self.seq1[col], self.seq2[row]);
                    aligned_seq1.push(a);
                    aligned_seq2.push(b);
                    operations.push(if a == b {
                        TracebackOperation::Match
                    } else {
                        TracebackOperation::Mismatch
                    });
                }
                Move::Left => {
                    aligned_seq1.push(self.seq1[col]);
                    aligned_seq2.push(self.gap_marker);
                    operations.push(TracebackOperation::Deletion);
                }
                Move::Up => {
                    aligned_seq1.push(self.gap_marker);
                    aligned_seq2.push(self.seq2[row]);
                    operations.push(TracebackOperation::Insertion);
                }
                Move::Start => {
                    return Err(AlignerError::Traceback(
                        "start pointer inside traceback path".to_string(),
                    ))
                }
            }
        }

        let statistics = AlignmentStats::from_operations(&operations);

        Ok(AlignmentResult {
            score,
            aligned_seq1,
            aligned_seq2,
            operations,
            statistics,
        })
    }
}
