use std::time::Instant;
use thiserror::Error;

pub mod cli;
pub mod config;
pub mod fasta;
pub mod scoring;
pub mod tie_break;
pub mod traceback;

pub use config::{AlignerConfig, BYTES_PER_CELL, MAX_MATRIX_BYTES, MAX_MATRIX_CELLS};
pub use scoring::{AlignmentStats, Position, ScoreMatrix};
pub use tie_break::Direction;
pub use traceback::{
    AlignmentResult, BackPointer, Move, Traceback, TracebackMatrix, TracebackOperation,
};

// Default scoring scheme used when none is supplied
pub const DEFAULT_MATCH: i32 = 4;
pub const DEFAULT_MISMATCH: i32 = -2;
pub const DEFAULT_GAP: i32 = -2;

pub const GAP_MARKER: u8 = b'-';

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("FASTA input must contain two sequences, found {0}")]
    MissingSequence(usize),
    #[error("Alignment matrix of {rows}x{cols} cells exceeds the limit of {limit}")]
    SequenceTooLarge { rows: usize, cols: usize, limit: usize },
    #[error("Sequence {sequence} holds a non-ASCII byte at offset {offset}")]
    NonAsciiSymbol { sequence: usize, offset: usize },
    #[error("Invalid gap marker: {0:?}")]
    InvalidGapMarker(char),
    #[error("Aligned sequences differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("Traceback error: {0}")]
    Traceback(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Linear gap scoring scheme: match, mismatch and a per-symbol gap score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            gap: DEFAULT_GAP,
        }
    }
}

impl ScoreParams {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i64 {
        if a == b {
            i64::from(self.match_score)
        } else {
            i64::from(self.mismatch)
        }
    }

    #[inline]
    pub fn gap_score(&self) -> i64 {
        i64::from(self.gap)
    }

    /// Scores an existing pair of aligned rows column by column.
    ///
    /// A column holding the gap marker on one side costs one gap penalty.
    /// Columns with a gap on both sides contribute nothing.
    pub fn score_alignment(
        &self,
        aligned_seq1: &[u8],
        aligned_seq2: &[u8],
        gap_marker: u8,
    ) -> Result<i64, AlignerError> {
        if aligned_seq1.len() != aligned_seq2.len() {
            return Err(AlignerError::LengthMismatch {
                left: aligned_seq1.len(),
                right: aligned_seq2.len(),
            });
        }

        let score = aligned_seq1
            .iter()
            .zip(aligned_seq2)
            .map(|(&a, &b)| match (a == gap_marker, b == gap_marker) {
                (true, true) => 0,
                (true, false) | (false, true) => self.gap_score(),
                (false, false) => self.substitution(a, b),
            })
            .sum();

        Ok(score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for Sequence {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Needleman-Wunsch global aligner.
///
/// Holds only the scoring scheme and configuration; every call to
/// [`GlobalAligner::align`] allocates its own score and back-pointer tables
/// and releases them before returning, so one aligner can be reused freely.
#[derive(Debug, Clone, Default)]
pub struct GlobalAligner {
    score_params: ScoreParams,
    config: AlignerConfig,
}

impl GlobalAligner {
    pub fn new(score_params: ScoreParams) -> Self {
        Self {
            score_params,
            config: AlignerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AlignerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn score_params(&self) -> &ScoreParams {
        &self.score_params
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Optimal global alignment score of `seq1` against `seq2`.
    ///
    /// Runs the same recurrence as [`GlobalAligner::align`] but keeps only two
    /// rows, so no traceback is possible.
    pub fn score(&self, seq1: &Sequence, seq2: &Sequence) -> Result<i64, AlignerError> {
        self.check_sequences(seq1, seq2)?;
        Ok(scoring::last_cell_score(
            seq1.as_bytes(),
            seq2.as_bytes(),
            &self.score_params,
        ))
    }

    pub fn align(
        &self,
        seq1: &Sequence,
        seq2: &Sequence,
    ) -> Result<AlignmentResult, AlignerError> {
        let start_time = Instant::now();
        self.check_sequences(seq1, seq2)?;

        log::debug!(
            "Aligning {} x {} symbols (match={}, mismatch={}, gap={})",
            seq1.len(),
            seq2.len(),
            self.score_params.match_score,
            self.score_params.mismatch,
            self.score_params.gap,
        );

        let (scores, pointers) =
            scoring::fill_matrix(seq1.as_bytes(), seq2.as_bytes(), &self.score_params);
        let score = scores.final_score();
        drop(scores);

        let traceback = Traceback::new(
            pointers,
            seq1.as_bytes(),
            seq2.as_bytes(),
            self.config.gap_marker,
        )?;
        let mut result = traceback.reconstruct_alignment(score)?;
        result.statistics.execution_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

        log::debug!(
            "Alignment score {} over {} columns ({} matches, {} mismatches, {} gaps)",
            result.score,
            result.len(),
            result.statistics.matches,
            result.statistics.mismatches,
            result.statistics.gaps,
        );

        Ok(result)
    }

    fn check_sequences(&self, seq1: &Sequence, seq2: &Sequence) -> Result<(), AlignerError> {
        let rows = seq2.len() + 1;
        let cols = seq1.len() + 1;
        let limit = self.config.max_cells;

        match rows.checked_mul(cols) {
            Some(cells) if cells <= limit => {}
            _ => return Err(AlignerError::SequenceTooLarge { rows, cols, limit }),
        }

        // Symbols are single bytes; multi-byte characters would be split
        for (sequence, seq) in [(1, seq1), (2, seq2)] {
            if let Some(offset) = seq.as_bytes().iter().position(|b| !b.is_ascii()) {
                return Err(AlignerError::NonAsciiSymbol { sequence, offset });
            }
        }

        let marker = self.config.gap_marker;
        if seq1.as_bytes().contains(&marker) || seq2.as_bytes().contains(&marker) {
            return Err(AlignerError::InvalidGapMarker(char::from(marker)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(aligned: &[u8]) -> Vec<u8> {
        aligned.iter().copied().filter(|&b| b != GAP_MARKER).collect()
    }

    #[test]
    fn test_identical_sequences_have_no_gaps() {
        let aligner = GlobalAligner::new(ScoreParams::default());
        let seq = Sequence::from("AAA");
        let result = aligner.align(&seq, &seq).unwrap();

        assert_eq!(result.score, 12);
        assert_eq!(result.aligned_seq1, b"AAA");
        assert_eq!(result.aligned_seq2, b"AAA");
        assert_eq!(result.statistics.gaps, 0);
        assert_eq!(result.statistics.matches, 3);
    }

    #[test]
    fn test_empty_first_sequence() {
        let aligner = GlobalAligner::new(ScoreParams::default());
        let result = aligner
            .align(&Sequence::from(""), &Sequence::from("AC"))
            .unwrap();

        assert_eq!(result.score, -4);
        assert_eq!(result.aligned_seq1, b"--");
        assert_eq!(result.aligned_seq2, b"AC");
    }

    #[test]
    fn test_empty_second_sequence() {
        let aligner = GlobalAligner::new(ScoreParams::default());
        let result = aligner
            .align(&Sequence::from("ACG"), &Sequence::from(""))
            .unwrap();

        assert_eq!(result.score, -6);
        assert_eq!(result.aligned_seq1, b"ACG");
        assert_eq!(result.aligned_seq2, b"---");
    }

    #[test]
    fn test_both_empty() {
        let aligner = GlobalAligner::new(ScoreParams::default());
        let result = aligner
            .align(&Sequence::default(), &Sequence::default())
            .unwrap();

        assert_eq!(result.score, 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_textbook_gattaca() {
        let aligner = GlobalAligner::new(ScoreParams::new(1, -1, -1));
        let x = Sequence::from("GATTACA");
        let y = Sequence::from("GCATGCU");
        let result = aligner.align(&x, &y).unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.aligned_seq1.len(), result.aligned_seq2.len());
        assert_eq!(strip(&result.aligned_seq1), x.as_bytes());
        assert_eq!(strip(&result.aligned_seq2), y.as_bytes());
        let rescored = aligner
            .score_params()
            .score_alignment(&result.aligned_seq1, &result.aligned_seq2, GAP_MARKER)
            .unwrap();
        assert_eq!(rescored, 0);
    }

    #[test]
    fn test_score_matches_align() {
        let aligner = GlobalAligner::new(ScoreParams::new(2, -3, -1));
        let x = Sequence::from("ACGTTGCA");
        let y = Sequence::from("AGTTTCA");

        let result = aligner.align(&x, &y).unwrap();
        assert_eq!(aligner.score(&x, &y).unwrap(), result.score);
    }

    #[test]
    fn test_tie_between_up_and_left_prefers_up() {
        // Cell (1,1): diagonal -5, up -2, left -2
        let aligner = GlobalAligner::new(ScoreParams::new(1, -5, -1));
        let result = aligner
            .align(&Sequence::from("A"), &Sequence::from("C"))
            .unwrap();

        assert_eq!(result.score, -2);
        assert_eq!(result.aligned_seq1, b"A-");
        assert_eq!(result.aligned_seq2, b"-C");
        assert_eq!(
            result.operations,
            vec![TracebackOperation::Deletion, TracebackOperation::Insertion]
        );
    }

    #[test]
    fn test_too_large_is_rejected() {
        let config = AlignerConfig::default().with_max_cells(10);
        let aligner = GlobalAligner::new(ScoreParams::default()).with_config(config);
        let err = aligner
            .align(&Sequence::from("ACGT"), &Sequence::from("ACGT"))
            .unwrap_err();

        assert!(matches!(
            err,
            AlignerError::SequenceTooLarge {
                rows: 5,
                cols: 5,
                limit: 10
            }
        ));
    }

    #[test]
    fn test_gap_marker_inside_sequence_is_rejected() {
        let aligner = GlobalAligner::new(ScoreParams::default());
        let err = aligner
            .align(&Sequence::from("AC-T"), &Sequence::from("ACT"))
            .unwrap_err();

        assert!(matches!(err, AlignerError::InvalidGapMarker('-')));
    }

    #[test]
    fn test_non_ascii_symbols_are_rejected() {
        let aligner = GlobalAligner::new(ScoreParams::default());

        let err = aligner
            .align(&Sequence::from("é"), &Sequence::from("e"))
            .unwrap_err();
        assert!(matches!(
            err,
            AlignerError::NonAsciiSymbol {
                sequence: 1,
                offset: 0
            }
        ));

        let err = aligner
            .score(&Sequence::from("ACGT"), &Sequence::from("ACΩT"))
            .unwrap_err();
        assert!(matches!(
            err,
            AlignerError::NonAsciiSymbol {
                sequence: 2,
                offset: 2
            }
        ));
    }

    #[test]
    fn test_score_alignment_length_mismatch() {
        let err = ScoreParams::default()
            .score_alignment(b"AC", b"A", GAP_MARKER)
            .unwrap_err();
        assert!(matches!(err, AlignerError::LengthMismatch { left: 2, right: 1 }));
    }

    #[test]
    fn test_score_alignment_columns() {
        let params = ScoreParams::new(4, -2, -3);
        // match, mismatch, gap, gap
        let score = params.score_alignment(b"AC-G", b"AGT-", GAP_MARKER).unwrap();
        assert_eq!(score, 4 - 2 - 3 - 3);
    }
}
