use std::mem::size_of;

use crate::traceback::BackPointer;
use crate::{AlignerError, GAP_MARKER};

/// Memory one table cell costs: its score plus its back-pointer slot.
pub const BYTES_PER_CELL: usize = size_of::<i64>() + size_of::<Option<BackPointer>>();

/// Default memory budget for the two tables of one alignment (2 GiB).
pub const MAX_MATRIX_BYTES: usize = 1 << 31;

/// Upper bound on `(len1 + 1) * (len2 + 1)` table cells per alignment.
pub const MAX_MATRIX_CELLS: usize = MAX_MATRIX_BYTES / BYTES_PER_CELL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignerConfig {
    pub gap_marker: u8,
    pub max_cells: usize,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            gap_marker: GAP_MARKER,
            max_cells: MAX_MATRIX_CELLS,
        }
    }
}

impl AlignerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap_marker(mut self, marker: char) -> Result<Self, AlignerError> {
        if !marker.is_ascii() {
            return Err(AlignerError::InvalidGapMarker(marker));
        }
        self.gap_marker = marker as u8;
        Ok(self)
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Caps the tables of one alignment at roughly `bytes` of memory.
    pub fn with_max_bytes(self, bytes: usize) -> Self {
        self.with_max_cells(bytes / BYTES_PER_CELL)
    }

    pub fn gap_marker_char(&self) -> char {
        char::from(self.gap_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlignerConfig::new();
        assert_eq!(config.gap_marker_char(), '-');
        assert_eq!(config.max_cells, MAX_MATRIX_CELLS);
    }

    #[test]
    fn test_default_limit_fits_byte_budget() {
        assert!(MAX_MATRIX_CELLS > 0);
        assert!(MAX_MATRIX_CELLS * BYTES_PER_CELL <= MAX_MATRIX_BYTES);
        assert!((MAX_MATRIX_CELLS + 1) * BYTES_PER_CELL > MAX_MATRIX_BYTES);
    }

    #[test]
    fn test_with_max_bytes() {
        let config = AlignerConfig::new().with_max_bytes(BYTES_PER_CELL * 25 + 1);
        assert_eq!(config.max_cells, 25);
    }

    #[test]
    fn test_gap_marker_must_be_ascii() {
        assert_eq!(
            AlignerConfig::new().with_gap_marker('.').unwrap().gap_marker,
            b'.'
        );
        assert!(matches!(
            AlignerConfig::new().with_gap_marker('é'),
            Err(AlignerError::InvalidGapMarker('é'))
        ));
    }
}
