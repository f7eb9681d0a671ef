//! Extraction of the two sequences to align from FASTA text.
//!
//! Any line containing `>` is a header. Sequence lines are right-trimmed and
//! concatenated into the first or second record. Text before the first
//! header is ignored, and so is every record after the second.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::{AlignerError, Sequence};

pub fn parse_fasta_pair<R: BufRead>(reader: R) -> Result<(Sequence, Sequence), AlignerError> {
    let mut records = 0usize;
    let mut seq1 = Vec::new();
    let mut seq2 = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.contains('>') {
            records += 1;
            if records == 3 {
                log::warn!("FASTA input holds more than two sequences, ignoring the rest");
            }
            continue;
        }

        match records {
            1 => seq1.extend_from_slice(line.trim_end().as_bytes()),
            2 => seq2.extend_from_slice(line.trim_end().as_bytes()),
            _ => {}
        }
    }

    if records < 2 {
        return Err(AlignerError::MissingSequence(records));
    }

    log::debug!(
        "Read FASTA pair of {} and {} symbols",
        seq1.len(),
        seq2.len()
    );
    Ok((Sequence::from(seq1), Sequence::from(seq2)))
}

pub fn read_fasta_pair<P: AsRef<Path>>(path: P) -> Result<(Sequence, Sequence), AlignerError> {
    let file = File::open(path)?;
    parse_fasta_pair(BufReader::new(file))
}
