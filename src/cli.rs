use std::path::PathBuf;

use clap::Parser;

use crate::{AlignerConfig, AlignerError, ScoreParams};

/// Optimal global alignment of the first two sequences of a FASTA file.
#[derive(Parser, Debug)]
#[command(name = "nw_aligner", version)]
pub struct Args {
    /// Match, mismatch and gap scores, all three or none (default: 4 -2 -2)
    #[arg(
        value_names = ["MATCH", "MISMATCH", "GAP"],
        num_args = 3,
        allow_negative_numbers = true
    )]
    pub scoring: Vec<i32>,

    /// FASTA input file (reads stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Character printed for gaps
    #[arg(long, default_value_t = '-')]
    pub gap_char: char,

    /// Print score and column counts to stderr
    #[arg(long)]
    pub stats: bool,
}

impl Args {
    pub fn score_params(&self) -> ScoreParams {
        match self.scoring.as_slice() {
            &[match_score, mismatch, gap] => ScoreParams::new(match_score, mismatch, gap),
            _ => ScoreParams::default(),
        }
    }

    pub fn config(&self) -> Result<AlignerConfig, AlignerError> {
        AlignerConfig::default().with_gap_marker(self.gap_char)
    }
}
