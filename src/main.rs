use std::io::{self, Write};

use clap::Parser;
use nw_aligner::cli::Args;
use nw_aligner::{fasta, GlobalAligner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let params = args.score_params();
    let config = args.config()?;

    log::info!(
        "Scoring: match={} mismatch={} gap={}",
        params.match_score,
        params.mismatch,
        params.gap
    );

    let (seq1, seq2) = match &args.input {
        Some(path) => {
            log::info!("Reading sequences from {}", path.display());
            fasta::read_fasta_pair(path)?
        }
        None => {
            log::info!("Reading sequences from stdin");
            fasta::parse_fasta_pair(io::stdin().lock())?
        }
    };

    let aligner = GlobalAligner::new(params).with_config(config);
    let result = aligner.align(&seq1, &seq2)?;

    let mut out = io::stdout().lock();
    out.write_all(&result.aligned_seq1)?;
    out.write_all(b"\n")?;
    out.write_all(&result.aligned_seq2)?;
    out.write_all(b"\n")?;
    out.flush()?;

    if args.stats {
        eprintln!("Score: {}", result.score);
        eprintln!(
            "Matches: {}  Mismatches: {}  Gaps: {}  Identity: {:.2}%",
            result.statistics.matches,
            result.statistics.mismatches,
            result.statistics.gaps,
            result.identity() * 100.0
        );
        eprintln!("Time: {:.3} ms", result.statistics.execution_time_ms);
    }

    Ok(())
}
