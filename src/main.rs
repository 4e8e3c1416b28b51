use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;

mod align;
mod error;
mod io;
mod util;

use align::{NwParams, ScanParams};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// 全量 DP 的矩阵单元上限，超出时提示改用 scan
const MAX_DP_CELLS: usize = 100_000_000;

#[derive(Parser, Debug)]
#[command(name = "seqsim", author, version, about = "Needleman-Wunsch sequence similarity toolkit", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Global alignment of two FASTA sequences with traceback display
    Align {
        /// First FASTA file (sequence A)
        seq_a: String,
        /// Second FASTA file (sequence B)
        seq_b: String,
        #[arg(long = "match", default_value_t = 1)]
        match_score: i32,
        #[arg(long = "mismatch", default_value_t = -1, allow_hyphen_values = true)]
        mismatch_score: i32,
        #[arg(long = "gap", default_value_t = 0, allow_hyphen_values = true)]
        gap_score: i32,
        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Similarity metrics (identity, weighted, Jaccard k-mer) on two sequences
    Score {
        seq_a: String,
        seq_b: String,
        /// k-mer length for the Jaccard score
        #[arg(short, long, default_value_t = 3)]
        k: usize,
        #[arg(long = "match", default_value_t = 1)]
        match_reward: i32,
        #[arg(long = "mismatch", default_value_t = 1)]
        mismatch_penalty: i32,
        #[arg(long)]
        json: bool,
    },
    /// Coarse windowed search of two genomes, then full analysis of the best window pair
    Scan {
        seq_a: String,
        seq_b: String,
        /// Window length in bp
        #[arg(short = 'w', long, default_value_t = 60)]
        window: usize,
        /// Scan stride on sequence A (the finer axis)
        #[arg(long, default_value_t = 100)]
        stride_a: usize,
        /// Scan stride on sequence B (the coarser axis)
        #[arg(long, default_value_t = 500)]
        stride_b: usize,
        #[arg(long = "match", default_value_t = 1)]
        match_score: i32,
        #[arg(long = "mismatch", default_value_t = -1, allow_hyphen_values = true)]
        mismatch_score: i32,
        #[arg(long = "gap", default_value_t = 0, allow_hyphen_values = true)]
        gap_score: i32,
        #[arg(short, long, default_value_t = 3)]
        k: usize,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Align {
            seq_a,
            seq_b,
            match_score,
            mismatch_score,
            gap_score,
            json,
        } => {
            let params = NwParams {
                match_score,
                mismatch_score,
                gap_score,
            };
            run_align(&seq_a, &seq_b, params, json)
        }
        Commands::Score {
            seq_a,
            seq_b,
            k,
            match_reward,
            mismatch_penalty,
            json,
        } => run_score(&seq_a, &seq_b, k, match_reward, mismatch_penalty, json),
        Commands::Scan {
            seq_a,
            seq_b,
            window,
            stride_a,
            stride_b,
            match_score,
            mismatch_score,
            gap_score,
            k,
            threads,
            json,
        } => {
            let scan = ScanParams {
                window_len: window,
                stride_a,
                stride_b,
            };
            let params = NwParams {
                match_score,
                mismatch_score,
                gap_score,
            };
            run_scan(&seq_a, &seq_b, scan, params, k, threads, json)
        }
    }
}

fn run_align(path_a: &str, path_b: &str, params: NwParams, json: bool) -> Result<()> {
    let a = io::fasta::load_merged(path_a)?;
    let b = io::fasta::load_merged(path_b)?;

    if a.len().saturating_mul(b.len()) > MAX_DP_CELLS {
        anyhow::bail!(
            "inputs of {} x {} bp exceed the full-DP limit; use `seqsim scan` for genome-scale sequences",
            a.len(),
            b.len()
        );
    }

    let res = align::nw_align(&a, &b, params);

    if json {
        let report = json!({
            "scoring": params,
            "aligned_a": String::from_utf8_lossy(&res.aligned_a),
            "aligned_b": String::from_utf8_lossy(&res.aligned_b),
            "matches": res.matches,
            "length": res.len(),
            "similarity_pct": res.similarity_pct(),
            "score": res.score(),
            "path_len": res.path.len(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Show Alignment:");
        println!("-------------------------");
        println!("{}", res.to_pretty());
        println!("Tracing back: M[{},{}]", b.len(), a.len());
    }
    Ok(())
}

fn run_score(
    path_a: &str,
    path_b: &str,
    k: usize,
    match_reward: i32,
    mismatch_penalty: i32,
    json: bool,
) -> Result<()> {
    let a = io::fasta::load_merged(path_a)?;
    let b = io::fasta::load_merged(path_b)?;

    let (id_pct, id_matches) = align::identity_score(&a, &b);
    let (w_pct, w_raw) = align::weighted_score(&a, &b, match_reward, mismatch_penalty)?;
    let (j_pct, j_inter, j_union) = align::jaccard_kmer_score(&a, &b, k);

    if json {
        let report = json!({
            "identity": { "pct": id_pct, "matches": id_matches },
            "weighted": { "pct": w_pct, "raw": w_raw,
                          "match_reward": match_reward, "mismatch_penalty": mismatch_penalty },
            "jaccard": { "pct": j_pct, "intersection": j_inter, "union": j_union, "k": k },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("1. IDENTITY SCORE");
    println!("   Matches: {} / {}", id_matches, a.len().min(b.len()));
    println!("   RESULT:  {:.2}%", id_pct);
    println!();
    println!("2. WEIGHTED SCORE (match=+{}, mismatch=-{})", match_reward, mismatch_penalty);
    println!("   Raw score: {}", w_raw);
    println!("   RESULT:  {:.2}%", w_pct);
    println!();
    println!("3. JACCARD SIMILARITY (k={})", k);
    println!("   Common k-mers: {}", j_inter);
    println!("   Total unique k-mers: {}", j_union);
    println!("   RESULT:  {:.2}%", j_pct);
    Ok(())
}

fn run_scan(
    path_a: &str,
    path_b: &str,
    scan: ScanParams,
    params: NwParams,
    k: usize,
    threads: usize,
    json: bool,
) -> Result<()> {
    let a = io::fasta::load_merged(path_a)?;
    let b = io::fasta::load_merged(path_b)?;

    let summary = if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| align::scan_and_align(&a, &b, scan, params, k, true))?
    } else {
        align::scan_and_align(&a, &b, scan, params, k, false)?
    };

    if json {
        let report = json!({
            "generated": chrono::Utc::now().to_rfc3339(),
            "scan": scan,
            "scoring": params,
            "best_window": {
                "start_a": summary.best.start_a,
                "start_b": summary.best.start_b,
                "window_a": String::from_utf8_lossy(&summary.best.window_a),
                "window_b": String::from_utf8_lossy(&summary.best.window_b),
                "identity_pct": summary.best.score,
            },
            "alignment": {
                "aligned_a": String::from_utf8_lossy(&summary.alignment.aligned_a),
                "aligned_b": String::from_utf8_lossy(&summary.alignment.aligned_b),
                "matches": summary.alignment.matches,
                "length": summary.alignment.len(),
                "score": summary.alignment.score(),
            },
            "identity": { "pct": summary.identity.0, "matches": summary.identity.1 },
            "weighted": { "pct": summary.weighted.0, "raw": summary.weighted.1 },
            "jaccard": { "pct": summary.jaccard.0,
                         "intersection": summary.jaccard.1, "union": summary.jaccard.2, "k": k },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("# seqsim scan report ({})", chrono::Utc::now().to_rfc3339());
    println!("sequence A: {} ({} bp)", path_a, a.len());
    println!("sequence B: {} ({} bp)", path_b, b.len());
    println!(
        "scan: window={} stride_a={} stride_b={} threads={}",
        scan.window_len, scan.stride_a, scan.stride_b, threads
    );
    println!("============================================================");
    println!(
        "Best window: A@{} | B@{} | identity {:.2}%",
        summary.best.start_a, summary.best.start_b, summary.best.score
    );
    println!("Sequence A window: {}", String::from_utf8_lossy(&summary.best.window_a));
    println!("Sequence B window: {}", String::from_utf8_lossy(&summary.best.window_b));
    println!("------------------------------------------------------------");
    println!("{}", summary.alignment.to_pretty());
    println!("1. IDENTITY:  {:.2}% ({} matches)", summary.identity.0, summary.identity.1);
    println!("2. WEIGHTED:  {:.2}% (raw {})", summary.weighted.0, summary.weighted.1);
    println!(
        "3. JACCARD:   {:.2}% ({} common / {} unique k-mers, k={})",
        summary.jaccard.0, summary.jaccard.1, summary.jaccard.2, k
    );
    println!("============================================================");
    Ok(())
}
