use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::{Path, PathBuf};

use seqweave::align::{self, AlignmentVariant, ScoringScheme};
use seqweave::assembly::{self, AssemblyParams, FragmentPool};
use seqweave::io::fasta;
use seqweave::report::{AlignmentReport, AssemblyReport};
use seqweave::util::dna;
use seqweave::{render, sim};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "seqweave", author, version, about = "Pairwise DNA alignment and greedy fragment assembly", arg_required_else_help = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align two sequences and print the alignment
    Align {
        seq_a: String,
        seq_b: String,
        #[arg(short, long, value_enum, default_value_t = Mode::Global)]
        mode: Mode,
        #[command(flatten)]
        scoring: ScoringArgs,
        /// Print a JSON report instead of the text rendering
        #[arg(long)]
        json: bool,
    },
    /// Greedily assemble FASTA fragments into one consensus sequence
    Assemble {
        /// Fragments FASTA file
        fragments: PathBuf,
        /// Output consensus FASTA (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Stop once the consensus is longer than this
        #[arg(long = "max-len")]
        max_len: Option<usize>,
        #[arg(long = "max-iterations")]
        max_iterations: Option<usize>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        #[command(flatten)]
        scoring: ScoringArgs,
        /// Write a JSON assembly report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Generate a random origin and cut it into overlapping fragments
    Simulate {
        #[arg(long = "origin-len", default_value_t = 100)]
        origin_len: usize,
        #[arg(long = "min-len", default_value_t = 5)]
        min_len: usize,
        #[arg(long = "max-len", default_value_t = 20)]
        max_len: usize,
        /// Number of independent cuts of the origin
        #[arg(long, default_value_t = 10)]
        sets: usize,
        /// Emit this many unrelated random fragments instead of cutting the origin
        #[arg(long)]
        unrelated: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Fragments FASTA output
        #[arg(short, long)]
        out: PathBuf,
        /// Also write the origin to this FASTA file
        #[arg(long)]
        origin: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Global,
    Local,
    SemiGlobal,
}

impl From<Mode> for AlignmentVariant {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Global => AlignmentVariant::Global,
            Mode::Local => AlignmentVariant::Local,
            Mode::SemiGlobal => AlignmentVariant::SemiGlobal,
        }
    }
}

#[derive(Args, Debug)]
struct ScoringArgs {
    #[arg(long = "match")]
    match_score: Option<i32>,
    #[arg(long = "mismatch", allow_negative_numbers = true)]
    mismatch: Option<i32>,
    #[arg(long = "gap", allow_negative_numbers = true)]
    gap: Option<i32>,
}

impl ScoringArgs {
    fn resolve(&self, base: ScoringScheme) -> Result<ScoringScheme> {
        let s = ScoringScheme::new(
            self.match_score.unwrap_or(base.match_score),
            self.mismatch.unwrap_or(base.mismatch),
            self.gap.unwrap_or(base.gap),
        )?;
        Ok(s)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Align { seq_a, seq_b, mode, scoring, json } => {
            let base = match mode {
                Mode::SemiGlobal => ScoringScheme::free_shift(),
                _ => ScoringScheme::default(),
            };
            let scoring = scoring.resolve(base)?;
            run_align(&seq_a, &seq_b, mode.into(), scoring, json)
        }
        Commands::Assemble {
            fragments,
            out,
            max_len,
            max_iterations,
            threads,
            scoring,
            report,
        } => {
            let params = AssemblyParams {
                scoring: scoring.resolve(ScoringScheme::free_shift())?,
                max_length: max_len.unwrap_or(usize::MAX),
                threads,
                max_iterations,
            };
            run_assemble(&fragments, out.as_deref(), report.as_deref(), params)
        }
        Commands::Simulate {
            origin_len,
            min_len,
            max_len,
            sets,
            unrelated,
            seed,
            out,
            origin,
        } => {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let origin_seq = sim::generate_origin(origin_len, &mut rng);
            let parts = match unrelated {
                Some(n) => sim::random_fragments(n, min_len, max_len, &mut rng)?,
                None => sim::cut_origin(&origin_seq, min_len, max_len, sets, &mut rng)?,
            };
            run_simulate(&origin_seq, &parts, &out, origin.as_deref())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(p).with_context(|| format!("cannot create '{}'", p.display()))?,
        )),
        None => Box::new(std::io::BufWriter::new(std::io::stdout())),
    })
}

fn run_align(seq_a: &str, seq_b: &str, variant: AlignmentVariant, scoring: ScoringScheme, json: bool) -> Result<()> {
    let a = dna::normalize_seq(seq_a.as_bytes());
    let b = dna::normalize_seq(seq_b.as_bytes());
    let res = align::align(&a, &b, variant, &scoring)?;
    log::info!("{} alignment score {}", variant, res.score);

    if json {
        let rep = AlignmentReport::new(&res, &scoring);
        println!("{}", serde_json::to_string_pretty(&rep)?);
    } else {
        print!("{}", render::render_alignment(&res));
    }
    Ok(())
}

fn run_assemble(fragments: &Path, out: Option<&Path>, report: Option<&Path>, params: AssemblyParams) -> Result<()> {
    let records = fasta::read_fasta_file(fragments)?;
    if records.is_empty() {
        anyhow::bail!("FASTA file '{}' contains no sequences", fragments.display());
    }

    let seqs: Vec<Vec<u8>> = records
        .iter()
        .map(|rec| {
            let norm = dna::normalize_seq(&rec.seq);
            if let Some(pos) = dna::first_invalid(&norm) {
                log::warn!("fragment '{}' has a non-ACGT symbol at position {}", rec.id, pos);
            }
            norm
        })
        .collect();

    let pool = FragmentPool::new(&seqs);
    let pool_len = pool.len();
    eprintln!("fragments: {} read, {} after dedup/containment filter", seqs.len(), pool_len);

    let res = assembly::assemble_pool(pool, &params)?;
    eprintln!("status: {}", res.status);
    eprintln!("iterations: {}", res.iterations);
    eprintln!("consensus_len: {}", res.consensus.len());

    let mut w = open_output(out)?;
    fasta::write_record(&mut w, "consensus", &res.consensus)?;
    w.flush()?;

    if let Some(path) = report {
        let rep = AssemblyReport::new(&res, &params, pool_len);
        write_report(path, &rep)?;
    }

    res.into_consensus()?;
    Ok(())
}

fn write_report<T: serde::Serialize>(path: &Path, rep: &T) -> Result<()> {
    let mut w = open_output(Some(path))?;
    serde_json::to_writer_pretty(&mut w, rep)
        .with_context(|| format!("cannot write report '{}'", path.display()))?;
    w.flush()
        .with_context(|| format!("cannot write report '{}'", path.display()))?;
    Ok(())
}

fn run_simulate(origin: &[u8], parts: &[Vec<u8>], out: &Path, origin_out: Option<&Path>) -> Result<()> {
    let mut w = open_output(Some(out))?;
    for (i, part) in parts.iter().enumerate() {
        fasta::write_record(&mut w, &format!("frag_{}", i + 1), part)?;
    }
    w.flush()?;

    if let Some(p) = origin_out {
        let mut w = open_output(Some(p))?;
        fasta::write_record(&mut w, "origin", origin)?;
        w.flush()?;
    }
    println!("origin_len: {}", origin.len());
    println!("fragments: {}", parts.len());
    Ok(())
}
