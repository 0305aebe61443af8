use bzip2::read::BzDecoder;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::Level;

use wikitmpl::bio::{run_bio, BioStats};
use wikitmpl::config::{get_config, init_config, resolve_config};
use wikitmpl::parallel::{process_batch_parallel, run_sequential, ParallelConfig, Stats};

/// Processing strategy for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// One line at a time
    Sequential,
    /// Batches of lines rendered on a thread pool
    BatchParallel,
}

#[derive(Parser)]
#[command(name = "wikitmpl")]
#[command(about = "Render MediaWiki template calls to plain text")]
struct Cli {
    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one template call per line into JSONL
    Render(RenderArgs),
    /// Infer alive/dead status for JSONL person records
    Bio(BioArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Input file, one call per line (.txt or .bz2)
    input: PathBuf,

    /// Output JSONL file
    output: PathBuf,

    /// Processing strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::Sequential)]
    strategy: Strategy,

    /// Number of threads (0 = auto-detect; default from config)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Batch size for batch-parallel strategy (default from config)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Stop after this many calls
    #[arg(long)]
    limit: Option<usize>,

    /// Path to config YAML (default: wikitmpl.yaml or config/wikitmpl.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct BioArgs {
    /// Input JSONL file of person records (.jsonl or .bz2)
    input: PathBuf,

    /// Output JSONL file
    output: PathBuf,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_input(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    };
    Ok(reader)
}

fn print_stats(stats: &Stats, strategy_name: &str) {
    println!();
    println!("============================================================");
    println!("Strategy: {}", strategy_name);
    println!("Lines: {}", stats.lines);
    println!("Rendered: {}", stats.rendered);
    println!("Unknown templates: {}", stats.unknown);
    println!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    println!("Rate: {:.0} lines/sec", stats.rate());
    println!("============================================================");
}

fn print_bio_stats(stats: &BioStats) {
    println!();
    println!("============================================================");
    println!("Records: {}", stats.records);
    println!("Dead: {}", stats.dead);
    println!("Alive: {}", stats.alive);
    println!("Unknown: {}", stats.unknown);
    println!("Malformed lines: {}", stats.malformed);
    println!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    println!("============================================================");
}

fn render(args: RenderArgs) -> std::io::Result<()> {
    let mut file_config = match resolve_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(threads) = args.threads {
        file_config.threads = threads;
    }
    if let Some(batch_size) = args.batch_size {
        file_config.batch_size = batch_size;
    }
    if let Err(e) = init_config(file_config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    let settings = get_config();

    let mut config = ParallelConfig::default();
    if settings.threads > 0 {
        config.num_threads = settings.threads;
    }
    config.batch_size = settings.batch_size;

    if !args.quiet {
        println!("Rendering: {}", args.input.display());
        println!("Output: {}", args.output.display());
        println!("Strategy: {:?}", args.strategy);
        if args.strategy != Strategy::Sequential {
            println!("Threads: {}", config.num_threads);
        }
        println!("Unknown templates: {:?}", settings.unknown);
        if let Some(limit) = args.limit {
            println!("Limit: {} calls", limit);
        }
        println!();
    }

    let reader = open_input(&args.input)?;
    let output = File::create(&args.output)?;
    let mut writer = BufWriter::with_capacity(256 * 1024, output);

    let stats = match args.strategy {
        Strategy::Sequential => {
            run_sequential(reader, &mut writer, settings.unknown, args.limit, args.quiet)?
        }
        Strategy::BatchParallel => process_batch_parallel(
            reader,
            &mut writer,
            &config,
            settings.unknown,
            args.limit,
            args.quiet,
        )?,
    };

    if !args.quiet {
        print_stats(&stats, &format!("{:?}", args.strategy));
    }
    Ok(())
}

fn bio(args: BioArgs) -> std::io::Result<()> {
    if !args.quiet {
        println!("Classifying: {}", args.input.display());
        println!("Output: {}", args.output.display());
        println!();
    }

    let reader = open_input(&args.input)?;
    let output = File::create(&args.output)?;
    let mut writer = BufWriter::with_capacity(256 * 1024, output);
    let stats = run_bio(reader, &mut writer, args.quiet)?;

    if !args.quiet {
        print_bio_stats(&stats);
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render(args) => render(args),
        Command::Bio(args) => bio(args),
    }
}
