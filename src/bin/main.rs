use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::{style, Stylize};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use word_graph::config::{BuildOptions, ReportConfig, DEFAULT_LISTED_ISOLATES, DEFAULT_SAMPLE_MEMBERS};
use word_graph::persistence::{
    backup, load_graph, load_snapshot, load_vocabulary, save_graph, save_snapshot,
    save_vocabulary, write_report,
};
use word_graph::{ConnectivityAnalyzer, GraphBuilder, GraphError, WordGraph};

/// wordgraph: build and inspect single-letter edit graphs over word lists
#[derive(Parser, Debug)]
#[command(name = "wordgraph", version)]
#[command(about = "Build and inspect single-letter edit graphs over word lists", long_about = None)]
struct Cli {
    /// Log verbosity when RUST_LOG is unset
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a graph from a word list and write it as JSON
    Build {
        /// Word list, one word per line
        words: PathBuf,
        /// Output path (defaults to the word list with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Sort letters within each position
        #[arg(long, default_value_t = false)]
        sorted: bool,
        /// Also write a binary snapshot here
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Write a connectivity report under reports/ next to the input
    Analyze {
        /// A .json graph, a .bin snapshot, or a word list
        input: PathBuf,
        /// Members listed per component
        #[arg(long, default_value_t = DEFAULT_SAMPLE_MEMBERS)]
        sample: usize,
        /// Isolated words listed before truncating
        #[arg(long, default_value_t = DEFAULT_LISTED_ISOLATES)]
        isolates: usize,
    },
    /// Drop words in components smaller than --min-size and rebuild
    Trim {
        /// Word list to rewrite (a .bak copy is kept)
        words: PathBuf,
        #[arg(long)]
        min_size: usize,
        /// Graph output path (defaults to the word list with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the edges of one or more words
    Neighbors {
        /// A .json graph, a .bin snapshot, or a word list
        graph: PathBuf,
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            if err.is_invalid_input() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn execute(command: Command) -> Result<(), GraphError> {
    match command {
        Command::Build {
            words,
            output,
            sorted,
            snapshot,
        } => execute_build(&words, output, sorted, snapshot.as_deref()),
        Command::Analyze {
            input,
            sample,
            isolates,
        } => execute_analyze(
            &input,
            &ReportConfig {
                sample_members: sample,
                listed_isolates: isolates,
            },
        ),
        Command::Trim {
            words,
            min_size,
            output,
        } => execute_trim(&words, min_size, output),
        Command::Neighbors { graph, words } => execute_neighbors(&graph, &words),
    }
}

fn default_graph_path(words: &Path) -> PathBuf {
    words.with_extension("json")
}

/// Loads whatever `path` holds: a JSON graph, a snapshot, or a word list to build from.
fn open_graph(path: &Path) -> Result<WordGraph, GraphError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_graph(path),
        Some("bin") => load_snapshot(path),
        _ => Ok(GraphBuilder::new().build(load_vocabulary(path)?)),
    }
}

fn execute_build(
    words: &Path,
    output: Option<PathBuf>,
    sorted: bool,
    snapshot: Option<&Path>,
) -> Result<(), GraphError> {
    let vocab = load_vocabulary(words)?;
    let builder = GraphBuilder::with_options(BuildOptions {
        sort_candidates: sorted,
    });
    let graph = builder.build(vocab);

    let output = output.unwrap_or_else(|| default_graph_path(words));
    save_graph(&output, &graph)?;
    if let Some(snapshot) = snapshot {
        save_snapshot(snapshot, &graph)?;
    }
    println!(
        "{} {} words -> {}",
        "Built".green().bold(),
        graph.len(),
        output.display()
    );
    Ok(())
}

fn execute_analyze(input: &Path, config: &ReportConfig) -> Result<(), GraphError> {
    let graph = open_graph(input)?;
    let report = ConnectivityAnalyzer::new(&graph).analyze();
    let text = report.render(config);
    let path = write_report(input, &text)?;

    println!("{}", "Connectivity".bold());
    println!("  words:      {}", report.total_words());
    println!("  components: {}", report.components().len());
    println!("  isolated:   {}", style(report.isolated().len()).yellow());
    println!("  report:     {}", path.display());
    Ok(())
}

fn execute_trim(words: &Path, min_size: usize, output: Option<PathBuf>) -> Result<(), GraphError> {
    let vocab = load_vocabulary(words)?;
    let before = vocab.len();
    let graph = GraphBuilder::new().build(vocab);
    let kept = ConnectivityAnalyzer::new(&graph)
        .analyze()
        .retain_min_size(min_size);

    let backup_path = backup(words)?;
    save_vocabulary(words, &kept)?;
    let rebuilt = GraphBuilder::new().build(kept);
    let output = output.unwrap_or_else(|| default_graph_path(words));
    save_graph(&output, &rebuilt)?;

    println!(
        "{} {} of {} words (components < {min_size}), backup at {}",
        "Removed".yellow().bold(),
        before - rebuilt.len(),
        before,
        backup_path.display()
    );
    Ok(())
}

fn execute_neighbors(path: &Path, words: &[String]) -> Result<(), GraphError> {
    let graph = open_graph(path)?;
    for word in words {
        if !graph.contains(word) {
            println!("{} {}", style(word).bold(), "(not in graph)".dark_grey());
            continue;
        }
        let edges = graph.edges(word);
        println!("{} ({} neighbors)", style(word).bold(), graph.neighbors(word).len());
        for (edit, target) in edges {
            println!("  {:<16} {target}", edit.to_string());
        }
    }
    Ok(())
}
