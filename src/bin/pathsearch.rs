//! Finds a path through a graph described in a text file.
//!
//! ```text
//! pathsearch data/problems/assignment.txt AS
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use owo_colors::OwoColorize;
use thiserror::Error;

use pathsearch::config::DEFAULT_HEURISTIC_WEIGHT;
use pathsearch::config::DEFAULT_MAX_DEPTH;
use pathsearch::config::SearchConfig;
use pathsearch::errors::SearchError;
use pathsearch::method::Method;
use pathsearch::problems::graph::GraphProblem;
use pathsearch::problems::parser::GraphParseError;
use pathsearch::report::Report;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = pathsearch::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Problem file with Nodes, Edges, Origin and Destinations sections.
    #[arg()]
    pub input: PathBuf,

    /// DFS, BFS, GBFS, AS (A*), CUS1 (UCS), CUS2 (RBFS) or WASTAR. Any case.
    #[arg()]
    pub method: Method,

    /// Maximum RBFS depth.
    #[arg(long, env = "PATHSEARCH_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Give up after this many expansions.
    #[arg(long, env = "PATHSEARCH_MAX_EXPANSIONS")]
    pub max_expansions: Option<usize>,

    /// Heuristic weight for WASTAR.
    #[arg(long, env = "PATHSEARCH_WEIGHT", default_value_t = DEFAULT_HEURISTIC_WEIGHT)]
    pub weight: f64,

    /// Print search statistics to stderr.
    #[arg(long, env = "PATHSEARCH_STATS")]
    pub stats: bool,

    /// Log specification, like `info` or `pathsearch=trace`.
    #[arg(long, env = "PATHSEARCH_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

impl Args {
    fn config(&self) -> SearchConfig {
        let config = SearchConfig::default()
            .with_max_depth(self.max_depth)
            .with_heuristic_weight(self.weight);
        match self.max_expansions {
            Some(limit) => config.with_max_expansions(limit),
            None => config,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Logger(#[from] flexi_logger::FlexiLoggerError),
    #[error(transparent)]
    Parse(#[from] GraphParseError),
    #[error("{method} failed: {e}")]
    Search { method: Method, e: SearchError },
    #[error("Invalid weight {0}, expected a non-negative number")]
    InvalidWeight(f64),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

fn run(args: &Args) -> Result<(), AppError> {
    if !args.weight.is_finite() || args.weight < 0.0 {
        return Err(AppError::InvalidWeight(args.weight));
    }

    let problem = GraphProblem::try_from(args.input.as_path())?;
    log::info!("Loaded {:?} from {:?}", problem.graph(), args.input);
    log::debug!("{problem}");

    let mut stderr = anstream::stderr();
    let mut stopwatch = Stopwatch::new_started();
    let result = if args.stats {
        writeln!(stderr, "{}", args.method.cyan())?;
        args.method
            .search_with_stats(&problem, args.config(), Some(&mut stderr))
    } else {
        args.method.search(&problem, args.config())
    }
    .map_err(|e| AppError::Search {
        method: args.method,
        e,
    })?;
    stopwatch.stop();

    let report = Report::new(&result);
    println!("{report}");
    if args.stats {
        report.write_stats(&mut stderr, stopwatch.elapsed())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.color.write_global();

    let logger = flexi_logger::Logger::try_with_str(&args.log_level)
        .and_then(|l| l.log_to_stderr().start());
    let _logger = match logger {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), AppError::from(e));
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
