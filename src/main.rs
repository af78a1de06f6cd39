use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use mazer::{grid::{format_path, Grid}, logger::DevLogger, solver::{Algorithm, MazeSolver, SearchReport}};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mazer", version, about = "Grid maze solver (DFS/BFS) with devlogs")]
struct Cli {
    /// Path to a maze file (`#` walls, `.` open, `S` start, `E` end). If omitted, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Search strategy
    #[arg(short, long, value_enum, default_value_t=Method::Both)]
    method: Method,

    /// Colorize the rendered solution and devlog echo
    #[arg(long)]
    color: bool,

    /// Write one devlog file per run into this directory
    #[arg(long)]
    devlogs: Option<PathBuf>,

    /// Maximum devlogs to write (0 = unlimited)
    #[arg(long, default_value_t=0)]
    max_logs: usize,

    /// Pause after each devlog. Press Enter to continue.
    #[arg(long)]
    step: bool,

    /// Print each search report as JSON instead of a rendered maze
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method { Dfs, Bfs, Both }

impl Method {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Method::Dfs => &[Algorithm::Dfs],
            Method::Bfs => &[Algorithm::Bfs],
            Method::Both => &[Algorithm::Dfs, Algorithm::Bfs],
        }
    }
}

fn read_maze(input: &Option<PathBuf>) -> Result<Grid> {
    match input {
        Some(p) => Grid::from_file(p),
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Grid::parse(&buf).context("parse maze from stdin")
        }
    }
}

fn print_report(grid: &Grid, report: &SearchReport, color: bool) {
    let rendered = if color { grid.render_solution_colored(&report.path) } else { grid.render_solution(&report.path) };
    println!("\n{} solution ({} moves, {} explored):\n{}", report.algorithm, report.edges(), report.explored, rendered);
    println!("{}", format_path(&report.path));
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut grid = read_maze(&cli.input)?;
    info!("loaded {}x{} maze", grid.rows(), grid.cols());

    let mut logger = DevLogger::for_cli(cli.devlogs.as_deref(), cli.color, cli.step, cli.max_logs)?;

    for (i, &algorithm) in cli.method.algorithms().iter().enumerate() {
        // every run after the first starts from clean bookkeeping
        if i > 0 { grid.reset(); }
        let report = MazeSolver::with_maze(&mut grid)
            .solve_logged(algorithm, &mut logger)
            .with_context(|| format!("solving with {}", algorithm))?;

        #[cfg(feature = "serde")]
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            continue;
        }
        print_report(&grid, &report, cli.color);
    }
    Ok(())
}
