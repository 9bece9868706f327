#![warn(clippy::pedantic)]

mod goals_file;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use coord_solver::{
    cube::{Move, random_scramble},
    notation::{format_moves, parse_moves, validate},
    solver::SolverError,
};
use env_logger::TimestampPrecision;
use goals_file::NamedSolver;
use itertools::Itertools;
use log::{LevelFilter, info, warn};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::Instant,
};

/// Finds optimal solutions to the first steps of a Rubik's cube solve
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// A TOML file of custom goals to solve instead of the built in ones
    #[arg(long, value_name = "FILE")]
    goals: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single scramble, e.g. "R U' F2"
    Solve {
        scramble: String,
        /// Only solve the goals with these names. Can be repeated.
        #[arg(short, long)]
        goal: Vec<String>,
    },
    /// Solve every scramble of a file, one per line, and save the solutions
    Batch {
        input: PathBuf,
        /// Where to save the solutions. Defaults to `solutions-<INPUT>` next
        /// to the input file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read scrambles from stdin and solve each of them. `load <FILE>` solves
    /// a file like the batch command.
    Repl,
    /// Print a random scramble
    Scramble {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let load_solvers = || match &cli.goals {
        Some(path) => goals_file::load(path),
        None => Ok(goals_file::presets()),
    };

    match cli.command {
        Commands::Solve { scramble, goal } => {
            solve_scramble(&select_goals(load_solvers()?, &goal)?, &scramble)?;
        }
        Commands::Batch { input, output } => {
            let solvers = load_solvers()?;
            initialize(&solvers)?;
            solve_file(&solvers, &input, output)?;
        }
        Commands::Repl => {
            let solvers = load_solvers()?;
            initialize(&solvers)?;
            run_repl(&solvers)?;
        }
        Commands::Scramble { length } => {
            println!("{}", format_moves(&random_scramble(length)));
        }
    }
    Ok(())
}

fn select_goals(
    solvers: Vec<NamedSolver>,
    names: &[String],
) -> color_eyre::Result<Vec<NamedSolver>> {
    if names.is_empty() {
        return Ok(solvers);
    }
    if let Some(unknown) = names
        .iter()
        .find(|name| !solvers.iter().any(|s| s.name.eq_ignore_ascii_case(name)))
    {
        return Err(eyre!("Unknown goal `{unknown}`"));
    }
    Ok(solvers
        .into_iter()
        .filter(|s| names.iter().any(|name| s.name.eq_ignore_ascii_case(name)))
        .collect())
}

fn initialize(solvers: &[NamedSolver]) -> color_eyre::Result<()> {
    eprintln!("Initializing solvers");
    let start = Instant::now();
    for NamedSolver { name, solver } in solvers {
        solver
            .initialize()
            .wrap_err_with(|| format!("Failed to initialize the {name} solver"))?;
    }
    eprintln!(
        "Solvers initialized in {} ms",
        start.elapsed().as_millis()
    );
    Ok(())
}

/// Build every table, then print the timed solutions of `scramble`.
fn solve_scramble(solvers: &[NamedSolver], scramble: &str) -> color_eyre::Result<()> {
    if !validate(scramble) {
        return Err(eyre!("Unable to parse the scramble `{scramble}`"));
    }
    initialize(solvers)?;
    timed_solve(solvers, scramble)
}

/// Solve `scramble` for one goal. `None` means the goal has no solution
/// within its maximum length, which only concerns this scramble.
fn solve_goal(
    NamedSolver { name, solver }: &NamedSolver,
    scramble: &[Move],
) -> color_eyre::Result<Option<Vec<Move>>> {
    match solver.solve(scramble) {
        Ok(solution) => Ok(Some(solution)),
        Err(SolverError::MaxSolutionLengthExceeded {
            max_solution_length,
        }) => {
            warn!(
                "{name}: no solution of at most {max_solution_length} moves for `{}`",
                format_moves(scramble)
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn no_solution_line(NamedSolver { name, solver }: &NamedSolver) -> String {
    format!(
        "{name}: no solution within {} moves",
        solver.config().max_solution_length()
    )
}

/// Print every solution of `scramble` along with how long it took.
fn timed_solve(solvers: &[NamedSolver], scramble: &str) -> color_eyre::Result<()> {
    let scramble = parse_moves(scramble)?;
    for named in solvers {
        let start = Instant::now();
        match solve_goal(named, &scramble)? {
            Some(solution) => println!(
                "{}: {} ({} moves, {} ms)",
                named.name,
                format_moves(&solution),
                solution.len(),
                start.elapsed().as_millis()
            ),
            None => println!(
                "{} ({} ms)",
                no_solution_line(named),
                start.elapsed().as_millis()
            ),
        }
    }
    Ok(())
}

/// The scrambles of a file, skipping lines that are not valid move
/// sequences.
fn read_scrambles(path: &Path) -> color_eyre::Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
    Ok(text
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            if validate(line) {
                Some(line.trim().to_owned())
            } else {
                if !line.trim().is_empty() {
                    warn!("Skipping line {} of {}: `{line}`", i + 1, path.display());
                }
                None
            }
        })
        .collect())
}

fn default_output_path(input: &Path) -> color_eyre::Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| eyre!("{} is not a file", input.display()))?;
    Ok(input.with_file_name(format!("solutions-{}", file_name.to_string_lossy())))
}

fn solve_file(
    solvers: &[NamedSolver],
    input: &Path,
    output: Option<PathBuf>,
) -> color_eyre::Result<()> {
    let scrambles = read_scrambles(input)?;
    let output = match output {
        Some(output) => output,
        None => default_output_path(input)?,
    };
    info!("Solving {} scrambles from {}", scrambles.len(), input.display());

    let mut lines = vec![];
    for scramble in &scrambles {
        lines.push(scramble.clone());
        let moves = parse_moves(scramble)?;
        for named in solvers {
            lines.push(match solve_goal(named, &moves)? {
                Some(solution) => format!("{}: {}", named.name, format_moves(&solution)),
                None => no_solution_line(named),
            });
        }
    }
    let mut contents = lines.iter().join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }

    fs::write(&output, contents)
        .wrap_err_with(|| format!("Failed to save solutions to {}", output.display()))?;
    eprintln!("Solutions saved to {}", output.display());
    Ok(())
}

fn run_repl(solvers: &[NamedSolver]) -> color_eyre::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("Scramble: ");
        io::stderr().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        if line == "exit" {
            break;
        }
        if let Some(path) = line.strip_prefix("load ") {
            if let Err(e) = solve_file(solvers, Path::new(path.trim()), None) {
                eprintln!("{e:?}");
            }
        } else if !validate(line) {
            eprintln!("Unable to parse scramble");
        } else if let Err(e) = timed_solve(solvers, line) {
            eprintln!("{e:?}");
        }
    }
    Ok(())
}
