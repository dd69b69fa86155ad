use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lp_dispatch::error::SolveError;
use lp_dispatch::production::{self, ProductionPlan, DEFAULT_SOLVER};
use lp_dispatch::solvers::SolverFactory;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "lp-dispatch", version)]
#[command(about = "Solve the production planning LP with an external solver", long_about = None)]
struct Cli {
    /// Solver to use: glpk, cbc or auto
    #[arg(long, default_value = DEFAULT_SOLVER)]
    solver: String,

    /// Executable to run instead of the solver's default command
    #[arg(long)]
    command: Option<String>,

    /// Time limit passed to the solver, in seconds
    #[arg(long)]
    time_limit: Option<u32>,

    /// Most units of x that can be made
    #[arg(long)]
    x_max: Option<f64>,

    /// Most units of y that can be made
    #[arg(long)]
    y_max: Option<f64>,

    /// Available capacity
    #[arg(long)]
    capacity: Option<f64>,

    /// Also save the generated model in the .lp format
    #[arg(long)]
    write_lp: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn plan(&self) -> ProductionPlan {
        let default = ProductionPlan::default();
        ProductionPlan {
            x_max: self.x_max.unwrap_or(default.x_max),
            y_max: self.y_max.unwrap_or(default.y_max),
            capacity: self.capacity.unwrap_or(default.capacity),
            ..default
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), SolveError> {
    let model = production::build_model(&cli.plan())?;
    if let Some(path) = &cli.write_lp {
        fs::write(path, model.display_lp().to_string())?;
        debug!(path = %path.display(), "Model written");
    }

    let mut solver = match &cli.command {
        Some(command) => SolverFactory::with_command(&cli.solver, command)?,
        None => SolverFactory::create(&cli.solver)?,
    };
    if let Some(seconds) = cli.time_limit {
        solver = solver.with_max_seconds(seconds);
    }

    let solution = production::solve_with(&model, &solver)?;
    production::report(&model, &solution, &mut io::stdout().lock())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
