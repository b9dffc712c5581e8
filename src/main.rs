use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use funcon::builder::read_term;
use funcon::catalog::Op;
use funcon::config::InterpreterConfig;
use funcon::interpreter::{Interpreter, Outcome};

#[derive(Parser, Debug)]
#[command(name = "funcon", about = "Run a funcon term to a value")]
struct Cli {
    /// File holding the initial term; standard input when omitted
    file: Option<PathBuf>,

    /// Initial term given inline instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// A term for `read` to consume, may be repeated
    #[arg(short, long = "input")]
    inputs: Vec<String>,

    /// Maximum number of micro-steps
    #[arg(long, default_value_t = InterpreterConfig::DEFAULT_STEP_LIMIT)]
    step_limit: u64,

    /// Run without a step limit
    #[arg(long, conflicts_with = "step_limit")]
    unbounded: bool,

    /// Seed for non-deterministic choices
    #[arg(long)]
    seed: Option<u64>,

    /// Keep stepping terms that make no progress
    #[arg(long)]
    no_stall_detection: bool,

    /// Print every operator with its parameter kinds and exit
    #[arg(long)]
    list_operators: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "funcon=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.list_operators {
        for op in Op::ALL {
            let params: Vec<String> = op.params().iter().map(|p| p.to_string()).collect();
            println!("{} {}", op.name(), params.join(" "));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let source = match (&cli.eval, &cli.file) {
        (Some(term), _) => term.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read standard input")?;
            buffer
        }
    };
    if source.trim().is_empty() {
        bail!("no term given");
    }

    let term = read_term(source.trim())?;
    let inputs = cli
        .inputs
        .iter()
        .map(|input| read_term(input))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(%term, inputs = inputs.len(), "initial term");

    let mut config = InterpreterConfig::default()
        .with_step_limit((!cli.unbounded).then_some(cli.step_limit))
        .with_stall_detection(!cli.no_stall_detection);
    if let Some(seed) = cli.seed {
        config = config.with_choice_seed(seed);
    }

    let mut interpreter = Interpreter::new(config)?;
    let execution = interpreter.execute(term, inputs)?;
    info!(steps = interpreter.steps(), "done");

    for printed in &execution.standard_out {
        println!("{printed}");
    }

    match execution.outcome {
        Outcome::Value(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Stuck { term, stuck } => {
            eprintln!("{stuck}");
            eprintln!("  in {term}");
            Ok(ExitCode::FAILURE)
        }
    }
}
