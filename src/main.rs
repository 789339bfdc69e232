use std::{fs, io, path::PathBuf, process::ExitCode};

use clap::Parser;
use relief::{
    Outcome,
    config::{BlockMatching, Config},
    interpreter::evaluator::core::Interpreter,
    run_program,
};

/// relief runs programs written in the relief scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program to run.
    path: PathBuf,

    /// Count braces so nested blocks close at their own brace, instead of at
    /// the first line containing `}`.
    #[arg(long)]
    nested_blocks: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let source = match fs::read_to_string(&args.path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read the program '{}': {error}", args.path.display());
            return ExitCode::FAILURE;
        },
    };

    let block_matching = if args.nested_blocks { BlockMatching::Nested } else { BlockMatching::Shallow };
    let config = Config::default().with_block_matching(block_matching);

    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();
    let mut stderr = io::stderr().lock();
    let mut interpreter = Interpreter::new(config, &mut stdout, &mut stdin, &mut stderr);

    match run_program(&source, &mut interpreter) {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Stopped { .. }) => {
            println!("STOPPED: execution stopped by stop()");
            ExitCode::SUCCESS
        },
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}

/// Installs a stderr log subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}
