mod cli;
mod repl;
mod rlpl;
mod rppl;


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{print_finished, print_running};
use monkey_core::{run_file, utils::prelude::Error};

#[derive(Parser)]
#[command(version, about = "The Monkey programming language")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Runs Read Eval Print Loop [default]
    Repl,
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print ast of the parsed program before running it
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();

    let result = match Args::parse().command.unwrap_or(Command::Repl) {
        Command::Repl => {
            if let Err(err) = ctrlc::set_handler(|| std::process::exit(0)) {
                tracing::warn!(error = %err, "could not install Ctrl-C handler");
            }

            print!("{}", repl::greeting(&repl::current_user()));
            repl::start(std::io::stdin().lock(), std::io::stdout())
        },
        Command::Run { path, print_ast } => run(path, print_ast),
        Command::Rlpl => rlpl::start(std::io::stdin().lock(), std::io::stdout()),
        Command::Rppl => rppl::start(std::io::stdin().lock(), std::io::stdout()),
    };

    if let Err(err) = result {
        report(&Error::StdIo { err: err.kind() });
        std::process::exit(1);
    }
}

fn run(path: PathBuf, print_ast: bool) -> std::io::Result<()> {
    if print_ast {
        let src = std::fs::read_to_string(&path)?;
        println!("{:#?}", monkey_core::parse(&src).0);
    }

    print_running(&path.display().to_string());
    let start = std::time::Instant::now();

    match run_file(path) {
        Ok(object) => println!("{}", object),
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }

    print_finished(std::time::Instant::now() - start);

    Ok(())
}

fn report(err: &Error) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    let written = err.pretty(&mut buf)
        .and_then(|_| buf_writer.print(&buf));

    if written.is_err() {
        eprintln!("{err}");
    }
}
