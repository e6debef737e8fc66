//! Typewrite CLI: the `typewrite` command.

mod cli;
mod commands;
mod logging;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    match cli.command {
        Commands::Init { path, force, json } => commands::init::run(path, force, json),

        Commands::Check { effect, json } => commands::check::run(effect, json),

        Commands::Trace {
            effect,
            cycles,
            frames,
            json,
        } => commands::trace::run(commands::trace::Args {
            effect,
            cycles,
            frames,
            json,
        }),

        Commands::Run {
            effect,
            for_ms,
            no_caret,
            json,
        } => commands::run::run(commands::run::Args {
            effect,
            for_ms,
            no_caret,
            json,
        }),
    }
}
