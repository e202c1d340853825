use anyhow::Result;
use clap::Parser;

use quartermaster_cli::cli::{Cli, Command};
use quartermaster_cli::commands;
use quartermaster_cli::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Logger::new(args.verbose);

    match args.command {
        Command::List(opts) => commands::list::run(&args.global, &opts, &log),
        Command::Install(opts) => commands::install::run(&args.global, &opts, &log),
        Command::Remove(opts) => commands::remove::run(&args.global, &opts, &log),
        Command::Set(opts) => commands::set::run(&args.global, &opts, &log),
        Command::Completions(opts) => commands::completions::run(&opts),
    }
}
