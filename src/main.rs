use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use focusdeck::cli::args::{Cli, Commands};
use focusdeck::cli::commands::{self, Context};
use focusdeck::config::Paths;
use focusdeck::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::generate_completions(shell)?);
        return Ok(());
    }

    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let _guard = logging::init(&paths.logs).context("could not set up the log file")?;

    let ctx = Context::open(paths)?;
    ctx.config.general.color.apply();

    let format = cli.output.unwrap_or(ctx.config.general.default_output);

    let output = match cli.command {
        Commands::Pomodoro(args) => commands::pomodoro(&ctx, args.command, format)?,
        Commands::Settings(args) => commands::settings(&ctx, args.command, format)?,
        Commands::Task(args) => commands::task(&ctx, args.command, format)?,
        Commands::Goal(args) => commands::goal(&ctx, args.command, format)?,
        Commands::Note(args) => commands::note(&ctx, args.command, format)?,
        Commands::Stats(args) => commands::stats(&ctx, args.command, format)?,
        Commands::Countdown(args) => commands::countdown(&ctx, &args, format)?,
        Commands::Stopwatch(args) => commands::stopwatch(&args, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
