use clap::Parser;
use clib::cli::{run_repl, run_sort, ui, Cli, Commands, Session};
use clib::config::{Config, ENV_LOG};
use clib::db::Database;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut prompter = ui::stdin_prompter();

    match cli.command {
        Some(Commands::Sort(args)) => {
            let path = args.path.to_string_lossy().into_owned();
            let reply = run_sort(&[path], prompter.as_mut())?;
            println!("{}", reply);
        }
        None => {
            let config = Config::resolve(cli.data)?;
            let db = Database::open_at(&config.data_path)?;
            let mut session = Session::load(&db, config.page_size)?;
            run_repl(&mut session, &db, prompter.as_mut())?;
        }
    }

    Ok(())
}
