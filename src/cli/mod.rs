use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod contact;
pub mod display;
pub mod help;
pub mod note;
pub mod parse;
pub mod repl;
pub mod session;
pub mod show;
pub mod sort;
pub mod ui;

pub use repl::run_repl;
pub use session::{Outcome, Session};
pub use sort::run_sort;

#[derive(Parser)]
#[command(name = "clib")]
#[command(about = "Contacts and notes in the command line")]
#[command(version)]
pub struct Cli {
    /// SQLite data file (overrides CLIB_DATA)
    #[arg(long, value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort a folder's files into category folders
    Sort(SortArgs),
}

#[derive(Args)]
pub struct SortArgs {
    /// Folder to sort
    pub path: PathBuf,
}
