//! Interactive command loop.

use anyhow::Result;

use super::parse::parse_line;
use super::session::{render_error, Outcome, Session};
use super::ui::{self, Prompter};
use crate::db::Database;

pub const WELCOME: &str = "Welcome to CLIB, your contact and note book. Type 'help' to see the commands.";
pub const SAVE_FAILED: &str =
    "Your changes could not be saved. Fix the problem and exit again to retry.";
pub const UNKNOWN_COMMAND: &str =
    "Unknown command. Please type 'help' to get the full list of available commands.";

/// Run commands until an exit command or cancelled input.
///
/// Both books are saved only on an exit command.
pub fn run_repl(session: &mut Session, db: &Database, prompter: &mut dyn Prompter) -> Result<()> {
    prompter.show(WELCOME);

    loop {
        let Some(line) = prompter.ask("Enter command:")? else {
            ui::warning("Input closed. Changes from this session were not saved.");
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some((command, args)) = parse_line(&line) else {
            prompter.show(UNKNOWN_COMMAND);
            continue;
        };

        match session.execute(command, &args, prompter) {
            Ok(Outcome::Continue(reply)) => prompter.show(&reply),
            Ok(Outcome::Exit(reply)) => match session.save(db) {
                Ok(()) => {
                    prompter.show(&reply);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "save failed");
                    prompter.show(&render_error(&e));
                    prompter.show(SAVE_FAILED);
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "command failed");
                prompter.show(&render_error(&e));
            }
        }
    }
}
