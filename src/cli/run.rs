use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, detect::detect, init::init, translate::translate},
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(CommandResult)` with the summary to print and the failure count
/// - `Err` if the command cannot run (bad config, unreadable source, etc.)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Detect(cmd)) => detect(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
