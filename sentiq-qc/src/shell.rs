//! Interactive audit shell
//!
//! Line-oriented commands driving an [`AuditController`]. Each command is
//! one user action; errors are printed and the loop continues, no command
//! is retried automatically.

use sentiq_common::api::ItemId;
use sentiq_common::{Error, Result, Sentiment};
use std::str::FromStr;
use tracing::error;

use crate::audit::{AuditController, AuditOutcome};
use crate::view;

pub const HELP: &str = "\
Commands:
  list             show progress and all items
  open <ID>        open the audit panel for an item
  select <S>       choose positive | negative | neutral
  clear            clear the current choice
  submit           send the choice and reload
  cancel           close the audit panel
  reload           refetch the session
  help             show this text
  quit             exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Open(ItemId),
    Select(Sentiment),
    Clear,
    Submit,
    Cancel,
    Reload,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(Error::Validation("empty command".to_string()));
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(Error::Validation(format!("too many arguments for '{}'", verb)));
        }

        let command = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("list" | "ls", None) => ShellCommand::List,
            ("open" | "audit", Some(id)) => ShellCommand::Open(parse_item_id(id)?),
            ("select", Some(s)) => ShellCommand::Select(s.parse()?),
            ("clear", None) => ShellCommand::Clear,
            ("submit", None) => ShellCommand::Submit,
            ("cancel" | "close", None) => ShellCommand::Cancel,
            ("reload", None) => ShellCommand::Reload,
            ("help" | "?", None) => ShellCommand::Help,
            ("quit" | "exit" | "q", None) => ShellCommand::Quit,
            ("open" | "audit" | "select", None) => {
                return Err(Error::Validation(format!("'{}' needs an argument", verb)));
            }
            (
                "list" | "ls" | "clear" | "submit" | "cancel" | "close" | "reload" | "help" | "?"
                | "quit" | "exit" | "q",
                Some(_),
            ) => {
                return Err(Error::Validation(format!("'{}' takes no argument", verb)));
            }
            _ => return Err(Error::Validation(format!("unknown command '{}'", line.trim()))),
        };
        Ok(command)
    }
}

fn parse_item_id(raw: &str) -> Result<ItemId> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| Error::Validation(format!("'{}' is not a QC item id", raw)))
}

/// Whether the shell should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command and return the text to show the user
pub async fn execute(controller: &mut AuditController, command: ShellCommand) -> (Flow, String) {
    let result = match command {
        ShellCommand::Quit => return (Flow::Quit, String::new()),
        ShellCommand::Help => Ok(HELP.to_string()),
        ShellCommand::List => Ok(render_session(controller)),
        ShellCommand::Open(item_id) => {
            let opened = controller.open(item_id).map(|_| ());
            opened.map(|_| render_open_modal(controller))
        }
        ShellCommand::Select(sentiment) => controller
            .select(sentiment)
            .map(|_| render_open_modal(controller)),
        ShellCommand::Clear => controller
            .clear_selection()
            .map(|_| render_open_modal(controller)),
        ShellCommand::Cancel => {
            controller.cancel();
            Ok("Audit closed".to_string())
        }
        ShellCommand::Reload => controller
            .reload()
            .await
            .map(|progress| view::render_stats(&progress)),
        ShellCommand::Submit => controller.submit().await.map(|outcome| describe_outcome(&outcome)),
    };

    match result {
        Ok(text) => (Flow::Continue, text),
        Err(e) => {
            error!("{}", e);
            (Flow::Continue, format!("Error: {}", e))
        }
    }
}

/// Progress line plus item table for the loaded snapshot
pub fn render_session(controller: &AuditController) -> String {
    let store = controller.store();
    match store.progress() {
        Some(progress) => {
            let mut text = view::render_stats(&progress);
            if store.is_stale() {
                text.push_str(" (stale, run 'reload')");
            }
            text.push('\n');
            text.push_str(&view::render_table(store.items()));
            text
        }
        None => "No QC session loaded".to_string(),
    }
}

fn render_open_modal(controller: &AuditController) -> String {
    match controller.current_item() {
        Some(item) => view::render_modal(item, controller.state()),
        None => "Audit closed".to_string(),
    }
}

pub fn describe_outcome(outcome: &AuditOutcome) -> String {
    match outcome {
        AuditOutcome::Saved {
            item_id,
            sentiment,
            progress,
        } => format!(
            "Saved #{} as {}\n{}",
            item_id,
            sentiment.label(),
            view::render_stats(progress)
        ),
        AuditOutcome::SavedButStale {
            item_id,
            sentiment,
            reload_error,
        } => format!(
            "Saved #{} as {}, but reloading failed: {}\nShown data is stale, run 'reload'",
            item_id,
            sentiment.label(),
            reload_error
        ),
    }
}
