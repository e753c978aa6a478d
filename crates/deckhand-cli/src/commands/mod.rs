//! CLI command implementations

pub mod folder;
pub mod list;
pub mod move_instance;

use anyhow::{bail, Result};
use deckhand_state::Outcome;

use crate::session::Session;

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Confirmed => "confirmed",
        Outcome::RolledBack => "rolled_back",
        Outcome::Failed => "failed",
        Outcome::Skipped => "skipped",
    }
}

/// Prints the JSON result of a store operation and turns failure into an
/// error
///
/// The toast already told the user what happened, so the error only sets
/// the exit status.
fn finish(session: &Session, outcome: Outcome, mut details: serde_json::Value) -> Result<()> {
    if session.format().is_json() {
        if let Some(map) = details.as_object_mut() {
            map.insert("success".into(), outcome.is_confirmed().into());
            map.insert("outcome".into(), outcome_label(outcome).into());
        }
        session.formatter().print_json(&details);
    }
    if !outcome.is_confirmed() {
        bail!("Operation {}", outcome_label(outcome).replace('_', " "));
    }
    Ok(())
}
