//! Move command - Assign an instance to a folder

use anyhow::{bail, Result};
use clap::Args;
use deckhand_core::domain::{FolderId, InstanceId};
use deckhand_state::Outcome;
use tracing::info;

use super::finish;
use crate::session::Session;

/// Move an instance into a folder
#[derive(Debug, Args)]
pub struct MoveCommand {
    /// Instance to move
    #[arg(value_name = "INSTANCE")]
    pub instance: InstanceId,

    /// Target folder id; pass "" to make the instance uncategorized
    #[arg(value_name = "FOLDER")]
    pub folder: FolderId,
}

impl MoveCommand {
    pub async fn execute(&self, session: &Session) -> Result<()> {
        let state = session.load().await?;

        if state.instance(&self.instance).is_none() {
            bail!("Unknown instance '{}'", self.instance);
        }
        if !self.folder.is_uncategorized() && state.folder(&self.folder).is_none() {
            session
                .formatter()
                .warn(&format!("Folder '{}' is not known; moving anyway", self.folder));
        }

        info!(instance_id = %self.instance, folder_id = %self.folder, "Moving instance");
        let outcome = session
            .console()
            .store()
            .move_instance(&self.instance, &self.folder)
            .await;
        if outcome == Outcome::Skipped {
            bail!("Instance '{}' disappeared before it could be moved", self.instance);
        }

        finish(
            session,
            outcome,
            serde_json::json!({
                "instance": self.instance,
                "folder": self.folder,
            }),
        )
    }
}
