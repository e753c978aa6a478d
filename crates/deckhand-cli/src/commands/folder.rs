//! Folder commands - Create, delete and rename folders
//!
//! Provides the `deckhand folder` CLI subcommands:
//! - `create [NAME]`: asks for the name when it is not given
//! - `delete <ID>`: asks for confirmation unless `--yes` is passed
//! - `rename <ID> <NAME>`

use anyhow::{bail, Result};
use clap::Subcommand;
use deckhand_core::domain::FolderId;
use deckhand_state::{ConfirmRequest, InputRequest};
use tracing::info;

use super::finish;
use crate::session::Session;

#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a folder
    Create {
        /// Folder name (prompted for when omitted)
        name: Option<String>,
    },
    /// Delete a folder; its instances become uncategorized
    Delete {
        /// Folder id
        id: FolderId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Rename a folder
    Rename {
        /// Folder id
        id: FolderId,
        /// New name
        name: String,
    },
}

impl FolderCommand {
    pub async fn execute(&self, session: &Session) -> Result<()> {
        match self {
            FolderCommand::Create { name } => execute_create(session, name.as_deref()).await,
            FolderCommand::Delete { id, yes } => execute_delete(session, id, *yes).await,
            FolderCommand::Rename { id, name } => execute_rename(session, id, name).await,
        }
    }
}

async fn execute_create(session: &Session, name: Option<&str>) -> Result<()> {
    let name = match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        Some(_) => bail!("Folder name must not be empty"),
        None => {
            let request = InputRequest::new("New folder")
                .message("Folder name")
                .placeholder("Survival")
                .confirm_text("Create");
            match session.input(request).await? {
                Some(name) => name,
                None => {
                    session.formatter().info("Cancelled");
                    return Ok(());
                }
            }
        }
    };

    info!(name = %name, "Creating folder");
    let outcome = session.console().store().create_folder(&name).await;

    let created = session
        .console()
        .store()
        .snapshot()
        .folders
        .iter()
        .rev()
        .find(|f| f.name == name)
        .map(|f| f.id.clone());
    finish(
        session,
        outcome,
        serde_json::json!({ "name": name, "id": created }),
    )
}

async fn execute_delete(session: &Session, id: &FolderId, yes: bool) -> Result<()> {
    let state = session.load().await?;
    let Some(folder) = state.folder(id) else {
        bail!("Unknown folder '{}'", id);
    };

    if !yes {
        let members = state.instances_in(id).count();
        let request = ConfirmRequest::new(
            "Delete folder",
            format!(
                "Delete \"{}\"? {} instance(s) will become uncategorized.",
                folder.name, members
            ),
        )
        .confirm_text("Delete")
        .dangerous(true);
        if !session.confirm(request).await? {
            session.formatter().info("Cancelled");
            return Ok(());
        }
    }

    info!(folder_id = %id, "Deleting folder");
    let outcome = session.console().store().delete_folder(id).await;
    finish(session, outcome, serde_json::json!({ "id": id }))
}

async fn execute_rename(session: &Session, id: &FolderId, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Folder name must not be empty");
    }

    let state = session.load().await?;
    if state.folder(id).is_none() {
        bail!("Unknown folder '{}'", id);
    }

    info!(folder_id = %id, name, "Renaming folder");
    let outcome = session.console().store().rename_folder(id, name).await;
    finish(session, outcome, serde_json::json!({ "id": id, "name": name }))
}
