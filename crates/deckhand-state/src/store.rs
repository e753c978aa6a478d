//! Optimistic instance/folder sync store
//!
//! The [`SyncStore`] keeps a local cache of the server's instances and
//! folders and applies user edits to it before the server confirms them.
//!
//! ## Operation Flow
//!
//! 1. **Optimistic step**: rewrite the local snapshot immediately
//! 2. **Remote step**: issue the API call (the only suspension point)
//! 3. **Reconcile**: toast the outcome, then [`load`](SyncStore::load) to
//!    replace the cache wholesale with server truth
//!
//! A failed call is rolled back by the same reload; there is no undo log.
//! Because nothing locks the cache across the remote step, a reload
//! triggered by one operation also discards the optimistic edits of any
//! other operation still in flight. Those edits reappear once their own
//! call succeeds and reloads.
//!
//! No operation returns an error: failures are logged, toasted, and
//! reported through [`Outcome`].

use std::future::Future;
use std::sync::Arc;

use deckhand_core::domain::{Folder, FolderId, Instance, InstanceId, InstanceUpdate};
use deckhand_core::ports::{ApiError, IConsoleApi, INotifier, ToastKind};
use tracing::{debug, error, info, warn};

use crate::observable::ObservableState;

// ============================================================================
// SyncState
// ============================================================================

/// Snapshot of the locally cached console state
///
/// Collections are shared: every change produces a new `Arc`, so holders of
/// an older snapshot are never mutated under them.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncState {
    pub instances: Arc<Vec<Instance>>,
    pub folders: Arc<Vec<Folder>>,
    /// A reload is in progress (true until the first load completes)
    pub loading: bool,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            instances: Arc::new(Vec::new()),
            folders: Arc::new(Vec::new()),
            loading: true,
        }
    }
}

impl SyncState {
    /// Looks up an instance by id
    pub fn instance(&self, id: &InstanceId) -> Option<&Instance> {
        self.instances.iter().find(|i| &i.id == id)
    }

    /// Looks up a folder by id
    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    /// Instances assigned to `folder_id`
    pub fn instances_in<'a>(&'a self, folder_id: &'a FolderId) -> impl Iterator<Item = &'a Instance> {
        self.instances.iter().filter(move |i| i.is_in_folder(folder_id))
    }

    /// Instances with no folder (empty or unreported folder id)
    pub fn uncategorized(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter().filter(|i| i.is_uncategorized())
    }

    fn with_loading(&self, loading: bool) -> Self {
        Self {
            loading,
            ..self.clone()
        }
    }

    fn with_instances(&self, instances: Vec<Instance>) -> Self {
        Self {
            instances: Arc::new(instances),
            ..self.clone()
        }
    }

    fn with_folders(&self, folders: Vec<Folder>) -> Self {
        Self {
            folders: Arc::new(folders),
            ..self.clone()
        }
    }

    fn map_instances(&self, f: impl Fn(&Instance) -> Instance) -> Self {
        self.with_instances(self.instances.iter().map(f).collect())
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// How a store operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the change and the cache was reloaded
    Confirmed,
    /// The server call failed and the cache was reloaded from server truth
    RolledBack,
    /// The server call failed and nothing local needed undoing
    Failed,
    /// Nothing to send (e.g. the instance is not in the cache)
    Skipped,
}

impl Outcome {
    /// Whether the server accepted the change
    pub fn is_confirmed(self) -> bool {
        self == Outcome::Confirmed
    }
}

/// Toast texts for one kind of optimistic operation
struct Feedback {
    operation: &'static str,
    success: &'static str,
    failure: &'static str,
}

const MOVE_INSTANCE: Feedback = Feedback {
    operation: "move_instance",
    success: "Instance moved",
    failure: "Failed to move instance",
};

const DELETE_FOLDER: Feedback = Feedback {
    operation: "delete_folder",
    success: "Folder deleted",
    failure: "Error deleting folder",
};

const RENAME_FOLDER: Feedback = Feedback {
    operation: "rename_folder",
    success: "Folder renamed",
    failure: "Failed to rename folder",
};

// ============================================================================
// SyncStore
// ============================================================================

/// Local cache of instances and folders with optimistic edits
///
/// Cloning shares the same cache, API and notifier, so clones can run
/// operations concurrently on spawned tasks.
#[derive(Clone)]
pub struct SyncStore {
    api: Arc<dyn IConsoleApi>,
    notifier: Arc<dyn INotifier>,
    state: ObservableState<SyncState>,
}

impl std::fmt::Debug for SyncStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SyncStore {
    /// Creates a store with an empty cache
    ///
    /// # Arguments
    ///
    /// * `api` - The console API (source of truth)
    /// * `notifier` - Where outcome toasts are sent
    pub fn new(api: Arc<dyn IConsoleApi>, notifier: Arc<dyn INotifier>) -> Self {
        Self {
            api,
            notifier,
            state: ObservableState::new(SyncState::default()),
        }
    }

    /// The observable cache
    pub fn state(&self) -> &ObservableState<SyncState> {
        &self.state
    }

    /// Snapshot of the cache
    pub fn snapshot(&self) -> SyncState {
        self.state.get()
    }

    /// Replaces the cache with a fresh fetch of both collections
    ///
    /// The two fetches run concurrently. Each successful fetch replaces its
    /// collection; a failed one leaves it as it was and raises a single
    /// error toast. `loading` is cleared whatever happens.
    pub async fn load(&self) -> Outcome {
        self.state.update(|s| s.with_loading(true));
        debug!("Reloading instances and folders");

        let (instances, folders) =
            tokio::join!(self.api.list_instances(), self.api.list_folders());

        let mut failed = false;
        match instances {
            Ok(instances) => {
                debug!(count = instances.len(), "Instances loaded");
                self.state.update(move |s| s.with_instances(instances));
            }
            Err(e) => {
                error!(error = %e, "Failed to load instances");
                failed = true;
            }
        }
        match folders {
            Ok(folders) => {
                debug!(count = folders.len(), "Folders loaded");
                self.state.update(move |s| s.with_folders(folders));
            }
            Err(e) => {
                error!(error = %e, "Failed to load folders");
                failed = true;
            }
        }

        if failed {
            self.notifier.notify("Failed to load data", ToastKind::Error);
        }
        self.state.update(|s| s.with_loading(false));

        if failed {
            Outcome::Failed
        } else {
            Outcome::Confirmed
        }
    }

    /// Moves an instance into `folder_id` (empty id: uncategorized)
    ///
    /// The local instance is updated before the request is sent. The PATCH
    /// carries the instance's other settings as currently cached, since the
    /// endpoint replaces all of them. If the instance is not cached, nothing
    /// is sent and no reload happens.
    pub async fn move_instance(&self, instance_id: &InstanceId, folder_id: &FolderId) -> Outcome {
        self.state.update(|s| {
            s.map_instances(|i| {
                if &i.id == instance_id {
                    i.clone().with_folder(folder_id.clone())
                } else {
                    i.clone()
                }
            })
        });

        let Some(instance) = self.state.with(|s| s.instance(instance_id).cloned()) else {
            debug!(instance_id = %instance_id, "Instance not cached; nothing to move");
            return Outcome::Skipped;
        };

        let update = InstanceUpdate::move_to(&instance, folder_id.clone());
        self.reconcile(&MOVE_INSTANCE, self.api.update_instance(instance_id, &update))
            .await
    }

    /// Creates a folder on the server
    ///
    /// Nothing is inserted locally: the folder appears with the reload that
    /// follows a successful call. A failed call is toasted and not reloaded.
    pub async fn create_folder(&self, name: &str) -> Outcome {
        match self.api.create_folder(name).await {
            Ok(()) => {
                info!(name, "Folder created");
                self.notifier.notify("Folder created", ToastKind::Success);
                self.load().await;
                Outcome::Confirmed
            }
            Err(e) => {
                warn!(name, error = %e, "Folder creation failed");
                let message = if e.is_transport() {
                    "Error creating folder"
                } else {
                    "Failed to create folder"
                };
                self.notifier.notify(message, ToastKind::Error);
                Outcome::Failed
            }
        }
    }

    /// Deletes a folder, moving its instances to uncategorized
    ///
    /// Both the folder removal and the instance reassignment are applied
    /// locally before the request is sent, and both are rolled back by the
    /// reload if it fails.
    pub async fn delete_folder(&self, folder_id: &FolderId) -> Outcome {
        self.state.update(|s| {
            let folders = s.folders.iter().filter(|f| &f.id != folder_id).cloned().collect();
            s.with_folders(folders).map_instances(|i| {
                if i.is_in_folder(folder_id) {
                    i.clone().with_folder(FolderId::uncategorized())
                } else {
                    i.clone()
                }
            })
        });

        self.reconcile(&DELETE_FOLDER, self.api.delete_folder(folder_id))
            .await
    }

    /// Renames a folder
    ///
    /// The local folder is renamed before the request is sent; an unknown
    /// id leaves the cache untouched but the request is still sent.
    pub async fn rename_folder(&self, folder_id: &FolderId, name: &str) -> Outcome {
        self.state.update(|s| {
            let folders = s
                .folders
                .iter()
                .map(|f| {
                    if &f.id == folder_id {
                        Folder {
                            name: name.to_string(),
                            ..f.clone()
                        }
                    } else {
                        f.clone()
                    }
                })
                .collect();
            s.with_folders(folders)
        });

        self.reconcile(&RENAME_FOLDER, self.api.rename_folder(folder_id, name))
            .await
    }

    /// Awaits the remote step of an optimistic operation, toasts the
    /// outcome, and reloads in either case
    async fn reconcile<F>(&self, feedback: &Feedback, remote: F) -> Outcome
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        let outcome = match remote.await {
            Ok(()) => {
                info!(operation = feedback.operation, "Change accepted by server");
                self.notifier.notify(feedback.success, ToastKind::Success);
                Outcome::Confirmed
            }
            Err(e) => {
                warn!(
                    operation = feedback.operation,
                    status = e.status(),
                    error = %e,
                    "Change rejected; rolling back by reload"
                );
                self.notifier.notify(feedback.failure, ToastKind::Error);
                Outcome::RolledBack
            }
        };
        self.load().await;
        outcome
    }
}
