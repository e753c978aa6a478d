//! Sync store operations against the in-memory console server

use std::sync::{Arc, Mutex};

use deckhand_core::ports::ApiError;
use deckhand_state::Outcome;

use crate::common::*;

fn two_folders() -> Arc<FakeConsole> {
    FakeConsole::new(
        vec![instance("i1", "f1"), instance("i2", "f1"), instance("i3", "f2")],
        vec![folder("f1", "Lobby"), folder("f2", "Survival")],
    )
}

// ============================================================================
// load
// ============================================================================

#[tokio::test]
async fn test_load_replaces_cache_with_server_state() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    assert!(store.snapshot().loading);

    let outcome = store.load().await;

    assert_eq!(outcome, Outcome::Confirmed);
    let snap = store.snapshot();
    assert!(!snap.loading);
    assert_eq!(*snap.instances, fake.instances());
    assert_eq!(*snap.folders, fake.folders());
    assert!(toasts.toasts().is_empty());
}

#[tokio::test]
async fn test_load_sets_loading_while_in_flight() {
    let fake = two_folders();
    let (store, _toasts) = store_with(&fake);
    let gate = fake.gate(Op::ListFolders, "");

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });
    settle().await;
    assert!(store.snapshot().loading);

    gate.send(Ok(())).unwrap();
    assert_eq!(task.await.unwrap(), Outcome::Confirmed);
    assert!(!store.snapshot().loading);
}

#[tokio::test]
async fn test_load_notifies_loading_transitions() {
    let fake = two_folders();
    let (store, _toasts) = store_with(&fake);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = store
        .state()
        .subscribe(move |s| sink.lock().unwrap().push(s.loading));

    store.load().await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&false));
    assert!(seen[..seen.len() - 1].iter().all(|loading| *loading));
}

#[tokio::test]
async fn test_load_partial_failure_keeps_other_collection() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let cached_instances = store.snapshot().instances;

    fake.set_instances(vec![instance("i9", "")]);
    fake.set_folders(vec![folder("f9", "Creative")]);
    fake.fail(Op::ListInstances, server_error());

    let outcome = store.load().await;

    assert_eq!(outcome, Outcome::Failed);
    let snap = store.snapshot();
    assert_eq!(snap.instances, cached_instances);
    assert_eq!(*snap.folders, vec![folder("f9", "Creative")]);
    assert!(!snap.loading);
    assert_eq!(
        toast_log(&toasts),
        vec![("Failed to load data".to_string(), "error".to_string())]
    );
}

#[tokio::test]
async fn test_load_total_failure_toasts_once() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    fake.fail(Op::ListInstances, ApiError::Transport("connection refused".into()));
    fake.fail(Op::ListFolders, server_error());

    assert_eq!(store.load().await, Outcome::Failed);

    let snap = store.snapshot();
    assert!(snap.instances.is_empty() && snap.folders.is_empty());
    assert!(!snap.loading);
    assert_eq!(toasts.toasts().len(), 1);
}

// ============================================================================
// move_instance
// ============================================================================

#[tokio::test]
async fn test_move_is_visible_before_server_answers() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let gate = fake.gate(Op::UpdateInstance, "i1");

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.move_instance(&iid("i1"), &fid("f2")).await }
    });
    settle().await;

    assert_eq!(folder_of(&store.snapshot().instances, "i1").as_deref(), Some("f2"));
    assert_eq!(folder_of(&fake.instances(), "i1").as_deref(), Some("f1"));
    assert!(toasts.toasts().is_empty());

    gate.send(Ok(())).unwrap();
    assert_eq!(task.await.unwrap(), Outcome::Confirmed);

    assert_eq!(folder_of(&store.snapshot().instances, "i1").as_deref(), Some("f2"));
    assert_eq!(
        toast_log(&toasts),
        vec![("Instance moved".to_string(), "success".to_string())]
    );
    assert_eq!(fake.loads(), 2);
}

#[tokio::test]
async fn test_failed_move_rolls_back_to_server_value() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let gate = fake.gate(Op::UpdateInstance, "i1");

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.move_instance(&iid("i1"), &fid("f2")).await }
    });
    settle().await;
    assert_eq!(folder_of(&store.snapshot().instances, "i1").as_deref(), Some("f2"));

    gate.send(Err(server_error())).unwrap();
    assert_eq!(task.await.unwrap(), Outcome::RolledBack);

    assert_eq!(folder_of(&store.snapshot().instances, "i1").as_deref(), Some("f1"));
    assert_eq!(
        toast_log(&toasts),
        vec![("Failed to move instance".to_string(), "error".to_string())]
    );
    assert_eq!(fake.loads(), 2);
}

#[tokio::test]
async fn test_move_to_uncategorized() {
    let fake = two_folders();
    let (store, _toasts) = store_with(&fake);
    store.load().await;

    let outcome = store.move_instance(&iid("i3"), &fid("")).await;

    assert!(outcome.is_confirmed());
    let snap = store.snapshot();
    let loose: Vec<&str> = snap.uncategorized().map(|i| i.id.as_str()).collect();
    assert_eq!(loose, vec!["i3"]);
}

#[tokio::test]
async fn test_move_sends_cached_settings() {
    let mut tuned = instance("i1", "f1");
    tuned.max_memory = Some(4096);
    tuned.java_args = Some("-XX:+UseG1GC".to_string());
    let fake = FakeConsole::new(vec![tuned], vec![folder("f1", "Lobby")]);
    let (store, _toasts) = store_with(&fake);
    store.load().await;

    store.move_instance(&iid("i1"), &fid("")).await;

    let updates = fake.updates();
    assert_eq!(updates.len(), 1);
    let (id, update) = &updates[0];
    assert_eq!(id.as_str(), "i1");
    assert_eq!(update.folder_id.as_str(), "");
    assert_eq!(update.max_memory, Some(4096));
    assert_eq!(update.java_args.as_deref(), Some("-XX:+UseG1GC"));
}

#[tokio::test]
async fn test_move_of_uncached_instance_is_skipped() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let before = store.snapshot();

    let outcome = store.move_instance(&iid("ghost"), &fid("f2")).await;

    assert_eq!(outcome, Outcome::Skipped);
    assert_eq!(fake.calls(Op::UpdateInstance), 0);
    assert_eq!(fake.loads(), 1);
    assert!(toasts.toasts().is_empty());
    assert_eq!(*store.snapshot().instances, *before.instances);
}

#[tokio::test]
async fn test_mutation_publishes_fresh_collections() {
    let fake = two_folders();
    let (store, _toasts) = store_with(&fake);
    store.load().await;
    let before = store.snapshot();

    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);
    let _sub = store
        .state()
        .subscribe(move |s| sink.lock().unwrap().push(s.clone()));

    store.move_instance(&iid("i1"), &fid("f2")).await;

    let snapshots = snapshots.lock().unwrap();
    // The optimistic snapshot directly follows the replayed one
    let optimistic = &snapshots[1];
    assert!(!Arc::ptr_eq(&optimistic.instances, &before.instances));
    assert_eq!(folder_of(&before.instances, "i1").as_deref(), Some("f1"));

    let last = snapshots.last().unwrap();
    assert!(!Arc::ptr_eq(&last.instances, &optimistic.instances));
    assert!(!Arc::ptr_eq(&last.folders, &before.folders));
}

// ============================================================================
// create_folder
// ============================================================================

#[tokio::test]
async fn test_create_folder_reloads_once_on_success() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);

    let outcome = store.create_folder("Creative").await;

    assert_eq!(outcome, Outcome::Confirmed);
    assert_eq!(fake.loads(), 1);
    let names: Vec<String> = store.snapshot().folders.iter().map(|f| f.name.clone()).collect();
    assert_eq!(names, vec!["Lobby", "Survival", "Creative"]);
    assert_eq!(
        toast_log(&toasts),
        vec![("Folder created".to_string(), "success".to_string())]
    );
}

#[tokio::test]
async fn test_create_folder_is_not_optimistic() {
    let fake = two_folders();
    let (store, _toasts) = store_with(&fake);
    store.load().await;
    let gate = fake.gate(Op::CreateFolder, "Creative");

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.create_folder("Creative").await }
    });
    settle().await;
    assert_eq!(store.snapshot().folders.len(), 2);

    gate.send(Ok(())).unwrap();
    task.await.unwrap();
    assert_eq!(store.snapshot().folders.len(), 3);
}

#[tokio::test]
async fn test_create_folder_rejected_does_not_reload() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    fake.fail(
        Op::CreateFolder,
        ApiError::Status {
            status: 400,
            body: "name required".into(),
        },
    );

    let outcome = store.create_folder("").await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(fake.loads(), 0);
    assert_eq!(
        toast_log(&toasts),
        vec![("Failed to create folder".to_string(), "error".to_string())]
    );
}

#[tokio::test]
async fn test_create_folder_transport_error_message() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    fake.fail(Op::CreateFolder, ApiError::Transport("connection refused".into()));

    assert_eq!(store.create_folder("Creative").await, Outcome::Failed);

    assert_eq!(fake.loads(), 0);
    assert_eq!(
        toast_log(&toasts),
        vec![("Error creating folder".to_string(), "error".to_string())]
    );
}

// ============================================================================
// delete_folder
// ============================================================================

#[tokio::test]
async fn test_delete_folder_is_optimistic() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let gate = fake.gate(Op::DeleteFolder, "f1");

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.delete_folder(&fid("f1")).await }
    });
    settle().await;

    let snap = store.snapshot();
    assert!(snap.folder(&fid("f1")).is_none());
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some(""));
    assert_eq!(folder_of(&snap.instances, "i2").as_deref(), Some(""));
    assert_eq!(folder_of(&snap.instances, "i3").as_deref(), Some("f2"));

    gate.send(Ok(())).unwrap();
    assert_eq!(task.await.unwrap(), Outcome::Confirmed);

    let snap = store.snapshot();
    assert_eq!(*snap.folders, vec![folder("f2", "Survival")]);
    assert_eq!(snap.uncategorized().count(), 2);
    assert_eq!(
        toast_log(&toasts),
        vec![("Folder deleted".to_string(), "success".to_string())]
    );
}

#[tokio::test]
async fn test_failed_delete_restores_folder_and_members() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let before = store.snapshot();
    fake.fail(
        Op::DeleteFolder,
        ApiError::Status {
            status: 404,
            body: "folder not found".into(),
        },
    );

    let outcome = store.delete_folder(&fid("f1")).await;

    assert_eq!(outcome, Outcome::RolledBack);
    let snap = store.snapshot();
    assert_eq!(*snap.folders, *before.folders);
    assert_eq!(*snap.instances, *before.instances);
    assert_eq!(
        toast_log(&toasts),
        vec![("Error deleting folder".to_string(), "error".to_string())]
    );
}

// ============================================================================
// rename_folder
// ============================================================================

#[tokio::test]
async fn test_rename_folder_is_optimistic() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let gate = fake.gate(Op::RenameFolder, "f1");

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.rename_folder(&fid("f1"), "Hub").await }
    });
    settle().await;
    assert_eq!(
        store.snapshot().folder(&fid("f1")).map(|f| f.name.clone()),
        Some("Hub".to_string())
    );

    gate.send(Ok(())).unwrap();
    assert_eq!(task.await.unwrap(), Outcome::Confirmed);
    assert_eq!(fake.folders()[0].name, "Hub");
    assert_eq!(
        toast_log(&toasts),
        vec![("Folder renamed".to_string(), "success".to_string())]
    );
}

#[tokio::test]
async fn test_failed_rename_restores_name() {
    let fake = two_folders();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    fake.fail(Op::RenameFolder, server_error());

    assert_eq!(
        store.rename_folder(&fid("f1"), "Hub").await,
        Outcome::RolledBack
    );

    assert_eq!(
        store.snapshot().folder(&fid("f1")).map(|f| f.name.clone()),
        Some("Lobby".to_string())
    );
    assert_eq!(
        toast_log(&toasts),
        vec![("Failed to rename folder".to_string(), "error".to_string())]
    );
}
