//! Overlapping optimistic operations
//!
//! Every reload replaces the whole cache, so the reload that ends one
//! operation discards the optimistic edits of any other operation still
//! waiting on the server. These tests pin that behavior down.

use deckhand_state::Outcome;

use crate::common::*;

fn lobby() -> std::sync::Arc<FakeConsole> {
    FakeConsole::new(
        vec![instance("i1", "f1"), instance("i2", "f1")],
        vec![folder("f1", "Lobby"), folder("f2", "Survival")],
    )
}

#[tokio::test]
async fn test_rollback_discards_other_pending_edit() {
    let fake = lobby();
    let (store, toasts) = store_with(&fake);
    store.load().await;
    let gate_a = fake.gate(Op::UpdateInstance, "i1");
    let gate_b = fake.gate(Op::UpdateInstance, "i2");

    let a = tokio::spawn({
        let store = store.clone();
        async move { store.move_instance(&iid("i1"), &fid("f2")).await }
    });
    let b = tokio::spawn({
        let store = store.clone();
        async move { store.move_instance(&iid("i2"), &fid("f2")).await }
    });
    settle().await;

    let snap = store.snapshot();
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some("f2"));
    assert_eq!(folder_of(&snap.instances, "i2").as_deref(), Some("f2"));

    gate_a.send(Err(server_error())).unwrap();
    assert_eq!(a.await.unwrap(), Outcome::RolledBack);

    // B is still in flight, yet its edit is gone
    let snap = store.snapshot();
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some("f1"));
    assert_eq!(folder_of(&snap.instances, "i2").as_deref(), Some("f1"));
    assert!(!b.is_finished());

    gate_b.send(Ok(())).unwrap();
    assert_eq!(b.await.unwrap(), Outcome::Confirmed);

    let snap = store.snapshot();
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some("f1"));
    assert_eq!(folder_of(&snap.instances, "i2").as_deref(), Some("f2"));

    let messages: Vec<String> = toast_log(&toasts).into_iter().map(|(m, _)| m).collect();
    assert_eq!(messages, vec!["Failed to move instance", "Instance moved"]);
}

#[tokio::test]
async fn test_success_reload_also_discards_pending_edit() {
    let fake = lobby();
    let (store, _toasts) = store_with(&fake);
    store.load().await;
    let gate_a = fake.gate(Op::UpdateInstance, "i1");
    let gate_b = fake.gate(Op::UpdateInstance, "i2");

    let a = tokio::spawn({
        let store = store.clone();
        async move { store.move_instance(&iid("i1"), &fid("f2")).await }
    });
    let b = tokio::spawn({
        let store = store.clone();
        async move { store.move_instance(&iid("i2"), &fid("")).await }
    });
    settle().await;

    gate_b.send(Ok(())).unwrap();
    assert_eq!(b.await.unwrap(), Outcome::Confirmed);

    // A's optimistic move was overwritten by B's reload
    let snap = store.snapshot();
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some("f1"));
    assert_eq!(folder_of(&snap.instances, "i2").as_deref(), Some(""));

    gate_a.send(Ok(())).unwrap();
    assert_eq!(a.await.unwrap(), Outcome::Confirmed);

    let snap = store.snapshot();
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some("f2"));
    assert_eq!(folder_of(&snap.instances, "i2").as_deref(), Some(""));
    assert_eq!(fake.loads(), 3);
}

#[tokio::test]
async fn test_delete_then_failed_move_into_deleted_folder() {
    let fake = lobby();
    let (store, _toasts) = store_with(&fake);
    store.load().await;
    fake.fail(Op::UpdateInstance, server_error());

    assert_eq!(store.delete_folder(&fid("f2")).await, Outcome::Confirmed);
    assert_eq!(
        store.move_instance(&iid("i1"), &fid("f2")).await,
        Outcome::RolledBack
    );

    let snap = store.snapshot();
    assert_eq!(*snap.folders, vec![folder("f1", "Lobby")]);
    assert_eq!(folder_of(&snap.instances, "i1").as_deref(), Some("f1"));
}
