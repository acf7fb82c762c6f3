//! Integration tests: the optimistic update loop across the engine and the
//! store — mutate locally, write through the outbox, reload, compare.

use backboard_core::{
    drag, reconcile, AccountId, Category, DragEvent, DragState, DropTarget, Item, OrderModel,
};
use backboard_sync::{Divergence, InMemoryStore, ItemStore, PendingWrite, Session, Synchronizer};
use std::sync::Arc;

fn account() -> AccountId {
    AccountId::from_string("acct")
}

async fn seeded_sync() -> (Arc<Synchronizer<InMemoryStore>>, Session) {
    let store = Arc::new(InMemoryStore::new());
    store.add_account(account()).await;
    for (title, category, priority) in [
        ("draft roadmap", Category::Planned, 0.0),
        ("implement export", Category::InProgress, 1.0),
        ("review import", Category::InReview, 2.0),
    ] {
        let mut item = Item::new(account(), title).with_category(category);
        item.priority = priority;
        store.create_item(&item).await.unwrap();
    }
    (Arc::new(Synchronizer::new(store)), Session::new(account()))
}

fn titles(model: &OrderModel) -> Vec<String> {
    model.sorted_view().map(|i| i.title.clone()).collect()
}

#[tokio::test]
async fn test_move_survives_write_through_and_reload() {
    let (sync, session) = seeded_sync().await;
    let mut model = sync.load_account(&session).await.unwrap();
    assert_eq!(
        titles(&model),
        ["draft roadmap", "implement export", "review import"]
    );

    // Drag "draft roadmap" onto "review import": cross-category move.
    let src = model.sorted_view().next().unwrap().id.clone();
    let dst = model.sorted_view().last().unwrap().id.clone();
    let state = drag::transition(
        DragState::Idle,
        DragEvent::Start { item: src.clone() },
        &model,
    )
    .0;
    let (_, intent) = drag::transition(
        state,
        DragEvent::End {
            target: DropTarget::Item(dst),
        },
        &model,
    );
    let outcome = reconcile::apply(&mut model, &intent.unwrap()).unwrap();

    // Dragging downward lands the moved item after its target.
    assert_eq!(
        titles(&model),
        ["implement export", "review import", "draft roadmap"]
    );
    assert_eq!(model.get(&src).unwrap().category, Category::InReview);

    // Optimistic: local model is already final; the store learns later.
    sync.enqueue(PendingWrite::Priorities(outcome.assignments));
    sync.enqueue(PendingWrite::Update {
        id: src,
        patch: backboard_sync::ItemPatch::new().with_category(Category::InReview),
    });
    let report = sync.flush(&session).await;
    assert!(report.is_clean());

    let reloaded = sync.load_account(&session).await.unwrap();
    assert_eq!(
        titles(&reloaded),
        ["implement export", "review import", "draft roadmap"]
    );
    assert!(sync
        .check_consistency(&session, &model)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_partial_batch_failure_leaves_local_authoritative() {
    let (sync, session) = seeded_sync().await;
    let mut model = sync.load_account(&session).await.unwrap();

    let victim = model.sorted_view().next().unwrap().id.clone();
    sync.store().fail_priority_writes_for([victim.clone()]).await;

    // Empty-category drop at the engine level; order itself is unchanged.
    let outcome = reconcile::apply(
        &mut model,
        &backboard_core::MoveIntent::ToEmptyCategory {
            item: victim.clone(),
            category: Category::Done,
        },
    )
    .unwrap();
    let local_titles = titles(&model);

    sync.enqueue(PendingWrite::Priorities(outcome.assignments));
    let report = sync.flush(&session).await;
    assert_eq!(report.failed, 1);
    assert_eq!(report.unacknowledged, vec![victim.clone()]);

    // The failure did not touch the model, and the outbox holds no retry.
    assert_eq!(titles(&model), local_titles);
    assert_eq!(sync.pending(), 0);
}

#[tokio::test]
async fn test_divergence_surfaces_on_next_load_check() {
    let (sync, session) = seeded_sync().await;
    let mut model = sync.load_account(&session).await.unwrap();

    let victim = model.sorted_view().nth(1).unwrap().id.clone();
    sync.store().fail_priority_writes_for([victim.clone()]).await;

    // Stage a fractional priority locally so reindex actually reorders.
    if let Some(item) = model.get_mut(&victim) {
        item.priority = -0.5;
    }
    let assignments = reconcile::reindex(&mut model);
    sync.enqueue(PendingWrite::Priorities(assignments));
    let report = sync.flush(&session).await;
    assert!(!report.is_clean());

    let divergences = sync.check_consistency(&session, &model).await.unwrap();
    assert!(divergences
        .iter()
        .any(|d| matches!(d, Divergence::PriorityMismatch { id, .. } if *id == victim)));
}

#[tokio::test]
async fn test_created_items_get_sequence_labels_on_write_through() {
    let (sync, session) = seeded_sync().await;
    let mut model = sync.load_account(&session).await.unwrap();

    let outcome = reconcile::insert_with_position(
        &mut model,
        Item::new(account(), "quick add"),
        Category::Planned,
        reconcile::InsertPosition::Top,
    );
    let created = model.sorted_view().next().unwrap().clone();
    assert!(created.sequence.is_empty());

    sync.enqueue(PendingWrite::Create(created.clone()));
    sync.enqueue(PendingWrite::Priorities(outcome.assignments));
    let report = sync.flush(&session).await;
    assert!(report.is_clean());

    let reloaded = sync.load_account(&session).await.unwrap();
    let stored = reloaded.get(&created.id).unwrap();
    assert!(stored.sequence.starts_with("ISSUE-"));
    assert_eq!(titles(&reloaded), titles(&model));
}
