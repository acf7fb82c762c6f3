//! End-to-end tests: drag events through the controller, intents through the
//! reconciliation engine, projection through the view.

use backboard_core::{
    drag, project, reconcile, AccountId, Category, DragEvent, DragState, DropTarget,
    InsertPosition, Item, ItemId, OrderModel, ViewFilter,
};

fn account() -> AccountId {
    AccountId::from_string("acct")
}

fn seeded() -> OrderModel {
    let mut model = OrderModel::new();
    for (title, category) in [
        ("scope the feature", Category::Planned),
        ("build the feature", Category::Planned),
        ("review the fix", Category::InReview),
        ("ship v1", Category::Done),
    ] {
        reconcile::insert_with_position(
            &mut model,
            Item::new(account(), title),
            category,
            InsertPosition::Bottom,
        );
    }
    model
}

fn id_of(model: &OrderModel, title: &str) -> ItemId {
    model
        .sorted_view()
        .find(|i| i.title == title)
        .map(|i| i.id.clone())
        .unwrap()
}

fn drag_onto(model: &mut OrderModel, item: ItemId, target: DropTarget) -> bool {
    let state = drag::transition(DragState::Idle, DragEvent::Start { item }, model).0;
    let (_, intent) = drag::transition(state, DragEvent::End { target }, model);
    match intent {
        Some(intent) => reconcile::apply(model, &intent).unwrap().changed,
        None => false,
    }
}

#[test]
fn test_drag_reorder_updates_projection() {
    let mut model = seeded();
    let src = id_of(&model, "scope the feature");
    let dst = id_of(&model, "build the feature");

    assert!(drag_onto(&mut model, src, DropTarget::Item(dst)));

    let view = project(&model, &ViewFilter::new());
    let planned: Vec<&str> = view
        .bucket(Category::Planned)
        .unwrap()
        .items
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(planned, ["build the feature", "scope the feature"]);
}

#[test]
fn test_drag_last_item_out_empties_category() {
    let mut model = seeded();
    let review = id_of(&model, "review the fix");
    let planned = id_of(&model, "build the feature");

    assert!(drag_onto(&mut model, review, DropTarget::Item(planned)));

    let view = project(&model, &ViewFilter::new());
    // The emptied bucket still renders, as the drop zone.
    let bucket = view.bucket(Category::InReview).unwrap();
    assert!(bucket.is_empty());
    assert_eq!(view.bucket(Category::Planned).unwrap().items.len(), 3);
}

#[test]
fn test_drop_into_empty_category_zone() {
    let mut model = seeded();
    let item = id_of(&model, "review the fix");

    assert!(drag_onto(
        &mut model,
        item.clone(),
        DropTarget::EmptyCategory(Category::InProgress),
    ));

    assert_eq!(model.get(&item).unwrap().category, Category::InProgress);
    let view = project(&model, &ViewFilter::new());
    assert!(view.bucket(Category::InReview).unwrap().is_empty());
    assert_eq!(view.bucket(Category::InProgress).unwrap().items.len(), 1);
}

#[test]
fn test_priorities_stay_contiguous_over_arbitrary_drags() {
    let mut model = seeded();

    let drags = [
        ("scope the feature", "review the fix"),
        ("ship v1", "build the feature"),
        ("review the fix", "scope the feature"),
        ("build the feature", "ship v1"),
    ];
    for (src, dst) in drags {
        let src = id_of(&model, src);
        let dst = id_of(&model, dst);
        drag_onto(&mut model, src, DropTarget::Item(dst));
    }

    let priorities: Vec<f64> = model.sorted_view().map(|i| i.priority).collect();
    let expected: Vec<f64> = (0..model.len()).map(|i| i as f64).collect();
    assert_eq!(priorities, expected);
}

#[test]
fn test_cancelled_drag_changes_nothing() {
    let mut model = seeded();
    let before: Vec<ItemId> = model.sorted_view().map(|i| i.id.clone()).collect();

    let item = id_of(&model, "scope the feature");
    let state = drag::transition(DragState::Idle, DragEvent::Start { item }, &model).0;
    let (state, intent) = drag::transition(state, DragEvent::Cancel, &model);
    assert_eq!(state, DragState::Idle);
    assert!(intent.is_none());

    let after: Vec<ItemId> = model.sorted_view().map(|i| i.id.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_import_integrates_into_global_order() {
    let mut model = seeded();
    let summary = backboard_core::import_json(
        &mut model,
        &account(),
        r#"[{"title": "triage inbox", "category": "In Progress"}]"#,
    )
    .unwrap();

    assert_eq!(summary.created, 1);
    // Reindex ran: assignments cover every item and are contiguous.
    assert_eq!(summary.assignments.len(), model.len());
    let priorities: Vec<f64> = model.sorted_view().map(|i| i.priority).collect();
    let expected: Vec<f64> = (0..model.len()).map(|i| i as f64).collect();
    assert_eq!(priorities, expected);

    let view = project(&model, &ViewFilter::new());
    let in_progress = view.bucket(Category::InProgress).unwrap();
    assert_eq!(in_progress.items.len(), 1);
    assert_eq!(in_progress.items[0].title, "triage inbox");
}
