use std::fs;

use pretty_assertions::assert_eq;
use slate::{FilterMode, SortMode, TaskApp};
use tempfile::TempDir;

fn titles(app: &TaskApp) -> Vec<String> {
    app.current_projection()
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

#[test]
fn add_complete_filter_reorder_delete_flow() {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join("tasks.json");
    let mut app = TaskApp::open(&store_path);

    // Two tasks: one dateless, one dated
    let milk = app.add_task("Buy milk", "").unwrap();
    assert!(!milk.done);
    assert_eq!(milk.order, 0);

    let dentist = app.add_task("Call dentist", "2024-05-01").unwrap();
    assert_eq!(dentist.order, 1);
    assert_eq!(app.tasks().len(), 2);

    // Oldest first
    assert_eq!(titles(&app), vec!["Buy milk", "Call dentist"]);

    // Completing the first hides it from the open filter
    app.toggle_done(&milk.id, true).unwrap();
    app.set_filter(FilterMode::Open);
    app.set_sort(SortMode::Manual);
    assert_eq!(titles(&app), vec!["Call dentist"]);

    // Reordering the single visible task changes nothing
    app.commit_reorder(&[dentist.id.clone()]).unwrap();
    assert_eq!(app.sort(), SortMode::Manual);
    assert_eq!(titles(&app), vec!["Call dentist"]);

    // Deleting the remaining open task leaves only the completed one
    assert!(app.delete_task(&dentist.id));
    app.set_filter(FilterMode::All);
    assert_eq!(titles(&app), vec!["Buy milk"]);
    assert_eq!(app.tasks().len(), 1);
}

#[test]
fn state_survives_a_restart() {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join("tasks.json");

    let expected = {
        let mut app = TaskApp::open(&store_path);
        app.add_task("write report", "2024-07-01").unwrap();
        app.add_task("file taxes", "").unwrap();
        app.tasks().to_vec()
    };

    let app = TaskApp::open(&store_path);
    assert_eq!(app.tasks(), expected.as_slice());
}

#[test]
fn reorder_under_a_filter_keeps_hidden_tasks_in_place() {
    let tmp = TempDir::new().unwrap();
    let mut app = TaskApp::open(tmp.path().join("tasks.json"));

    let a = app.add_task("alpha", "").unwrap();
    let b = app.add_task("beta", "").unwrap();
    let c = app.add_task("gamma", "").unwrap();
    let d = app.add_task("delta", "").unwrap();

    // Hide beta and delta, then drag gamma above alpha
    app.toggle_done(&b.id, true).unwrap();
    app.toggle_done(&d.id, true).unwrap();
    app.set_filter(FilterMode::Open);
    app.commit_reorder(&[c.id.clone(), a.id.clone()]).unwrap();

    // Full manual order: visible slots swapped, hidden slots untouched
    app.set_filter(FilterMode::All);
    assert_eq!(titles(&app), vec!["gamma", "beta", "alpha", "delta"]);

    // Ranks are dense after the commit
    let mut orders: Vec<i64> = app.tasks().iter().map(|t| t.order).collect();
    orders.sort();
    assert_eq!(orders, vec![0, 1, 2, 3]);
}

#[test]
fn corrupted_blob_starts_an_empty_session() {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join("tasks.json");
    fs::write(&store_path, "not json").unwrap();

    let mut app = TaskApp::open(&store_path);
    assert!(app.tasks().is_empty());

    // The session is fully usable and the next save repairs the slot
    app.add_task("fresh start", "").unwrap();
    let reopened = TaskApp::open(&store_path);
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks()[0].title, "fresh start");
}

#[test]
fn date_sort_groups_dateless_tasks_first() {
    let tmp = TempDir::new().unwrap();
    let mut app = TaskApp::open(tmp.path().join("tasks.json"));

    app.add_task("no date", "").unwrap();
    app.add_task("late", "2024-09-01").unwrap();
    app.add_task("early", "2024-02-01").unwrap();

    app.set_sort(SortMode::DateAsc);
    assert_eq!(titles(&app), vec!["no date", "early", "late"]);

    app.set_sort(SortMode::DateDesc);
    assert_eq!(titles(&app), vec!["late", "early", "no date"]);
}
