//! End-to-end tests of the listing pipeline driver under paused time.

use std::borrow::Cow;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use constancias::listing::{
    ControlInput, Filterable, ListControls, ListingPipeline, ListingView, Paginated, SourceEvent,
    pipeline::run,
};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    name: String,
    tipo: String,
}

impl Row {
    fn new(name: &str, tipo: &str) -> Self {
        Self {
            name: name.to_string(),
            tipo: tipo.to_string(),
        }
    }
}

impl Filterable for Row {
    fn searchable_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str())]
    }

    fn category(&self, name: &str) -> Option<&str> {
        (name == "tipo").then_some(self.tipo.as_str())
    }
}

struct Harness {
    source: mpsc::Sender<SourceEvent<Row>>,
    inputs: mpsc::Sender<ControlInput>,
    views: watch::Receiver<ListingView<Row>>,
    task: tokio::task::JoinHandle<()>,
}

fn spawn_pipeline(controls: ListControls, page_size: usize) -> Harness {
    let (source, source_rx) = mpsc::channel(8);
    let (inputs, inputs_rx) = mpsc::channel(8);
    let (views_tx, views) = watch::channel(ListingView::Loading);

    let pipeline = ListingPipeline::new(controls, page_size);
    let task = tokio::spawn(run(pipeline, source_rx, inputs_rx, views_tx));

    Harness {
        source,
        inputs,
        views,
        task,
    }
}

fn ready(view: &ListingView<Row>) -> Paginated<Row> {
    match view {
        ListingView::Ready(paginated) => paginated.clone(),
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn snapshot_produces_view_without_input() {
    let mut h = spawn_pipeline(ListControls::new(&["tipo"]), 5);

    h.source
        .send(SourceEvent::Snapshot(vec![
            Row::new("a", "LABORAL"),
            Row::new("b", "ESTUDIOS"),
        ]))
        .await
        .unwrap();

    h.views.changed().await.unwrap();
    let page = ready(&h.views.borrow_and_update());
    assert_eq!(page.total_items, 2);
    assert_eq!(page.page, 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_search_emits_one_final_view() {
    let mut h = spawn_pipeline(ListControls::new(&[]), 5);

    h.source
        .send(SourceEvent::Snapshot(vec![
            Row::new("a", ""),
            Row::new("ab", ""),
            Row::new("abc", ""),
        ]))
        .await
        .unwrap();
    h.views.changed().await.unwrap();
    h.views.borrow_and_update();

    let start = Instant::now();
    h.inputs
        .send(ControlInput::Search("a".into()))
        .await
        .unwrap();
    h.inputs
        .send(ControlInput::Search("ab".into()))
        .await
        .unwrap();
    h.inputs
        .send(ControlInput::Search("abc".into()))
        .await
        .unwrap();

    // only the final committed search produces a view
    h.views.changed().await.unwrap();
    let page = ready(&h.views.borrow_and_update());
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "abc");

    // the debounce window elapsed before the emission
    assert!(Instant::now() - start >= Duration::from_millis(300));
    assert!(!h.views.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn categorical_selection_needs_no_debounce() {
    let mut h = spawn_pipeline(ListControls::new(&["tipo"]), 5);

    h.source
        .send(SourceEvent::Snapshot(vec![
            Row::new("a", "LABORAL"),
            Row::new("b", "ESTUDIOS"),
        ]))
        .await
        .unwrap();
    h.views.changed().await.unwrap();
    h.views.borrow_and_update();

    let start = Instant::now();
    h.inputs
        .send(ControlInput::Select {
            field: "tipo".into(),
            value: "ESTUDIOS".into(),
        })
        .await
        .unwrap();

    h.views.changed().await.unwrap();
    let page = ready(&h.views.borrow_and_update());
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "b");
    // no timer was involved
    assert_eq!(Instant::now(), start);
}

#[tokio::test(start_paused = true)]
async fn snapshot_during_pending_search_never_leaks_stale_text() {
    let mut h = spawn_pipeline(ListControls::new(&[]), 5);

    h.source
        .send(SourceEvent::Snapshot(vec![Row::new("old", "")]))
        .await
        .unwrap();
    h.views.changed().await.unwrap();
    h.views.borrow_and_update();

    h.inputs
        .send(ControlInput::Search("fresh".into()))
        .await
        .unwrap();
    h.source
        .send(SourceEvent::Snapshot(vec![
            Row::new("fresh one", ""),
            Row::new("other", ""),
        ]))
        .await
        .unwrap();

    // snapshot recompute during the debounce window sees the committed
    // (still empty) search text
    h.views.changed().await.unwrap();
    assert_eq!(ready(&h.views.borrow_and_update()).total_items, 2);

    // after the window the pending text commits against the new snapshot
    h.views.changed().await.unwrap();
    let page = ready(&h.views.borrow_and_update());
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "fresh one");
}

#[tokio::test(start_paused = true)]
async fn source_failure_is_published_and_recoverable() {
    let mut h = spawn_pipeline(ListControls::new(&[]), 5);

    h.source
        .send(SourceEvent::Failed("load failed".into()))
        .await
        .unwrap();
    h.views.changed().await.unwrap();
    assert_eq!(
        *h.views.borrow_and_update(),
        ListingView::Failed("load failed".to_string())
    );

    h.source
        .send(SourceEvent::Snapshot(vec![Row::new("a", "")]))
        .await
        .unwrap();
    h.views.changed().await.unwrap();
    assert_eq!(ready(&h.views.borrow_and_update()).total_items, 1);
}

#[tokio::test(start_paused = true)]
async fn closing_inputs_tears_the_pipeline_down() {
    let h = spawn_pipeline(ListControls::new(&[]), 5);

    drop(h.inputs);
    h.task.await.unwrap();
}
