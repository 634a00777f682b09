//! Combiner/debouncer: merges the live collection stream with the control
//! state into a single derived listing view.
//!
//! The pipeline core is a synchronous state machine driven by explicit
//! timestamps, so debounce behavior is fully deterministic under test. The
//! [`run`] driver wraps it in a `tokio::select!` loop for long-lived
//! subscriptions; dropping either input channel tears the subscription down.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::listing::controls::ListControls;
use crate::listing::filter::{Filterable, matches};
use crate::listing::pagination::{PageState, Paginated, slice, total_pages};

/// Quiet period applied to free-text search input. Categorical selections
/// are never debounced.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Emission from the live collection source: a full snapshot of the
/// collection, or a load failure.
#[derive(Debug, Clone)]
pub enum SourceEvent<T> {
    Snapshot(Vec<T>),
    Failed(String),
}

/// User-driven input into the pipeline.
#[derive(Debug, Clone)]
pub enum ControlInput {
    Search(String),
    Select { field: String, value: String },
    GotoPage(usize),
    NextPage,
    PrevPage,
}

/// Derived listing state handed to the rendering layer. Upstream failures
/// are carried as data so nothing ever throws across the subscription
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView<T> {
    /// No snapshot received yet.
    Loading,
    Ready(Paginated<T>),
    Failed(String),
}

/// The combine-latest state machine.
///
/// Control fields use start-with semantics: the constructor takes their
/// initial values, so the first snapshot produces a view without waiting
/// for user input. All inputs are processed in call order; a pending
/// debounce never lets a recompute observe stale control values, because
/// the commit happens in [`ListingPipeline::poll`] against the latest
/// snapshot.
#[derive(Debug)]
pub struct ListingPipeline<T> {
    controls: ListControls,
    page_size: usize,
    debounce: Duration,
    snapshot: Option<Vec<T>>,
    error: Option<String>,
    pending_search: Option<String>,
    deadline: Option<Instant>,
    page: PageState,
    view: ListingView<T>,
}

impl<T: Filterable + Clone> ListingPipeline<T> {
    pub fn new(controls: ListControls, page_size: usize) -> Self {
        Self {
            controls,
            page_size: page_size.max(1),
            debounce: SEARCH_DEBOUNCE,
            snapshot: None,
            error: None,
            pending_search: None,
            deadline: None,
            page: PageState::new(1),
            view: ListingView::Loading,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn view(&self) -> &ListingView<T> {
        &self.view
    }

    pub fn controls(&self) -> &ListControls {
        &self.controls
    }

    /// When the pending debounce window elapses, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Feeds a collection emission. Snapshots supersede a previous failure;
    /// failures replace the view but keep the last snapshot for when the
    /// source recovers. Returns true when the view changed.
    pub fn on_source(&mut self, event: SourceEvent<T>) -> bool {
        match event {
            SourceEvent::Snapshot(items) => {
                self.snapshot = Some(items);
                self.error = None;
            }
            SourceEvent::Failed(message) => {
                self.error = Some(message);
            }
        }
        self.recompute();
        true
    }

    /// Feeds a user input at time `now`. Search input only arms (or re-arms)
    /// the debounce timer; every other input takes effect immediately.
    /// Returns true when the view changed.
    pub fn on_input(&mut self, input: ControlInput, now: Instant) -> bool {
        match input {
            ControlInput::Search(text) => {
                // each emission cancels the pending timer and starts a new one
                self.pending_search = Some(text);
                self.deadline = Some(now + self.debounce);
                false
            }
            ControlInput::Select { field, value } => {
                if self.controls.selected(&field) == value {
                    return false;
                }
                self.controls.select(field, value);
                self.recompute();
                true
            }
            ControlInput::GotoPage(n) => self.navigate(|page| page.goto(n)),
            ControlInput::NextPage => self.navigate(PageState::next),
            ControlInput::PrevPage => self.navigate(PageState::prev),
        }
    }

    /// Fires the debounce if its window has elapsed. Returns true when a
    /// recompute happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                let pending = self.pending_search.take().unwrap_or_default();
                if pending == self.controls.search {
                    return false;
                }
                self.controls.search = pending;
                self.recompute();
                true
            }
            _ => false,
        }
    }

    fn navigate(&mut self, op: impl FnOnce(&mut PageState)) -> bool {
        let before = self.page;
        op(&mut self.page);
        if self.page == before {
            return false;
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        if let Some(message) = &self.error {
            self.view = ListingView::Failed(message.clone());
            return;
        }
        let Some(items) = &self.snapshot else {
            self.view = ListingView::Loading;
            return;
        };

        let filtered: Vec<T> = items
            .iter()
            .filter(|record| matches(*record, &self.controls))
            .cloned()
            .collect();
        let total = total_pages(filtered.len(), self.page_size);
        self.page.on_filter_changed(total);
        let visible = slice(&filtered, self.page_size, self.page.current()).to_vec();
        self.view = ListingView::Ready(Paginated::new(
            visible,
            self.page.current(),
            total,
            filtered.len(),
        ));
    }
}

/// Drives a pipeline until the source or input channel closes, publishing
/// each new view on `views`. All subscriptions are released when this
/// future returns or is dropped, however the hosting task ends.
pub async fn run<T: Filterable + Clone>(
    mut pipeline: ListingPipeline<T>,
    mut source: mpsc::Receiver<SourceEvent<T>>,
    mut inputs: mpsc::Receiver<ControlInput>,
    views: watch::Sender<ListingView<T>>,
) {
    loop {
        let deadline = pipeline.next_deadline();
        let changed = tokio::select! {
            biased;
            event = source.recv() => match event {
                Some(event) => pipeline.on_source(event),
                None => break,
            },
            input = inputs.recv() => match input {
                Some(input) => pipeline.on_input(input, Instant::now()),
                None => break,
            },
            () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                if deadline.is_some() =>
            {
                pipeline.poll(Instant::now())
            }
        };
        if changed && views.send(pipeline.view().clone()).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::listing::filter::ALL;

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

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::new(&format!("row {i}"), "LABORAL"))
            .collect()
    }

    fn ready(view: &ListingView<Row>) -> &Paginated<Row> {
        match view {
            ListingView::Ready(paginated) => paginated,
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn first_snapshot_produces_a_view_without_user_input() {
        let mut pipeline = ListingPipeline::new(ListControls::new(&["tipo"]), 5);
        assert_eq!(*pipeline.view(), ListingView::Loading);

        pipeline.on_source(SourceEvent::Snapshot(rows(3)));
        let page = ready(pipeline.view());
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn rapid_search_input_debounces_to_one_recompute() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&[]), 5);
        pipeline.on_source(SourceEvent::Snapshot(vec![
            Row::new("a", ""),
            Row::new("ab", ""),
            Row::new("abc", ""),
        ]));

        pipeline.on_input(ControlInput::Search("a".into()), start);
        pipeline.on_input(
            ControlInput::Search("ab".into()),
            start + Duration::from_millis(100),
        );
        pipeline.on_input(
            ControlInput::Search("abc".into()),
            start + Duration::from_millis(150),
        );

        // the last emission re-armed the timer: 150ms + 300ms
        assert_eq!(
            pipeline.next_deadline(),
            Some(start + Duration::from_millis(450))
        );
        assert!(!pipeline.poll(start + Duration::from_millis(449)));

        assert!(pipeline.poll(start + Duration::from_millis(450)));
        assert_eq!(pipeline.controls().search, "abc");
        assert_eq!(ready(pipeline.view()).total_items, 1);

        // nothing left to fire
        assert!(pipeline.next_deadline().is_none());
        assert!(!pipeline.poll(start + Duration::from_millis(1000)));
    }

    #[test]
    fn unchanged_search_after_debounce_does_not_recompute() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&[]), 5);
        pipeline.on_source(SourceEvent::Snapshot(rows(2)));

        pipeline.on_input(ControlInput::Search(String::new()), start);
        assert!(!pipeline.poll(start + SEARCH_DEBOUNCE));
    }

    #[test]
    fn snapshot_during_debounce_window_uses_latest_values() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&[]), 5);
        pipeline.on_source(SourceEvent::Snapshot(vec![Row::new("old", "")]));

        pipeline.on_input(ControlInput::Search("fresh".into()), start);
        // a new snapshot lands while the debounce is pending
        pipeline.on_source(SourceEvent::Snapshot(vec![
            Row::new("fresh one", ""),
            Row::new("other", ""),
        ]));
        // the snapshot recompute still sees the committed (empty) search
        assert_eq!(ready(pipeline.view()).total_items, 2);

        assert!(pipeline.poll(start + SEARCH_DEBOUNCE));
        let page = ready(pipeline.view());
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name, "fresh one");
    }

    #[test]
    fn categorical_selection_applies_immediately() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&["tipo"]), 5);
        pipeline.on_source(SourceEvent::Snapshot(vec![
            Row::new("x", "LABORAL"),
            Row::new("y", "ESTUDIOS"),
        ]));

        let changed = pipeline.on_input(
            ControlInput::Select {
                field: "tipo".into(),
                value: "ESTUDIOS".into(),
            },
            start,
        );
        assert!(changed);
        assert!(pipeline.next_deadline().is_none());
        let page = ready(pipeline.view());
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name, "y");
    }

    #[test]
    fn reselecting_same_category_value_is_a_noop() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&["tipo"]), 5);
        pipeline.on_source(SourceEvent::Snapshot(rows(1)));
        assert!(!pipeline.on_input(
            ControlInput::Select {
                field: "tipo".into(),
                value: ALL.into(),
            },
            start,
        ));
    }

    #[test]
    fn narrowing_filter_resets_page() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&["tipo"]), 5);
        let mut items = rows(22);
        items.push(Row::new("lone", "ESTUDIOS"));
        pipeline.on_source(SourceEvent::Snapshot(items));

        pipeline.on_input(ControlInput::GotoPage(5), start);
        assert_eq!(ready(pipeline.view()).page, 5);

        pipeline.on_input(
            ControlInput::Select {
                field: "tipo".into(),
                value: "ESTUDIOS".into(),
            },
            start,
        );
        let page = ready(pipeline.view());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 1);
    }

    #[test]
    fn navigation_outside_range_is_a_noop() {
        let start = Instant::now();
        let mut pipeline = ListingPipeline::new(ListControls::new(&[]), 5);
        pipeline.on_source(SourceEvent::Snapshot(rows(12)));

        assert!(pipeline.on_input(ControlInput::GotoPage(3), start));
        assert!(!pipeline.on_input(ControlInput::NextPage, start));
        assert_eq!(ready(pipeline.view()).page, 3);
        assert_eq!(ready(pipeline.view()).items.len(), 2);
    }

    #[test]
    fn source_failure_becomes_a_tagged_view() {
        let mut pipeline: ListingPipeline<Row> = ListingPipeline::new(ListControls::new(&[]), 5);
        pipeline.on_source(SourceEvent::Failed("load failed".into()));
        assert_eq!(*pipeline.view(), ListingView::Failed("load failed".into()));

        // the source recovering brings the listing back
        pipeline.on_source(SourceEvent::Snapshot(rows(1)));
        assert_eq!(ready(pipeline.view()).total_items, 1);
    }
}
