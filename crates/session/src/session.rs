//! The candidate table session.
//!
//! A session owns the reconciled store, the view engine and the live
//! subscription of one table screen. Backend events are queued by the
//! subscription sink and applied by [`CandidateSession::pump`], after which
//! the current page is re-derived and pushed to render listeners.

use crate::config::SessionConfig;
use crate::queue::EventQueue;
use chrono::{NaiveDate, Utc};
use hireboard_core::{CandidateDraft, CandidateId, ChangeEvent, Error, Result, Status};
use hireboard_reactive::{CandidateStore, SubscriptionId, SubscriptionManager};
use hireboard_source::{DataSource, SourceEvent, Subscription};
use hireboard_view::{Page, RowAction, SortKey, SortOrder, ViewEngine, ViewState};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error, info, trace, warn};

/// One live candidate table bound to a data source.
pub struct CandidateSession<S: DataSource> {
    source: S,
    config: SessionConfig,
    store: CandidateStore,
    view: ViewEngine,
    queue: EventQueue,
    subscription: Option<Subscription>,
    /// Whether the realtime channel is currently delivering.
    live: bool,
    /// Set by the store listener on every effective change.
    dirty: Rc<Cell<bool>>,
    store_listener: SubscriptionId,
    page: Page,
    pending_delete: Option<CandidateId>,
    renderers: SubscriptionManager<Page>,
}

impl<S: DataSource> CandidateSession<S> {
    /// Subscribes to live changes, loads the table and derives the first page.
    ///
    /// The subscription is established before the load so that no change
    /// committed in between is lost. Events that arrive during the load are
    /// applied on top of the loaded snapshot.
    ///
    /// Neither step failing aborts the session: a failed load leaves the
    /// table empty and a failed subscription leaves it without live updates.
    pub fn open(source: S, config: SessionConfig) -> Self {
        let queue = EventQueue::new();
        let subscription = match source.subscribe(queue.sink()) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                error!(error = %err, "realtime subscription failed, live updates disabled");
                None
            }
        };

        let mut store = CandidateStore::new();
        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        let store_listener = store.subscribe(move |change| {
            trace!(version = change.version(), "store changed");
            flag.set(true);
        });

        let mut session = Self {
            live: subscription.is_some(),
            view: ViewEngine::new(config.page_size),
            source,
            config,
            store,
            queue,
            subscription,
            dirty,
            store_listener,
            page: Page::default(),
            pending_delete: None,
            renderers: SubscriptionManager::new(),
        };

        match session.source.load_all() {
            Ok(records) => session.store.replace_all(records),
            Err(err) => {
                warn!(error = %err, "initial load failed, showing no candidates");
                session.store.replace_all(Vec::new());
            }
        }
        session.pump();

        info!(
            candidates = session.store.len(),
            live = session.live,
            "candidate session opened"
        );
        session
    }

    /// Applies every queued backend event and refreshes the page if the
    /// store changed. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop() {
            handled += 1;
            match event {
                SourceEvent::Change(change) => self.apply_change(change),
                SourceEvent::Disconnected { reason } => {
                    self.live = false;
                    warn!(reason = %reason, "realtime channel dropped");
                }
                SourceEvent::Reconnected => {
                    self.live = true;
                    info!("realtime channel restored");
                    if self.config.resync_on_reconnect {
                        self.resync();
                    }
                }
            }
        }
        if self.dirty.replace(false) {
            self.rerender();
        }
        handled
    }

    fn apply_change(&mut self, change: ChangeEvent) {
        let id = change.id().clone();
        let kind = change.kind();
        let applied = self.store.apply(change);
        if !applied.is_effective() {
            debug!(id = %id, kind = ?kind, "change event had no effect");
        }
    }

    fn resync(&mut self) {
        match self.source.load_all() {
            Ok(records) => {
                info!(candidates = records.len(), "resynchronized after reconnect");
                self.store.replace_all(records);
            }
            Err(err) => {
                warn!(error = %err, "resync failed, keeping current snapshot");
            }
        }
    }

    /// Reloads the whole table on demand.
    ///
    /// On failure the current snapshot is kept and the error is returned.
    pub fn reload(&mut self) -> Result<()> {
        let records = self.source.load_all().map_err(|err| {
            warn!(error = %err, "reload failed, keeping current snapshot");
            err
        })?;
        self.store.replace_all(records);
        self.pump();
        Ok(())
    }

    fn rerender(&mut self) -> &Page {
        self.page = self.view.render(&self.store);
        self.renderers.notify_all(&self.page);
        &self.page
    }

    fn show(&mut self, page: Page) -> &Page {
        self.page = page;
        self.renderers.notify_all(&self.page);
        &self.page
    }

    // View inputs. Each resets pagination to the first page.

    pub fn set_search(&mut self, text: impl Into<String>) -> &Page {
        self.view.set_search(text);
        self.rerender()
    }

    pub fn set_name_search(&mut self, text: impl Into<String>) -> &Page {
        self.view.set_name_search(text);
        self.rerender()
    }

    pub fn set_position_search(&mut self, text: impl Into<String>) -> &Page {
        self.view.set_position_search(text);
        self.rerender()
    }

    pub fn set_status_filter(&mut self, status: Option<Status>) -> &Page {
        self.view.set_status_filter(status);
        self.rerender()
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> &Page {
        self.view.set_date_range(from, to);
        self.rerender()
    }

    /// Toggles the sort on a column header.
    pub fn toggle_sort(&mut self, key: SortKey) -> &Page {
        self.view.toggle_sort(key);
        self.rerender()
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> &Page {
        self.view.set_sort(sort);
        self.rerender()
    }

    /// Clears every filter and restores the default sort.
    pub fn reset_view(&mut self) -> &Page {
        self.view.reset();
        self.rerender()
    }

    pub fn next_page(&mut self) -> &Page {
        let page = self.view.next_page(&self.store);
        self.show(page)
    }

    pub fn previous_page(&mut self) -> &Page {
        let page = self.view.previous_page(&self.store);
        self.show(page)
    }

    pub fn first_page(&mut self) -> &Page {
        let page = self.view.first_page(&self.store);
        self.show(page)
    }

    // Mutations. The store is only updated by the change events they cause.

    /// Requests a status change. Failures are logged, not returned.
    pub fn set_status(&mut self, id: &CandidateId, status: Status) {
        if let Err(err) = self.source.update_status(id, status) {
            log_mutation_failure("update_status", id, &err);
        }
        self.pump();
    }

    /// Marks a candidate for deletion pending confirmation.
    pub fn request_delete(&mut self, id: CandidateId) {
        self.pending_delete = Some(id);
    }

    /// Returns the candidate awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&CandidateId> {
        self.pending_delete.as_ref()
    }

    /// Abandons the pending delete without contacting the backend.
    pub fn cancel_delete(&mut self) -> Option<CandidateId> {
        self.pending_delete.take()
    }

    /// Sends the pending delete. Returns false if nothing was pending.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        if let Err(err) = self.source.delete(&id) {
            log_mutation_failure("delete", &id, &err);
        }
        self.pump();
        true
    }

    /// Runs an entry of a row's action menu.
    pub fn perform(&mut self, id: &CandidateId, action: RowAction) {
        match action {
            RowAction::SetStatus(status) => self.set_status(id, status),
            RowAction::Delete => self.request_delete(id.clone()),
        }
    }

    /// Submits the add-candidate form.
    ///
    /// Invalid drafts are rejected locally. The new row appears through the
    /// resulting insert event.
    pub fn add_candidate(&mut self, draft: CandidateDraft) -> Result<()> {
        draft.validate()?;
        let result = self.source.create(draft);
        if let Err(err) = &result {
            warn!(error = %err, "add candidate failed");
        }
        self.pump();
        result
    }

    /// Submits the add-candidate form with a CV attached.
    ///
    /// The file is uploaded under a timestamped name first and its public
    /// URL becomes the draft's resume link. A failed upload aborts the add.
    pub fn add_candidate_with_resume(
        &mut self,
        draft: CandidateDraft,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        draft.validate()?;
        let path = format!("{}-{}", Utc::now().timestamp_millis(), file_name);
        let url = self.source.upload_resume(&path, bytes).map_err(|err| {
            warn!(path = %path, error = %err, "resume upload failed");
            err
        })?;
        debug!(path = %path, "resume uploaded");
        self.add_candidate(draft.with_resume(url))
    }

    // Render listeners

    /// Registers a listener called with every newly derived page.
    pub fn on_render<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Page) + 'static,
    {
        self.renderers.subscribe(callback)
    }

    pub fn off_render(&mut self, id: SubscriptionId) -> bool {
        self.renderers.unsubscribe(id)
    }

    // Accessors

    /// Returns the page last derived.
    #[inline]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[inline]
    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    #[inline]
    pub fn view_state(&self) -> &ViewState {
        self.view.state()
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether live updates are currently being received.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Whether the session holds a realtime subscription.
    #[inline]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Number of events waiting for [`pump`](Self::pump).
    pub fn queued_events(&self) -> usize {
        self.queue.len()
    }

    /// Tears the session down, releasing the live subscription.
    ///
    /// Dropping the session releases it as well.
    pub fn close(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        self.store.unsubscribe(self.store_listener);
        let render_listeners = self.renderers.len();
        self.renderers.clear();
        info!(render_listeners, "candidate session closed");
    }
}

fn log_mutation_failure(operation: &'static str, id: &CandidateId, err: &Error) {
    if err.is_not_found() {
        debug!(operation, id = %id, "mutation target already gone");
    } else {
        warn!(operation, id = %id, error = %err, "mutation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hireboard_core::Candidate;
    use hireboard_source::MemorySource;
    use std::cell::RefCell;
    use tracing_test::traced_test;

    fn candidate(id: impl Into<CandidateId>, name: impl Into<String>, minute: u32) -> Candidate {
        Candidate::new(
            id,
            name,
            "Engineer",
            Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap(),
        )
    }

    fn seeded(n: u32) -> MemorySource {
        MemorySource::with_records(
            (0..n)
                .map(|i| candidate(format!("c{:02}", i), format!("Person {:02}", i), i))
                .collect(),
        )
    }

    #[test]
    #[traced_test]
    fn test_open_logs_and_renders() {
        let session = CandidateSession::open(seeded(3), SessionConfig::default());
        assert_eq!(session.page().total, 3);
        assert!(session.is_live());
        assert!(logs_contain("candidate session opened"));
    }

    #[test]
    #[traced_test]
    fn test_offline_load_is_empty_and_logged() {
        let source = seeded(3);
        source.set_offline(true);
        let session = CandidateSession::open(source, SessionConfig::default());
        assert!(session.page().is_empty());
        assert!(!session.is_subscribed());
        assert!(logs_contain("initial load failed"));
        assert!(logs_contain("realtime subscription failed"));
    }

    #[test]
    #[traced_test]
    fn test_subscription_rejected_still_loads() {
        let source = seeded(2);
        source.reject_subscriptions(true);
        let session = CandidateSession::open(source, SessionConfig::default());
        assert_eq!(session.page().total, 2);
        assert!(!session.is_live());
        assert!(logs_contain("live updates disabled"));
    }

    #[test]
    #[traced_test]
    fn test_not_found_logged_at_debug() {
        let mut session = CandidateSession::open(seeded(1), SessionConfig::default());
        session.set_status(&CandidateId::from("ghost"), Status::Hired);
        assert!(logs_contain("mutation target already gone"));
        assert!(!logs_contain("mutation failed"));
    }

    #[test]
    #[traced_test]
    fn test_transport_failure_logged_at_warn() {
        let source = seeded(1);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
        source.set_offline(true);
        session.set_status(&CandidateId::from("c00"), Status::Hired);
        assert!(logs_contain("mutation failed"));
        assert_eq!(
            session.store().get(&CandidateId::from("c00")).unwrap().status,
            None
        );
    }

    #[test]
    #[traced_test]
    fn test_disconnect_and_resync() {
        let source = seeded(2);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());

        source.disconnect("socket closed");
        session.pump();
        assert!(!session.is_live());
        assert!(logs_contain("realtime channel dropped"));

        source.remote_insert(candidate("missed", "Missed While Down", 30));
        session.pump();
        assert_eq!(session.store().len(), 2);

        source.reconnect();
        session.pump();
        assert!(session.is_live());
        assert_eq!(session.store().len(), 3);
        assert!(logs_contain("resynchronized after reconnect"));
    }

    #[test]
    #[traced_test]
    fn test_failed_resync_keeps_snapshot() {
        let source = seeded(2);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
        source.disconnect("socket closed");
        source.set_offline(true);
        source.reconnect();
        session.pump();
        assert_eq!(session.store().len(), 2);
        assert!(logs_contain("resync failed"));
    }

    #[test]
    fn test_no_resync_when_disabled() {
        let source = seeded(2);
        let config = SessionConfig {
            resync_on_reconnect: false,
            ..SessionConfig::default()
        };
        let mut session = CandidateSession::open(source.clone(), config);
        source.disconnect("socket closed");
        source.remote_insert(candidate("missed", "Missed While Down", 30));
        source.reconnect();
        session.pump();
        assert!(session.is_live());
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_render_listener_receives_pages() {
        let source = seeded(2);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
        let totals = Rc::new(RefCell::new(Vec::new()));
        let sink = totals.clone();
        let id = session.on_render(move |page| sink.borrow_mut().push(page.total));

        source.remote_insert(candidate("c10", "Newcomer", 40));
        session.pump();
        session.set_search("newcomer");
        assert_eq!(*totals.borrow(), vec![3, 1]);

        assert!(session.off_render(id));
        session.reset_view();
        assert_eq!(totals.borrow().len(), 2);
    }

    #[test]
    fn test_ignored_event_does_not_rerender() {
        let source = seeded(2);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        session.on_render(move |_| counter.set(counter.get() + 1));

        source.emit(ChangeEvent::Delete(CandidateId::from("ghost")));
        assert_eq!(session.pump(), 1);
        assert_eq!(renders.get(), 0);
    }

    #[test]
    fn test_add_candidate_rejects_invalid_draft() {
        let source = seeded(0);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
        let err = session
            .add_candidate(CandidateDraft::new("A", "Engineer"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDraft { field: "full_name", .. }));
        assert!(source.records().is_empty());
    }

    #[test]
    #[traced_test]
    fn test_failed_resume_upload_aborts_add() {
        let source = seeded(0);
        let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
        source.set_offline(true);
        let err = session
            .add_candidate_with_resume(CandidateDraft::new("Ada", "Engineer"), "cv.pdf", Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(logs_contain("resume upload failed"));
        source.set_offline(false);
        assert!(source.records().is_empty());
    }

    #[test]
    fn test_close_releases_subscription() {
        let source = seeded(1);
        let session = CandidateSession::open(source.clone(), SessionConfig::default());
        assert_eq!(source.live_subscriptions(), 1);
        session.close();
        assert_eq!(source.live_subscriptions(), 0);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let source = seeded(1);
        {
            let _session = CandidateSession::open(source.clone(), SessionConfig::default());
            assert_eq!(source.live_subscriptions(), 1);
        }
        assert_eq!(source.live_subscriptions(), 0);
    }
}
