//! Linear triage queue over a list that shrinks underneath it.
//!
//! The queue shows one item at a time and asks the user to accept or
//! reject it. Either answer fires a store mutation that asynchronously
//! removes the item from the upstream list, and the queue must keep
//! presenting the right "next" item without skipping, repeating, or
//! indexing out of range while the list shrinks out from under it.
//!
//! # Design
//!
//! [`ReviewQueue`] is a pure state machine: synchronous transitions, no
//! IO, commands out. The upstream list is owned by its resource store
//! and may be refreshed by causes unrelated to this queue, so the queue
//! never trusts a local decrement: after a successful mutation it sits
//! in an explicit `AwaitingListSync` state until an observed list no
//! longer contains the processed id. Keeping that as a state (rather
//! than an ad hoc flag) keeps the transition table exhaustive and
//! testable.
//!
//! [`ReviewSession`] wraps the machine with the owning screen's async
//! accept/reject callbacks and executes whatever command a transition
//! emits.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::SyncError;

/// What the queue shows for one entry of the upstream list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem<I> {
    pub id: I,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Queue lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// Showing the item at the cursor, ready for input.
    Idle,
    /// An accept/reject call is in flight; input is ignored.
    Processing,
    /// The call succeeded locally; waiting for the upstream list to no
    /// longer contain the processed item.
    AwaitingListSync,
    /// The list is empty. Terminal; the queue is dismissed.
    Done,
}

/// User input on the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Accept,
    Reject,
}

/// The mutation a transition asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCommand<I> {
    Accept { id: I },
    Reject { id: I },
}

/// Pure triage state machine. See the module docs for the contract.
pub struct ReviewQueue<I> {
    state: ReviewState,
    items: Vec<ReviewItem<I>>,
    current_index: usize,
    completed: usize,
    total_original: usize,
    in_flight: Option<I>,
    last_processed: Option<I>,
    last_error: Option<SyncError>,
}

impl<I: Copy + Eq + Debug> ReviewQueue<I> {
    /// Start a queue over the list as it stands. An empty list starts
    /// (and ends) in `Done`.
    pub fn new(items: Vec<ReviewItem<I>>) -> Self {
        let state = if items.is_empty() {
            ReviewState::Done
        } else {
            ReviewState::Idle
        };
        Self {
            state,
            total_original: items.len(),
            items,
            current_index: 0,
            completed: 0,
            in_flight: None,
            last_processed: None,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ReviewState::Done
    }

    /// The item under the cursor. `None` once the queue is done.
    pub fn current(&self) -> Option<&ReviewItem<I>> {
        if self.state == ReviewState::Done {
            return None;
        }
        self.items.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Informational progress figure; never drives transitions.
    pub fn progress_percent(&self) -> f32 {
        if self.total_original == 0 {
            return 100.0;
        }
        (self.current_index + self.completed) as f32 / self.total_original as f32 * 100.0
    }

    /// The error from the last failed accept/reject, cleared when the
    /// user retries.
    pub fn last_error(&self) -> Option<&SyncError> {
        self.last_error.as_ref()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Take the user's decision on the current item.
    ///
    /// Returns the mutation to perform, or `None` when the input is
    /// ignored: a call is already in flight, the queue is waiting for
    /// the list to sync, it is done, or there is no current item. The
    /// guard is what makes rapid repeated input a no-op: at most one
    /// mutation per item is ever requested.
    pub fn decide(&mut self, decision: ReviewDecision) -> Option<ReviewCommand<I>> {
        if self.state != ReviewState::Idle {
            debug!(state = ?self.state, "review input ignored");
            return None;
        }
        let item = self.items.get(self.current_index)?;
        let id = item.id;

        self.state = ReviewState::Processing;
        self.in_flight = Some(id);
        self.last_error = None;

        Some(match decision {
            ReviewDecision::Accept => ReviewCommand::Accept { id },
            ReviewDecision::Reject => ReviewCommand::Reject { id },
        })
    }

    /// The in-flight mutation succeeded. Remembers the processed id and
    /// waits for the upstream list to stop containing it.
    pub fn resolve_success(&mut self) {
        if self.state != ReviewState::Processing {
            return;
        }
        self.completed += 1;
        self.last_processed = self.in_flight.take();
        self.state = ReviewState::AwaitingListSync;
        // The upstream list may already have been observed without the
        // item (refresh raced the call), so settle immediately.
        self.settle();
    }

    /// The in-flight mutation failed. Returns to `Idle` with cursor and
    /// counts unchanged so the same item is presented for retry.
    pub fn resolve_failure(&mut self, err: SyncError) {
        if self.state != ReviewState::Processing {
            return;
        }
        warn!(error = %err, "review mutation failed");
        self.in_flight = None;
        self.last_error = Some(err);
        self.state = ReviewState::Idle;
    }

    /// Feed the queue the upstream list's latest contents.
    ///
    /// An empty list finishes the queue from any state (covers the list
    /// being emptied by causes other than this queue's own action). If
    /// the cursor ends up out of bounds for a shrunk-but-non-empty
    /// list, it is clamped to `0`: removal order does not guarantee the
    /// adjacency the user expects, so the queue resumes from the start
    /// rather than guessing the "next" item.
    pub fn observe(&mut self, items: Vec<ReviewItem<I>>) {
        self.items = items;
        self.settle();
    }

    fn settle(&mut self) {
        if self.items.is_empty() {
            if self.state != ReviewState::Done {
                debug!(completed = self.completed, "review queue done");
            }
            self.state = ReviewState::Done;
            self.in_flight = None;
            self.last_processed = None;
            return;
        }

        if self.state == ReviewState::AwaitingListSync {
            let processed_gone = match self.last_processed {
                Some(id) => !self.items.iter().any(|item| item.id == id),
                None => true,
            };
            if processed_gone {
                self.last_processed = None;
                if self.current_index >= self.items.len() {
                    self.current_index = 0;
                }
                self.state = ReviewState::Idle;
            }
            return;
        }

        // A shrink from an unrelated cause can strand the cursor too.
        if self.current_index >= self.items.len() {
            self.current_index = 0;
        }
    }
}

// =============================================================================
// Session driver
// =============================================================================

/// The owning screen's side of the review flow: the two mutations and
/// the dismissal hook.
#[async_trait]
pub trait ReviewHandler<I>: Send + Sync {
    async fn accept(&self, id: I) -> Result<(), SyncError>;
    async fn reject(&self, id: I) -> Result<(), SyncError>;

    /// Called once when the queue reaches `Done`.
    fn exit(&self) {}
}

/// Drives a [`ReviewQueue`] against async accept/reject callbacks.
pub struct ReviewSession<I> {
    queue: ReviewQueue<I>,
    handler: Arc<dyn ReviewHandler<I>>,
    exited: bool,
}

impl<I: Copy + Eq + Debug> ReviewSession<I> {
    pub fn new(items: Vec<ReviewItem<I>>, handler: Arc<dyn ReviewHandler<I>>) -> Self {
        let mut session = Self {
            queue: ReviewQueue::new(items),
            handler,
            exited: false,
        };
        session.dismiss_if_done();
        session
    }

    pub fn queue(&self) -> &ReviewQueue<I> {
        &self.queue
    }

    pub async fn accept(&mut self) {
        self.run(ReviewDecision::Accept).await;
    }

    pub async fn reject(&mut self) {
        self.run(ReviewDecision::Reject).await;
    }

    /// Push the upstream list's latest contents into the queue.
    pub fn observe(&mut self, items: Vec<ReviewItem<I>>) {
        self.queue.observe(items);
        self.dismiss_if_done();
    }

    async fn run(&mut self, decision: ReviewDecision) {
        let Some(command) = self.queue.decide(decision) else {
            return;
        };
        let result = match command {
            ReviewCommand::Accept { id } => self.handler.accept(id).await,
            ReviewCommand::Reject { id } => self.handler.reject(id).await,
        };
        match result {
            Ok(()) => self.queue.resolve_success(),
            Err(err) => self.queue.resolve_failure(err),
        }
        self.dismiss_if_done();
    }

    fn dismiss_if_done(&mut self) {
        if self.queue.is_done() && !self.exited {
            self.exited = true;
            self.handler.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: u32) -> ReviewItem<u32> {
        ReviewItem {
            id: n,
            title: format!("item {}", n),
            description: None,
            link: None,
        }
    }

    fn items(ids: &[u32]) -> Vec<ReviewItem<u32>> {
        ids.iter().map(|&n| item(n)).collect()
    }

    // ==========================================================================
    // Basic flow
    // ==========================================================================

    #[test]
    fn test_empty_list_starts_done() {
        let queue: ReviewQueue<u32> = ReviewQueue::new(vec![]);
        assert_eq!(queue.state(), ReviewState::Done);
        assert!(queue.current().is_none());
        assert_eq!(queue.progress_percent(), 100.0);
    }

    #[test]
    fn test_accept_emits_command_for_current_item() {
        let mut queue = ReviewQueue::new(items(&[10, 11, 12]));
        let cmd = queue.decide(ReviewDecision::Accept);
        assert_eq!(cmd, Some(ReviewCommand::Accept { id: 10 }));
        assert_eq!(queue.state(), ReviewState::Processing);
    }

    #[test]
    fn test_reject_emits_reject_command() {
        let mut queue = ReviewQueue::new(items(&[10]));
        let cmd = queue.decide(ReviewDecision::Reject);
        assert_eq!(cmd, Some(ReviewCommand::Reject { id: 10 }));
    }

    #[test]
    fn test_accept_first_of_three_lands_on_former_second() {
        let mut queue = ReviewQueue::new(items(&[10, 11, 12]));

        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_success();
        assert_eq!(queue.state(), ReviewState::AwaitingListSync);

        // Upstream list catches up: item 10 is gone.
        queue.observe(items(&[11, 12]));

        assert_eq!(queue.state(), ReviewState::Idle);
        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.current().unwrap().id, 11);
        assert_eq!(queue.completed(), 1);
    }

    #[test]
    fn test_accepting_last_item_finishes() {
        let mut queue = ReviewQueue::new(items(&[10]));
        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_success();
        queue.observe(vec![]);
        assert_eq!(queue.state(), ReviewState::Done);
        assert!(queue.current().is_none());
    }

    // ==========================================================================
    // Input guards
    // ==========================================================================

    #[test]
    fn test_second_input_while_processing_is_ignored() {
        let mut queue = ReviewQueue::new(items(&[10, 11]));
        assert!(queue.decide(ReviewDecision::Accept).is_some());
        assert!(queue.decide(ReviewDecision::Accept).is_none());
        assert!(queue.decide(ReviewDecision::Reject).is_none());
    }

    #[test]
    fn test_input_while_awaiting_sync_is_ignored() {
        let mut queue = ReviewQueue::new(items(&[10, 11]));
        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_success();
        assert_eq!(queue.state(), ReviewState::AwaitingListSync);
        assert!(queue.decide(ReviewDecision::Accept).is_none());
    }

    #[test]
    fn test_input_when_done_is_ignored() {
        let mut queue: ReviewQueue<u32> = ReviewQueue::new(vec![]);
        assert!(queue.decide(ReviewDecision::Accept).is_none());
    }

    // ==========================================================================
    // Failure path
    // ==========================================================================

    #[test]
    fn test_failure_returns_to_idle_without_losing_place() {
        let mut queue = ReviewQueue::new(items(&[10, 11]));
        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_failure(SyncError::transport("boom"));

        assert_eq!(queue.state(), ReviewState::Idle);
        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.completed(), 0);
        assert_eq!(queue.current().unwrap().id, 10);
        assert!(queue.last_error().is_some());

        // Retry works and clears the error.
        let cmd = queue.decide(ReviewDecision::Accept);
        assert_eq!(cmd, Some(ReviewCommand::Accept { id: 10 }));
        assert!(queue.last_error().is_none());
    }

    // ==========================================================================
    // List reconciliation
    // ==========================================================================

    #[test]
    fn test_waits_until_processed_id_is_gone() {
        let mut queue = ReviewQueue::new(items(&[10, 11]));
        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_success();

        // A refresh that still contains the processed item does not
        // unblock the queue.
        queue.observe(items(&[10, 11]));
        assert_eq!(queue.state(), ReviewState::AwaitingListSync);

        queue.observe(items(&[11]));
        assert_eq!(queue.state(), ReviewState::Idle);
        assert_eq!(queue.current().unwrap().id, 11);
    }

    #[test]
    fn test_cursor_clamps_to_zero_after_shrink() {
        // Process the last item of three so the cursor ends up past the
        // shrunk list's end.
        let mut queue = ReviewQueue::new(items(&[10, 11, 12]));
        queue.current_index = 2;

        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_success();
        queue.observe(items(&[10, 11]));

        assert_eq!(queue.state(), ReviewState::Idle);
        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.current().unwrap().id, 10);
    }

    #[test]
    fn test_list_emptied_elsewhere_finishes_from_idle() {
        let mut queue = ReviewQueue::new(items(&[10, 11]));
        queue.observe(vec![]);
        assert_eq!(queue.state(), ReviewState::Done);
    }

    #[test]
    fn test_unrelated_shrink_in_idle_clamps_cursor() {
        let mut queue = ReviewQueue::new(items(&[10, 11, 12]));
        queue.current_index = 2;
        queue.observe(items(&[10]));
        assert_eq!(queue.state(), ReviewState::Idle);
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn test_refresh_racing_the_call_settles_immediately() {
        let mut queue = ReviewQueue::new(items(&[10, 11]));
        queue.decide(ReviewDecision::Accept).unwrap();

        // The upstream store refreshed while the call was in flight and
        // already dropped the item.
        queue.observe(items(&[11]));
        assert_eq!(queue.state(), ReviewState::Processing);

        queue.resolve_success();
        assert_eq!(queue.state(), ReviewState::Idle);
        assert_eq!(queue.current().unwrap().id, 11);
    }

    // ==========================================================================
    // Progress
    // ==========================================================================

    #[test]
    fn test_progress_tracks_cursor_and_completed() {
        let mut queue = ReviewQueue::new(items(&[10, 11, 12, 13]));
        assert_eq!(queue.progress_percent(), 0.0);

        queue.decide(ReviewDecision::Accept).unwrap();
        queue.resolve_success();
        queue.observe(items(&[11, 12, 13]));
        assert_eq!(queue.progress_percent(), 25.0);
    }

    // ==========================================================================
    // Session driver
    // ==========================================================================

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct RecordingHandler {
        accepts: Mutex<Vec<u32>>,
        rejects: Mutex<Vec<u32>>,
        fail_next: Mutex<Option<SyncError>>,
        exits: AtomicUsize,
    }

    impl RecordingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                accepts: Mutex::new(Vec::new()),
                rejects: Mutex::new(Vec::new()),
                fail_next: Mutex::new(None),
                exits: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ReviewHandler<u32> for RecordingHandler {
        async fn accept(&self, id: u32) -> Result<(), SyncError> {
            if let Some(err) = self.fail_next.lock().unwrap().take() {
                return Err(err);
            }
            self.accepts.lock().unwrap().push(id);
            Ok(())
        }

        async fn reject(&self, id: u32) -> Result<(), SyncError> {
            self.rejects.lock().unwrap().push(id);
            Ok(())
        }

        fn exit(&self) {
            self.exits.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_session_runs_accept_and_waits_for_sync() {
        let handler = RecordingHandler::new();
        let mut session = ReviewSession::new(items(&[10, 11]), handler.clone());

        session.accept().await;
        assert_eq!(*handler.accepts.lock().unwrap(), vec![10]);
        assert_eq!(session.queue().state(), ReviewState::AwaitingListSync);

        session.observe(items(&[11]));
        assert_eq!(session.queue().state(), ReviewState::Idle);
    }

    #[tokio::test]
    async fn test_session_failure_keeps_item_for_retry() {
        let handler = RecordingHandler::new();
        *handler.fail_next.lock().unwrap() = Some(SyncError::transport("down"));
        let mut session = ReviewSession::new(items(&[10]), handler.clone());

        session.accept().await;
        assert_eq!(session.queue().state(), ReviewState::Idle);
        assert!(session.queue().last_error().is_some());
        assert!(handler.accepts.lock().unwrap().is_empty());

        session.accept().await;
        assert_eq!(*handler.accepts.lock().unwrap(), vec![10]);
    }

    #[tokio::test]
    async fn test_session_exits_once_when_list_empties() {
        let handler = RecordingHandler::new();
        let mut session = ReviewSession::new(items(&[10]), handler.clone());

        session.accept().await;
        session.observe(vec![]);
        assert!(session.queue().is_done());
        assert_eq!(handler.exits.load(Ordering::SeqCst), 1);

        // Further observations do not re-fire the dismissal.
        session.observe(vec![]);
        assert_eq!(handler.exits.load(Ordering::SeqCst), 1);
    }
}
