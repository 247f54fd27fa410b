//! The state store: one current snapshot, dispatch, subscriptions and the
//! hand-off to persistence.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard::{Board, FileStorage, Persistence, StateStore, board::AddBoard};
//!
//! # async fn example() {
//! let persistence = Persistence::new(Arc::new(FileStorage::new(".taskboard")));
//! let store = StateStore::open(persistence).await;
//!
//! let mut updates = store.subscribe();
//! store.dispatch(AddBoard::new(Board::new("Roadmap")));
//! updates.changed().await.ok();
//! assert_eq!(updates.borrow().boards.len(), 1);
//!
//! store.flush().await;
//! # }
//! ```

use crate::command::Command;
use crate::error::BoardError;
use crate::logging::Pretty;
use crate::persistence::Persistence;
use crate::reducer::try_reduce;
use crate::types::AppState;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace};

/// What happened to a dispatched command
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The state changed; subscribers were notified and a save was queued
    Applied,
    /// The command referenced something missing or reused an id; nothing changed
    Rejected { error: BoardError },
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

enum WriterMessage {
    Save(Arc<AppState>),
    Flush(oneshot::Sender<()>),
}

/// Owns the current [`AppState`] and serializes every change to it.
///
/// Share it behind an `Arc`; `dispatch` takes `&self`.
pub struct StateStore {
    state: watch::Sender<Arc<AppState>>,
    writer: Option<mpsc::UnboundedSender<WriterMessage>>,
}

impl StateStore {
    /// In-memory store without persistence
    pub fn new(state: AppState) -> Self {
        let (state, _) = watch::channel(Arc::new(state));
        Self {
            state,
            writer: None,
        }
    }

    /// Load the stored state (or the default state) and start the background
    /// writer that mirrors every accepted command to `persistence`.
    ///
    /// Must be called within a tokio runtime.
    pub async fn open(persistence: Persistence) -> Self {
        let initial = persistence.load().await;
        let (state, _) = watch::channel(Arc::new(initial));
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(persistence, rx));

        Self {
            state,
            writer: Some(tx),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<AppState> {
        self.state.borrow().clone()
    }

    /// Receiver that observes a new snapshot after every accepted command
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state.subscribe()
    }

    /// Apply a command to the current state.
    ///
    /// Runs to completion before returning. Rejected commands change nothing,
    /// notify nobody and are not persisted.
    pub fn dispatch(&self, command: impl Into<Command>) -> DispatchOutcome {
        let command = command.into();
        let mut outcome = DispatchOutcome::Applied;
        let mut saved = None;

        self.state
            .send_if_modified(|current| match try_reduce(current, &command) {
                Ok(next) => {
                    *current = Arc::new(next);
                    saved = Some(Arc::clone(current));
                    true
                }
                Err(error) => {
                    outcome = DispatchOutcome::Rejected { error };
                    false
                }
            });

        match (&outcome, saved) {
            (DispatchOutcome::Applied, Some(snapshot)) => {
                debug!(op = command.op(), "command applied");
                trace!(op = command.op(), "state after command:{}", Pretty(&*snapshot));
                self.enqueue_save(snapshot);
            }
            (DispatchOutcome::Rejected { error }, _) => {
                debug!(op = command.op(), %error, "command rejected");
            }
            (DispatchOutcome::Applied, None) => {}
        }

        outcome
    }

    fn enqueue_save(&self, snapshot: Arc<AppState>) {
        if let Some(writer) = &self.writer {
            if writer.send(WriterMessage::Save(snapshot)).is_err() {
                debug!("persistence writer stopped, snapshot not saved");
            }
        }
    }

    /// Wait until every save queued so far has been attempted
    pub async fn flush(&self) {
        let Some(writer) = &self.writer else {
            return;
        };
        let (ack, done) = oneshot::channel();
        if writer.send(WriterMessage::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}

/// Drains the queue, writing only the newest snapshot of each batch.
/// Ends when the store is dropped.
async fn run_writer(persistence: Persistence, mut rx: mpsc::UnboundedReceiver<WriterMessage>) {
    while let Some(message) = rx.recv().await {
        let mut latest = None;
        let mut acks = Vec::new();

        let mut next = Some(message);
        while let Some(message) = next {
            match message {
                WriterMessage::Save(snapshot) => latest = Some(snapshot),
                WriterMessage::Flush(ack) => acks.push(ack),
            }
            next = rx.try_recv().ok();
        }

        if let Some(snapshot) = latest {
            persistence.save(&snapshot).await;
        }
        for ack in acks {
            let _ = ack.send(());
        }
    }
    debug!("persistence writer finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AddBoard, DeleteBoard};
    use crate::persistence::STORAGE_KEY;
    use crate::storage::MemoryStorage;
    use crate::types::Board;
    use crate::user::SetCurrentUser;

    #[test]
    fn test_new_store_holds_state() {
        let store = StateStore::new(AppState::with_user("alice"));
        assert_eq!(store.state().current_user, "alice");
    }

    #[test]
    fn test_dispatch_replaces_snapshot() {
        let store = StateStore::new(AppState::default());
        let before = store.state();

        let outcome = store.dispatch(AddBoard::new(Board::new("Roadmap")));
        assert!(outcome.is_applied());

        let after = store.state();
        assert!(before.boards.is_empty());
        assert_eq!(after.boards.len(), 1);
    }

    #[test]
    fn test_rejected_command_leaves_snapshot() {
        let store = StateStore::new(AppState::default());
        let before = store.state();

        let outcome = store.dispatch(DeleteBoard::new("missing"));
        match outcome {
            DispatchOutcome::Rejected { error } => assert!(error.is_not_found()),
            DispatchOutcome::Applied => panic!("delete of a missing board was applied"),
        }
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[tokio::test]
    async fn test_subscribers_see_accepted_commands_only() {
        let store = StateStore::new(AppState::default());
        let mut rx = store.subscribe();

        store.dispatch(DeleteBoard::new("missing"));
        assert!(!rx.has_changed().unwrap());

        store.dispatch(SetCurrentUser::new("bob"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().current_user, "bob");
    }

    #[tokio::test]
    async fn test_open_persists_after_flush() {
        let storage = Arc::new(MemoryStorage::new());
        let store = StateStore::open(Persistence::new(storage.clone())).await;

        store.dispatch(SetCurrentUser::new("carol"));
        store.dispatch(AddBoard::new(Board::new("Roadmap")));
        store.flush().await;

        let blob = storage.get(STORAGE_KEY).unwrap();
        let saved = crate::persistence::decode(&blob).unwrap();
        assert_eq!(saved, *store.state());
    }

    #[tokio::test]
    async fn test_rejected_command_is_not_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let store = StateStore::open(Persistence::new(storage.clone())).await;

        store.dispatch(DeleteBoard::new("missing"));
        store.flush().await;
        assert!(storage.get(STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_flush_without_persistence_returns() {
        let store = StateStore::new(AppState::default());
        store.dispatch(SetCurrentUser::new("dave"));
        store.flush().await;
        assert_eq!(store.state().current_user, "dave");
    }
}
