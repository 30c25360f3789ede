//! Task store with device-storage synchronization
//!
//! Owns the in-memory task collection and keeps a single JSON blob under the
//! `"tasks"` storage key consistent with it. Mutations update memory
//! synchronously and queue the full post-mutation snapshot to a writer task,
//! which applies snapshots in issue order. Memory is the session truth:
//! storage failures are logged and dropped, never surfaced to callers.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

use taskpad_storage::KeyValueStorage;

use super::model::{SortOrder, Task, TaskChange, TaskDraft};
use crate::Result;

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";

enum PersistRequest {
    Snapshot(String),
    Flush(oneshot::Sender<()>),
}

/// In-memory task collection synchronized with a key-value storage adapter.
pub struct TaskStore {
    tasks: Vec<Task>,
    selected: Option<Task>,
    storage: Arc<dyn KeyValueStorage>,
    persist_tx: mpsc::UnboundedSender<PersistRequest>,
}

impl TaskStore {
    /// Create a store backed by the given storage adapter.
    ///
    /// Spawns the persistence writer, so this must be called inside a tokio
    /// runtime. The collection starts empty; call [`load`](Self::load) to
    /// pull the persisted state.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(Arc::clone(&storage), persist_rx));

        Self {
            tasks: Vec::new(),
            selected: None,
            storage,
            persist_tx,
        }
    }

    /// The current task sequence, in insertion order unless re-sorted.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the collection with the persisted snapshot.
    ///
    /// An absent key clears the collection. A read or parse failure is
    /// logged and leaves the current collection in place, so a transient
    /// storage problem never wipes a valid in-memory list. Idempotent for
    /// unchanged storage.
    pub async fn load(&mut self) {
        match self.read_snapshot().await {
            Ok(Some(tasks)) => self.tasks = tasks,
            Ok(None) => self.tasks.clear(),
            Err(err) => warn!("Failed to load tasks, keeping current state: {}", err),
        }
    }

    async fn read_snapshot(&self) -> Result<Option<Vec<Task>>> {
        let Some(raw) = self.storage.read(TASKS_KEY).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Create a task from the draft, append it, and queue a persist.
    ///
    /// The created task is visible in [`tasks`](Self::tasks) before the
    /// write settles.
    pub fn add(&mut self, draft: TaskDraft) -> Task {
        let task = Task::new(draft);
        self.tasks.push(task.clone());
        self.persist();
        task
    }

    /// Remove the task with the given id. Idempotent: a missing id is a
    /// no-op and queues no write. Clears the selection if it pointed at the
    /// removed task.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return;
        }
        if self.selected.as_ref().is_some_and(|task| task.id == id) {
            self.selected = None;
        }
        self.persist();
    }

    /// Replace one field of the task with the given id and queue a persist.
    ///
    /// A missing id is a silent no-op; existing UI flows rely on that.
    pub fn update(&mut self, id: Uuid, change: TaskChange) {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("Update targeted missing task {}", id);
            return;
        };
        task.apply(change);
        self.persist();
    }

    /// Set the selection to the task with the given id, or clear it when the
    /// id is unknown. Never touches the collection or storage.
    pub fn select(&mut self, id: Uuid) {
        self.selected = self.tasks.iter().find(|task| task.id == id).cloned();
    }

    /// The task currently open in the detail/edit view, if any.
    pub fn selected(&self) -> Option<&Task> {
        self.selected.as_ref()
    }

    /// Drop the selection; the view layer calls this when navigating back
    /// to the list.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Stable in-place reorder of the collection. Presentation only: the
    /// order is not persisted and a fresh [`load`](Self::load) restores
    /// storage order.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Date => self.tasks.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::Status => self
                .tasks
                .sort_by(|a, b| a.status.as_str().cmp(b.status.as_str())),
        }
    }

    /// Wait until every snapshot queued so far has settled against storage.
    ///
    /// The mutations themselves never expose write completion; this exists
    /// for tests and shutdown.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.persist_tx.send(PersistRequest::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Failed to encode tasks: {}", err);
                return;
            }
        };
        if self
            .persist_tx
            .send(PersistRequest::Snapshot(payload))
            .is_err()
        {
            warn!("Persistence writer is gone, dropping snapshot");
        }
    }
}

/// Applies queued snapshots in FIFO order, so the persisted blob converges
/// to the last-issued mutation. Runs until the store is dropped.
async fn run_writer(
    storage: Arc<dyn KeyValueStorage>,
    mut requests: mpsc::UnboundedReceiver<PersistRequest>,
) {
    while let Some(request) = requests.recv().await {
        match request {
            PersistRequest::Snapshot(payload) => {
                if let Err(err) = storage.write(TASKS_KEY, &payload).await {
                    warn!("Failed to persist tasks: {}", err);
                }
            }
            PersistRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
