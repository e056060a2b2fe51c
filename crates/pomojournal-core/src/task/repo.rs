//! Task repository: owns the tasks collection.

use tracing::debug;

use super::{Task, TaskFilter};
use crate::error::{StorageError, ValidationError};
use crate::storage::{Collection, Loaded, Persisted, Store};

pub struct TaskRepository {
    store: Store,
    tasks: Loaded<Task>,
}

impl TaskRepository {
    pub fn open(store: Store) -> Self {
        let tasks = store.open_collection(Collection::Tasks);
        Self { store, tasks }
    }

    /// Create one task per non-blank line, in input order.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyBatch`] if every line is blank;
    /// nothing is created or written in that case.
    pub fn create_batch<I, S>(&mut self, lines: I) -> Result<Persisted<Vec<Task>>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let created: Vec<Task> = lines
            .into_iter()
            .filter_map(|line| {
                let text = line.as_ref().trim();
                (!text.is_empty()).then(|| Task::new(text))
            })
            .collect();
        if created.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        debug!(count = created.len(), "creating tasks");
        self.tasks.records.extend(created.iter().cloned());
        Ok(Persisted::from_save(created, self.persist()))
    }

    /// Flip the completed flag. Returns the new value, or `None` (without
    /// writing) when no task has `id`.
    pub fn toggle_completed(&mut self, id: &str) -> Persisted<Option<bool>> {
        let Some(task) = self.tasks.records.iter_mut().find(|t| t.id == id) else {
            return Persisted::synced(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;
        Persisted::from_save(Some(completed), self.persist())
    }

    /// Remove the task with `id`; unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Persisted<()> {
        self.tasks.records.retain(|t| t.id != id);
        Persisted::from_save((), self.persist())
    }

    /// Remove all completed tasks in one write. Returns how many went.
    pub fn clear_completed(&mut self) -> Persisted<usize> {
        let before = self.tasks.records.len();
        self.tasks.records.retain(|t| !t.completed);
        Persisted::from_save(before - self.tasks.records.len(), self.persist())
    }

    /// Tasks in storage order matching `filter`.
    pub fn list(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.records.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.records.iter().find(|t| t.id == id)
    }

    /// Number of tasks not yet completed.
    pub fn remaining(&self) -> usize {
        self.tasks.records.iter().filter(|t| !t.completed).count()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save_loaded(Collection::Tasks, &self.tasks)
    }
}
