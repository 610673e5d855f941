use std::sync::Arc;

use crate::errors::RepositoryError;
use crate::models::todo_model::{TodoItem, TodoPatch};
use crate::store::TodoStore;

/// Title-keyed todo operations over an injected [`TodoStore`].
///
/// Titles are not unique; single-item operations act on the first
/// document matching the title.
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn TodoStore>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Writes `item` verbatim and returns what was written
    pub async fn insert(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
        self.store.insert_one(&item).await?;

        Ok(item)
    }

    pub async fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Option<TodoItem>, RepositoryError> {
        Ok(self.store.find_one(title).await?)
    }

    /// Applies `patch` to the first todo titled `title` and reads it back
    /// under its (possibly new) title.
    ///
    /// Fails with `NotFound` when nothing was modified, and with
    /// `Unreadable` when the item vanished between the write and the read.
    pub async fn update_by_title(
        &self,
        title: &str,
        patch: &TodoPatch,
    ) -> Result<TodoItem, RepositoryError> {
        let not_found = || RepositoryError::NotFound {
            title: title.to_string(),
        };

        if patch.is_empty() {
            log::debug!("Empty patch for todo {}, nothing to update", title);
            return Err(not_found());
        }

        let outcome = self.store.update_one(title, patch).await?;

        if outcome.modified == 0 {
            log::debug!(
                "Todo {} not updated (matched {})",
                title,
                outcome.matched
            );
            return Err(not_found());
        }

        let lookup = patch.lookup_title(title);

        match self.store.find_one(lookup).await? {
            Some(updated) => Ok(updated),
            None => {
                log::warn!("Todo {} was updated but {} could not be re-read", title, lookup);
                Err(RepositoryError::Unreadable {
                    title: lookup.to_string(),
                })
            }
        }
    }

    pub async fn delete_by_title(&self, title: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.delete_one(title).await? > 0)
    }

    pub async fn delete_all(&self) -> Result<bool, RepositoryError> {
        let deleted = self.store.delete_many().await?;
        log::debug!("Deleted {} todos", deleted);

        Ok(deleted > 0)
    }
}
