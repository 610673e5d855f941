use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{TodoStore, UpdateOutcome};
use crate::errors::StoreError;
use crate::models::todo_model::{TodoItem, TodoPatch};

struct StoredTodo {
    id: Uuid,
    item: TodoItem,
}

/// Process-local store keeping documents in insertion order
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<StoredTodo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> Result<MutexGuard<'_, Vec<StoredTodo>>, StoreError> {
        self.documents
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_one(&self, item: &TodoItem) -> Result<(), StoreError> {
        let id = Uuid::new_v4();
        log::debug!("Inserted todo {} as {}", item.title, id);

        self.documents()?.push(StoredTodo {
            id,
            item: item.clone(),
        });

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        Ok(self.documents()?.iter().map(|d| d.item.clone()).collect())
    }

    async fn find_one(&self, title: &str) -> Result<Option<TodoItem>, StoreError> {
        let documents = self.documents()?;

        Ok(documents
            .iter()
            .find(|d| d.item.title == title)
            .map(|d| d.item.clone()))
    }

    async fn update_one(
        &self,
        title: &str,
        patch: &TodoPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut documents = self.documents()?;

        match documents.iter_mut().find(|d| d.item.title == title) {
            Some(doc) => {
                let changed = patch.apply_to(&mut doc.item);
                log::debug!("Matched todo {} at {}", title, doc.id);

                Ok(UpdateOutcome {
                    matched: 1,
                    modified: changed as u64,
                })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn delete_one(&self, title: &str) -> Result<u64, StoreError> {
        let mut documents = self.documents()?;

        match documents.iter().position(|d| d.item.title == title) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self) -> Result<u64, StoreError> {
        let mut documents = self.documents()?;
        let count = documents.len() as u64;
        documents.clear();

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::todo_model::Presence;

    fn rename(to: &str) -> TodoPatch {
        TodoPatch {
            title: Presence::Set(to.to_string()),
            ..TodoPatch::default()
        }
    }

    #[actix_web::test]
    async fn update_touches_first_match_only() {
        let store = MemoryStore::new();
        store.insert_one(&TodoItem::from_title("dup")).await.unwrap();
        store.insert_one(&TodoItem::from_title("dup")).await.unwrap();

        let outcome = store.update_one("dup", &rename("first")).await.unwrap();

        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });
        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "dup"]);
    }

    #[actix_web::test]
    async fn update_with_same_values_matches_without_modifying() {
        let store = MemoryStore::new();
        store.insert_one(&TodoItem::from_title("same")).await.unwrap();

        let outcome = store.update_one("same", &rename("same")).await.unwrap();

        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });
    }

    #[actix_web::test]
    async fn update_of_missing_title_matches_nothing() {
        let store = MemoryStore::new();

        let outcome = store.update_one("ghost", &rename("x")).await.unwrap();

        assert_eq!(outcome, UpdateOutcome::default());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn delete_one_leaves_other_duplicates() {
        let store = MemoryStore::new();
        store.insert_one(&TodoItem::from_title("dup")).await.unwrap();
        store.insert_one(&TodoItem::from_title("dup")).await.unwrap();

        assert_eq!(store.delete_one("dup").await.unwrap(), 1);
        assert!(store.find_one("dup").await.unwrap().is_some());
        assert_eq!(store.delete_many().await.unwrap(), 1);
        assert_eq!(store.delete_many().await.unwrap(), 0);
    }
}
