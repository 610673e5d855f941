use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::todo_model::{TodoItem, TodoPatch};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Counts reported by a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Primitive document-store operations over the todo collection.
///
/// Title lookups match the first document in store order.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert_one(&self, item: &TodoItem) -> Result<(), StoreError>;

    async fn find_all(&self) -> Result<Vec<TodoItem>, StoreError>;

    async fn find_one(&self, title: &str) -> Result<Option<TodoItem>, StoreError>;

    async fn update_one(&self, title: &str, patch: &TodoPatch)
        -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(&self, title: &str) -> Result<u64, StoreError>;

    async fn delete_many(&self) -> Result<u64, StoreError>;
}
