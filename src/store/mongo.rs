use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::{TodoStore, UpdateOutcome};
use crate::errors::StoreError;
use crate::models::todo_model::{Presence, TodoItem, TodoPatch};

/// Todo as stored in MongoDB, including the generated `_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoDocument {
    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

impl From<&TodoItem> for TodoDocument {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: None,
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed,
        }
    }
}

impl From<TodoDocument> for TodoItem {
    fn from(doc: TodoDocument) -> Self {
        Self {
            title: doc.title,
            description: doc.description,
            completed: doc.completed,
        }
    }
}

pub struct MongoStore {
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }

    /// Opens a client for `url`. The driver connects lazily, so an
    /// unreachable server only shows up on the first operation
    pub async fn connect(url: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;

        Ok(Self::new(&client, database, collection))
    }
}

fn title_filter(title: &str) -> Document {
    doc! { "title": title }
}

/// `$set` body holding only the fields present in `patch`
pub fn set_document(patch: &TodoPatch) -> Document {
    let mut set = Document::new();

    if let Presence::Set(title) = &patch.title {
        set.insert("title", title.clone());
    }
    if let Presence::Set(description) = &patch.description {
        let value = match description {
            Some(d) => Bson::String(d.clone()),
            None => Bson::Null,
        };
        set.insert("description", value);
    }
    if let Presence::Set(completed) = patch.completed {
        set.insert("completed", completed);
    }

    set
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert_one(&self, item: &TodoItem) -> Result<(), StoreError> {
        let result = self
            .collection
            .insert_one(TodoDocument::from(item), None)
            .await?;

        log::debug!(
            "Inserted todo {} as {}",
            item.title,
            result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default()
        );

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let cursor = self.collection.find(doc! {}, None).await?;
        let documents: Vec<TodoDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(TodoItem::from).collect())
    }

    async fn find_one(&self, title: &str) -> Result<Option<TodoItem>, StoreError> {
        let found = self.collection.find_one(title_filter(title), None).await?;

        if let Some(doc) = &found {
            log::debug!("Found todo {} at {:?}", title, doc.id_hex());
        }

        Ok(found.map(TodoItem::from))
    }

    async fn update_one(
        &self,
        title: &str,
        patch: &TodoPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let set = set_document(patch);
        let result = self
            .collection
            .update_one(title_filter(title), doc! { "$set": set }, None)
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, title: &str) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(title_filter(title), None).await?;

        Ok(result.deleted_count)
    }

    async fn delete_many(&self) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(doc! {}, None).await?;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_holds_only_present_fields() {
        let patch = TodoPatch {
            completed: Presence::Set(true),
            ..TodoPatch::default()
        };

        assert_eq!(set_document(&patch), doc! { "completed": true });
    }

    #[test]
    fn set_document_writes_null_for_cleared_description() {
        let patch = TodoPatch {
            title: Presence::Set("NewTask1".to_string()),
            description: Presence::Set(None),
            ..TodoPatch::default()
        };

        assert_eq!(
            set_document(&patch),
            doc! { "title": "NewTask1", "description": null }
        );
    }

    #[test]
    fn document_drops_id_when_normalized() {
        let oid = ObjectId::new();
        let doc = TodoDocument {
            id: Some(oid),
            title: "NewTask".to_string(),
            description: None,
            completed: false,
        };

        assert_eq!(doc.id_hex(), Some(oid.to_hex()));
        assert_eq!(TodoItem::from(doc), TodoItem::from_title("NewTask"));
    }

    #[test]
    fn new_document_leaves_id_to_the_server() {
        let item = TodoItem::from_title("NewTask");
        let doc = mongodb::bson::to_document(&TodoDocument::from(&item)).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("title").unwrap(), "NewTask");
        assert_eq!(doc.get("description"), Some(&Bson::Null));
    }
}
