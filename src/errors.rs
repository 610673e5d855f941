use derive_more::Display;
use mongodb::error::{Error as MongoError, ErrorKind};

/// Failure talking to the document store
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreError {
    #[display(fmt = "Document store unavailable: {}", _0)]
    Unavailable(String),

    #[display(fmt = "Document store query failed: {}", _0)]
    Query(String),
}

impl std::error::Error for StoreError {}

impl From<MongoError> for StoreError {
    fn from(e: MongoError) -> Self {
        match e.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Unavailable(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RepositoryError {
    /// No document matched the title, or the patch changed nothing
    #[display(fmt = "Todo with title {} not found or not updated", title)]
    NotFound { title: String },

    /// The update went through but the item could not be read back
    #[display(fmt = "Todo {} was updated but could not be read back", title)]
    Unreadable { title: String },

    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

impl std::error::Error for RepositoryError {}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        RepositoryError::Store(e)
    }
}
