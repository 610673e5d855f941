use serde::{Deserialize, Serialize};

/// Confirmation body for delete operations
#[derive(Debug, Deserialize, Serialize)]
pub struct MessageDTO {
    pub message: String,
}

impl MessageDTO {
    pub fn new<T: Into<String>>(message: T) -> Self {
        Self {
            message: message.into(),
        }
    }
}
