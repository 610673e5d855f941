use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::dtos::todo::MessageDTO;
use super::errors::TodoApiError;
use crate::models::todo_model::{TodoItem, TodoPatch};
use crate::repository::TodoRepository;

/// Create a new todo
pub async fn create_todo(
    request_data: web::Json<Value>,
    repository: web::Data<TodoRepository>,
) -> Result<HttpResponse, TodoApiError> {
    let todo = TodoItem::validate(&request_data.into_inner())?;

    let inserted = repository.insert(todo).await?;

    Ok(HttpResponse::Ok().json(&inserted))
}

/// Api handler for getting all todos
pub async fn get_todos(
    repository: web::Data<TodoRepository>,
) -> Result<HttpResponse, TodoApiError> {
    let list = repository.find_all().await?;

    Ok(HttpResponse::Ok().json(&list))
}

pub async fn get_todo(
    title: web::Path<String>,
    repository: web::Data<TodoRepository>,
) -> Result<HttpResponse, TodoApiError> {
    let title = title.into_inner();

    match repository.find_by_title(&title).await? {
        Some(todo) => Ok(HttpResponse::Ok().json(&todo)),
        None => Err(TodoApiError::NotFound(title)),
    }
}

/// Apply a partial update to the todo with this title
pub async fn update_todo(
    title: web::Path<String>,
    request_data: web::Json<Value>,
    repository: web::Data<TodoRepository>,
) -> Result<HttpResponse, TodoApiError> {
    let title = title.into_inner();
    let patch = TodoPatch::validate(&request_data.into_inner())?;

    let updated = repository.update_by_title(&title, &patch).await?;

    Ok(HttpResponse::Ok().json(&updated))
}

/// Api to Delete a TODO
pub async fn delete_todo(
    title: web::Path<String>,
    repository: web::Data<TodoRepository>,
) -> Result<HttpResponse, TodoApiError> {
    let title = title.into_inner();

    if repository.delete_by_title(&title).await? {
        Ok(HttpResponse::Ok().json(MessageDTO::new(format!("Successfully deleted {}", title))))
    } else {
        Err(TodoApiError::NotFound(title))
    }
}

pub async fn delete_todos(
    repository: web::Data<TodoRepository>,
) -> Result<HttpResponse, TodoApiError> {
    if repository.delete_all().await? {
        Ok(HttpResponse::Ok().json(MessageDTO::new("Successfully deleted all todos")))
    } else {
        Err(TodoApiError::NothingToDelete)
    }
}
