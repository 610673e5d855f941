pub mod todo_model;
pub mod validation;
