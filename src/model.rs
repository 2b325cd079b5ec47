use serde::Serialize;

// Row in the users table; the password hash never leaves the service
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

// Data model representing a Todo list, with its owner resolved through users_lists
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub owner_user_id: i64,
}

// Data model representing a Todo item, with its parent resolved through lists_items
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
    pub parent_list_id: i64,
}

/// Identity resolved by the auth middleware for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
}
