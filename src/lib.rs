use sqlx::SqlitePool;

use crate::token::TokenService;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod password;
pub mod route;
pub mod schema;
pub mod todo_item;
pub mod todo_list;
pub mod token;

// Struct representing the application state
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: TokenService,
}
