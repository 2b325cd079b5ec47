use serde::{Deserialize, Serialize};

use crate::error::AppError;

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

// Struct representing the request body for signing up
#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpSchema {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl SignUpSchema {
    pub fn validate(&self) -> Result<(), AppError> {
        require("name", &self.name)?;
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

// Struct representing the request body for signing in
#[derive(Debug, Serialize, Deserialize)]
pub struct SignInSchema {
    pub username: String,
    pub password: String,
}

impl SignInSchema {
    pub fn validate(&self) -> Result<(), AppError> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

// Struct representing the request body for creating a new Todo list
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateListSchema {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update of a list. Absent fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateListSchema {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateListSchema {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            Some(title) => require("title", title),
            None => Ok(()),
        }
    }
}

// Struct representing the request body for creating a new Todo item
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemSchema {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update of an item. Absent fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateItemSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

impl UpdateItemSchema {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            Some(title) => require("title", title),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        StatusResponse {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
