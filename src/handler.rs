use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    auth,
    error::AppError,
    model::CurrentUser,
    schema::{
        CreateItemSchema, CreateListSchema, DataResponse, HealthResponse, IdResponse, SignInSchema,
        SignUpSchema, StatusResponse, TokenResponse, UpdateItemSchema, UpdateListSchema,
    },
    todo_item, todo_list, AppState,
};

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type IdParam = Result<Path<i64>, PathRejection>;

fn parse_body<T>(body: JsonBody<T>) -> Result<T, AppError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected request body");
            Err(AppError::InvalidInput("invalid input body".to_string()))
        }
    }
}

fn parse_id(param: IdParam) -> Result<i64, AppError> {
    param
        .map(|Path(id)| id)
        .map_err(|_| AppError::InvalidInput("invalid id param".to_string()))
}

// Handler for the health check route, reporting whether the database answers
pub async fn health_checker_handler(State(data): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&data.db).await {
        Ok(_) => "connected",
        Err(err) => {
            tracing::warn!(error = %err, "health check could not reach the database");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    })
}

// Handler for creating a new user
pub async fn sign_up(
    State(data): State<Arc<AppState>>,
    body: JsonBody<SignUpSchema>,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(body)?;
    body.validate()?;

    let id = auth::sign_up(&data.db, &body.name, &body.username, &body.password).await?;

    Ok((StatusCode::OK, Json(IdResponse { id })))
}

// Handler for exchanging credentials for a token
pub async fn sign_in(
    State(data): State<Arc<AppState>>,
    body: JsonBody<SignInSchema>,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(body)?;
    body.validate()?;

    let token = auth::issue(&data.db, &data.tokens, &body.username, &body.password).await?;

    Ok(Json(TokenResponse { token }))
}

// Handler for creating a new Todo list
pub async fn create_list(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    body: JsonBody<CreateListSchema>,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(body)?;

    let id = todo_list::create(&data.db, user.user_id, &body).await?;

    Ok(Json(IdResponse { id }))
}

// Handler for getting all Todo lists of the current user
pub async fn get_all_lists(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let lists = todo_list::get_all(&data.db, user.user_id).await?;

    Ok(Json(DataResponse { data: lists }))
}

// Handler for getting a specific Todo list by ID
pub async fn get_list_by_id(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
) -> Result<impl IntoResponse, AppError> {
    let list_id = parse_id(id)?;

    let list = todo_list::get_by_id(&data.db, user.user_id, list_id).await?;

    Ok(Json(list))
}

// Handler for updating a Todo list by ID
pub async fn update_list(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
    body: JsonBody<UpdateListSchema>,
) -> Result<impl IntoResponse, AppError> {
    let list_id = parse_id(id)?;
    let body = parse_body(body)?;

    todo_list::update(&data.db, user.user_id, list_id, &body).await?;

    Ok(Json(StatusResponse::ok()))
}

// Handler for deleting a Todo list by ID
pub async fn delete_list(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
) -> Result<impl IntoResponse, AppError> {
    let list_id = parse_id(id)?;

    todo_list::delete(&data.db, user.user_id, list_id).await?;

    Ok(Json(StatusResponse::ok()))
}

// Handler for creating a new item in a Todo list
pub async fn create_item(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
    body: JsonBody<CreateItemSchema>,
) -> Result<impl IntoResponse, AppError> {
    let list_id = parse_id(id)?;
    let body = parse_body(body)?;

    let id = todo_item::create(&data.db, user.user_id, list_id, &body).await?;

    Ok(Json(IdResponse { id }))
}

// Handler for getting all items of a Todo list
pub async fn get_all_items(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
) -> Result<impl IntoResponse, AppError> {
    let list_id = parse_id(id)?;

    let items = todo_item::get_all(&data.db, user.user_id, list_id).await?;

    Ok(Json(items))
}

// Handler for getting a specific Todo item by ID
pub async fn get_item_by_id(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
) -> Result<impl IntoResponse, AppError> {
    let item_id = parse_id(id)?;

    let item = todo_item::get_by_id(&data.db, user.user_id, item_id).await?;

    Ok(Json(item))
}

// Handler for updating a Todo item by ID
pub async fn update_item(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
    body: JsonBody<UpdateItemSchema>,
) -> Result<impl IntoResponse, AppError> {
    let item_id = parse_id(id)?;
    let body = parse_body(body)?;

    todo_item::update(&data.db, user.user_id, item_id, &body).await?;

    Ok(Json(StatusResponse::ok()))
}

// Handler for deleting a Todo item by ID
pub async fn delete_item(
    State(data): State<Arc<AppState>>,
    user: CurrentUser,
    id: IdParam,
) -> Result<impl IntoResponse, AppError> {
    let item_id = parse_id(id)?;

    todo_item::delete(&data.db, user.user_id, item_id).await?;

    Ok(Json(StatusResponse::ok()))
}
