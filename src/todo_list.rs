//! Todo lists, scoped to their owner.
//!
//! Every statement joins through `users_lists` and filters on the caller's id, so a list owned
//! by someone else behaves exactly like one that does not exist.

use sqlx::{query, query_as, query_scalar, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::AppError,
    model::TodoList,
    schema::{CreateListSchema, UpdateListSchema},
};

const NOT_FOUND: AppError = AppError::NotFound("todo list");

const SELECT_OWNED: &str = "SELECT tl.id, tl.title, tl.description, ul.user_id AS owner_user_id \
     FROM todo_lists tl INNER JOIN users_lists ul ON ul.list_id = tl.id \
     WHERE ul.user_id = ?";

pub async fn create(
    db: &SqlitePool,
    user_id: i64,
    input: &CreateListSchema,
) -> Result<i64, AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    let mut tx = db.begin().await?;

    let list_id: i64 =
        query_scalar("INSERT INTO todo_lists (title, description) VALUES (?, ?) RETURNING id")
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

    query("INSERT INTO users_lists (user_id, list_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(user_id, list_id, "todo list created");
    Ok(list_id)
}

pub async fn get_all(db: &SqlitePool, user_id: i64) -> Result<Vec<TodoList>, AppError> {
    let lists = query_as::<_, TodoList>(&format!("{SELECT_OWNED} ORDER BY tl.id"))
        .bind(user_id)
        .fetch_all(db)
        .await?;
    Ok(lists)
}

pub async fn get_by_id(db: &SqlitePool, user_id: i64, list_id: i64) -> Result<TodoList, AppError> {
    query_as::<_, TodoList>(&format!("{SELECT_OWNED} AND tl.id = ?"))
        .bind(user_id)
        .bind(list_id)
        .fetch_optional(db)
        .await?
        .ok_or(NOT_FOUND)
}

/// Applies the fields present in `input`. An empty update only checks that the list is visible.
pub async fn update(
    db: &SqlitePool,
    user_id: i64,
    list_id: i64,
    input: &UpdateListSchema,
) -> Result<(), AppError> {
    input.validate()?;

    if input.is_empty() {
        return get_by_id(db, user_id, list_id).await.map(|_| ());
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE todo_lists SET ");
    let mut fields = builder.separated(", ");
    if let Some(title) = &input.title {
        fields.push("title = ").push_bind_unseparated(title.as_str());
    }
    if let Some(description) = &input.description {
        fields.push("description = ").push_bind_unseparated(description.as_str());
    }
    builder
        .push(" WHERE id = ")
        .push_bind(list_id)
        .push(" AND id IN (SELECT list_id FROM users_lists WHERE user_id = ")
        .push_bind(user_id)
        .push(")");

    let result = builder.build().execute(db).await?;
    if result.rows_affected() == 0 {
        return Err(NOT_FOUND);
    }
    Ok(())
}

/// Deletes the list together with every item in it.
pub async fn delete(db: &SqlitePool, user_id: i64, list_id: i64) -> Result<(), AppError> {
    let mut tx = db.begin().await?;

    let items = query(
        "DELETE FROM todo_items WHERE id IN (\
            SELECT li.item_id FROM lists_items li \
            INNER JOIN users_lists ul ON ul.list_id = li.list_id \
            WHERE li.list_id = ? AND ul.user_id = ?)",
    )
    .bind(list_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let lists = query(
        "DELETE FROM todo_lists WHERE id = ? \
         AND id IN (SELECT list_id FROM users_lists WHERE user_id = ?)",
    )
    .bind(list_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if lists.rows_affected() == 0 {
        // Dropping the transaction rolls it back.
        return Err(NOT_FOUND);
    }

    tx.commit().await?;

    tracing::debug!(user_id, list_id, items = items.rows_affected(), "todo list deleted");
    Ok(())
}
