//! Todo items. Ownership is transitive: an item is visible only through a list the caller owns.

use sqlx::{query, query_as, query_scalar, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::AppError,
    model::TodoItem,
    schema::{CreateItemSchema, UpdateItemSchema},
};

const ITEM_NOT_FOUND: AppError = AppError::NotFound("todo item");
const LIST_NOT_FOUND: AppError = AppError::NotFound("todo list");

const SELECT_OWNED: &str = "SELECT ti.id, ti.title, ti.description, ti.done, \
     li.list_id AS parent_list_id \
     FROM todo_items ti \
     INNER JOIN lists_items li ON li.item_id = ti.id \
     INNER JOIN users_lists ul ON ul.list_id = li.list_id \
     WHERE ul.user_id = ?";

const OWNED_ITEM_IDS: &str = "SELECT li.item_id FROM lists_items li \
     INNER JOIN users_lists ul ON ul.list_id = li.list_id \
     WHERE ul.user_id = ";

/// Adds an item to a list the caller owns.
///
/// The ownership check happens inside the same transaction as the insert, so an item can
/// never be attached to a list that was deleted or handed to someone else in the meantime.
pub async fn create(
    db: &SqlitePool,
    user_id: i64,
    list_id: i64,
    input: &CreateItemSchema,
) -> Result<i64, AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    let mut tx = db.begin().await?;

    let item_id: i64 =
        query_scalar("INSERT INTO todo_items (title, description) VALUES (?, ?) RETURNING id")
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

    let linked = query(
        "INSERT INTO lists_items (list_id, item_id) \
         SELECT ul.list_id, ? FROM users_lists ul WHERE ul.list_id = ? AND ul.user_id = ?",
    )
    .bind(item_id)
    .bind(list_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if linked.rows_affected() == 0 {
        return Err(LIST_NOT_FOUND);
    }

    tx.commit().await?;

    tracing::debug!(user_id, list_id, item_id, "todo item created");
    Ok(item_id)
}

pub async fn get_all(
    db: &SqlitePool,
    user_id: i64,
    list_id: i64,
) -> Result<Vec<TodoItem>, AppError> {
    let mut tx = db.begin().await?;

    let owned: Option<i64> =
        query_scalar("SELECT list_id FROM users_lists WHERE list_id = ? AND user_id = ?")
            .bind(list_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Err(LIST_NOT_FOUND);
    }

    let items = query_as::<_, TodoItem>(&format!("{SELECT_OWNED} AND li.list_id = ? ORDER BY ti.id"))
        .bind(user_id)
        .bind(list_id)
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(items)
}

pub async fn get_by_id(db: &SqlitePool, user_id: i64, item_id: i64) -> Result<TodoItem, AppError> {
    query_as::<_, TodoItem>(&format!("{SELECT_OWNED} AND ti.id = ?"))
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(db)
        .await?
        .ok_or(ITEM_NOT_FOUND)
}

/// Applies the fields present in `input`. An empty update only checks that the item is visible.
pub async fn update(
    db: &SqlitePool,
    user_id: i64,
    item_id: i64,
    input: &UpdateItemSchema,
) -> Result<(), AppError> {
    input.validate()?;

    if input.is_empty() {
        return get_by_id(db, user_id, item_id).await.map(|_| ());
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE todo_items SET ");
    let mut fields = builder.separated(", ");
    if let Some(title) = &input.title {
        fields.push("title = ").push_bind_unseparated(title.as_str());
    }
    if let Some(description) = &input.description {
        fields.push("description = ").push_bind_unseparated(description.as_str());
    }
    if let Some(done) = input.done {
        fields.push("done = ").push_bind_unseparated(done);
    }
    builder
        .push(" WHERE id = ")
        .push_bind(item_id)
        .push(" AND id IN (")
        .push(OWNED_ITEM_IDS)
        .push_bind(user_id)
        .push(")");

    let result = builder.build().execute(db).await?;
    if result.rows_affected() == 0 {
        return Err(ITEM_NOT_FOUND);
    }
    Ok(())
}

pub async fn delete(db: &SqlitePool, user_id: i64, item_id: i64) -> Result<(), AppError> {
    let result = query(&format!(
        "DELETE FROM todo_items WHERE id = ? AND id IN ({OWNED_ITEM_IDS}?)"
    ))
    .bind(item_id)
    .bind(user_id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ITEM_NOT_FOUND);
    }

    tracing::debug!(user_id, item_id, "todo item deleted");
    Ok(())
}
