use sqlx::{query_as, query_scalar, SqlitePool};

use crate::{
    error::AppError,
    model::User,
    password::{hash_password, verify_stored_password},
    token::TokenService,
};

// Key derivation runs on the blocking pool, not on the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| AppError::Internal(format!("password task failed: {err}")))
}

/// Creates a user and returns its id.
pub async fn sign_up(
    db: &SqlitePool,
    name: &str,
    username: &str,
    password: &str,
) -> Result<i64, AppError> {
    let password = password.to_owned();
    let password_hash = run_blocking(move || hash_password(&password)).await??;

    let result = query_scalar::<_, i64>(
        "INSERT INTO users (name, username, password_hash) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(username)
    .bind(password_hash)
    .fetch_one(db)
    .await;

    match result {
        Ok(id) => {
            tracing::info!(user_id = id, "user signed up");
            Ok(id)
        }
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Err(AppError::UsernameTaken),
        Err(err) => Err(err.into()),
    }
}

/// Exchanges a username and password for a signed token.
///
/// An unknown username and a wrong password produce the same `InvalidCredentials` error.
pub async fn issue(
    db: &SqlitePool,
    tokens: &TokenService,
    username: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = query_as::<_, User>(
        "SELECT id, name, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    // An unknown username still goes through a full verification against a dummy hash.
    let stored = user.as_ref().map(|user| user.password_hash.clone());
    let password = password.to_owned();
    let matches =
        run_blocking(move || verify_stored_password(&password, stored.as_deref())).await?;

    match user {
        Some(user) if matches => tokens.sign(user.id),
        _ => Err(AppError::InvalidCredentials),
    }
}
