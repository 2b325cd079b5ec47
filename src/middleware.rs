use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{self, request::Parts, Extensions, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, model::CurrentUser, AppState};

/// Rejects the request unless it carries a valid bearer token; on success the resolved
/// `CurrentUser` is stored in the request extensions.
pub async fn mw_require_auth<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(AppError::MissingAuthHeader)?;

    let token = bearer_token(auth_header)?;

    let user_id = state.tokens.verify(token).map_err(|err| {
        tracing::debug!(reason = %err, "rejected auth token");
        err
    })?;

    request.extensions_mut().insert(CurrentUser { user_id });

    Ok(next.run(request).await)
}

fn bearer_token(header: &HeaderValue) -> Result<&str, AppError> {
    let value = header
        .to_str()
        .map_err(|_| AppError::MalformedAuthHeader)?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token),
        _ => Err(AppError::MalformedAuthHeader),
    }
}

/// Reads the user id the auth middleware attached to the request.
///
/// Missing means the route was registered outside the middleware, which is a server fault.
pub fn current_user_id(extensions: &Extensions) -> Result<i64, AppError> {
    extensions
        .get::<CurrentUser>()
        .map(|user| user.user_id)
        .ok_or(AppError::MissingAuth)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = current_user_id(&parts.extensions)?;
        Ok(CurrentUser { user_id })
    }
}
