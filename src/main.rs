use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_lists_api::{config::Config, db, route::create_router, token::TokenService, AppState};

// Entry point of the application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_lists_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Connect to the database, creating it and its tables if needed
    let pool = db::connect(&config.database_url).await?;
    tracing::info!("Connection to the database is successful");

    let app_state = Arc::new(AppState {
        db: pool,
        tokens: TokenService::new(config.signing_key.as_bytes(), config.token_ttl),
    });

    // Configure CORS settings for the application
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    let app = create_router(app_state).layer(cors);

    tracing::info!("Server started successfully on {}", config.server_addr);

    axum::Server::bind(&config.server_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
