use axum::{
    routing::{get, post},
    Router,
};
use brainstack_backend::{
    config::{get_config, init_config},
    middleware::cors::permissive_cors,
    routes,
    storage::store::Storage,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let storage = Storage::open(&config.data_file).await?;
    info!("Data file: {}", config.data_file);

    let app_state = AppState::new(storage);

    let auth_api = Router::new().route("/api/auth/login", post(routes::auth::login));

    let protected_api = Router::new()
        .route(
            "/api/decks",
            get(routes::decks::list_decks).post(routes::decks::create_deck),
        )
        .route(
            "/api/decks/:id",
            get(routes::decks::get_deck).delete(routes::decks::delete_deck),
        )
        .route("/api/decks/:id/cards", post(routes::decks::add_card))
        .route(
            "/api/cards/:id",
            axum::routing::delete(routes::decks::delete_card),
        )
        .route(
            "/api/study/:deck_id",
            post(routes::study::record_study_results),
        )
        .route("/api/progress", get(routes::study::get_progress))
        .route(
            "/api/practice-tests",
            get(routes::tests::list_tests).post(routes::tests::create_test),
        )
        .route(
            "/api/practice-tests/:id",
            get(routes::tests::get_test).delete(routes::tests::delete_test),
        )
        .route(
            "/api/practice-tests/:id/questions/:question_id/answer",
            post(routes::tests::submit_answer),
        )
        .route(
            "/api/practice-tests/:id/complete",
            post(routes::tests::complete_test),
        )
        .layer(axum::middleware::from_fn(
            brainstack_backend::middleware::auth::require_bearer_auth,
        ));

    let api = auth_api.merge(protected_api).layer(
        axum::middleware::from_fn_with_state(
            brainstack_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            brainstack_backend::middleware::rate_limit::rps_middleware,
        ),
    );

    info!("Serving frontend from: {}", config.static_dir);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .fallback_service(tower_http::services::ServeDir::new(&config.static_dir))
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
