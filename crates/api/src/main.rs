use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moim_api::ai::DiagnosticClient;
use moim_api::config::ServerConfig;
use moim_api::email::InvitationMailer;
use moim_api::router::build_app_router;
use moim_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pool = connect_database().await;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        diagnostics: build_diagnostics(&config),
        mailer: build_mailer(&config),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moim_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate. Any failure here aborts startup; running
/// without a working database would only defer the crash to the first
/// request.
async fn connect_database() -> sqlx::PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = moim_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    moim_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    moim_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready, migrations applied");
    pool
}

fn build_diagnostics(config: &ServerConfig) -> Option<Arc<DiagnosticClient>> {
    match config.ai.clone() {
        Some(ai) => {
            tracing::info!("AI diagnostics enabled");
            Some(Arc::new(DiagnosticClient::new(ai)))
        }
        None => {
            tracing::info!("AI diagnostics disabled (AI_API_URL not set)");
            None
        }
    }
}

fn build_mailer(config: &ServerConfig) -> Option<Arc<InvitationMailer>> {
    match config.email.clone() {
        Some(email) => {
            tracing::info!("Invitation mail enabled");
            Some(Arc::new(InvitationMailer::new(email)))
        }
        None => {
            tracing::info!("Invitation mail disabled (SMTP_HOST not set)");
            None
        }
    }
}

/// Resolve on SIGINT or, on Unix, SIGTERM, so both interactive stops and
/// process managers get a clean shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
