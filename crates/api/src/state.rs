use std::sync::Arc;

use crate::ai::DiagnosticClient;
use crate::config::ServerConfig;
use crate::email::InvitationMailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: moim_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// LLM client for diagnostic reports; `None` when not configured.
    pub diagnostics: Option<Arc<DiagnosticClient>>,
    /// SMTP mailer for invitations; `None` when not configured.
    pub mailer: Option<Arc<InvitationMailer>>,
}
