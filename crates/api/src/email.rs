//! Invitation mail over SMTP.
//!
//! Delivery is optional: without `SMTP_HOST` in the environment no
//! [`InvitationMailer`] is constructed and invitations are created silently,
//! with the accept link only visible in the API response.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP-level failure: connection, STARTTLS, authentication.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Sender or recipient address did not parse.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@moim.local";
const DEFAULT_INVITE_BASE_URL: &str = "http://localhost:5173/invite";

/// SMTP settings plus the public base URL embedded in invite links.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Accept-page URL; the invite token is appended as `?token=`.
    pub invite_base_url: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `SMTP_HOST` is unset, which disables delivery.
    ///
    /// | Variable          | Required | Default                          |
    /// |-------------------|----------|----------------------------------|
    /// | `SMTP_HOST`       | yes      | —                                |
    /// | `SMTP_PORT`       | no       | `587`                            |
    /// | `SMTP_FROM`       | no       | `noreply@moim.local`             |
    /// | `SMTP_USER`       | no       | —                                |
    /// | `SMTP_PASSWORD`   | no       | —                                |
    /// | `INVITE_BASE_URL` | no       | `http://localhost:5173/invite`   |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            invite_base_url: std::env::var("INVITE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_INVITE_BASE_URL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// InvitationMailer
// ---------------------------------------------------------------------------

/// Sends plain-text invitation emails.
pub struct InvitationMailer {
    config: EmailConfig,
}

impl InvitationMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Deliver the invite link to `to_email`, naming the inviter.
    pub async fn send_invitation(
        &self,
        to_email: &str,
        inviter_name: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let link = format!("{}?token={}", self.config.invite_base_url, token);
        let body = format!(
            "{inviter_name}님이 회원님을 팀에 초대했습니다.\n\n\
             아래 링크에서 초대를 수락하고 계정을 만들어 주세요:\n{link}\n\n\
             이 초대에 짐작 가는 바가 없다면 이 메일을 무시하셔도 됩니다.",
        );

        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject("[모임] 팀 초대가 도착했습니다")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.transport()?.send(message).await?;

        tracing::info!(to = to_email, "Invitation email sent");
        Ok(())
    }

    /// STARTTLS transport for the configured relay, with credentials when
    /// both user and password are present.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
