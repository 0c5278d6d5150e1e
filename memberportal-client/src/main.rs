//! # Member Portal Client
//!
//! Prints the identity and organization of the configured session. Useful
//! to check `PORTAL_*` settings and tokens against a running gateway.
//!
//! ## Usage
//!
//! ```bash
//! PORTAL_BASE_URL=http://localhost:8080 PORTAL_AUTH_TOKEN=... cargo run -p memberportal-client
//! ```

use memberportal_client::PortalClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memberportal_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Member Portal Client v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let client = PortalClient::from_env()?;
    let session = client.session();

    match session.identity(false).await? {
        Some(account) => {
            tracing::info!(
                user = %account.user_name(),
                authorities = ?account.authorities,
                salesforce_id = ?account.salesforce_id,
                mfa_enabled = account.mfa_enabled,
                "Authenticated"
            );
            match session.current_member_data().await {
                Some(member) if member.is_loaded() => {
                    tracing::info!(member = ?member.name, consortium_lead = member.is_consortium_lead, "Organization");
                }
                _ => tracing::info!("No organization data"),
            }
        }
        None => tracing::warn!("Not authenticated"),
    }

    Ok(())
}
